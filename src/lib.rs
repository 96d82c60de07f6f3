//! Packmule - Custom-node dependency resolver for shared visual workflows.
//!
//! Shared workflow files (ComfyUI-style) carry a flat, delimiter-encoded
//! index of the custom-node packages they depend on. Packmule rebuilds the
//! section structure from that index, reconciles it against a locally
//! installed extension set, and reports which dependencies are missing and
//! where to install them from.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`extensions`] - Installed-extension enumeration and manifest catalogs
//! - [`python`] - Pip invocation argument building and override resolution
//! - [`workflow`] - Node-index parsing and installation reconciliation
//!
//! # Example
//!
//! ```
//! use packmule::workflow::WorkflowResolver;
//!
//! let tokens: Vec<String> = [".", "ComfyUI", ",", "A", "n1", ",", "B", "n2"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! // Without an installed-package context, sections are still parsed but
//! // reported as unresolved.
//! let resolution = WorkflowResolver::new().resolve(&tokens, None).unwrap();
//! assert_eq!(resolution.sections.len(), 2);
//! assert_eq!(resolution.unresolved_count(), 2);
//! ```

pub mod cli;
pub mod error;
pub mod extensions;
pub mod python;
pub mod workflow;

pub use error::{PackmuleError, Result};
