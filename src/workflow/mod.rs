//! Workflow node-index parsing and dependency reconciliation.
//!
//! A shared visual-workflow file carries a flat, delimiter-encoded "node
//! index" describing which custom-node packages (and which of their member
//! nodes) the workflow depends on. This module rebuilds the section structure
//! from that index and reconciles it against the locally installed extension
//! set.
//!
//! # Modules
//!
//! - [`model`] - Workflow file ingestion (JSON) and description pruning
//! - [`parser`] - Flat token sequence to ordered section list
//! - [`resolver`] - Installed/missing reconciliation against manifest catalogs
//! - [`section`] - The section data model

pub mod model;
pub mod parser;
pub mod resolver;
pub mod section;

pub use model::WorkflowFile;
pub use resolver::{ResolverLookups, WorkflowResolution, WorkflowResolver, DEFAULT_HOST_PACKAGE};
pub use section::CustomNodeSection;
