//! Python package-manager invocation helpers.
//!
//! - [`pip`] - Immutable pip-install argument builder with user-override
//!   resolution

pub mod pip;

pub use pip::{PipArg, PipInstallArgs, PipPackageSpecifier, VersionConstraint};
