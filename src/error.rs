//! Error types for Packmule operations.
//!
//! This module defines [`PackmuleError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PackmuleError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PackmuleError::Other`) for unexpected errors
//! - Collaborator failures (manifest sources, extension scans) surface to the
//!   caller instead of degrading into a partially-populated resolution

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Packmule operations.
#[derive(Debug, Error)]
pub enum PackmuleError {
    /// Workflow file not found at the given location.
    #[error("Workflow file not found: {path}")]
    WorkflowNotFound { path: PathBuf },

    /// Failed to parse a workflow file.
    #[error("Failed to parse workflow at {path}: {message}")]
    WorkflowParseError { path: PathBuf, message: String },

    /// A manifest source could not be loaded or parsed.
    #[error("Failed to load manifest source '{source_name}': {message}")]
    ManifestSourceError {
        source_name: String,
        message: String,
    },

    /// Scanning the installed package for extensions failed.
    #[error("Failed to scan extensions for package '{package}': {message}")]
    ExtensionScanError { package: String, message: String },

    /// The installed package root does not exist or is not a directory.
    #[error("Package directory not found: {path}")]
    PackageNotFound { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Packmule operations.
pub type Result<T> = std::result::Result<T, PackmuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_not_found_displays_path() {
        let err = PackmuleError::WorkflowNotFound {
            path: PathBuf::from("/tmp/workflow.json"),
        };
        assert!(err.to_string().contains("/tmp/workflow.json"));
    }

    #[test]
    fn workflow_parse_error_displays_path_and_message() {
        let err = PackmuleError::WorkflowParseError {
            path: PathBuf::from("/w.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/w.json"));
        assert!(msg.contains("expected value at line 1"));
    }

    #[test]
    fn manifest_source_error_displays_source_and_message() {
        let err = PackmuleError::ManifestSourceError {
            source_name: "custom-node-list.json".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("custom-node-list.json"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn extension_scan_error_displays_package_and_message() {
        let err = PackmuleError::ExtensionScanError {
            package: "ComfyUI".into(),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ComfyUI"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn package_not_found_displays_path() {
        let err = PackmuleError::PackageNotFound {
            path: PathBuf::from("/opt/comfy"),
        };
        assert!(err.to_string().contains("/opt/comfy"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PackmuleError = io_err.into();
        assert!(matches!(err, PackmuleError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PackmuleError::PackageNotFound {
                path: PathBuf::from("/missing"),
            })
        }
        assert!(returns_error().is_err());
    }
}
