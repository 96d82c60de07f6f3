//! Installed-extension enumeration and manifest catalogs.
//!
//! The resolver never touches the filesystem or the network itself; it
//! consumes the [`ExtensionManager`] boundary defined here. The one concrete
//! implementation, [`LocalExtensionManager`], scans an installed package's
//! `custom_nodes/` directory and loads manifest catalogs from local files or
//! HTTP sources.
//!
//! # Modules
//!
//! - [`manager`] - The `ExtensionManager` trait and installed-extension types
//! - [`manifest`] - Manifest catalog entries and catalog parsing
//! - [`local`] - Filesystem-backed manager implementation
//! - [`fetch`] - HTTP fetching for remote manifest catalogs

pub mod fetch;
pub mod local;
pub mod manager;
pub mod manifest;

pub use manager::{
    ExtensionManager, InstalledExtension, InstalledPackage, ManifestSource, PackageContext,
};
pub use manifest::{ExtensionManifestEntry, ManifestCatalog};

pub use local::LocalExtensionManager;
