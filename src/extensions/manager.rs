//! The extension-manager boundary consumed by the resolver.
//!
//! The resolver needs two facts about the local installation: which
//! extensions are installed (metadata only, the "lite" listing) and what the
//! manifest catalogs say is installable. Both come through the
//! [`ExtensionManager`] trait, so tests and alternative backends can stand in
//! for the filesystem implementation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::manifest::ExtensionManifestEntry;
use crate::error::Result;

/// Metadata-only record of one installed extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledExtension {
    /// Display title.
    pub title: String,

    /// Source-repository URL, when the installation retains one.
    pub git_repository_url: Option<String>,

    /// Manifest definition attached by repository-URL match, if any.
    pub definition: Option<ExtensionManifestEntry>,
}

impl InstalledExtension {
    /// Create a record with no attached definition.
    pub fn new(title: impl Into<String>, git_repository_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            git_repository_url,
            definition: None,
        }
    }

    /// Derive a copy with the manifest definition replaced.
    #[must_use]
    pub fn with_definition(self, definition: ExtensionManifestEntry) -> Self {
        Self {
            definition: Some(definition),
            ..self
        }
    }
}

/// An installed package instance (e.g. one ComfyUI checkout).
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    /// Display name of the package.
    pub name: String,

    /// Package root directory.
    pub root: PathBuf,
}

impl InstalledPackage {
    /// Create a package instance rooted at `root`.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// Handle to one manifest catalog, resolved lazily by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A catalog JSON file on disk.
    File(PathBuf),

    /// A catalog served over HTTP(S).
    Http(String),
}

impl ManifestSource {
    /// Short name used in error messages and logs.
    pub fn name(&self) -> String {
        match self {
            ManifestSource::File(path) => path.display().to_string(),
            ManifestSource::Http(url) => url.clone(),
        }
    }
}

/// Enumerates installed extensions and manifest catalogs for a package.
///
/// Both calls are one-shot, run sequentially before the parse pass, and are
/// the only I/O the resolution performs. Failures propagate to the caller;
/// an empty listing is a valid result, a failed call is not silently treated
/// as one.
pub trait ExtensionManager {
    /// List installed extensions, metadata only.
    fn installed_extensions_lite(
        &self,
        package: &InstalledPackage,
    ) -> Result<Vec<InstalledExtension>>;

    /// Manifest catalog handles configured for this package.
    fn manifests(&self, package: &InstalledPackage) -> Vec<ManifestSource>;

    /// Load the given catalogs into ordered (source-repository URL, entry)
    /// pairs. Order is catalog-handle order, then document order within a
    /// catalog; the resolver's first-wins deduplication depends on it.
    fn manifest_extensions_map(
        &self,
        manifests: &[ManifestSource],
    ) -> Result<Vec<(String, ExtensionManifestEntry)>>;
}

/// A manager paired with the package instance it should be queried about.
pub struct PackageContext<'a> {
    /// The extension manager collaborator.
    pub manager: &'a dyn ExtensionManager,

    /// The installed package to resolve against.
    pub package: &'a InstalledPackage,
}

impl<'a> PackageContext<'a> {
    /// Pair a manager with a package instance.
    pub fn new(manager: &'a dyn ExtensionManager, package: &'a InstalledPackage) -> Self {
        Self { manager, package }
    }
}

impl std::fmt::Debug for PackageContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageContext")
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

/// Convenience for tests and embedders: a manager over fixed in-memory data.
#[derive(Debug, Clone, Default)]
pub struct StaticExtensionManager {
    /// Installed extensions returned by the lite listing.
    pub installed: Vec<InstalledExtension>,

    /// Ordered (url, entry) pairs returned as the manifest map.
    pub manifest_entries: Vec<(String, ExtensionManifestEntry)>,
}

impl ExtensionManager for StaticExtensionManager {
    fn installed_extensions_lite(
        &self,
        _package: &InstalledPackage,
    ) -> Result<Vec<InstalledExtension>> {
        Ok(self.installed.clone())
    }

    fn manifests(&self, _package: &InstalledPackage) -> Vec<ManifestSource> {
        vec![ManifestSource::File(Path::new("static").to_path_buf())]
    }

    fn manifest_extensions_map(
        &self,
        _manifests: &[ManifestSource],
    ) -> Result<Vec<(String, ExtensionManifestEntry)>> {
        Ok(self.manifest_entries.clone())
    }
}
