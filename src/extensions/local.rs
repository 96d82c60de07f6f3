//! Filesystem-backed extension manager.
//!
//! Installed extensions are the subdirectories of the package's
//! `custom_nodes/` directory: the directory name is the display title, and
//! the source-repository URL is recovered from `.git/config` when the
//! extension was installed as a git clone. Manifest catalogs come from
//! configured sources, local files or HTTP URLs, loaded in configuration
//! order.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use super::fetch::ManifestFetcher;
use super::manager::{ExtensionManager, InstalledExtension, InstalledPackage, ManifestSource};
use super::manifest::{ExtensionManifestEntry, ManifestCatalog};
use crate::error::{PackmuleError, Result};

/// Subdirectory of the package root that holds installed extensions.
const CUSTOM_NODES_DIR: &str = "custom_nodes";

static GIT_CONFIG_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*url\s*=\s*(\S+)"#).expect("valid git url pattern"));

/// Extension manager over a local package checkout.
#[derive(Debug, Clone, Default)]
pub struct LocalExtensionManager {
    manifest_sources: Vec<ManifestSource>,
}

impl LocalExtensionManager {
    /// Manager with the given manifest catalog sources, in priority order.
    pub fn new(manifest_sources: Vec<ManifestSource>) -> Self {
        Self { manifest_sources }
    }

    /// Read the first remote URL out of a cloned extension's git config.
    fn read_git_url(config_content: &str) -> Option<String> {
        GIT_CONFIG_URL
            .captures(config_content)
            .map(|caps| caps[1].to_string())
    }

    /// Load one catalog source into its document text.
    fn load_source(source: &ManifestSource) -> Result<String> {
        match source {
            ManifestSource::File(path) => {
                fs::read_to_string(path).map_err(|e| PackmuleError::ManifestSourceError {
                    source_name: source.name(),
                    message: e.to_string(),
                })
            }
            ManifestSource::Http(url) => ManifestFetcher::new().fetch(url).map_err(|e| {
                PackmuleError::ManifestSourceError {
                    source_name: source.name(),
                    message: e.to_string(),
                }
            }),
        }
    }
}

impl ExtensionManager for LocalExtensionManager {
    fn installed_extensions_lite(
        &self,
        package: &InstalledPackage,
    ) -> Result<Vec<InstalledExtension>> {
        if !package.root.is_dir() {
            return Err(PackmuleError::PackageNotFound {
                path: package.root.clone(),
            });
        }

        let nodes_dir = package.root.join(CUSTOM_NODES_DIR);
        if !nodes_dir.is_dir() {
            tracing::debug!(
                "Package '{}' has no {CUSTOM_NODES_DIR} directory; nothing installed",
                package.name
            );
            return Ok(Vec::new());
        }

        let mut extensions = Vec::new();
        let entries = fs::read_dir(&nodes_dir).map_err(|e| PackmuleError::ExtensionScanError {
            package: package.name.clone(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| PackmuleError::ExtensionScanError {
                package: package.name.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Some(title) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            // Disabled extensions keep their directory with a marker suffix.
            if title.ends_with(".disabled") {
                continue;
            }

            let git_url = fs::read_to_string(path.join(".git").join("config"))
                .ok()
                .and_then(|content| Self::read_git_url(&content));

            extensions.push(InstalledExtension::new(title, git_url));
        }

        extensions.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(extensions)
    }

    fn manifests(&self, _package: &InstalledPackage) -> Vec<ManifestSource> {
        self.manifest_sources.clone()
    }

    fn manifest_extensions_map(
        &self,
        manifests: &[ManifestSource],
    ) -> Result<Vec<(String, ExtensionManifestEntry)>> {
        let mut pairs = Vec::new();

        for source in manifests {
            let content = Self::load_source(source)?;
            let catalog = ManifestCatalog::parse(&content).map_err(|e| {
                PackmuleError::ManifestSourceError {
                    source_name: source.name(),
                    message: e.to_string(),
                }
            })?;

            tracing::debug!(
                entries = catalog.custom_nodes.len(),
                "Loaded manifest catalog from {}",
                source.name()
            );
            pairs.extend(catalog.url_entries());
        }

        Ok(pairs)
    }
}
