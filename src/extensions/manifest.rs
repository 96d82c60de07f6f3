//! Manifest catalog entries.
//!
//! A manifest catalog is a JSON document listing installable custom-node
//! packages, in the shape published by the ComfyUI-Manager node list:
//! `{"custom_nodes": [{"title": ..., "reference": ..., "files": [...]}]}`.
//! The `reference` field is the package's source-repository URL and serves
//! as the join key against installed extensions.

use serde::{Deserialize, Serialize};

/// One installable package described by a manifest catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifestEntry {
    /// Display title; the resolver's lookup key after deduplication.
    pub title: String,

    /// Source-repository URL. Join key against installed extensions.
    pub reference: String,

    /// Files or repositories to fetch on install.
    #[serde(default)]
    pub files: Vec<String>,

    /// Installation method, e.g. `git-clone` or `copy`.
    #[serde(default)]
    pub install_type: Option<String>,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A parsed manifest catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestCatalog {
    /// Catalog entries in document order.
    #[serde(default)]
    pub custom_nodes: Vec<ExtensionManifestEntry>,
}

impl ManifestCatalog {
    /// Parse a catalog from its JSON text.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Enumerate entries as (source-repository URL, entry) pairs, preserving
    /// document order. Document order is what makes the resolver's first-wins
    /// title deduplication deterministic.
    pub fn url_entries(&self) -> impl Iterator<Item = (String, ExtensionManifestEntry)> + '_ {
        self.custom_nodes
            .iter()
            .map(|entry| (entry.reference.clone(), entry.clone()))
    }
}
