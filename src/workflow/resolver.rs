//! Installation reconciliation for parsed workflow node indexes.
//!
//! Builds the two lookup structures the parser consults (the installed-name
//! set and the title-keyed manifest map) from an optional installed-package
//! context, runs the parse, and filters out the host package's own
//! pseudo-section. The collaborator calls are the only I/O on this path and
//! their failures propagate; an absent context is a distinct, valid state
//! that yields empty lookups.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::parser::parse_node_index;
use super::section::CustomNodeSection;
use crate::error::Result;
use crate::extensions::{ExtensionManifestEntry, PackageContext};

/// The hosting runtime package always appears as a pseudo-dependency in the
/// node index but is never installable. Overridable via
/// [`WorkflowResolver::with_host_package`].
pub const DEFAULT_HOST_PACKAGE: &str = "ComfyUI";

/// Lookup structures consulted by the parser at section-creation time.
#[derive(Debug, Default)]
pub struct ResolverLookups {
    installed_names: HashSet<String>,
    manifest_by_title: HashMap<String, ExtensionManifestEntry>,
}

impl ResolverLookups {
    /// Empty lookups: every section parses as not-installed and nothing is
    /// resolvable to a manifest entry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build lookups by querying the extension-manager collaborator.
    ///
    /// The installed listing and the manifest map are fetched sequentially.
    /// Installed records whose repository URL matches a manifest entry get
    /// that entry attached as their definition (derived copies, the fetched
    /// records are not mutated). Manifest entries are deduplicated by display
    /// title, first occurrence wins, in catalog-enumeration order.
    pub fn from_context(context: &PackageContext<'_>) -> Result<Self> {
        let installed = context.manager.installed_extensions_lite(context.package)?;

        let manifests = context.manager.manifests(context.package);
        let url_entries = context.manager.manifest_extensions_map(&manifests)?;

        let by_url: HashMap<&str, &ExtensionManifestEntry> = url_entries
            .iter()
            .map(|(url, entry)| (url.as_str(), entry))
            .collect();

        let installed: Vec<_> = installed
            .into_iter()
            .map(|ext| match ext.git_repository_url.as_deref() {
                Some(url) => match by_url.get(url) {
                    Some(entry) => ext.with_definition((*entry).clone()),
                    None => ext,
                },
                None => ext,
            })
            .collect();

        let mut manifest_by_title = HashMap::new();
        for (_, entry) in &url_entries {
            // First occurrence of a title wins; later ones are dropped.
            manifest_by_title
                .entry(entry.title.clone())
                .or_insert_with(|| entry.clone());
        }

        let installed_names: HashSet<String> =
            installed.into_iter().map(|ext| ext.title).collect();

        tracing::debug!(
            installed = installed_names.len(),
            manifest_titles = manifest_by_title.len(),
            "Built resolver lookups for package '{}'",
            context.package.name
        );

        Ok(Self {
            installed_names,
            manifest_by_title,
        })
    }

    /// Whether the title is in the installed-name set.
    pub fn is_installed(&self, title: &str) -> bool {
        self.installed_names.contains(title)
    }

    /// Manifest entry for the title, if the catalogs know it.
    pub fn manifest_entry(&self, title: &str) -> Option<&ExtensionManifestEntry> {
        self.manifest_by_title.get(title)
    }

    #[cfg(test)]
    pub(crate) fn for_tests<'a>(
        installed: impl IntoIterator<Item = &'a str>,
        entries: impl IntoIterator<Item = ExtensionManifestEntry>,
    ) -> Self {
        Self {
            installed_names: installed.into_iter().map(String::from).collect(),
            manifest_by_title: entries
                .into_iter()
                .map(|entry| (entry.title.clone(), entry))
                .collect(),
        }
    }
}

/// The resolver's output, handed off whole to the presentation layer.
#[derive(Debug, Default, Serialize)]
pub struct WorkflowResolution {
    /// Sections in first-seen order, host section removed.
    pub sections: Vec<CustomNodeSection>,

    /// Manifest entries for unresolved sections, in section-encounter order.
    /// Exposed for a subsequent bulk-install action.
    pub missing: Vec<ExtensionManifestEntry>,
}

impl WorkflowResolution {
    /// Count of sections not satisfied by the current installation,
    /// including ones with no manifest entry to install from.
    pub fn unresolved_count(&self) -> usize {
        self.sections.iter().filter(|s| !s.is_installed).count()
    }
}

/// Reconciles a workflow node index against a local installation.
#[derive(Debug, Clone)]
pub struct WorkflowResolver {
    host_package: String,
}

impl Default for WorkflowResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowResolver {
    /// Resolver with the default host package name.
    pub fn new() -> Self {
        Self {
            host_package: DEFAULT_HOST_PACKAGE.to_string(),
        }
    }

    /// Override the host package name filtered from the output.
    #[must_use]
    pub fn with_host_package(mut self, name: impl Into<String>) -> Self {
        self.host_package = name.into();
        self
    }

    /// Resolve the node index against the installation described by
    /// `context`. With no context, sections are still parsed and reported
    /// but every one is marked not-installed and nothing lands in `missing`.
    pub fn resolve(
        &self,
        tokens: &[String],
        context: Option<&PackageContext<'_>>,
    ) -> Result<WorkflowResolution> {
        let lookups = match context {
            Some(context) => ResolverLookups::from_context(context)?,
            None => ResolverLookups::empty(),
        };

        let mut parsed = parse_node_index(tokens, &lookups);
        parsed.sections.retain(|s| s.title != self.host_package);

        Ok(WorkflowResolution {
            sections: parsed.sections,
            missing: parsed.missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::manager::StaticExtensionManager;
    use crate::extensions::{InstalledExtension, InstalledPackage};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn entry(title: &str, reference: &str) -> ExtensionManifestEntry {
        ExtensionManifestEntry {
            title: title.into(),
            reference: reference.into(),
            files: vec![reference.into()],
            install_type: Some("git-clone".into()),
            description: None,
        }
    }

    fn package() -> InstalledPackage {
        InstalledPackage::new("ComfyUI", "/opt/comfy")
    }

    #[test]
    fn no_context_reports_sections_as_unresolved() {
        let resolver = WorkflowResolver::new();
        let resolution = resolver
            .resolve(&tokens(&[".", "A", "n1", ",", "B"]), None)
            .unwrap();

        assert_eq!(resolution.sections.len(), 2);
        assert!(resolution.sections.iter().all(|s| !s.is_installed));
        assert!(resolution.missing.is_empty());
        assert_eq!(resolution.unresolved_count(), 2);
    }

    #[test]
    fn host_section_filtered_regardless_of_position() {
        let resolver = WorkflowResolver::new();
        for index in [
            tokens(&[".", "ComfyUI", "n0", ",", "A"]),
            tokens(&[".", "A", ",", "ComfyUI", "n0"]),
        ] {
            let resolution = resolver.resolve(&index, None).unwrap();
            let titles: Vec<_> = resolution.sections.iter().map(|s| s.title.as_str()).collect();
            assert_eq!(titles, vec!["A"]);
        }
    }

    #[test]
    fn custom_host_package_name_is_respected() {
        let resolver = WorkflowResolver::new().with_host_package("ComfyUI-Fork");
        let resolution = resolver
            .resolve(&tokens(&[".", "ComfyUI-Fork", ",", "ComfyUI"]), None)
            .unwrap();
        let titles: Vec<_> = resolution.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["ComfyUI"]);
    }

    #[test]
    fn installed_and_missing_partition() {
        let manager = StaticExtensionManager {
            installed: vec![InstalledExtension::new("A", Some("https://a.example".into()))],
            manifest_entries: vec![
                ("https://a.example".into(), entry("A", "https://a.example")),
                ("https://b.example".into(), entry("B", "https://b.example")),
            ],
        };
        let pkg = package();
        let context = PackageContext::new(&manager, &pkg);

        let resolution = WorkflowResolver::new()
            .resolve(
                &tokens(&[".", "ComfyUI", ",", "A", "n1", "n2", ",", "B", "n3", "."]),
                Some(&context),
            )
            .unwrap();

        assert_eq!(resolution.sections.len(), 2);
        assert!(resolution.sections[0].is_installed);
        assert_eq!(resolution.sections[0].children, vec!["n1", "n2"]);
        assert!(!resolution.sections[1].is_installed);
        assert_eq!(resolution.sections[1].children, vec!["n3"]);

        assert_eq!(resolution.missing.len(), 1);
        assert_eq!(resolution.missing[0].title, "B");
    }

    #[test]
    fn missing_without_manifest_hit_stays_out_of_missing_list() {
        let manager = StaticExtensionManager::default();
        let pkg = package();
        let context = PackageContext::new(&manager, &pkg);

        let resolution = WorkflowResolver::new()
            .resolve(&tokens(&[".", "B", "n3"]), Some(&context))
            .unwrap();

        assert_eq!(resolution.sections.len(), 1);
        assert!(!resolution.sections[0].is_installed);
        assert!(resolution.missing.is_empty());
    }

    #[test]
    fn duplicate_manifest_titles_resolve_first_wins() {
        let manager = StaticExtensionManager {
            installed: vec![],
            manifest_entries: vec![
                ("https://first.example".into(), entry("B", "https://first.example")),
                ("https://second.example".into(), entry("B", "https://second.example")),
            ],
        };
        let pkg = package();
        let context = PackageContext::new(&manager, &pkg);

        let resolution = WorkflowResolver::new()
            .resolve(&tokens(&[".", "B"]), Some(&context))
            .unwrap();

        assert_eq!(resolution.missing.len(), 1);
        assert_eq!(resolution.missing[0].reference, "https://first.example");
    }

    #[test]
    fn titles_not_separated_from_host_become_its_children_and_vanish() {
        // No control token between "ComfyUI" and "A": "A" and the node names
        // are children of the host section and disappear with it.
        let manager = StaticExtensionManager {
            installed: vec![InstalledExtension::new("A", None)],
            manifest_entries: vec![],
        };
        let pkg = package();
        let context = PackageContext::new(&manager, &pkg);

        let resolution = WorkflowResolver::new()
            .resolve(
                &tokens(&[".", "ComfyUI", "A", "n1", "n2", ",", "B", "n3", "."]),
                Some(&context),
            )
            .unwrap();

        assert_eq!(resolution.sections.len(), 1);
        assert_eq!(resolution.sections[0].title, "B");
        assert_eq!(resolution.sections[0].children, vec!["n3"]);
        assert!(!resolution.sections[0].is_installed);
        assert!(resolution.missing.is_empty());
    }

    #[test]
    fn section_order_matches_first_seen_order() {
        let resolver = WorkflowResolver::new();
        let resolution = resolver
            .resolve(&tokens(&[".", "C", ",", "A", "n", ",", "B"]), None)
            .unwrap();
        let titles: Vec<_> = resolution.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn empty_index_yields_empty_resolution() {
        let resolution = WorkflowResolver::new().resolve(&[], None).unwrap();
        assert!(resolution.sections.is_empty());
        assert!(resolution.missing.is_empty());
    }
}
