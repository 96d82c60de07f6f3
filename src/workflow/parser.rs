//! Section parser for the flat workflow node index.
//!
//! The upstream workflow format encodes a depth-2 tree as a flat token list.
//! Two reserved string values act as control tokens: `"."` terminates the
//! current section (and its first occurrence also marks the end of a
//! fixed-format prefix that carries no section data), and `","` terminates
//! the current section. Every other token is a section title when no section
//! is open, or a member node name when one is.
//!
//! The reserved-value contract is fixed by the upstream format and preserved
//! verbatim; control tokens are classified before titles and members, so a
//! node literally named `"."` or `","` cannot occur.

use super::resolver::ResolverLookups;
use super::section::CustomNodeSection;
use crate::extensions::ExtensionManifestEntry;

/// Ends the current section; its first occurrence also ends the index prefix.
const SECTION_END_DOT: &str = ".";

/// Ends the current section.
const SECTION_END_COMMA: &str = ",";

/// Result of parsing a node index: the ordered sections plus every section
/// that was unresolved locally but has a manifest catalog entry.
#[derive(Debug, Default)]
pub struct ParsedIndex {
    /// Sections in first-seen order, host section not yet filtered.
    pub sections: Vec<CustomNodeSection>,

    /// Manifest entries for missing sections, in section-encounter order.
    pub missing: Vec<ExtensionManifestEntry>,
}

fn is_section_end(token: &str) -> bool {
    token == SECTION_END_DOT || token == SECTION_END_COMMA
}

/// Parse a flat node index into ordered sections.
///
/// Strips everything up to and including the first `"."` token (the upstream
/// prefix), then runs a single left-to-right pass. `is_installed` and the
/// missing-entry lookup happen at section creation time, against `lookups`.
///
/// Degenerate inputs are not errors: an empty index, an index of only control
/// tokens, or an index with no prefix dot all parse to whatever sections they
/// actually contain (possibly none).
pub fn parse_node_index(tokens: &[String], lookups: &ResolverLookups) -> ParsedIndex {
    let body = match tokens.iter().position(|t| t == SECTION_END_DOT) {
        Some(dot) => &tokens[dot + 1..],
        None => tokens,
    };

    let mut parsed = ParsedIndex::default();
    let mut current: Option<usize> = None;

    for token in body {
        if is_section_end(token) {
            current = None;
            continue;
        }

        match current {
            None => {
                let is_installed = lookups.is_installed(token);
                if !is_installed {
                    if let Some(entry) = lookups.manifest_entry(token) {
                        parsed.missing.push(entry.clone());
                    }
                }
                parsed.sections.push(CustomNodeSection::new(token, is_installed));
                current = Some(parsed.sections.len() - 1);
            }
            Some(index) => {
                parsed.sections[index].children.push(token.clone());
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::ExtensionManifestEntry;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn entry(title: &str) -> ExtensionManifestEntry {
        ExtensionManifestEntry {
            title: title.to_string(),
            reference: format!("https://github.com/example/{title}"),
            files: vec![],
            install_type: None,
            description: None,
        }
    }

    #[test]
    fn empty_index_yields_no_sections() {
        let parsed = parse_node_index(&[], &ResolverLookups::empty());
        assert!(parsed.sections.is_empty());
        assert!(parsed.missing.is_empty());
    }

    #[test]
    fn only_control_tokens_yield_no_sections() {
        let parsed = parse_node_index(&tokens(&[".", ",", ".", ","]), &ResolverLookups::empty());
        assert!(parsed.sections.is_empty());
    }

    #[test]
    fn prefix_before_first_dot_is_discarded() {
        let full = tokens(&["v1", "junk", ".", "A", "n1"]);
        let stripped = tokens(&["A", "n1"]);
        let lookups = ResolverLookups::empty();
        assert_eq!(
            parse_node_index(&full, &lookups).sections,
            parse_node_index(&stripped, &lookups).sections
        );
    }

    #[test]
    fn index_without_dot_parses_unmodified() {
        let parsed = parse_node_index(&tokens(&["A", "n1", ",", "B"]), &ResolverLookups::empty());
        let titles: Vec<_> = parsed.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(parsed.sections[0].children, vec!["n1"]);
    }

    #[test]
    fn members_accumulate_in_order_under_open_section() {
        let parsed = parse_node_index(
            &tokens(&[".", "A", "n1", "n2", "n3"]),
            &ResolverLookups::empty(),
        );
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections[0].children, vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn consecutive_control_tokens_create_no_empty_sections() {
        let parsed = parse_node_index(
            &tokens(&[".", "A", "n1", ",", ",", ".", "B"]),
            &ResolverLookups::empty(),
        );
        let titles: Vec<_> = parsed.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn end_of_input_closes_open_section() {
        let parsed = parse_node_index(&tokens(&[".", "A", "n1"]), &ResolverLookups::empty());
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections[0].children, vec!["n1"]);
    }

    #[test]
    fn repeated_title_opens_a_new_section() {
        let parsed = parse_node_index(
            &tokens(&[".", "A", "n1", ",", "A", "n2"]),
            &ResolverLookups::empty(),
        );
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections[0].children, vec!["n1"]);
        assert_eq!(parsed.sections[1].children, vec!["n2"]);
    }

    #[test]
    fn installed_state_assigned_at_creation() {
        let lookups = ResolverLookups::for_tests(["A"], []);
        let parsed = parse_node_index(&tokens(&[".", "A", "n1", ",", "B"]), &lookups);
        assert!(parsed.sections[0].is_installed);
        assert!(!parsed.sections[1].is_installed);
    }

    #[test]
    fn missing_section_with_manifest_hit_is_accumulated() {
        let lookups = ResolverLookups::for_tests(["A"], [entry("B")]);
        let parsed = parse_node_index(&tokens(&[".", "A", ",", "B", "n1"]), &lookups);
        assert_eq!(parsed.missing.len(), 1);
        assert_eq!(parsed.missing[0].title, "B");
    }

    #[test]
    fn installed_section_never_accumulated_as_missing() {
        let lookups = ResolverLookups::for_tests(["B"], [entry("B")]);
        let parsed = parse_node_index(&tokens(&[".", "B", "n1"]), &lookups);
        assert!(parsed.missing.is_empty());
    }

    #[test]
    fn missing_section_without_manifest_hit_is_reported_but_not_resolvable() {
        let parsed = parse_node_index(&tokens(&[".", "B", "n1"]), &ResolverLookups::empty());
        assert_eq!(parsed.sections.len(), 1);
        assert!(!parsed.sections[0].is_installed);
        assert!(parsed.missing.is_empty());
    }
}
