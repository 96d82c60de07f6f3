//! Section data model for parsed workflow node indexes.

use serde::Serialize;

/// One custom-node package referenced by a workflow.
///
/// Sections are created by the parser in first-seen order. `is_installed` is
/// fixed when the section is created and never recomputed; `children` collects
/// the member node names in the order they appear in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomNodeSection {
    /// Display title of the package (also the parser's identity key).
    pub title: String,

    /// Member node names belonging to this package; may be empty.
    pub children: Vec<String>,

    /// Whether the package was found in the installed-name set at parse time.
    pub is_installed: bool,
}

impl CustomNodeSection {
    /// Create an empty section with the given title and installed state.
    pub fn new(title: impl Into<String>, is_installed: bool) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
            is_installed,
        }
    }
}
