//! Workflow file ingestion.
//!
//! Shared workflows arrive as JSON metadata documents carrying the flat node
//! index alongside display fields. Descriptions are frequently HTML-formatted
//! by the publishing site, so [`WorkflowFile::pruned_description`] strips tags
//! before display.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{PackmuleError, Result};

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid html tag pattern"));

/// Metadata document for one shared workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowFile {
    /// Display name of the workflow.
    #[serde(default)]
    pub name: String,

    /// Publisher-supplied description, possibly containing HTML markup.
    #[serde(default)]
    pub description: String,

    /// The flat, delimiter-encoded node index (see [`crate::workflow::parser`]).
    #[serde(default)]
    pub nodes_index: Vec<String>,
}

impl WorkflowFile {
    /// Load a workflow document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PackmuleError::WorkflowNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| PackmuleError::WorkflowParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Description with HTML tags removed and whitespace collapsed.
    pub fn pruned_description(&self) -> String {
        let stripped = HTML_TAG.replace_all(&self.description, " ");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
