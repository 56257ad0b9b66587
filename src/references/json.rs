//! JSON export payload for reference lists.

use serde::Serialize;

use crate::text::strip_arxiv_suffix;

use super::ReferenceEntry;

/// The JSON export object: `{arxivId, title, count, references}` with stable
/// key order as declared.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesExport {
    /// The paper the references belong to.
    pub arxiv_id: String,
    /// Paper title with any trailing `- arXiv...` suffix stripped.
    pub title: String,
    /// Number of references; always equals `references.len()`.
    pub count: usize,
    /// The normalized reference entries.
    pub references: Vec<ReferenceEntry>,
}

impl ReferencesExport {
    /// Builds the export payload from a raw title and entries.
    #[must_use]
    pub fn new(
        paper_id: impl Into<String>,
        raw_title: &str,
        references: Vec<ReferenceEntry>,
    ) -> Self {
        Self {
            arxiv_id: paper_id.into(),
            title: strip_arxiv_suffix(raw_title),
            count: references.len(),
            references,
        }
    }
}

/// Renders the export payload as pretty-printed JSON.
///
/// # Errors
///
/// Returns the underlying `serde_json` error on serialization failure.
pub fn render_references_json(export: &ReferencesExport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(export)
}
