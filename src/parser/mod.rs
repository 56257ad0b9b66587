//! arXiv identifier extraction and page-title parsing.
//!
//! The identifier grammar is `YYMM.NNNNN[vV]`. Extraction from a URL tries
//! structured `abs`/`pdf` paths before falling back to a bare identifier
//! match, so unrelated digits elsewhere in a URL cannot shadow a real path
//! segment.

mod error;

pub use error::ParseError;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::text::compile_static_regex;

/// URL patterns tried in priority order; the first capture wins.
static ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // Standard abs/pdf path (with optional .pdf)
        compile_static_regex(r"(?i)arxiv\.org/(?:abs|pdf)/([^/?#]+)(?:\.pdf)?"),
        // Same, anchored without extension
        compile_static_regex(r"(?i)arxiv\.org/(?:abs|pdf)/([^/?#]+)$"),
        // Bare identifier anywhere in the string
        compile_static_regex(r"(?i)([0-9]{4}\.[0-9]{4,5}(?:v[0-9]+)?)"),
    ]
});

static HEAD_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)^\s*\[([^\]]+)\]\s*(.+?)\s*(?:-\s*arXiv.*)?$"));

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)^\s*[0-9]{4}\.[0-9]{4,5}(?:v[0-9]+)?\s*$"));

static PDF_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"(?i)\.pdf\s*$"));

/// A page title split into its bracketed identifier and title text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Identifier from a leading `[ID]` prefix, when present.
    pub id: Option<String>,
    /// The remaining title text.
    pub title: String,
}

/// Extracts a paper identifier from a URL string.
///
/// Returns the first match with any `.pdf` suffix stripped, or `None` when
/// no pattern matches.
#[must_use]
pub fn extract_paper_id(url: &str) -> Option<String> {
    for pattern in ID_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url)
            && let Some(id) = caps.get(1)
        {
            let paper_id = strip_pdf_suffix(id.as_str());
            debug!(paper_id = %paper_id, url = %url, "extracted paper id");
            return Some(paper_id.to_string());
        }
    }
    None
}

/// Splits a page title of the form `[ID] Title text - arXiv...`.
///
/// Unbracketed input yields `{id: None, title: input}`. An identifier found
/// here takes priority over one derived from the URL; the page is
/// authoritative since a URL can be ambiguous across versions and mirrors.
#[must_use]
pub fn parse_head_title(head_title: &str) -> ParsedTitle {
    if let Some(caps) = HEAD_TITLE_RE.captures(head_title)
        && let (Some(id), Some(title)) = (caps.get(1), caps.get(2))
    {
        return ParsedTitle {
            id: Some(id.as_str().to_string()),
            title: title.as_str().to_string(),
        };
    }
    ParsedTitle {
        id: None,
        title: head_title.to_string(),
    }
}

/// Returns true if the value is nothing but an identifier.
#[must_use]
pub fn is_bare_identifier(value: &str) -> bool {
    BARE_ID_RE.is_match(value)
}

/// Returns true if the value ends in `.pdf` (ignoring trailing whitespace).
#[must_use]
pub fn ends_with_pdf(value: &str) -> bool {
    PDF_TAIL_RE.is_match(value)
}

fn strip_pdf_suffix(value: &str) -> &str {
    match value.len().checked_sub(4).and_then(|idx| value.get(idx..)) {
        Some(tail) if tail.eq_ignore_ascii_case(".pdf") => &value[..value.len() - 4],
        _ => value,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_paper_id_from_abs_url() {
        assert_eq!(
            extract_paper_id("https://arxiv.org/abs/2508.14825").as_deref(),
            Some("2508.14825")
        );
    }

    #[test]
    fn test_extract_paper_id_from_pdf_url_strips_extension() {
        assert_eq!(
            extract_paper_id("https://arxiv.org/pdf/2508.14825.pdf").as_deref(),
            Some("2508.14825")
        );
    }

    #[test]
    fn test_extract_paper_id_keeps_version_suffix() {
        assert_eq!(
            extract_paper_id("https://arxiv.org/abs/2508.14825v2").as_deref(),
            Some("2508.14825v2")
        );
    }

    #[test]
    fn test_extract_paper_id_ignores_query_and_fragment() {
        assert_eq!(
            extract_paper_id("https://arxiv.org/abs/2508.14825?context=cs.LG#body").as_deref(),
            Some("2508.14825")
        );
    }

    #[test]
    fn test_extract_paper_id_bare_identifier_fallback() {
        assert_eq!(
            extract_paper_id("see 2508.14825v1 for details").as_deref(),
            Some("2508.14825v1")
        );
    }

    #[test]
    fn test_extract_paper_id_prefers_path_over_bare_digits() {
        // The host mirror path must win over earlier bare digits in the URL
        assert_eq!(
            extract_paper_id("https://mirror.example/1234.5678/arxiv.org/abs/2508.14825")
                .as_deref(),
            Some("2508.14825")
        );
    }

    #[test]
    fn test_extract_paper_id_none_for_unrelated_url() {
        assert_eq!(extract_paper_id("https://example.com/papers/abc"), None);
    }

    #[test]
    fn test_parse_head_title_bracketed() {
        let parsed = parse_head_title("[2508.14825] Some Title - arXiv");
        assert_eq!(parsed.id.as_deref(), Some("2508.14825"));
        assert_eq!(parsed.title, "Some Title");
    }

    #[test]
    fn test_parse_head_title_bracketed_without_suffix() {
        let parsed = parse_head_title("[2508.14825] Some Title");
        assert_eq!(parsed.id.as_deref(), Some("2508.14825"));
        assert_eq!(parsed.title, "Some Title");
    }

    #[test]
    fn test_parse_head_title_unbracketed_passthrough() {
        let parsed = parse_head_title("Some Plain Title");
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.title, "Some Plain Title");
    }

    #[test]
    fn test_parse_head_title_keeps_internal_dash() {
        let parsed = parse_head_title("[2508.14825] Encoder-Decoder Models - arXiv.org");
        assert_eq!(parsed.title, "Encoder-Decoder Models");
    }

    #[test]
    fn test_is_bare_identifier() {
        assert!(is_bare_identifier("2508.14825"));
        assert!(is_bare_identifier(" 2508.14825v3 "));
        assert!(!is_bare_identifier("2508.14825 Some Title"));
        assert!(!is_bare_identifier(""));
    }

    #[test]
    fn test_ends_with_pdf() {
        assert!(ends_with_pdf("2508.14825.pdf"));
        assert!(ends_with_pdf("paper.PDF  "));
        assert!(!ends_with_pdf("paper.pdf.txt"));
    }
}
