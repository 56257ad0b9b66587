//! Title and paper-info scraping from arXiv abstract pages.
//!
//! Extraction rules are tried in order: the `citation_title` meta tag, the
//! `<h1 class="...title...">` heading (stripping inner tags and a leading
//! `Title:` label), then the document `<title>` with its trailing
//! `- arXiv...` suffix removed.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use crate::http_client::build_http_client;
use crate::text::{
    collapse_whitespace, compile_static_regex, decode_entities, normalize_scraped_text,
    strip_arxiv_suffix,
};

use super::{ResolveError, TitleSource};

const DEFAULT_ABS_BASE_URL: &str = "https://arxiv.org";

/// Abstract preview length in the paper-info probe.
const ABSTRACT_PREVIEW_CHARS: usize = 200;

static CITATION_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?i)<meta[^>]+name=["']citation_title["'][^>]*content=["']([^"']+)["']"#,
    )
});

static H1_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)<h1[^>]*class=["'][^"']*title[^"']*["'][^>]*>(.*?)</h1>"#)
});

static DOC_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<title>(.*?)</title>"));

static AUTHORS_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)<div[^>]*class=["'][^"']*authors[^"']*["'][^>]*>(.*?)</div>"#)
});

static ABSTRACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<blockquote[^>]*class=["'][^"']*abstract[^"']*["'][^>]*>(.*?)</blockquote>"#,
    )
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"<[^>]+>"));

static TITLE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)\bTitle:\s*"));

static AUTHORS_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)^Authors:\s*"));

static ABSTRACT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)^Abstract:\s*"));

/// Metadata extracted from an abstract page.
#[derive(Debug, Clone, Serialize)]
pub struct PaperInfo {
    /// Paper title, when any extraction rule matched.
    pub title: Option<String>,
    /// Author list with the `Authors:` label stripped.
    pub authors: Option<String>,
    /// Abstract preview, truncated to 200 characters.
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// The abstract page URL the info was scraped from.
    pub url: String,
}

/// Title source backed by the abstract HTML page.
pub struct AbsPageSource {
    client: Client,
    base_url: String,
}

impl AbsPageSource {
    /// Creates a source against the public arXiv site.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Self::build(DEFAULT_ABS_BASE_URL.to_string())
    }

    /// Creates a source with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if HTTP client construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ResolveError> {
        Self::build(base_url.into())
    }

    fn build(base_url: String) -> Result<Self, ResolveError> {
        let client = build_http_client().map_err(ResolveError::client_construction)?;
        Ok(Self { client, base_url })
    }

    async fn fetch_page(&self, paper_id: &str) -> Result<Option<String>, ResolveError> {
        let url = format!("{}/abs/{paper_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::fetch_failed(paper_id, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "abstract page not OK");
            return Ok(None);
        }

        let html = response
            .text()
            .await
            .map_err(|e| ResolveError::fetch_failed(paper_id, e))?;
        Ok(Some(html))
    }

    /// Scrapes the abstract page for title, authors, and abstract preview.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the page cannot be fetched. Missing
    /// fields within a fetched page are `None`, not errors.
    #[tracing::instrument(skip(self), fields(paper_id = %paper_id))]
    pub async fn fetch_paper_info(&self, paper_id: &str) -> Result<PaperInfo, ResolveError> {
        let url = format!("{}/abs/{paper_id}", self.base_url);
        let Some(html) = self.fetch_page(paper_id).await? else {
            return Err(ResolveError::fetch_failed(
                paper_id,
                "abstract page returned a non-success status",
            ));
        };

        Ok(PaperInfo {
            title: extract_title_from_html(&html),
            authors: extract_authors(&html),
            abstract_text: extract_abstract(&html),
            url,
        })
    }
}

impl std::fmt::Debug for AbsPageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbsPageSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TitleSource for AbsPageSource {
    fn name(&self) -> &'static str {
        "abs-page"
    }

    #[tracing::instrument(skip(self), fields(source = "abs-page", paper_id = %paper_id))]
    async fn resolve(&self, paper_id: &str) -> Result<Option<String>, ResolveError> {
        match self.fetch_page(paper_id).await? {
            Some(html) => Ok(extract_title_from_html(&html)),
            None => Ok(None),
        }
    }
}

/// Extracts a title from abstract-page HTML, trying the three rules in order.
fn extract_title_from_html(html: &str) -> Option<String> {
    // 1) meta citation_title
    if let Some(caps) = CITATION_TITLE_RE.captures(html)
        && let Some(content) = caps.get(1)
    {
        let normalized = normalize_scraped_text(content.as_str());
        if !normalized.is_empty() {
            return Some(normalized);
        }
    }

    // 2) h1.title, which may carry a 'Title:' descriptor span
    if let Some(caps) = H1_TITLE_RE.captures(html)
        && let Some(inner) = caps.get(1)
    {
        let text = TAG_RE.replace_all(inner.as_str(), " ");
        let text = collapse_whitespace(&text);
        let text = TITLE_LABEL_RE.replace(&text, "").trim().to_string();
        if !text.is_empty() {
            return Some(decode_entities(&text));
        }
    }

    // 3) document <title> as last resort
    if let Some(caps) = DOC_TITLE_RE.captures(html)
        && let Some(inner) = caps.get(1)
    {
        let text = strip_arxiv_suffix(&normalize_scraped_text(inner.as_str()));
        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}

fn extract_authors(html: &str) -> Option<String> {
    let caps = AUTHORS_RE.captures(html)?;
    let inner = caps.get(1)?;
    let text = TAG_RE.replace_all(inner.as_str(), " ");
    let text = normalize_scraped_text(&text);
    let text = AUTHORS_LABEL_RE.replace(&text, "").trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn extract_abstract(html: &str) -> Option<String> {
    let caps = ABSTRACT_RE.captures(html)?;
    let inner = caps.get(1)?;
    let text = TAG_RE.replace_all(inner.as_str(), " ");
    let text = normalize_scraped_text(&text);
    let text = ABSTRACT_LABEL_RE.replace(&text, "").trim().to_string();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() > ABSTRACT_PREVIEW_CHARS {
        let preview: String = text.chars().take(ABSTRACT_PREVIEW_CHARS).collect();
        Some(format!("{preview}..."))
    } else {
        Some(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<html><head>
        <title>[2508.14825] Deep Learning for X - arXiv.org</title>
        <meta name="citation_title" content="Deep Learning for X"/>
        </head><body>
        <h1 class="title mathjax"><span class="descriptor">Title:</span>Deep Learning for X</h1>
        <div class="authors"><span class="descriptor">Authors:</span><a href="#">A. One</a>, <a href="#">B. Two</a></div>
        <blockquote class="abstract mathjax"><span class="descriptor">Abstract:</span> We study X in depth.</blockquote>
        </body></html>"##;

    #[test]
    fn test_extract_title_prefers_citation_meta() {
        assert_eq!(
            extract_title_from_html(PAGE).as_deref(),
            Some("Deep Learning for X")
        );
    }

    #[test]
    fn test_extract_title_from_h1_strips_label_and_tags() {
        let html = r#"<h1 class="title"><span>Title:</span> Sparse &amp; Dense Models</h1>"#;
        assert_eq!(
            extract_title_from_html(html).as_deref(),
            Some("Sparse & Dense Models")
        );
    }

    #[test]
    fn test_extract_title_from_doc_title_strips_suffix() {
        let html = "<title>Some Fallback Title - arXiv.org</title>";
        assert_eq!(
            extract_title_from_html(html).as_deref(),
            Some("Some Fallback Title")
        );
    }

    #[test]
    fn test_extract_title_none_on_blank_page() {
        assert_eq!(extract_title_from_html("<html></html>"), None);
    }

    #[test]
    fn test_extract_authors_strips_label() {
        assert_eq!(extract_authors(PAGE).as_deref(), Some("A. One , B. Two"));
    }

    #[test]
    fn test_extract_abstract_strips_label_and_keeps_short_text() {
        assert_eq!(
            extract_abstract(PAGE).as_deref(),
            Some("We study X in depth.")
        );
    }

    #[test]
    fn test_extract_abstract_truncates_long_text() {
        let long = "word ".repeat(100);
        let html = format!(r#"<blockquote class="abstract">{long}</blockquote>"#);
        let preview = extract_abstract(&html).unwrap();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), ABSTRACT_PREVIEW_CHARS + 3);
    }
}
