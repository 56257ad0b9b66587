//! Title lookup via arXiv's Atom metadata endpoint.
//!
//! The feed is parsed with regexes rather than an XML parser; only the entry
//! title is needed, and the fallback precedence below must be preserved:
//! the `<entry>`'s own `<title>`, else the second `<title>` in the feed
//! (the first is the feed-level title).

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::warn;

use crate::http_client::build_http_client;
use crate::text::{compile_static_regex, normalize_scraped_text};

use super::{ResolveError, TitleSource};

const DEFAULT_ATOM_BASE_URL: &str = "https://export.arxiv.org";

static ENTRY_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<entry\b.*?<title>(.*?)</title>.*?</entry>"));

static ANY_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<title>(.*?)</title>"));

/// Title source backed by `https://export.arxiv.org/api/query`.
pub struct AtomApiSource {
    client: Client,
    base_url: String,
}

impl AtomApiSource {
    /// Creates a source against the public arXiv export endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Self::build(DEFAULT_ATOM_BASE_URL.to_string())
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
}

impl std::fmt::Debug for AtomApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomApiSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TitleSource for AtomApiSource {
    fn name(&self) -> &'static str {
        "atom-api"
    }

    #[tracing::instrument(skip(self), fields(source = "atom-api", paper_id = %paper_id))]
    async fn resolve(&self, paper_id: &str) -> Result<Option<String>, ResolveError> {
        let url = format!(
            "{}/api/query?id_list={}",
            self.base_url,
            urlencoding::encode(paper_id)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::fetch_failed(paper_id, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Atom endpoint not OK");
            return Ok(None);
        }

        let xml = response
            .text()
            .await
            .map_err(|e| ResolveError::fetch_failed(paper_id, e))?;

        Ok(extract_entry_title(&xml))
    }
}

/// Extracts the entry title from an Atom feed body.
fn extract_entry_title(xml: &str) -> Option<String> {
    if let Some(caps) = ENTRY_TITLE_RE.captures(xml)
        && let Some(title) = caps.get(1)
    {
        let normalized = normalize_scraped_text(title.as_str());
        if !normalized.is_empty() {
            return Some(normalized);
        }
    }

    // Feed-level title comes first; the entry title is usually the second.
    let titles: Vec<&str> = ANY_TITLE_RE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    if titles.len() >= 2 {
        let normalized = normalize_scraped_text(titles[1]);
        if !normalized.is_empty() {
            return Some(normalized);
        }
    }
    None
}
