//! Reference list retrieval from the Semantic Scholar Graph API.
//!
//! The [`ReferenceClient`] issues one field-selected, result-capped request
//! per paper and normalizes each citation into a [`ReferenceEntry`]. An
//! empty list is a valid outcome, distinct from a fetch failure; callers
//! report it as "no references found" rather than an error.

mod csv;
mod error;
mod json;

pub use csv::render_references_csv;
pub use error::ReferenceError;
pub use json::{ReferencesExport, render_references_json};

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::build_http_client;
use crate::text::compile_static_regex;

/// Default Semantic Scholar API base URL.
const DEFAULT_API_BASE_URL: &str = "https://api.semanticscholar.org";

/// Field selection requested for each cited paper.
const REFERENCE_FIELDS: &str = "title,year,url,openAccessPdf,externalIds";

/// Result cap for a single references query.
const REFERENCE_LIMIT: u32 = 1000;

static VERSION_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)v\d+$"));

/// Output format for a saved reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFormat {
    /// Comma-separated values with a fixed header row.
    Csv,
    /// Pretty-printed JSON export object.
    Json,
}

// ==================== API Response Types ====================

/// Top-level references response.
#[derive(Debug, Deserialize)]
pub(crate) struct ReferencesResponse {
    pub data: Option<Vec<ReferenceItem>>,
}

/// One citation wrapper; entries without a cited paper are dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReferenceItem {
    pub cited_paper: Option<CitedPaper>,
}

/// The cited work as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CitedPaper {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub url: Option<String>,
    pub open_access_pdf: Option<OpenAccessPdf>,
    pub external_ids: Option<ExternalIds>,
}

/// Open-access PDF link supplied by the API for a cited work.
#[derive(Debug, Deserialize)]
pub(crate) struct OpenAccessPdf {
    pub url: Option<String>,
}

/// External identifier map; only DOI and arXiv are used.
#[derive(Debug, Deserialize)]
pub(crate) struct ExternalIds {
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    #[serde(rename = "ArXiv")]
    pub arxiv: Option<String>,
}

// ==================== Normalized Entry ====================

/// One cited work, normalized from the heterogeneous API payload.
///
/// No field is required beyond a best-effort URL; missing values serialize
/// as explicit nulls in the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    /// Cited paper title.
    pub title: Option<String>,
    /// Publication year.
    pub year: Option<i64>,
    /// Best-available URL (may be empty).
    pub url: String,
    /// DOI, when known.
    pub doi: Option<String>,
    /// arXiv identifier, when known.
    pub arxiv: Option<String>,
}

// ==================== ReferenceClient ====================

/// Fetches and normalizes a paper's reference list.
pub struct ReferenceClient {
    client: Client,
    base_url: String,
}

impl ReferenceClient {
    /// Creates a client against the public Semantic Scholar endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ReferenceError> {
        Self::build(DEFAULT_API_BASE_URL.to_string())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if HTTP client construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ReferenceError> {
        Self::build(base_url.into())
    }

    fn build(base_url: String) -> Result<Self, ReferenceError> {
        let client = build_http_client().map_err(ReferenceError::client_construction)?;
        Ok(Self { client, base_url })
    }

    /// Fetches the reference list for a paper.
    ///
    /// The version suffix is stripped for the query. An empty vec is a valid
    /// result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Api`] on a non-success HTTP status (with a
    /// truncated body preview), [`ReferenceError::Network`] when the request
    /// cannot be sent, and [`ReferenceError::Format`] on an unparseable body.
    #[tracing::instrument(skip(self), fields(paper_id = %paper_id))]
    pub async fn fetch_references(
        &self,
        paper_id: &str,
    ) -> Result<Vec<ReferenceEntry>, ReferenceError> {
        let bare_id = strip_version_suffix(paper_id);
        let url = format!(
            "{}/graph/v1/paper/arXiv:{}/references?fields={REFERENCE_FIELDS}&limit={REFERENCE_LIMIT}",
            self.base_url,
            urlencoding::encode(bare_id)
        );

        debug!(api_url = %url, "calling reference API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ReferenceError::network(paper_id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReferenceError::api(status.as_u16(), &body));
        }

        let body = response
            .json::<ReferencesResponse>()
            .await
            .map_err(ReferenceError::format)?;

        let entries = normalize_references(body);
        debug!(count = entries.len(), "references fetched");
        Ok(entries)
    }
}

impl std::fmt::Debug for ReferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ==================== Normalization Helpers ====================

/// Strips a trailing version suffix (`v2`) from an identifier.
#[must_use]
pub fn strip_version_suffix(paper_id: &str) -> &str {
    match VERSION_SUFFIX_RE.find(paper_id) {
        Some(found) => &paper_id[..found.start()],
        None => paper_id,
    }
}

fn normalize_references(response: ReferencesResponse) -> Vec<ReferenceEntry> {
    response
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| item.cited_paper)
        .map(reference_entry_from)
        .collect()
}

fn reference_entry_from(paper: CitedPaper) -> ReferenceEntry {
    let url = pick_best_url(&paper);
    ReferenceEntry {
        title: paper.title.filter(|t| !t.is_empty()),
        year: paper.year,
        url,
        doi: paper.external_ids.as_ref().and_then(|ids| ids.doi.clone()),
        arxiv: paper.external_ids.as_ref().and_then(|ids| ids.arxiv.clone()),
    }
}

/// Picks the best URL for a cited work.
///
/// Priority: open-access PDF link, DOI-resolved URL, the API's own URL, an
/// arXiv abstract URL built from the external id, else empty.
fn pick_best_url(paper: &CitedPaper) -> String {
    if let Some(url) = paper
        .open_access_pdf
        .as_ref()
        .and_then(|pdf| pdf.url.as_deref())
        .filter(|url| !url.is_empty())
    {
        return url.to_string();
    }
    if let Some(doi) = paper
        .external_ids
        .as_ref()
        .and_then(|ids| ids.doi.as_deref())
        .filter(|doi| !doi.is_empty())
    {
        return format!("https://doi.org/{doi}");
    }
    if let Some(url) = paper.url.as_deref().filter(|url| !url.is_empty()) {
        return url.to_string();
    }
    if let Some(arxiv_id) = paper
        .external_ids
        .as_ref()
        .and_then(|ids| ids.arxiv.as_deref())
        .filter(|id| !id.is_empty())
    {
        return format!("https://arxiv.org/abs/{arxiv_id}");
    }
    String::new()
}
