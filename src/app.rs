//! Command orchestration.
//!
//! Ties identifier extraction, title resolution, reference fetching, and the
//! download engine together per user command. Remote failures surface as
//! notifications at the binary boundary; the only silent degradations are
//! inside title resolution, which falls back to the identifier.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::download::{
    ArtifactKind, DownloadCounter, DownloadEngine, PendingNames, build_filename, encode_data_url,
};
use crate::notify;
use crate::parser::{self, ParseError};
use crate::references::{
    ReferenceClient, ReferenceFormat, ReferencesExport, render_references_csv,
    render_references_json,
};
use crate::resolver::{AbsPageSource, TitleResolver};

const ARXIV_PDF_BASE_URL: &str = "https://arxiv.org/pdf";

/// MIME types used for inline reference artifacts.
const CSV_MIME: &str = "text/csv;charset=utf-8";
const JSON_MIME: &str = "application/json;charset=utf-8";

/// Application façade the CLI dispatches into.
pub struct App {
    resolver: TitleResolver,
    references: ReferenceClient,
    abs_page: AbsPageSource,
    pending: Arc<PendingNames>,
    engine: DownloadEngine,
    pdf_base_url: String,
}

impl App {
    /// Creates an app against the public arXiv and Semantic Scholar endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error when HTTP client construction fails.
    pub fn new() -> Result<Self> {
        let pending = Arc::new(PendingNames::new());
        Ok(Self {
            resolver: TitleResolver::new()?,
            references: ReferenceClient::new()?,
            abs_page: AbsPageSource::new()?,
            engine: DownloadEngine::new(Arc::clone(&pending))?,
            pending,
            pdf_base_url: ARXIV_PDF_BASE_URL.to_string(),
        })
    }

    /// Creates an app against custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns an error when HTTP client construction fails.
    pub fn with_base_urls(
        atom_base_url: &str,
        abs_base_url: &str,
        references_base_url: &str,
    ) -> Result<Self> {
        let pending = Arc::new(PendingNames::new());
        Ok(Self {
            resolver: TitleResolver::with_base_urls(atom_base_url, abs_base_url)?,
            references: ReferenceClient::with_base_url(references_base_url)?,
            abs_page: AbsPageSource::with_base_url(abs_base_url)?,
            engine: DownloadEngine::new(Arc::clone(&pending))?,
            pending,
            // PDF downloads share the abstract page's host
            pdf_base_url: format!("{abs_base_url}/pdf"),
        })
    }

    /// Saves the paper's PDF under a normalized filename.
    ///
    /// # Errors
    ///
    /// Returns an error when no identifier can be derived or the download
    /// fails. A counter update failure only logs a warning.
    pub async fn save_pdf(
        &self,
        url: &str,
        title_hint: Option<&str>,
        output_dir: &Path,
    ) -> Result<()> {
        let (paper_id, hint) = identify(url, title_hint)?;
        let title = self
            .resolver
            .resolve_title(&paper_id, hint.as_deref())
            .await
            .unwrap_or_else(|| paper_id.clone());

        let filename = build_filename(&paper_id, &title, ArtifactKind::Pdf);
        let pdf_url = self.pdf_url(&paper_id);

        self.pending.remember(&pdf_url, &filename);
        let outcome = self.engine.download(&pdf_url, output_dir).await?;

        match DownloadCounter::new(output_dir).increment() {
            Ok(count) => info!(count, "download counter updated"),
            Err(error) => warn!(error = %error, "could not update download counter"),
        }

        notify::notify("Download complete", &format!("Saved: {}", outcome.filename));
        Ok(())
    }

    /// Saves the paper's reference list as CSV or JSON.
    ///
    /// An empty reference list is not an error: it is reported as "no
    /// references found" and no file is written.
    ///
    /// # Errors
    ///
    /// Returns an error when no identifier can be derived, the reference
    /// fetch fails, or the artifact cannot be written.
    pub async fn save_references(
        &self,
        url: &str,
        title_hint: Option<&str>,
        format: ReferenceFormat,
        output_dir: &Path,
    ) -> Result<()> {
        let (paper_id, hint) = identify(url, title_hint)?;
        let title = self
            .resolver
            .resolve_title(&paper_id, hint.as_deref())
            .await
            .unwrap_or_else(|| paper_id.clone());

        let references = self.references.fetch_references(&paper_id).await?;
        if references.is_empty() {
            notify::notify("No references", "No references found for this paper");
            return Ok(());
        }

        let (kind, data_url) = match format {
            ReferenceFormat::Csv => {
                let csv = render_references_csv(&references);
                (ArtifactKind::ReferencesCsv, encode_data_url(CSV_MIME, &csv))
            }
            ReferenceFormat::Json => {
                let export = ReferencesExport::new(paper_id.clone(), &title, references);
                let json = render_references_json(&export)?;
                (ArtifactKind::ReferencesJson, encode_data_url(JSON_MIME, &json))
            }
        };

        let filename = build_filename(&paper_id, &title, kind);
        self.pending.remember(&data_url, &filename);
        let outcome = self.engine.download(&data_url, output_dir).await?;

        notify::notify("Download complete", &format!("Saved: {}", outcome.filename));
        Ok(())
    }

    /// Probes a paper's abstract page and prints the extracted metadata.
    ///
    /// # Errors
    ///
    /// Returns an error when no identifier can be derived or the page fetch
    /// fails.
    pub async fn probe(&self, url: &str) -> Result<()> {
        let paper_id = parser::extract_paper_id(url)
            .ok_or_else(|| ParseError::identifier_not_found(url))?;
        let info = self.abs_page.fetch_paper_info(&paper_id).await?;

        println!("Paper:    {paper_id}");
        println!("Title:    {}", info.title.as_deref().unwrap_or("(not found)"));
        println!("Authors:  {}", info.authors.as_deref().unwrap_or("(not found)"));
        println!(
            "Abstract: {}",
            info.abstract_text.as_deref().unwrap_or("(not found)")
        );
        println!("URL:      {}", info.url);
        Ok(())
    }

    /// Prints the running download counter for an output directory.
    pub fn show_stats(&self, output_dir: &Path) {
        let count = DownloadCounter::new(output_dir).current();
        println!("PDF downloads: {count}");
    }

    fn pdf_url(&self, paper_id: &str) -> String {
        format!("{}/{paper_id}.pdf", self.pdf_base_url)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}

/// Derives the paper identifier and a cleaned title hint.
///
/// An identifier found in the title hint takes priority over one from the
/// URL; the page title is authoritative since a URL can be ambiguous across
/// versions and mirrors.
fn identify(url: &str, title_hint: Option<&str>) -> Result<(String, Option<String>), ParseError> {
    let id_from_url = parser::extract_paper_id(url);
    let parsed = title_hint.map(parser::parse_head_title);

    let paper_id = parsed
        .as_ref()
        .and_then(|p| p.id.clone())
        .or(id_from_url)
        .ok_or_else(|| ParseError::identifier_not_found(url))?;

    let hint = parsed.map(|p| p.title).filter(|t| !t.trim().is_empty());
    Ok((paper_id, hint))
}
