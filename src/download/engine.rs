//! Download execution for PDF and inline data-URL artifacts.
//!
//! The engine accepts either an `https` URL (streamed to disk) or a `data:`
//! URL (decoded and written directly), so PDF and reference artifacts share
//! one naming path: a pending-name registration is consumed when the saved
//! filename is determined, with a URL-derived fallback and numeric-suffix
//! uniquify on collision.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use url::Url;

use crate::http_client::build_http_client;

use super::filename::{fallback_filename_from_url, resolve_unique_path, sanitize_filename};
use super::pending::PendingNames;
use super::DownloadError;

/// A completed download.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// The filename component actually used.
    pub filename: String,
}

/// Downloads artifacts into an output directory with enforced filenames.
pub struct DownloadEngine {
    client: Client,
    pending: Arc<PendingNames>,
}

impl DownloadEngine {
    /// Creates an engine sharing the given pending-name map.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if HTTP client construction fails.
    pub fn new(pending: Arc<PendingNames>) -> Result<Self, DownloadError> {
        let client = build_http_client().map_err(DownloadError::client_construction)?;
        Ok(Self { client, pending })
    }

    /// Downloads `url` into `output_dir`, returning the written path.
    ///
    /// The saved filename is the consumed pending registration for `url`
    /// when one exists, else a name derived from the URL itself.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] on HTTP, decoding, or filesystem failure.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download(
        &self,
        url: &str,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        self.pending.purge_expired();
        let desired = self.pending.consume(url).map(|name| sanitize_filename(&name));

        if let Some(raw) = url.strip_prefix("data:") {
            return write_data_url(raw, desired, output_dir).await;
        }
        self.download_http(url, desired, output_dir).await
    }

    async fn download_http(
        &self,
        url: &str,
        desired: Option<String>,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(status.as_u16(), url));
        }

        let filename = desired.unwrap_or_else(|| {
            Url::parse(url)
                .ok()
                .map_or_else(|| "download.bin".to_string(), |u| fallback_filename_from_url(&u))
        });
        let path = prepare_path(output_dir, &filename)?;

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| DownloadError::io(&path, e))?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::network(url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(&path, e))?;
        }
        file.flush().await.map_err(|e| DownloadError::io(&path, e))?;

        debug!(path = %path.display(), "download written");
        Ok(outcome_for(path))
    }
}

impl std::fmt::Debug for DownloadEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadEngine").finish_non_exhaustive()
    }
}

/// Builds an inline data URL with a percent-encoded payload.
#[must_use]
pub fn encode_data_url(mime: &str, payload: &str) -> String {
    format!("data:{mime},{}", urlencoding::encode(payload))
}

/// Splits a data URL (after the `data:` scheme) into MIME type and decoded payload.
fn parse_data_url(raw: &str) -> Result<(String, String), DownloadError> {
    let (mime, encoded) = raw
        .split_once(',')
        .ok_or_else(|| DownloadError::malformed_data_url("missing ',' separator"))?;
    if mime.ends_with(";base64") {
        return Err(DownloadError::malformed_data_url(
            "base64 payloads are not produced by this tool",
        ));
    }
    let payload = urlencoding::decode(encoded)
        .map_err(DownloadError::malformed_data_url)?
        .into_owned();
    Ok((mime.to_string(), payload))
}

async fn write_data_url(
    raw: &str,
    desired: Option<String>,
    output_dir: &Path,
) -> Result<DownloadOutcome, DownloadError> {
    let (mime, payload) = parse_data_url(raw)?;
    let filename = desired.unwrap_or_else(|| format!("download{}", extension_for_mime(&mime)));
    let path = prepare_path(output_dir, &filename)?;

    tokio::fs::write(&path, payload.as_bytes())
        .await
        .map_err(|e| DownloadError::io(&path, e))?;

    debug!(path = %path.display(), mime = %mime, "data URL written");
    Ok(outcome_for(path))
}

fn prepare_path(output_dir: &Path, filename: &str) -> Result<PathBuf, DownloadError> {
    std::fs::create_dir_all(output_dir).map_err(|e| DownloadError::io(output_dir, e))?;
    Ok(resolve_unique_path(output_dir, filename))
}

fn outcome_for(path: PathBuf) -> DownloadOutcome {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    DownloadOutcome { path, filename }
}

fn extension_for_mime(mime: &str) -> &'static str {
    let essence = mime.split(';').next().unwrap_or("").trim();
    match essence {
        "text/csv" => ".csv",
        "application/json" => ".json",
        "text/plain" => ".txt",
        _ => ".bin",
    }
}
