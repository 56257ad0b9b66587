//! Integration tests for the download engine: pending-name consumption,
//! data-URL artifacts, streaming HTTP downloads, and collision uniquify.

use std::sync::Arc;
use std::time::Duration;

use arxiv_saver_core::{DownloadEngine, PendingNames, encode_data_url};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_data_url_artifact_written_under_registered_name() {
    let pending = Arc::new(PendingNames::new());
    let engine = DownloadEngine::new(Arc::clone(&pending)).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let csv = "Title,Year,DOI,arXiv,URL\nSome Work,2020,,,\n";
    let url = encode_data_url("text/csv;charset=utf-8", csv);
    pending.remember(&url, "2508.14825 Some Title - references.csv");

    let outcome = engine.download(&url, temp_dir.path()).await.unwrap();

    assert_eq!(outcome.filename, "2508.14825 Some Title - references.csv");
    assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), csv);
    // At-most-once: the registration is gone after the download
    assert!(!pending.contains(&url));
}

#[tokio::test]
async fn test_data_url_without_registration_gets_mime_fallback_name() {
    let pending = Arc::new(PendingNames::new());
    let engine = DownloadEngine::new(Arc::clone(&pending)).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let url = encode_data_url("application/json;charset=utf-8", "{\"count\": 0}");
    let outcome = engine.download(&url, temp_dir.path()).await.unwrap();

    assert_eq!(outcome.filename, "download.json");
}

#[tokio::test]
async fn test_http_download_streams_body_to_registered_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdf/2508.14825.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake".to_vec()))
        .mount(&server)
        .await;

    let pending = Arc::new(PendingNames::new());
    let engine = DownloadEngine::new(Arc::clone(&pending)).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/pdf/2508.14825.pdf", server.uri());
    pending.remember(&url, "2508.14825 Some Title.pdf");

    let outcome = engine.download(&url, temp_dir.path()).await.unwrap();

    assert_eq!(outcome.filename, "2508.14825 Some Title.pdf");
    assert_eq!(std::fs::read(&outcome.path).unwrap(), b"%PDF-1.4 fake");
}

#[tokio::test]
async fn test_repeated_download_uniquifies_on_collision() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdf/2508.14825.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pdf".to_vec()))
        .mount(&server)
        .await;

    let pending = Arc::new(PendingNames::new());
    let engine = DownloadEngine::new(Arc::clone(&pending)).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let url = format!("{}/pdf/2508.14825.pdf", server.uri());

    pending.remember(&url, "2508.14825 T.pdf");
    let first = engine.download(&url, temp_dir.path()).await.unwrap();
    pending.remember(&url, "2508.14825 T.pdf");
    let second = engine.download(&url, temp_dir.path()).await.unwrap();

    assert_eq!(first.filename, "2508.14825 T.pdf");
    assert_eq!(second.filename, "2508.14825 T_1.pdf");
}

#[tokio::test]
async fn test_http_404_surfaces_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let pending = Arc::new(PendingNames::new());
    let engine = DownloadEngine::new(pending).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/pdf/9999.99999.pdf", server.uri());
    let error = engine.download(&url, temp_dir.path()).await.unwrap_err();
    assert!(error.to_string().contains("HTTP 404"), "got: {error}");
}

#[tokio::test]
async fn test_unregistered_http_download_falls_back_to_url_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdf/2508.14825.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pdf".to_vec()))
        .mount(&server)
        .await;

    let pending = Arc::new(PendingNames::new());
    let engine = DownloadEngine::new(pending).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let url = format!("{}/pdf/2508.14825.pdf", server.uri());
    let outcome = engine.download(&url, temp_dir.path()).await.unwrap();
    assert_eq!(outcome.filename, "2508.14825.pdf");
}

#[tokio::test]
async fn test_expired_registration_is_ignored() {
    let pending = Arc::new(PendingNames::with_ttl(Duration::ZERO));
    let engine = DownloadEngine::new(Arc::clone(&pending)).unwrap();
    let temp_dir = TempDir::new().unwrap();

    let url = encode_data_url("text/csv;charset=utf-8", "Title,Year,DOI,arXiv,URL\n");
    pending.remember(&url, "should-not-be-used.csv");

    let outcome = engine.download(&url, temp_dir.path()).await.unwrap();
    assert_eq!(outcome.filename, "download.csv");
}
