//! Shared HTTP client construction policy.
//!
//! Centralizes networking defaults so the title resolver, reference fetcher,
//! and download engine stay consistent on timeout, user-agent, and
//! compression. Timeouts are the only cancellation mechanism in this tool.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Builds an HTTP client using shared project policy.
///
/// # Errors
///
/// Returns the underlying `reqwest` error when client construction fails.
pub(crate) fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
        .build()
}
