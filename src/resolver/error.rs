//! Error types for title resolution.

use thiserror::Error;

/// Errors that can occur while resolving a paper title.
///
/// Title resolution degrades silently: the chain logs these and moves to
/// the next source rather than surfacing them to the user.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// A metadata fetch failed (network error, not an HTTP status)
    #[error(
        "title fetch failed for '{paper_id}': {reason}\n  Suggestion: Check your network connection; the filename falls back to the identifier"
    )]
    FetchFailed {
        /// The paper whose title was requested
        paper_id: String,
        /// Why the fetch failed
        reason: String,
    },

    /// HTTP client construction failed
    #[error(
        "HTTP client construction failed: {reason}\n  Suggestion: Check proxy and TLS environment settings"
    )]
    ClientConstruction {
        /// The underlying builder error
        reason: String,
    },
}

impl ResolveError {
    /// Creates a `FetchFailed` error.
    #[must_use]
    pub fn fetch_failed(paper_id: &str, reason: impl std::fmt::Display) -> Self {
        Self::FetchFailed {
            paper_id: paper_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `ClientConstruction` error.
    #[must_use]
    pub fn client_construction(reason: impl std::fmt::Display) -> Self {
        Self::ClientConstruction {
            reason: reason.to_string(),
        }
    }
}
