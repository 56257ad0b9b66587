//! Error types for reference retrieval.

use thiserror::Error;

/// Length of the response-body preview carried in API errors.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Errors that can occur while fetching a reference list.
#[derive(Debug, Clone, Error)]
pub enum ReferenceError {
    /// The API returned a non-success HTTP status
    #[error("reference API returned HTTP {status}: {body}\n  Suggestion: {suggestion}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Truncated response body preview
        body: String,
        /// How to proceed
        suggestion: String,
    },

    /// The request could not be sent or completed
    #[error(
        "cannot reach the reference API for '{paper_id}': {reason}\n  Suggestion: Check your network connection and retry"
    )]
    Network {
        /// The paper whose references were requested
        paper_id: String,
        /// The underlying transport error
        reason: String,
    },

    /// The response body was not the expected JSON shape
    #[error(
        "unexpected reference API response format: {reason}\n  Suggestion: Retry later; the API contract may have changed"
    )]
    Format {
        /// The underlying parse error
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

impl ReferenceError {
    /// Creates an `Api` error with the body truncated to a short preview and
    /// a status-specific suggestion.
    #[must_use]
    pub fn api(status: u16, body: &str) -> Self {
        let suggestion = match status {
            404 => "Paper not found in the reference database; check the identifier".to_string(),
            429 => "Rate limit exceeded. Try again in a few seconds".to_string(),
            s if s >= 500 => "Reference API unavailable. Try again later".to_string(),
            _ => "Check the identifier and retry".to_string(),
        };
        Self::Api {
            status,
            body: body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
            suggestion,
        }
    }

    /// Creates a `Network` error.
    #[must_use]
    pub fn network(paper_id: &str, reason: impl std::fmt::Display) -> Self {
        Self::Network {
            paper_id: paper_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `Format` error.
    #[must_use]
    pub fn format(reason: impl std::fmt::Display) -> Self {
        Self::Format {
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
