//! Error types for download execution.

use thiserror::Error;

/// Errors that can occur while downloading an artifact.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The server returned a non-success HTTP status
    #[error("HTTP {status} downloading {url}\n  Suggestion: {suggestion}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// The URL that failed
        url: String,
        /// How to proceed
        suggestion: String,
    },

    /// The request could not be sent or the body stream failed
    #[error(
        "network error downloading {url}: {reason}\n  Suggestion: Check connectivity and retry"
    )]
    Network {
        /// The URL that failed
        url: String,
        /// The underlying transport error
        reason: String,
    },

    /// An inline data URL could not be decoded
    #[error(
        "malformed data URL: {reason}\n  Suggestion: Rerun with -v and report the logs; this indicates an internal serialization bug"
    )]
    MalformedDataUrl {
        /// Why decoding failed
        reason: String,
    },

    /// Writing the artifact to disk failed
    #[error(
        "failed writing {path}: {source}\n  Suggestion: Check free disk space and directory permissions"
    )]
    Io {
        /// The destination path
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
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

impl DownloadError {
    /// Creates an `HttpStatus` error with a status-specific suggestion.
    #[must_use]
    pub fn http_status(status: u16, url: &str) -> Self {
        let suggestion = match status {
            404 => "The paper may not exist or the link is stale; verify the identifier".to_string(),
            429 => "Rate limited by the server. Try again in a few seconds".to_string(),
            s if s >= 500 => "Server unavailable. Try again later".to_string(),
            _ => "Verify the URL and retry".to_string(),
        };
        Self::HttpStatus {
            status,
            url: url.to_string(),
            suggestion,
        }
    }

    /// Creates a `Network` error.
    #[must_use]
    pub fn network(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `MalformedDataUrl` error.
    #[must_use]
    pub fn malformed_data_url(reason: impl std::fmt::Display) -> Self {
        Self::MalformedDataUrl {
            reason: reason.to_string(),
        }
    }

    /// Creates an `Io` error for a destination path.
    #[must_use]
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
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
