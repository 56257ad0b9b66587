//! Error types for identifier parsing.

use thiserror::Error;

/// Errors that can occur while deriving a paper identifier.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// No extraction pattern matched the URL or title
    #[error(
        "could not determine paper id from '{input}'\n  Suggestion: Pass an arXiv abs/pdf URL, or a bare identifier like 2508.14825"
    )]
    IdentifierNotFound {
        /// The input no pattern matched
        input: String,
    },
}

impl ParseError {
    /// Creates an `IdentifierNotFound` error.
    #[must_use]
    pub fn identifier_not_found(input: &str) -> Self {
        Self::IdentifierNotFound {
            input: input.to_string(),
        }
    }
}
