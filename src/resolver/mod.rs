//! Paper title resolution via an ordered fallback chain.
//!
//! A [`TitleResolver`] holds an ordered list of [`TitleSource`] strategies
//! and evaluates them in sequence until one yields a usable title:
//!
//! 1. The caller-provided title hint (a copied browser tab title), after
//!    bracket splitting, when it is not empty, a bare identifier, or a
//!    `.pdf` filename.
//! 2. [`AtomApiSource`] - arXiv's Atom metadata endpoint.
//! 3. [`AbsPageSource`] - the abstract HTML page, scraped with three
//!    fallback extraction rules.
//!
//! Remote failures degrade silently to the next source; the resolver never
//! returns a fatal error. Callers that end up with no title fall back to the
//! identifier when building filenames.

mod abs_page;
mod atom;
mod error;

pub use abs_page::{AbsPageSource, PaperInfo};
pub use atom::AtomApiSource;
pub use error::ResolveError;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::parser;

/// A single title-resolution strategy.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via
/// `Box<dyn TitleSource>`. Rust 2024 native async traits are not
/// object-safe, so `async_trait` is required for the chain pattern.
#[async_trait]
pub trait TitleSource: Send + Sync {
    /// Returns the source's name (e.g., "atom-api", "abs-page").
    fn name(&self) -> &str;

    /// Attempts to resolve a title for the given paper identifier.
    ///
    /// `Ok(None)` means this source has nothing for the paper; the chain
    /// moves on. `Err` is treated the same way, but logged at warn level.
    async fn resolve(&self, paper_id: &str) -> Result<Option<String>, ResolveError>;
}

/// Ordered chain of [`TitleSource`] strategies.
pub struct TitleResolver {
    sources: Vec<Box<dyn TitleSource>>,
}

impl TitleResolver {
    /// Creates the default chain: Atom metadata API, then abstract-page scrape.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Ok(Self {
            sources: vec![
                Box::new(AtomApiSource::new()?),
                Box::new(AbsPageSource::new()?),
            ],
        })
    }

    /// Creates a chain against custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if HTTP client construction fails.
    pub fn with_base_urls(
        atom_base_url: impl Into<String>,
        abs_base_url: impl Into<String>,
    ) -> Result<Self, ResolveError> {
        Ok(Self {
            sources: vec![
                Box::new(AtomApiSource::with_base_url(atom_base_url)?),
                Box::new(AbsPageSource::with_base_url(abs_base_url)?),
            ],
        })
    }

    /// Creates an empty chain; sources are added via [`register`](Self::register).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Appends a source to the end of the chain.
    pub fn register(&mut self, source: Box<dyn TitleSource>) {
        self.sources.push(source);
    }

    /// Resolves a title, preferring a usable provided hint over remote lookups.
    ///
    /// Returns `None` when no source produced a title; never an error.
    pub async fn resolve_title(&self, paper_id: &str, provided: Option<&str>) -> Option<String> {
        if let Some(hint) = provided
            && is_usable_title(hint)
        {
            debug!(title = %hint, "using provided title hint");
            return Some(hint.trim().to_string());
        }

        for source in &self.sources {
            match source.resolve(paper_id).await {
                Ok(Some(title)) if !title.is_empty() => {
                    debug!(source = source.name(), title = %title, "title resolved");
                    return Some(title);
                }
                Ok(_) => {
                    debug!(source = source.name(), "source had no title; trying next");
                }
                Err(error) => {
                    warn!(
                        source = source.name(),
                        error = %error,
                        "title source failed; trying next"
                    );
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for TitleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("TitleResolver").field("sources", &names).finish()
    }
}

/// Returns true if a title hint can be used as-is: non-empty, not a bare
/// identifier, and not a `.pdf` filename.
#[must_use]
pub fn is_usable_title(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && !parser::is_bare_identifier(trimmed) && !parser::ends_with_pdf(trimmed)
}
