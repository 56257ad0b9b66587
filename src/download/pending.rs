//! Short-lived desired-filename registrations keyed by download URL.
//!
//! The orchestrator registers the filename it wants for a target URL just
//! before requesting the download; the engine consumes the registration when
//! determining the saved name. Entries are consumed at most once and expire
//! after 60 seconds so a stale registration cannot redirect an unrelated
//! later download of the same URL.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// How long an unconsumed registration stays valid.
const PENDING_TTL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct PendingEntry {
    filename: String,
    registered_at: Instant,
}

/// Concurrent map from target URL to the intended filename.
///
/// Keyed by URL, so concurrent invocations on different URLs cannot race;
/// same-URL races resolve by at-most-once consumption.
#[derive(Debug)]
pub struct PendingNames {
    entries: DashMap<String, PendingEntry>,
    ttl: Duration,
}

impl PendingNames {
    /// Creates an empty map with the standard 60-second TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(PENDING_TTL)
    }

    /// Creates a map with a custom TTL (for tests).
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Registers the filename the next download of `url` should use.
    ///
    /// A later registration for the same URL replaces the earlier one.
    pub fn remember(&self, url: impl Into<String>, filename: impl Into<String>) {
        self.entries.insert(
            url.into(),
            PendingEntry {
                filename: filename.into(),
                registered_at: Instant::now(),
            },
        );
    }

    /// Takes the registered filename for `url`, if present and unexpired.
    ///
    /// The entry is removed either way, so a second consume of the same URL
    /// returns `None`.
    pub fn consume(&self, url: &str) -> Option<String> {
        let (_, entry) = self.entries.remove(url)?;
        if entry.registered_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.filename)
    }

    /// Drops all expired entries.
    pub fn purge_expired(&self) {
        self.entries
            .retain(|_, entry| entry.registered_at.elapsed() < self.ttl);
    }

    /// Returns true if an unexpired registration exists for `url`.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .get(url)
            .is_some_and(|entry| entry.registered_at.elapsed() < self.ttl)
    }
}

impl Default for PendingNames {
    fn default() -> Self {
        Self::new()
    }
}
