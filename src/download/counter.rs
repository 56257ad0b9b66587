//! Persisted download counter.
//!
//! A single non-negative integer, incremented once per successful PDF
//! download and surfaced by the `stats` command. Stored as JSON under the
//! output directory's `.arxiv-saver/` state directory. The update is a
//! read-increment-write; exactly-once under concurrent processes is not
//! guaranteed, and an under-count is accepted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Directory under the output root holding saver state.
const STATE_DIR: &str = ".arxiv-saver";

/// State file name.
const STATE_FILE: &str = "stats.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SaverState {
    download_count: u64,
}

/// Handle to the persisted counter for one output directory.
#[derive(Debug, Clone)]
pub struct DownloadCounter {
    state_path: PathBuf,
}

impl DownloadCounter {
    /// Creates a counter handle scoped to `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Path) -> Self {
        Self {
            state_path: output_dir.join(STATE_DIR).join(STATE_FILE),
        }
    }

    /// Returns the current count; a missing or corrupt state file reads as 0.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.read_state().download_count
    }

    /// Increments the counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the state file cannot be written.
    pub fn increment(&self) -> io::Result<u64> {
        let mut state = self.read_state();
        state.download_count += 1;

        if let Some(parent) = self.state_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&state).map_err(io::Error::other)?;
        fs::write(&self.state_path, body)?;
        debug!(count = state.download_count, path = %self.state_path.display(), "counter updated");
        Ok(state.download_count)
    }

    fn read_state(&self) -> SaverState {
        fs::read_to_string(&self.state_path)
            .ok()
            .and_then(|body| serde_json::from_str(&body).ok())
            .unwrap_or_default()
    }
}
