//! Download engine, filename policy, and persisted saver state.

mod counter;
mod engine;
mod error;
mod filename;
mod pending;

pub use counter::DownloadCounter;
pub use engine::{DownloadEngine, DownloadOutcome, encode_data_url};
pub use error::DownloadError;
pub use filename::{ArtifactKind, build_filename};
pub use pending::PendingNames;
