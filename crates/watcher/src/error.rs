//! Error taxonomy for the watcher

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    /// Missing or malformed configuration; nothing is watched
    #[error("invalid configuration: {reason}")]
    ConfigInvalid { reason: String },

    /// The watched directory is missing or cannot be listed
    #[error("directory unavailable: {}: {reason}", path.display())]
    DirectoryUnavailable { path: PathBuf, reason: String },

    /// A single file could not be read at report time
    #[error("failed to read {}: {source}", path.display())]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WatchError {
    /// Fatal errors stop the loop; everything else is contained to one file
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WatchError::FileReadFailed { .. })
    }
}
