use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("application data directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("metadata file {path} could not be opened")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artist '{artist}' not found")]
    ArtistNotFound { artist: String },

    #[error("track '{track}' by '{artist}' not found")]
    TrackNotFound { artist: String, track: String },

    #[error("track has invalid duration '{raw}'")]
    InvalidDuration { raw: String },

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// Whether the error means "this candidate file did not yield a result",
    /// as opposed to a failure that no other candidate can recover from.
    pub fn is_miss(&self) -> bool {
        match self {
            LookupError::FileUnreadable { .. }
            | LookupError::ArtistNotFound { .. }
            | LookupError::TrackNotFound { .. }
            | LookupError::InvalidDuration { .. } => true,
            LookupError::DirectoryNotFound(_) | LookupError::Io(_) => false,
        }
    }
}
