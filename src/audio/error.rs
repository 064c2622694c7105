use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Could not read audio file {path}: {reason}")]
    FileError { path: PathBuf, reason: String },

    #[error("Track index {index} is out of range for a playlist of {len} tracks")]
    InvalidTrackIndex { index: usize, len: usize },

    #[error("Seek rejected: {0}")]
    SeekRejected(String),

    #[error("Audio session is no longer running")]
    SessionClosed,
}

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Playlist is empty")]
    Empty,

    #[error("Could not read playlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed playlist {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("No data directory available for preferences")]
    NoDataDir,
}
