//! Error types for cleancut-captions.

use thiserror::Error;

/// Caption retiming error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// SRT content could not be parsed
    #[error("failed to parse srt: {0:?}")]
    Parse(srtlib::ParsingError),

    /// Timeline editing error
    #[error(transparent)]
    Timeline(#[from] cleancut_timeline::Error),
}

impl From<srtlib::ParsingError> for Error {
    fn from(err: srtlib::ParsingError) -> Self {
        Self::Parse(err)
    }
}

/// Result type alias for cleancut-captions operations.
pub type Result<T> = std::result::Result<T, Error>;
