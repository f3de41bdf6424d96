//! Worker error types.

use thiserror::Error;

use vcrop_media::MediaError;
use vcrop_models::{AspectRatioParseError, UnsupportedContainer};

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid aspect ratio: {0}")]
    InvalidRatio(#[from] AspectRatioParseError),

    #[error("Could not read dimensions of video {}: {source}", .index + 1)]
    Probe { index: usize, source: MediaError },

    #[error("Video {}: {source}", .index + 1)]
    UnsupportedFormat {
        index: usize,
        source: UnsupportedContainer,
    },

    #[error("Rendering video {} failed: {source}", .index + 1)]
    Render { index: usize, source: MediaError },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn probe(index: usize, source: MediaError) -> Self {
        Self::Probe { index, source }
    }

    pub fn render(index: usize, source: MediaError) -> Self {
        Self::Render { index, source }
    }

    /// Short label for the stage that failed, used in reports and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            WorkerError::InvalidRatio(_) => "parse",
            WorkerError::Probe { .. } => "probe",
            WorkerError::UnsupportedFormat { .. } => "intake",
            WorkerError::Render { .. } => "render",
            WorkerError::Io(_) => "io",
        }
    }
}
