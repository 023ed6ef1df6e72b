//! Error types for the gait analysis kernel.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an analysis from producing a result.
///
/// `InsufficientFrames` is an expected outcome for short recordings, not a
/// fault: callers are meant to match on it and tell the user the trial was
/// too short.
#[derive(Debug, Error)]
pub enum GaitError {
    #[error("insufficient data: {frames} frames supplied, at least {required} required")]
    InsufficientFrames { frames: usize, required: usize },

    #[error("no trial produced an analysis")]
    NoUsableTrials,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl GaitError {
    /// True for the "trial too short" outcome.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, GaitError::InsufficientFrames { .. })
    }
}

pub type Result<T> = std::result::Result<T, GaitError>;
