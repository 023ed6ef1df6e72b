//! JSON import/export.
//!
//! Frame sequences arrive as the JSON the pose-estimation front end records
//! (an array of `{ timestamp, landmarks, worldLandmarks }`). Results leave as
//! JSON in the same camelCase contract that stored sessions use, so storage
//! and presentation collaborators can keep them verbatim.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{GaitError, Result};
use crate::types::Frame;

/// Parse a frame sequence from a JSON string.
pub fn frames_from_json(json: &str) -> Result<Vec<Frame>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a frame sequence from a JSON file.
pub fn load_frames(path: impl AsRef<Path>) -> Result<Vec<Frame>> {
    let frames: Vec<Frame> = load_json(path.as_ref())?;
    debug!(path = %path.as_ref().display(), frames = frames.len(), "loaded frame sequence");
    Ok(frames)
}

/// Read and parse any JSON document (a stored result, for instance).
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GaitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize a value as compact or pretty JSON.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
