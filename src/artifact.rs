//! Loading and saving of the JSON string-array artifacts.
//!
//! Both artifacts produced by `convert` (the prompts and the original
//! examples) share one shape: a single JSON array of strings. Unlike the
//! corpus, artifacts are inputs to the review loop, so a missing or
//! malformed artifact is a setup error rather than something to recover
//! from.

use crate::error::{DeslangError, Result};
use crate::fs::atomic_write_file;
use std::path::Path;

/// What `inspect` found on disk, for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactState {
    /// File does not exist.
    Missing,
    /// Parsed cleanly with this many entries.
    Loaded(usize),
    /// Exists but is not a readable JSON string array.
    Invalid,
}

/// Load a JSON string array artifact.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        DeslangError::UserError(format!(
            "failed to read artifact '{}': {}. Run `deslang convert` to generate it.",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        DeslangError::UserError(format!(
            "artifact '{}' is not a JSON array of strings: {}",
            path.display(),
            e
        ))
    })
}

/// Atomically save a string array artifact, pretty-printed.
pub fn save<P: AsRef<Path>>(path: P, items: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)
        .map_err(|e| DeslangError::Persistence(format!("failed to serialize artifact: {}", e)))?;
    atomic_write_file(path, &format!("{}\n", json))
}

/// Non-failing check of an artifact's on-disk state.
pub fn inspect<P: AsRef<Path>>(path: P) -> ArtifactState {
    let path = path.as_ref();
    if !path.exists() {
        return ArtifactState::Missing;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Vec<String>>(&content) {
            Ok(items) => ArtifactState::Loaded(items.len()),
            Err(_) => ArtifactState::Invalid,
        },
        Err(_) => ArtifactState::Invalid,
    }
}
