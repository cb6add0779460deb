//! Session audit logging for deslang.
//!
//! Review sessions append NDJSON events (one JSON object per line) to a
//! log file stored beside the corpus, so a reviewed corpus carries its
//! own history: when sessions ran, what was accepted or rejected, and
//! where flushes failed.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (session_start, accept, reject, ...)
//! - `actor`: The operator string (e.g., `user@HOST`)
//! - `prompt_index`: Optional zero-based prompt index for per-prompt events
//! - `details`: Freeform object with action-specific details
//!
//! Appending is best-effort at call sites; a session never aborts because
//! its audit trail could not be written.

use crate::error::{DeslangError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the audit log, created next to the corpus.
pub const LOG_FILE_NAME: &str = "review-log.ndjson";

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Review session started
    SessionStart,
    /// Translation accepted and persisted
    Accept,
    /// Translation rejected, prompt will be refetched
    Reject,
    /// A corpus flush failed
    FlushError,
    /// Session interrupted by the operator
    Interrupt,
    /// Review session finished normally
    SessionEnd,
}

impl std::fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewAction::SessionStart => write!(f, "session_start"),
            ReviewAction::Accept => write!(f, "accept"),
            ReviewAction::Reject => write!(f, "reject"),
            ReviewAction::FlushError => write!(f, "flush_error"),
            ReviewAction::Interrupt => write!(f, "interrupt"),
            ReviewAction::SessionEnd => write!(f, "session_end"),
        }
    }
}

/// An event record for the audit log.
///
/// Events are serialized as single-line JSON objects and appended to
/// the review-log.ndjson file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: ReviewAction,

    /// The operator who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Zero-based prompt index for per-prompt events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_index: Option<usize>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl ReviewEvent {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: ReviewAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            prompt_index: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the prompt index for this event.
    pub fn with_prompt(mut self, index: usize) -> Self {
        self.prompt_index = Some(index);
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            DeslangError::Persistence(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Handle on one audit log file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// The log that belongs to a corpus: a sibling file in its directory.
    pub fn beside_corpus(corpus_path: &Path) -> Self {
        let dir = match corpus_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self {
            path: dir.join(LOG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event as one NDJSON line, creating the file if needed.
    pub fn append(&self, event: &ReviewEvent) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                DeslangError::Persistence(format!(
                    "failed to open log file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            DeslangError::Persistence(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        file.sync_all().map_err(|e| {
            DeslangError::Persistence(format!(
                "failed to sync log file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
