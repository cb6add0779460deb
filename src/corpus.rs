//! The persisted translation corpus and the in-memory review buffer.
//!
//! The corpus is a single JSON array of `{role, content}` objects. Entries
//! travel in adjacent user/assistant pairs: the user entry carries the
//! original slang example, the assistant entry the accepted (or attempted)
//! translation.
//!
//! Every flush is a full read-modify-write: read what is on disk, append
//! the buffer, rewrite the file atomically. A missing corpus starts empty
//! and is created by the first flush; an unparseable corpus is replaced
//! rather than aborting the session, and the replacement is reported so
//! the data loss is visible to the operator.

use crate::error::{DeslangError, Result};
use crate::fs::atomic_write_file;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Speaker of one corpus entry. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One persisted corpus entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub role: Role,
    pub content: String,
}

impl Exchange {
    /// A user-role entry holding an original example sentence.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant-role entry holding a generated translation.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// In-memory buffer of exchanges awaiting a successful flush.
///
/// The review loop and the interrupt handler share one buffer; it is
/// cleared only on the accept path, and only after the flush that wrote
/// it succeeded. Until then its content rides along into every flush.
#[derive(Debug, Default)]
pub struct ReviewBuffer {
    entries: Vec<Exchange>,
}

impl ReviewBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one example/translation pair as two adjacent entries.
    pub fn push_pair(&mut self, example: impl Into<String>, translation: impl Into<String>) {
        self.entries.push(Exchange::user(example));
        self.entries.push(Exchange::assistant(translation));
    }

    pub fn entries(&self) -> &[Exchange] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// How the on-disk corpus was found during a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusCondition {
    /// File does not exist yet.
    Missing,
    /// Parsed cleanly.
    Readable,
    /// Exists but is not valid JSON; treated as empty.
    Corrupt,
}

/// Outcome of one flush, for operator reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    /// Entries appended by this flush.
    pub appended: usize,
    /// Entries in the corpus after the flush.
    pub total: usize,
    /// True when unparseable on-disk content was discarded and replaced.
    pub recovered: bool,
}

/// Read the corpus, tolerating absence and corruption.
///
/// Only a genuine I/O failure (file exists but cannot be read) is an
/// error; absence and unparseable content both yield an empty corpus
/// with the condition recording what happened.
pub fn read<P: AsRef<Path>>(path: P) -> Result<(Vec<Exchange>, CorpusCondition)> {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok((Vec::new(), CorpusCondition::Missing));
        }
        Err(e) => {
            return Err(DeslangError::Persistence(format!(
                "failed to read corpus '{}': {}",
                path.display(),
                e
            )));
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => Ok((entries, CorpusCondition::Readable)),
        Err(_) => Ok((Vec::new(), CorpusCondition::Corrupt)),
    }
}

/// Append entries to the corpus with a full read-modify-write.
///
/// The corpus on disk afterwards equals the readable corpus before the
/// flush followed by `entries`, in order. The write is atomic, so a crash
/// mid-flush leaves the previous content intact.
pub fn flush<P: AsRef<Path>>(path: P, entries: &[Exchange]) -> Result<FlushReport> {
    let path = path.as_ref();

    let (mut existing, condition) = read(path)?;
    existing.extend_from_slice(entries);

    let json = serde_json::to_string_pretty(&existing)
        .map_err(|e| DeslangError::Persistence(format!("failed to serialize corpus: {}", e)))?;
    atomic_write_file(path, &format!("{}\n", json))?;

    Ok(FlushReport {
        appended: entries.len(),
        total: existing.len(),
        recovered: condition == CorpusCondition::Corrupt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_entries(path: &Path) -> Vec<Exchange> {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let json = serde_json::to_string(&Exchange::user("He's got rizz.")).unwrap();
        assert!(json.contains("\"role\":\"user\""));

        let json = serde_json::to_string(&Exchange::assistant("He is charming.")).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
    }

    #[test]
    fn test_push_pair_appends_user_then_assistant() {
        let mut buffer = ReviewBuffer::new();
        buffer.push_pair("He's got rizz.", "He is charming.");

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.entries()[0], Exchange::user("He's got rizz."));
        assert_eq!(buffer.entries()[1], Exchange::assistant("He is charming."));
    }

    #[test]
    fn test_flush_creates_missing_corpus() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");
        let mut buffer = ReviewBuffer::new();
        buffer.push_pair("example", "translation");

        let report = flush(&path, buffer.entries()).unwrap();

        assert_eq!(report.appended, 2);
        assert_eq!(report.total, 2);
        assert!(!report.recovered);
        assert_eq!(read_entries(&path).len(), 2);
    }

    #[test]
    fn test_flush_appends_after_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");

        let mut first = ReviewBuffer::new();
        first.push_pair("one", "uno");
        flush(&path, first.entries()).unwrap();

        let mut second = ReviewBuffer::new();
        second.push_pair("two", "dos");
        let report = flush(&path, second.entries()).unwrap();

        assert_eq!(report.appended, 2);
        assert_eq!(report.total, 4);

        let entries = read_entries(&path);
        assert_eq!(entries[0].content, "one");
        assert_eq!(entries[1].content, "uno");
        assert_eq!(entries[2].content, "two");
        assert_eq!(entries[3].content, "dos");
    }

    #[test]
    fn test_flush_replaces_corrupt_corpus_with_buffer_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, "{ definitely not a corpus").unwrap();

        let mut buffer = ReviewBuffer::new();
        buffer.push_pair("fresh", "new");
        let report = flush(&path, buffer.entries()).unwrap();

        assert!(report.recovered);
        assert_eq!(report.total, 2);

        let entries = read_entries(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "fresh");
    }

    #[test]
    fn test_flush_with_empty_buffer_still_writes_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");

        let report = flush(&path, &[]).unwrap();

        assert_eq!(report.appended, 0);
        assert_eq!(report.total, 0);
        assert!(path.exists());
        assert!(read_entries(&path).is_empty());
    }

    #[test]
    fn test_flush_preserves_pair_adjacency_across_multiple_pairs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");

        let mut buffer = ReviewBuffer::new();
        buffer.push_pair("e1", "t1");
        buffer.push_pair("e2", "t2");
        flush(&path, buffer.entries()).unwrap();

        let roles: Vec<Role> = read_entries(&path).iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[test]
    fn test_read_missing_corpus_is_empty() {
        let dir = TempDir::new().unwrap();
        let (entries, condition) = read(dir.path().join("nope.json")).unwrap();

        assert!(entries.is_empty());
        assert_eq!(condition, CorpusCondition::Missing);
    }

    #[test]
    fn test_read_corrupt_corpus_is_empty_with_condition() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, "]]]]").unwrap();

        let (entries, condition) = read(&path).unwrap();

        assert!(entries.is_empty());
        assert_eq!(condition, CorpusCondition::Corrupt);
    }

    #[test]
    fn test_corpus_file_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");

        let mut buffer = ReviewBuffer::new();
        buffer.push_pair("e", "t");
        flush(&path, buffer.entries()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[\n"));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_clear_empties_the_buffer() {
        let mut buffer = ReviewBuffer::new();
        buffer.push_pair("e", "t");
        assert!(!buffer.is_empty());

        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }
}
