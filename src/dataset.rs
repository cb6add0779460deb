//! Slang dataset loading.
//!
//! The source dataset is a CSV file with the header columns `Slang`,
//! `Description`, `Example`, and `Context`. Columns are matched by header
//! name, so column order does not matter and unknown columns are ignored.
//! A row missing any required column is a dataset format error naming the
//! offending row.

use crate::error::{DeslangError, Result};
use serde::Deserialize;
use std::path::Path;

/// One row of the input dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlangRecord {
    /// The slang term or phrase.
    #[serde(rename = "Slang")]
    pub word: String,

    /// A brief explanation of what the slang means.
    #[serde(rename = "Description")]
    pub definition: String,

    /// A sentence demonstrating how the slang is used.
    #[serde(rename = "Example")]
    pub example: String,

    /// Where or how the slang is typically used.
    #[serde(rename = "Context")]
    pub context: String,
}

/// Load all records from a CSV dataset, in file order.
///
/// The file must exist; a missing dataset is a setup error, not a format
/// error. Row numbers in error messages count the header as line 1.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<SlangRecord>> {
    let path = path.as_ref();

    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        DeslangError::UserError(format!(
            "failed to read dataset '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<SlangRecord>().enumerate() {
        let record = row.map_err(|e| DeslangError::DataFormat(format!("row {}: {}", i + 2, e)))?;
        records.push(record);
    }

    Ok(records)
}
