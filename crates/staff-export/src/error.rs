//! Error types for export and import.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading row files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV row carries a column the fixed header does not have.
    #[error("Column '{column}' is not in the CSV header of {}", path.display())]
    UnexpectedColumn { column: String, path: PathBuf },

    /// A JSONL line could not be parsed as a record.
    #[error("Invalid record at {}:{line}: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
