//! Storage traits and error types

use crate::parser::DocumentRecord;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a document
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for parsed announcements
///
/// Writes for the same document id replace what was there before.
pub trait DocumentStore {
    /// Persists a record and its raw body for the crawl day
    ///
    /// # Returns
    ///
    /// The directory holding the document's artifacts
    fn persist(&self, day: NaiveDate, record: &DocumentRecord) -> StorageResult<PathBuf>;
}
