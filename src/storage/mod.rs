//! Storage layer for harvested announcements
//!
//! This module provides:
//! - Composite document ids and their date-partitioned directories
//! - The `DocumentStore` trait the crawler persists through
//! - A filesystem implementation writing a JSON record and an XML-wrapped body

mod filesystem;
mod identifier;
mod traits;

pub use filesystem::{
    wrap_body, write_artifacts, FileStore, BODY_EXTENSION, BODY_ROOT_TAG, RECORD_EXTENSION,
};
pub use identifier::{build_id, build_path};
pub use traits::{DocumentStore, StorageError, StorageResult};
