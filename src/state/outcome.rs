//! Per-item crawl outcomes
//!
//! Every announcement and every day visited produces an explicit outcome, so a
//! skipped document is never confused with one that was saved.

use crate::{FetchError, ScraperError};
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why an item was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Navigation or network failure
    Fetch,

    /// The page never reached its ready condition
    RenderTimeout,

    /// The document could not be written; usually a misconfigured document root
    Storage,
}

impl FailureKind {
    /// Classifies a crawl error
    pub fn of(error: &ScraperError) -> Self {
        match error {
            ScraperError::Fetch(FetchError::RenderTimeout { .. }) => Self::RenderTimeout,
            ScraperError::Storage(_) | ScraperError::Io(_) => Self::Storage,
            _ => Self::Fetch,
        }
    }

    /// Returns true for failures that point at the local setup rather than the portal
    pub fn is_systemic(&self) -> bool {
        matches!(self, Self::Storage)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fetch => "fetch",
            Self::RenderTimeout => "render-timeout",
            Self::Storage => "storage",
        };
        write!(f, "{}", s)
    }
}

/// Result of processing one announcement link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Record and body were written to `path`
    Saved {
        url: String,
        doc_type: String,
        path: PathBuf,
    },

    /// The announcement was skipped; siblings were still processed
    Skipped {
        url: String,
        doc_type: String,
        kind: FailureKind,
        message: String,
    },
}

impl DocumentOutcome {
    pub fn skipped(url: &str, doc_type: &str, error: &ScraperError) -> Self {
        Self::Skipped {
            url: url.to_string(),
            doc_type: doc_type.to_string(),
            kind: FailureKind::of(error),
            message: error.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Saved { url, .. } | Self::Skipped { url, .. } => url,
        }
    }

    pub fn doc_type(&self) -> &str {
        match self {
            Self::Saved { doc_type, .. } | Self::Skipped { doc_type, .. } => doc_type,
        }
    }

    /// Directory of the saved artifacts, if the document was saved
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Saved { path, .. } => Some(path),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Saved { .. } => None,
            Self::Skipped { kind, .. } => Some(*kind),
        }
    }
}

/// How far a day got
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    /// The summary page was fetched; see the document outcomes
    Crawled,

    /// The summary page could not be obtained; no documents were attempted
    SummaryFailed { kind: FailureKind, message: String },
}

/// Result of crawling one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOutcome {
    pub day: NaiveDate,
    pub summary_url: String,
    pub status: DayStatus,
    pub documents: Vec<DocumentOutcome>,
}

impl DayOutcome {
    pub fn is_crawled(&self) -> bool {
        matches!(self.status, DayStatus::Crawled)
    }
}

/// Result of crawling a date range, one entry per day in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub days: Vec<DayOutcome>,
}

impl CrawlReport {
    pub fn days_visited(&self) -> usize {
        self.days.len()
    }

    /// Every document outcome across the range, in crawl order
    pub fn documents(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.days.iter().flat_map(|d| d.documents.iter())
    }

    /// Directories of all saved documents, in crawl order
    pub fn saved_paths(&self) -> Vec<&Path> {
        self.documents().filter_map(DocumentOutcome::path).collect()
    }

    /// Skipped documents, in crawl order
    pub fn failures(&self) -> Vec<&DocumentOutcome> {
        self.documents().filter(|d| !d.is_saved()).collect()
    }

    /// Returns true if any document failed for a systemic reason
    pub fn has_systemic_failures(&self) -> bool {
        self.documents()
            .filter_map(DocumentOutcome::failure_kind)
            .any(|kind| kind.is_systemic())
    }
}
