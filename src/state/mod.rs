//! Crawl outcome tracking
//!
//! This module defines the explicit per-document and per-day results the
//! crawler returns instead of silently dropping failed items.

mod outcome;

pub use outcome::{CrawlReport, DayOutcome, DayStatus, DocumentOutcome, FailureKind};
