//! Output module for reporting crawl results
//!
//! This module handles tallying a finished crawl and printing the summary the
//! command line shows at the end of a run.

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};
