//! Statistics generation from a crawl report
//!
//! This module provides functionality for summarizing and displaying
//! the outcomes of a crawl run.

use crate::state::{CrawlReport, DocumentOutcome, FailureKind};
use std::collections::HashMap;
use std::path::PathBuf;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Number of days visited
    pub days_visited: u64,

    /// Days whose summary page could not be obtained
    pub days_failed: u64,

    /// Announcement links found across all summaries
    pub documents_found: u64,

    /// Announcements persisted
    pub documents_saved: u64,

    /// Skipped announcements by failure kind
    pub failures_by_kind: HashMap<FailureKind, u64>,

    /// Saved documents by announcement type
    pub saved_by_type: HashMap<String, u64>,

    /// Directories that received artifacts
    pub saved_paths: Vec<PathBuf>,
}

impl CrawlStatistics {
    /// Tallies a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = CrawlStatistics {
            days_visited: report.days_visited() as u64,
            days_failed: report.days.iter().filter(|d| !d.is_crawled()).count() as u64,
            ..Default::default()
        };

        for outcome in report.documents() {
            stats.documents_found += 1;
            match outcome {
                DocumentOutcome::Saved { doc_type, path, .. } => {
                    stats.documents_saved += 1;
                    *stats.saved_by_type.entry(doc_type.clone()).or_insert(0) += 1;
                    stats.saved_paths.push(path.clone());
                }
                DocumentOutcome::Skipped { kind, .. } => {
                    *stats.failures_by_kind.entry(*kind).or_insert(0) += 1;
                }
            }
        }

        stats
    }

    pub fn documents_skipped(&self) -> u64 {
        self.failures_by_kind.values().sum()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Days visited: {}", stats.days_visited);
    println!("  Days without summary: {}", stats.days_failed);
    println!("  Announcements found: {}", stats.documents_found);
    println!("  Announcements saved: {}", stats.documents_saved);
    println!();

    if !stats.saved_by_type.is_empty() {
        println!("Saved by Type:");
        let mut type_counts: Vec<_> = stats.saved_by_type.iter().collect();
        type_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (doc_type, count) in type_counts {
            let label = if doc_type.is_empty() {
                "(untyped)"
            } else {
                doc_type.as_str()
            };
            println!("  {}: {}", label, count);
        }
        println!();
    }

    if !stats.failures_by_kind.is_empty() {
        println!("Skipped Announcements:");
        let mut failure_counts: Vec<_> = stats.failures_by_kind.iter().collect();
        failure_counts.sort_by(|a, b| b.1.cmp(a.1));

        for (kind, count) in failure_counts {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    let success_rate = if stats.documents_found > 0 {
        (stats.documents_saved as f64 / stats.documents_found as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} announcements saved)",
        success_rate, stats.documents_saved, stats.documents_found
    );
}
