//! Crawler coordinator - day-by-day, document-by-document orchestration
//!
//! This module contains the main crawl loop. For each day in the range it:
//! - Renders the day's summary page and parses the announcement listing
//! - Renders and parses each announcement in page order
//! - Persists each record through the document store
//!
//! Failures are contained where they happen: a failed announcement is
//! recorded and its siblings still run, a failed summary page turns the day
//! into an empty one and the range moves on.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::range::CrawlRange;
use crate::parser::{parse_document, parse_summary, DaySummary, DocumentContext};
use crate::state::{CrawlReport, DayOutcome, DayStatus, DocumentOutcome, FailureKind};
use crate::storage::DocumentStore;
use crate::url::summary_url;
use crate::ScraperError;
use chrono::NaiveDate;
use std::path::PathBuf;
use url::Url;

/// Drives one fetch session over a range of days
///
/// The coordinator exclusively owns its fetcher for the whole run; pages are
/// loaded one at a time, in order.
pub struct Coordinator<F, S> {
    config: Config,
    base_url: Url,
    fetcher: F,
    store: S,
}

impl<F: PageFetcher, S: DocumentStore> Coordinator<F, S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Portal addressing and render settings
    /// * `fetcher` - The page session to drive
    /// * `store` - Where parsed announcements are persisted
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(ScraperError)` - The configured base URL does not parse
    pub fn new(config: Config, fetcher: F, store: S) -> Result<Self, ScraperError> {
        let base_url = Url::parse(&config.portal.base_url)?;
        Ok(Self {
            config,
            base_url,
            fetcher,
            store,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls every day of `range` in ascending order
    ///
    /// Always yields exactly one [`DayOutcome`] per day, whatever happened to
    /// the days before it.
    pub async fn crawl_range(&mut self, range: CrawlRange) -> CrawlReport {
        tracing::info!(
            "Downloading content from day {} to {}",
            range.start(),
            range.end()
        );

        let mut report = CrawlReport::default();
        for day in range.days() {
            let outcome = self.crawl_day_outcome(day).await;
            report.days.push(outcome);
        }

        tracing::info!(
            "Downloaded from {} to {}: {} documents saved, {} skipped",
            range.start(),
            range.end(),
            report.saved_paths().len(),
            report.failures().len()
        );

        report
    }

    /// Crawls a single day
    ///
    /// Returns one outcome per announcement link, in page order. A day whose
    /// summary page cannot be obtained returns an empty list.
    pub async fn crawl_day(&mut self, day: NaiveDate) -> Vec<DocumentOutcome> {
        self.crawl_day_outcome(day).await.documents
    }

    async fn crawl_day_outcome(&mut self, day: NaiveDate) -> DayOutcome {
        tracing::info!("Downloading bulletin content for day {}", day);

        let url = match summary_url(&self.config.portal, day) {
            Ok(url) => url.to_string(),
            Err(e) => {
                let error = ScraperError::from(e);
                tracing::error!("Cannot address summary for {}: {}", day, error);
                return DayOutcome {
                    day,
                    summary_url: String::new(),
                    status: DayStatus::SummaryFailed {
                        kind: FailureKind::of(&error),
                        message: error.to_string(),
                    },
                    documents: Vec::new(),
                };
            }
        };

        match self.fetch_summary(&url).await {
            Ok(summary) => {
                tracing::info!(
                    "Bulletin {} for {} lists {} announcements",
                    summary.bulletin_number,
                    day,
                    summary.links.len()
                );
                let documents = self.crawl_documents(day, &summary).await;
                DayOutcome {
                    day,
                    summary_url: url,
                    status: DayStatus::Crawled,
                    documents,
                }
            }
            Err(e) => {
                tracing::warn!("Skipping day {}: {}", day, e);
                DayOutcome {
                    day,
                    summary_url: url,
                    status: DayStatus::SummaryFailed {
                        kind: FailureKind::of(&e),
                        message: e.to_string(),
                    },
                    documents: Vec::new(),
                }
            }
        }
    }

    async fn fetch_summary(&mut self, url: &str) -> Result<DaySummary, ScraperError> {
        let markup = self
            .fetcher
            .render(url, &self.config.render.summary_ready_selector)
            .await?;

        Ok(parse_summary(
            &markup,
            url,
            &self.base_url,
            &self.config.portal.link_title,
        ))
    }

    async fn crawl_documents(
        &mut self,
        day: NaiveDate,
        summary: &DaySummary,
    ) -> Vec<DocumentOutcome> {
        let mut outcomes = Vec::with_capacity(summary.links.len());

        for (url, doc_type) in summary.announcements() {
            let outcome = match self.crawl_document(day, summary, url, doc_type).await {
                Ok(path) => DocumentOutcome::Saved {
                    url: url.to_string(),
                    doc_type: doc_type.to_string(),
                    path,
                },
                Err(e) => {
                    let outcome = DocumentOutcome::skipped(url, doc_type, &e);
                    if FailureKind::of(&e).is_systemic() {
                        tracing::error!("Failed to store announcement {}: {}", url, e);
                    } else {
                        tracing::warn!("Skipping announcement {}: {}", url, e);
                    }
                    outcome
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Renders, parses and persists one announcement
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Directory holding the saved artifacts
    /// * `Err(ScraperError)` - The page could not be fetched or the record not stored
    pub async fn crawl_document(
        &mut self,
        day: NaiveDate,
        summary: &DaySummary,
        url: &str,
        doc_type: &str,
    ) -> Result<PathBuf, ScraperError> {
        tracing::info!("Scraping announcement: {}", url);

        let markup = self
            .fetcher
            .render(url, &self.config.render.document_ready_selector)
            .await?;

        let record = parse_document(
            &markup,
            DocumentContext {
                bulletin_number: &summary.bulletin_number,
                bulletin_date: &summary.bulletin_date,
                doc_type,
                url,
            },
        );

        if record.publication_id.is_empty() {
            tracing::warn!(
                "Announcement {} has no publication number; its id is not unique",
                url
            );
        }

        Ok(self.store.persist(day, &record)?)
    }

    /// Closes the fetch session
    pub async fn shutdown(mut self) -> Result<(), ScraperError> {
        self.fetcher.close().await?;
        Ok(())
    }
}
