//! Crawler module for bulletin harvesting
//!
//! This module contains the core crawling logic, including:
//! - Day range iteration
//! - Page fetch sessions (headless Chromium or plain HTTP)
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod range;
mod renderer;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use range::CrawlRange;
pub use renderer::ChromiumFetcher;

use crate::config::{Config, RenderBackend};
use crate::state::CrawlReport;
use crate::storage::FileStore;
use crate::ScraperError;

/// Runs a complete crawl over `range` with the configured backend
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open a fetch session for the configured backend
/// 2. Crawl each day of the range in order
/// 3. Close the session
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Per-day and per-document outcomes
/// * `Err(ScraperError)` - The session could not be opened or closed
pub async fn crawl(config: Config, range: CrawlRange) -> Result<CrawlReport, ScraperError> {
    let store = FileStore::new(&config.output.document_root);

    match config.render.backend {
        RenderBackend::Chromium => {
            let fetcher = ChromiumFetcher::launch(&config.render).await?;
            run_with(config, fetcher, store, range).await
        }
        RenderBackend::Http => {
            let fetcher = HttpFetcher::new()?;
            run_with(config, fetcher, store, range).await
        }
    }
}

/// Crawls `range` with an already opened fetcher, closing it afterwards
pub async fn run_with<F: PageFetcher>(
    config: Config,
    fetcher: F,
    store: FileStore,
    range: CrawlRange,
) -> Result<CrawlReport, ScraperError> {
    let mut coordinator = Coordinator::new(config, fetcher, store)?;
    let report = coordinator.crawl_range(range).await;

    if let Err(e) = coordinator.shutdown().await {
        tracing::warn!("Failed to close fetch session: {}", e);
    }

    Ok(report)
}
