//! Chromium-backed page fetcher using chromiumoxide
//!
//! The portal renders its content client-side, so pages are loaded in a
//! headless browser and polled until a ready selector appears.

use crate::config::RenderConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A single headless browser tab, reused for every page of a crawl
pub struct ChromiumFetcher {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    ready_timeout: Duration,
    poll_interval: Duration,
    current_url: String,
}

impl ChromiumFetcher {
    /// Launches headless Chromium and opens the tab the crawl will drive
    pub async fn launch(config: &RenderConfig) -> FetchResult<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(|e| FetchError::Session(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| FetchError::Session(format!("failed to launch Chromium: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Session(format!("failed to open tab: {e}")))?;

        tracing::info!("Chromium session started");

        Ok(Self {
            browser,
            page,
            handler,
            ready_timeout: Duration::from_millis(config.ready_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            current_url: String::new(),
        })
    }

    async fn selector_present(&self, script: &str) -> bool {
        match self.page.evaluate(script).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            // The document may be mid-navigation; treat as not ready yet
            Err(_) => false,
        }
    }
}

#[async_trait]
impl PageFetcher for ChromiumFetcher {
    async fn navigate(&mut self, url: &str) -> FetchResult<()> {
        let navigation_error = |e: chromiumoxide::error::CdpError| FetchError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        // Portal routes differ only by fragment, which would keep the previous
        // view's DOM around; start from a blank document so the ready check
        // cannot match stale markup.
        self.page.goto("about:blank").await.map_err(navigation_error)?;

        match tokio::time::timeout(self.ready_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(navigation_error(e)),
            Err(_) => {
                return Err(FetchError::Navigation {
                    url: url.to_string(),
                    message: format!(
                        "navigation timed out after {}ms",
                        self.ready_timeout.as_millis()
                    ),
                })
            }
        }

        self.current_url = url.to_string();
        Ok(())
    }

    async fn wait_until_rendered(&mut self, ready_selector: &str) -> FetchResult<()> {
        let literal = serde_json::to_string(ready_selector)
            .map_err(|e| FetchError::Session(format!("unusable ready selector: {e}")))?;
        let script = format!("document.querySelector({literal}) !== null");

        let poll = async {
            while !self.selector_present(&script).await {
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(self.ready_timeout, poll)
            .await
            .map_err(|_| FetchError::RenderTimeout {
                url: self.current_url.clone(),
                selector: ready_selector.to_string(),
                timeout_ms: self.ready_timeout.as_millis() as u64,
            })
    }

    async fn current_markup(&mut self) -> FetchResult<String> {
        if self.current_url.is_empty() {
            return Err(FetchError::NoPage);
        }

        self.page
            .content()
            .await
            .map_err(|e| FetchError::Navigation {
                url: self.current_url.clone(),
                message: format!("failed to read page content: {e}"),
            })
    }

    async fn close(&mut self) -> FetchResult<()> {
        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| FetchError::Session(format!("failed to close Chromium: {e}")));
        self.handler.abort();
        result
    }
}
