//! Page fetching
//!
//! This module defines the `PageFetcher` capability the crawler drives, and
//! an HTTP implementation for endpoints that serve already-rendered markup.
//! The fetcher is owned by a single coordinator and navigated strictly in
//! sequence; it holds exactly one "current page" at a time.

use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A session that can load a URL and hand back its rendered markup
#[async_trait]
pub trait PageFetcher: Send {
    /// Loads `url`, replacing the current page
    async fn navigate(&mut self, url: &str) -> FetchResult<()>;

    /// Waits until `ready_selector` matches in the current page
    ///
    /// Implementations bound the wait and fail with
    /// [`FetchError::RenderTimeout`] when the selector never appears.
    async fn wait_until_rendered(&mut self, ready_selector: &str) -> FetchResult<()>;

    /// Markup of the current page as it stands now
    async fn current_markup(&mut self) -> FetchResult<String>;

    /// Navigates, waits for the ready selector, and returns the markup
    async fn render(&mut self, url: &str, ready_selector: &str) -> FetchResult<String> {
        self.navigate(url).await?;
        self.wait_until_rendered(ready_selector).await?;
        self.current_markup().await
    }

    /// Releases the session
    async fn close(&mut self) -> FetchResult<()> {
        Ok(())
    }
}

/// Builds the HTTP client used by [`HttpFetcher`]
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("borm-scraper/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with plain GET requests
///
/// The response body is the final markup, so there is nothing to wait for
/// after navigation.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    current: Option<String>,
}

impl HttpFetcher {
    pub fn new() -> FetchResult<Self> {
        let client = build_http_client().map_err(|e| FetchError::Session(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn navigate(&mut self, url: &str) -> FetchResult<()> {
        self.current = None;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| navigation_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !content_type.contains("html") {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(url, &e))?;

        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        self.current = Some(body);
        Ok(())
    }

    async fn wait_until_rendered(&mut self, _ready_selector: &str) -> FetchResult<()> {
        Ok(())
    }

    async fn current_markup(&mut self) -> FetchResult<String> {
        self.current.clone().ok_or(FetchError::NoPage)
    }
}

fn navigation_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchError::Navigation {
        url: url.to_string(),
        message,
    }
}
