//! BORM scraper: daily bulletin harvester
//!
//! This crate walks the daily issues of the Boletín Oficial de la Región de Murcia,
//! turning each published announcement into a structured record plus its raw body,
//! stored in a date-partitioned directory layout.

pub mod config;
pub mod crawler;
pub mod output;
pub mod parser;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for BORM scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid crawl range: {start} is after {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while obtaining rendered markup for a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("{url} did not render '{selector}' within {timeout_ms}ms")]
    RenderTimeout {
        url: String,
        selector: String,
        timeout_ms: u64,
    },

    #[error("No page has been loaded yet")]
    NoPage,

    #[error("Failed to start fetch session: {0}")]
    Session(String),
}

/// Result type alias for BORM scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlRange};
pub use parser::{DaySummary, DocumentRecord};
pub use state::{CrawlReport, DayOutcome, DocumentOutcome, FailureKind};
