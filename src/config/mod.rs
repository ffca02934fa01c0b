//! Configuration module for the BORM scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so an empty file (or no file at all) yields a
//! configuration pointed at the live portal.
//!
//! # Example
//!
//! ```no_run
//! use borm_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("borm.toml")).unwrap();
//! println!("Documents go to: {}", config.output.document_root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, PortalConfig, RenderBackend, RenderConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
