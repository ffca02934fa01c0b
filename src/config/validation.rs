use crate::config::types::{Config, OutputConfig, PortalConfig, RenderConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_portal_config(&config.portal)?;
    validate_render_config(&config.render)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates portal addressing
fn validate_portal_config(config: &PortalConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if !config.summary_path.contains("{date}") {
        return Err(ConfigError::Validation(format!(
            "summary_path must contain a {{date}} placeholder, got '{}'",
            config.summary_path
        )));
    }

    if config.link_title.trim().is_empty() {
        return Err(ConfigError::Validation(
            "link_title cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates render timing and ready selectors
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.poll_interval_ms < 10 {
        return Err(ConfigError::Validation(format!(
            "poll_interval_ms must be >= 10ms, got {}ms",
            config.poll_interval_ms
        )));
    }

    if config.ready_timeout_ms < config.poll_interval_ms {
        return Err(ConfigError::Validation(format!(
            "ready_timeout_ms ({}ms) must be >= poll_interval_ms ({}ms)",
            config.ready_timeout_ms, config.poll_interval_ms
        )));
    }

    validate_selector("summary_ready_selector", &config.summary_ready_selector)?;
    validate_selector("document_ready_selector", &config.document_ready_selector)?;

    Ok(())
}

fn validate_selector(name: &str, css: &str) -> Result<(), ConfigError> {
    if Selector::parse(css).is_err() {
        return Err(ConfigError::Validation(format!(
            "{} is not a valid CSS selector: '{}'",
            name, css
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.document_root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "document_root cannot be empty".to_string(),
        ));
    }
    Ok(())
}
