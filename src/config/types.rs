use serde::Deserialize;

/// Main configuration structure for the BORM scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Addressing of the bulletin portal
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Base URL that summary paths and announcement links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Summary page path relative to the base URL; `{date}` becomes `dd-mm-yyyy`
    #[serde(rename = "summary-path")]
    pub summary_path: String,

    /// Title attribute that marks announcement links on the summary page
    #[serde(rename = "link-title")]
    pub link_title: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.borm.es/".to_string(),
            summary_path: "#/home/sumario/{date}".to_string(),
            link_title: "Ver anuncio".to_string(),
        }
    }
}

/// Which page fetcher drives the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    /// Headless Chromium, for the client-side rendered portal
    #[default]
    Chromium,
    /// Plain HTTP GET, for endpoints serving pre-rendered markup
    Http,
}

/// Page rendering behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub backend: RenderBackend,

    /// Upper bound on waiting for a page's ready selector (milliseconds)
    #[serde(rename = "ready-timeout-ms")]
    pub ready_timeout_ms: u64,

    /// How often the ready selector is re-checked (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Selector whose presence means a summary page finished rendering
    ///
    /// Should match page scaffolding rather than an optional field, or pages
    /// lacking that field never count as rendered.
    #[serde(rename = "summary-ready-selector")]
    pub summary_ready_selector: String,

    /// Selector whose presence means an announcement page finished rendering
    #[serde(rename = "document-ready-selector")]
    pub document_ready_selector: String,

    /// Explicit browser binary; auto-detected when absent
    #[serde(rename = "chrome-executable")]
    pub chrome_executable: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: RenderBackend::Chromium,
            ready_timeout_ms: 15_000,
            poll_interval_ms: 250,
            summary_ready_selector: "div.titular, div.row.ng-scope".to_string(),
            document_ready_selector:
                "div.cabecera02, div.col-md-5.col-sm-6.col-xs-12, div.cuerpoAnuncioHTML"
                    .to_string(),
            chrome_executable: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root of the `YYYY/MM/DD/<doc-id>/` document tree
    #[serde(rename = "document-root")]
    pub document_root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            document_root: "./documents".to_string(),
        }
    }
}
