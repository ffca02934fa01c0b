//! Portal addressing
//!
//! Builds summary page URLs for a given day and resolves the portal-relative
//! announcement links harvested from those pages.

use crate::config::PortalConfig;
use chrono::NaiveDate;
use url::Url;

/// Date format used by the portal in summary addresses (`dd-mm-yyyy`)
pub const PORTAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Builds the summary page URL for a day
///
/// The configured summary path has its `{date}` placeholder replaced with the
/// day in `dd-mm-yyyy` form and is joined onto the portal base URL.
///
/// # Example
///
/// ```
/// use borm_scraper::config::PortalConfig;
/// use borm_scraper::url::summary_url;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// let url = summary_url(&PortalConfig::default(), day).unwrap();
/// assert_eq!(url.as_str(), "https://www.borm.es/#/home/sumario/07-03-2024");
/// ```
pub fn summary_url(portal: &PortalConfig, day: NaiveDate) -> Result<Url, url::ParseError> {
    let base = Url::parse(&portal.base_url)?;
    let path = portal
        .summary_path
        .replace("{date}", &day.format(PORTAL_DATE_FORMAT).to_string());
    base.join(&path)
}

/// Resolves an announcement href against the portal base URL
///
/// Portal links are fragment routes (`#/home/anuncio/...`), so unlike ordinary
/// crawling fragment-only hrefs are kept. Returns None for empty hrefs,
/// non-navigational schemes and anything that does not resolve to HTTP(S).
pub fn resolve_link(base_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
