//! Summary page parser
//!
//! A day's summary page lists every announcement in the bulletin. The
//! announcement types and the announcement links live in two separate
//! structures of the page and are collected independently; they are paired
//! afterwards by position.

use crate::parser::text::{select_all, select_first, stripped_text};
use crate::url::resolve_link;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use url::Url;

static BULLETIN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Nº\s(\d+),").expect("invalid regex: bulletin number"));

static BULLETIN_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}-\d{2}-\d{4})").expect("invalid regex: bulletin date"));

/// Bulletin metadata and announcement listing for one day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySummary {
    /// Bulletin number from the page title, empty when the title lacks it
    pub bulletin_number: String,

    /// `dd-mm-yyyy` date taken from the request URL, empty when absent
    pub bulletin_date: String,

    /// Announcement types in page order
    pub types: Vec<String>,

    /// Absolute announcement URLs in page order
    pub links: Vec<String>,
}

impl DaySummary {
    /// Type paired with the link at `index`
    ///
    /// Pairing is positional. Links beyond the end of `types` get an empty
    /// type; surplus types are never paired with anything.
    pub fn type_for(&self, index: usize) -> &str {
        self.types.get(index).map(String::as_str).unwrap_or("")
    }

    /// Every link with its paired type, in page order
    pub fn announcements(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.links
            .iter()
            .enumerate()
            .map(|(i, link)| (link.as_str(), self.type_for(i)))
    }
}

/// Parses a rendered summary page
///
/// # Arguments
///
/// * `html` - Rendered markup of the summary page
/// * `request_url` - URL the page was requested with; the bulletin date is read from it
/// * `base_url` - Portal base that announcement hrefs are resolved against
/// * `link_title` - Title attribute identifying announcement links
///
/// Missing structure yields empty fields; this function never fails.
pub fn parse_summary(
    html: &str,
    request_url: &str,
    base_url: &Url,
    link_title: &str,
) -> DaySummary {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let summary = DaySummary {
        bulletin_number: extract_bulletin_number(&document),
        bulletin_date: extract_bulletin_date(request_url),
        types: select_all(root, "div.anuDer p")
            .into_iter()
            .filter_map(|p| select_first(p, "i.ng-binding"))
            .map(stripped_text)
            .collect(),
        links: select_all(root, "div.row.ng-scope a[title]")
            .into_iter()
            .filter(|a| a.value().attr("title") == Some(link_title))
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| resolve_link(base_url, href))
            .collect(),
    };

    if summary.types.len() != summary.links.len() {
        tracing::debug!(
            "Summary {} lists {} types for {} links",
            request_url,
            summary.types.len(),
            summary.links.len()
        );
    }

    summary
}

fn extract_bulletin_number(document: &Html) -> String {
    select_first(document.root_element(), "div.titular")
        .and_then(|titular| select_first(titular, "h1.ng-binding"))
        .map(stripped_text)
        .and_then(|title| {
            BULLETIN_NUMBER
                .captures(&title)
                .map(|caps| caps[1].to_string())
        })
        .unwrap_or_default()
}

/// Reads the `dd-mm-yyyy` date out of a summary request URL
pub fn extract_bulletin_date(request_url: &str) -> String {
    BULLETIN_DATE
        .captures(request_url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}
