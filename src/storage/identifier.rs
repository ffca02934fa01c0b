//! Document identifiers and their place in the date-partitioned tree

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Builds the composite document id `<number>-<ddmmyyyy>-<publication id>`
///
/// Inputs are otherwise not checked: an empty publication id still produces an
/// id, it just stops being unique within the day. Path separators in the
/// scraped parts are replaced with `_` so the id stays a single path component.
///
/// # Example
///
/// ```
/// use borm_scraper::storage::build_id;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// assert_eq!(build_id("45", day, "1234"), "45-07032024-1234");
/// ```
pub fn build_id(bulletin_number: &str, day: NaiveDate, publication_id: &str) -> String {
    format!(
        "{}-{}-{}",
        path_safe(bulletin_number),
        day.format("%d%m%Y"),
        path_safe(publication_id)
    )
}

fn path_safe(part: &str) -> String {
    part.replace(['/', '\\'], "_")
}

/// Directory for a document: `<root>/<YYYY>/<MM>/<DD>/<id>`
pub fn build_path(root: &Path, day: NaiveDate, id: &str) -> PathBuf {
    root.join(day.format("%Y").to_string())
        .join(day.format("%m").to_string())
        .join(day.format("%d").to_string())
        .join(id)
}
