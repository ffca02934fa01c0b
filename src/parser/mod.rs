//! HTML parsers for the portal's rendered pages
//!
//! Both parsers are pure functions of markup (plus the request context), so
//! they can be exercised against captured pages without a browser.

mod document;
mod summary;
mod text;

pub use document::{
    extract_heading, header_fields, parse_document, raw_body, DocumentContext, DocumentRecord,
    AUTHORITY_LABEL, PUBLICATION_LABEL, SECTION_LABEL,
};
pub use summary::{extract_bulletin_date, parse_summary, DaySummary};
