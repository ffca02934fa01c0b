//! Selector and text helpers shared by the page parsers
//!
//! Structural absence is never an error for the parsers, so these helpers
//! degrade an unparsable selector to "no match" instead of failing.

use scraper::{ElementRef, Selector};

/// All descendants of `scope` matching `css`, in document order
pub(crate) fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// First descendant of `scope` matching `css`
pub(crate) fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// Text content with every text node trimmed and the pieces concatenated
///
/// The portal pads its Angular bindings with layout whitespace, so each node is
/// trimmed on its own rather than the joined string.
pub(crate) fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
