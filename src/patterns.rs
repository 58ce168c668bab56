//! Compiled regex patterns shared across the extraction pipeline.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Module-specific patterns (sanitizer rules, charset sniffing) live next to
//! the code that uses them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Related-products detection
// =============================================================================

/// Matches class/id values of "related / recommended products" containers.
pub static RELATED_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(related[-_]?products?|similar[-_]?products?|recommended[-_]?products?|you[-_]?may[-_]?also[-_]?like|cross[-_]?sell|up[-_]?sell|product[-_]?recommendations?|product[-_]?suggestions?)",
    )
    .expect("RELATED_CONTAINER regex")
});

/// Matches heading text that introduces a related-products carousel.
pub static RELATED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(related\s+products|similar\s+products|you\s+may\s+also\s+like|recommended\s+for\s+you)")
        .expect("RELATED_HEADING regex")
});

// =============================================================================
// Image URL shape
// =============================================================================

/// Matches a dimension marker in an image URL: `/600x600/`, `_600x600`, `width=600`.
pub static DIMENSION_IN_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(/\d+x\d+/|_\d+x\d+|width=\d+)").expect("DIMENSION_IN_URL regex")
});

/// Size segment of a BigCommerce stencil thumbnail: `/stencil/500x659/`.
pub static STENCIL_SIZE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/stencil/[^/]+/").expect("STENCIL_SIZE_SEGMENT regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// First numeric token of a price label (`$1,299.99` -> `1,299.99`).
pub static PRICE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\d.,]+").expect("PRICE_TOKEN regex")
});

// =============================================================================
// Specification labels
// =============================================================================

/// Separators accepted between a label and its value, in priority order.
pub const LABEL_SEPARATORS: &[char] = &[':', '-', '\u{2013}', '=', '|'];

/// `<li>Label<sep>Value</li>` for one label. Group 1 is the separator,
/// group 2 the value.
#[must_use]
pub fn labelled_item_pattern(label: &str) -> Option<Regex> {
    let separators: String = LABEL_SEPARATORS
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!(
        r"(?i)<li\b[^>]*>\s*{}\s*([{}])\s*([^<]+)</li>",
        regex::escape(label),
        separators
    ))
    .ok()
}

/// Collapse whitespace and trim, like XPath `normalize-space()`.
#[must_use]
pub fn normalize_space(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}
