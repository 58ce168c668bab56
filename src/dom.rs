//! Markup tree access layer.
//!
//! Thin adapter over `dom_query`: parsing (html5ever recovers from any
//! malformed input, so parsing never fails), attribute and text helpers, and
//! a bounded upward walk used by the related-products exclusion check.

use url::Url;

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::error::{Error, Result};
use crate::url_utils;

/// One fetched page: its parsed markup tree and the URL it came from.
///
/// Immutable once built; owned by the extraction call that created it.
pub struct PageDocument {
    document: Document,
    url: Url,
}

impl PageDocument {
    /// Parse `markup` fetched from `page_url`.
    ///
    /// Fails only when `page_url` is not an absolute http(s) URL; the markup
    /// itself is always accepted.
    pub fn parse(markup: &str, page_url: &str) -> Result<Self> {
        let url = url_utils::parse_url(page_url).ok_or_else(|| Error::InvalidUrl(page_url.to_string()))?;
        Ok(Self {
            document: parse(markup),
            url,
        })
    }

    /// The parsed tree.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The page URL, used as base for relative URLs and domain comparisons.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Return the value of the first attribute in `names` that is present with a
/// non-blank value. `names` is a priority list, highest first.
#[must_use]
pub fn first_present_attribute(sel: &Selection, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        sel.attr(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Return every attribute in `names` that is present with a non-blank value,
/// in the order of `names`.
#[must_use]
pub fn all_present_attributes(sel: &Selection, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| {
            sel.attr(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .collect()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Walk from `node` upward through at most `max_levels` nodes (the node
/// itself counts as the first level) and report whether `pred` holds for any
/// element on the way. The tree is only read.
#[must_use]
pub fn any_ancestor_within<F>(node: &NodeRef, max_levels: usize, mut pred: F) -> bool
where
    F: FnMut(&NodeRef) -> bool,
{
    let mut current = Some(*node);
    let mut level = 0;
    while let Some(n) = current {
        if level >= max_levels {
            break;
        }
        if n.is_element() && pred(&n) {
            return true;
        }
        current = n.parent();
        level += 1;
    }
    false
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse a markup fragment, wrapping it in a `div` so bare list items and
/// table rows keep a common root.
#[must_use]
pub fn parse_fragment(markup: &str) -> Document {
    Document::from(format!("<div>{markup}</div>"))
}
