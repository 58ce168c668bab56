//! Description Locator
//!
//! Finds the subtree most likely to be the product description. Rule tiers
//! from [`crate::selector::description`] are tried in order; each tier is
//! exhausted before the next one runs. When no tier yields a container with
//! content, the page's meta description is wrapped in a paragraph.

use dom_query::Document;

use crate::result::DescriptionBlock;
use crate::selector::{self, description, utils};
use crate::Options;

/// Locate the description with default options.
#[must_use]
pub fn locate(doc: &Document) -> DescriptionBlock {
    locate_with_options(doc, &Options::default())
}

/// Locate the description block in `doc`.
///
/// Within a rule, the first element in document order that carries text or
/// an image wins. Returns an empty block when nothing matches.
#[must_use]
pub fn locate_with_options(doc: &Document, options: &Options) -> DescriptionBlock {
    let root = selector::document_root(doc);

    for tier in description::tiers() {
        if let Some((index, found)) = selector::first_accepted(&root, tier.rules, utils::has_content) {
            if options.debug {
                tracing::debug!(
                    tier = tier.name,
                    rule = index + 1,
                    tag = %utils::tag(&found),
                    class = %utils::class(&found),
                    "description container located"
                );
            }
            return DescriptionBlock::new(found.html().to_string());
        }
    }

    if let Some(meta) = meta_description(doc) {
        if options.debug {
            tracing::debug!("description falls back to meta description");
        }
        return DescriptionBlock::new(format!("<p>{}</p>", escape_text(&meta)));
    }

    if options.debug {
        tracing::debug!("no description found");
    }
    DescriptionBlock::empty()
}

/// Content of `<meta name="description">`, trimmed, if present and not blank.
#[must_use]
pub fn meta_description(doc: &Document) -> Option<String> {
    doc.select(r#"meta[name="description"]"#)
        .nodes()
        .iter()
        .find_map(|node| {
            node.attr("content")
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
        })
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn explicit_description_wins_over_broader_containers() {
        let doc = dom::parse(
            r#"
            <div class="product-details"><p>Details block</p></div>
            <div class="productView-description"><p>The real description</p></div>
        "#,
        );
        let block = locate(&doc);
        assert!(block.as_str().contains("The real description"));
        assert!(!block.as_str().contains("Details block"));
    }

    #[test]
    fn empty_match_falls_through_to_next_rule() {
        let doc = dom::parse(
            r#"
            <div class="description"></div>
            <div id="tab-description"><p>Tab body</p></div>
        "#,
        );
        assert!(locate(&doc).as_str().contains("Tab body"));
    }

    #[test]
    fn image_only_container_counts_as_content() {
        let doc = dom::parse(r#"<div class="description"><img src="/a.jpg"></div>"#);
        assert!(locate(&doc).as_str().contains("<img"));
    }

    #[test]
    fn meta_description_fallback_is_wrapped() {
        let doc = dom::parse(
            r#"<html><head><meta name="description" content="  Compact 9mm & more "></head><body><p>x</p></body></html>"#,
        );
        assert_eq!(locate(&doc).as_str(), "<p>Compact 9mm &amp; more</p>");
    }

    #[test]
    fn nothing_found_is_empty() {
        let doc = dom::parse("<html><body><p>Just text</p></body></html>");
        assert!(locate(&doc).is_empty());
    }

    #[test]
    fn tab_headers_are_not_descriptions() {
        let doc = dom::parse(
            r#"
            <div class="description tab-title">DESCRIPTION</div>
            <div class="tab-content"><p>Body text</p></div>
        "#,
        );
        let block = locate(&doc);
        assert!(block.as_str().contains("Body text"));
        assert!(!block.as_str().contains("tab-title"));
    }
}
