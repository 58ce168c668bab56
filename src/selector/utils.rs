//! Utility functions for selector pattern matching
//!
//! Helpers used throughout selector rules for attribute access, string
//! matching, and bounded tree checks.

use crate::dom;
use dom_query::Selection;

// === String Utilities ===

/// Case-sensitive contains check
#[inline]
#[must_use]
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

// === Element Attribute Helpers ===

/// Get element ID attribute (empty string if missing)
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get any attribute (empty string if missing)
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Check if element has a specific tag name
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    tag(sel) == expected
}

/// Check if element is one of the specified tags
#[inline]
#[must_use]
pub fn is_one_of_tags(sel: &Selection, tags: &[&str]) -> bool {
    let t = tag(sel);
    tags.contains(&t.as_str())
}

/// Class contains `fragment` and none of the `excluded` fragments.
#[must_use]
pub fn class_contains_except(sel: &Selection, fragment: &str, excluded: &[&str]) -> bool {
    let class = class(sel);
    contains(&class, fragment) && !excluded.iter().any(|ex| contains(&class, ex))
}

// === Tree Checks ===

/// Whether the direct parent satisfies `pred`.
#[must_use]
pub fn parent_matches(sel: &Selection, pred: impl Fn(&Selection) -> bool) -> bool {
    let parent = dom::parent(sel);
    parent.exists() && pred(&parent)
}

/// Whether any ancestor (parent upward) satisfies `pred`.
#[must_use]
pub fn has_ancestor(sel: &Selection, pred: impl Fn(&Selection) -> bool) -> bool {
    let mut current = dom::parent(sel);
    while current.exists() {
        if pred(&current) {
            return true;
        }
        current = dom::parent(&current);
    }
    false
}

/// Element carries something to show: visible text or an image.
#[must_use]
pub fn has_content(sel: &Selection) -> bool {
    !dom::text_content(sel).trim().is_empty() || sel.select("img").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_helpers_default_to_empty() {
        let doc = dom::parse(r#"<div id="main" class="content main" data-role="x">text</div><p>y</p>"#);
        let div = doc.select("div");
        let p = doc.select("p");

        assert_eq!(id(&div), "main");
        assert_eq!(class(&div), "content main");
        assert_eq!(attr(&div, "data-role"), "x");
        assert_eq!(id(&p), "");
        assert_eq!(class(&p), "");
        assert_eq!(attr(&p, "nonexistent"), "");
    }

    #[test]
    fn test_tag_helpers() {
        let doc = dom::parse("<ARTICLE>content</ARTICLE>");
        let article = doc.select("article");

        assert_eq!(tag(&article), "article");
        assert!(is_tag(&article, "article"));
        assert!(is_one_of_tags(&article, &["main", "article"]));
        assert!(!is_one_of_tags(&article, &[]));
    }

    #[test]
    fn test_class_contains_except() {
        let doc = dom::parse(
            r#"<div id="a" class="product-description">x</div><div id="b" class="description tab-title">y</div>"#,
        );
        let excluded = &["tab-title", "tab-heading"];

        assert!(class_contains_except(&doc.select("#a"), "description", excluded));
        assert!(!class_contains_except(&doc.select("#b"), "description", excluded));
    }

    #[test]
    fn test_parent_and_ancestor_checks() {
        let doc = dom::parse(
            r#"<div class="tab-content"><section><div id="target" class="active">x</div></section></div>"#,
        );
        let target = doc.select("#target");
        let is_tab_content = |s: &Selection| class(s) == "tab-content";

        assert!(!parent_matches(&target, is_tab_content));
        assert!(has_ancestor(&target, is_tab_content));
        assert!(parent_matches(&target, |s| is_tag(s, "section")));
    }

    #[test]
    fn test_has_content() {
        let doc = dom::parse(
            r#"<div id="a">  </div><div id="b"><img src="x.jpg"></div><div id="c">text</div>"#,
        );

        assert!(!has_content(&doc.select("#a")));
        assert!(has_content(&doc.select("#b")));
        assert!(has_content(&doc.select("#c")));
    }
}
