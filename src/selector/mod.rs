//! Selector Infrastructure
//!
//! Rules are plain predicate functions over a `Selection`. Rule lists are
//! declared statically in priority order and evaluated by [`query`], which
//! walks elements in document order; the first element that satisfies a rule
//! is the match for that rule.

use dom_query::{Document, Selection};

pub mod description;
pub mod product;
pub mod utils;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Query for first element matching the rule
///
/// Iterates through all descendants in document order and returns the first
/// element for which the rule returns true.
///
/// # Example
///
/// ```rust
/// use product_extract::selector::{self, utils};
/// use product_extract::dom;
///
/// let doc = dom::parse(r#"<div><p class="content">text</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     utils::class(sel).contains("content")
/// }
///
/// let result = selector::query(&root, has_content_class);
/// assert!(result.is_some());
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|sel| rule(sel))
}

/// Query for all elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}

/// Whole-document root for rule queries.
#[must_use]
pub fn document_root(doc: &Document) -> Selection<'_> {
    doc.select("html")
}

/// Evaluate `rules` in order and return the first element any rule matches
/// that also satisfies `accept`, together with the index of that rule.
pub fn first_accepted<'a>(
    root: &Selection<'a>,
    rules: &[Rule],
    accept: impl Fn(&Selection<'a>) -> bool,
) -> Option<(usize, Selection<'a>)> {
    rules.iter().enumerate().find_map(|(i, rule)| {
        query_all(root, *rule)
            .into_iter()
            .find(|sel| accept(sel))
            .map(|sel| (i, sel))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn is_target(sel: &Selection) -> bool {
        utils::class(sel).contains("target")
    }

    fn never_matches(_sel: &Selection) -> bool {
        false
    }

    #[test]
    fn test_query_finds_first_in_document_order() {
        let doc = dom::parse(
            r#"
            <div>
                <section>
                    <p class="target">Deep first</p>
                </section>
                <p class="target">Shallow second</p>
            </div>
        "#,
        );
        let root = doc.select("div");

        let text = query(&root, is_target).map(|s| dom::text_content(&s).to_string());
        assert_eq!(text.as_deref(), Some("Deep first"));
        assert!(query(&root, never_matches).is_none());
    }

    #[test]
    fn test_query_all_preserves_document_order() {
        let doc = dom::parse(
            r#"
            <div>
                <p class="target">1</p>
                <section><p class="target">2</p></section>
                <span>not</span>
                <p class="target">3</p>
            </div>
        "#,
        );
        let root = doc.select("div");

        let texts: Vec<String> = query_all(&root, is_target)
            .iter()
            .map(|s| dom::text_content(s).to_string())
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
        assert!(query_all(&root, never_matches).is_empty());
    }

    #[test]
    fn test_first_accepted_skips_rejected_matches_and_falls_through() {
        let doc = dom::parse(
            r#"
            <div class="target"></div>
            <p class="other">kept</p>
        "#,
        );
        let root = document_root(&doc);

        fn is_other(sel: &Selection) -> bool {
            utils::class(sel) == "other"
        }

        let rules: &[Rule] = &[is_target, is_other];
        let found = first_accepted(&root, rules, utils::has_content);
        assert_eq!(found.as_ref().map(|(i, _)| *i), Some(1));
        assert_eq!(
            found.map(|(_, s)| dom::text_content(&s).to_string()).as_deref(),
            Some("kept")
        );
    }
}
