//! Title and price locators.

use dom_query::Document;

use crate::patterns::{normalize_space, PRICE_TOKEN};
use crate::selector::{self, product};

/// Product title: the first product heading, else the `<title>` element.
/// Empty when neither exists.
#[must_use]
pub fn locate_title(doc: &Document) -> String {
    let root = selector::document_root(doc);
    let heading = product::TITLE_RULES.iter().find_map(|rule| selector::query(&root, *rule));
    if let Some(heading) = heading {
        let text = normalize_space(&heading.text());
        if !text.is_empty() {
            return text;
        }
    }
    normalize_space(&doc.select("title").text())
}

/// Raw numeric price token (`$1,299.99` -> `1,299.99`), currency-agnostic.
/// Empty when the first price element holds no number.
#[must_use]
pub fn locate_price(doc: &Document) -> String {
    let root = selector::document_root(doc);
    product::PRICE_RULES
        .iter()
        .find_map(|rule| selector::query(&root, *rule))
        .and_then(|el| PRICE_TOKEN.find(&el.text()).map(|m| m.as_str().to_string()))
        .unwrap_or_default()
}
