//! Title and price rules.

use dom_query::Selection;

use crate::selector::utils::{class, contains, is_one_of_tags, is_tag};
use crate::selector::Rule;

pub static TITLE_RULES: &[Rule] = &[title_rule];

pub static PRICE_RULES: &[Rule] = &[price_rule];

/// Product heading: `h1.product-title` / `h1.product_title`.
#[must_use]
pub fn title_rule(sel: &Selection) -> bool {
    if !is_tag(sel, "h1") {
        return false;
    }
    let class = class(sel);
    contains(&class, "product-title") || contains(&class, "product_title")
}

/// Any span, div or p whose class mentions "price".
#[must_use]
pub fn price_rule(sel: &Selection) -> bool {
    is_one_of_tags(sel, &["span", "div", "p"]) && contains(&class(sel), "price")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::selector::{document_root, query};

    #[test]
    fn title_rule_needs_product_class() {
        let doc = dom::parse(r#"<h1>Site</h1><h1 class="productView-title product_title">Gun</h1>"#);
        let found = query(&document_root(&doc), title_rule).map(|s| dom::text_content(&s).to_string());
        assert_eq!(found.as_deref(), Some("Gun"));
    }

    #[test]
    fn price_rule_matches_first_price_element() {
        let doc = dom::parse(
            r#"<p>Intro</p><span class="price price--withTax">$499.99</span><div class="price">$1</div>"#,
        );
        let found = query(&document_root(&doc), price_rule).map(|s| dom::text_content(&s).to_string());
        assert_eq!(found.as_deref(), Some("$499.99"));
    }
}
