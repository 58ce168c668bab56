//! Description container rules
//!
//! Four tiers of structural rules, most specific first. The meta-description
//! fallback is not a rule; the locator handles it after every tier misses.

use dom_query::Selection;

use crate::selector::utils::{attr, class, class_contains_except, contains, has_ancestor, id, is_tag, parent_matches};
use crate::selector::Rule;

/// Class fragments that mark tab headers rather than tab bodies.
const TAB_CHROME: &[&str] = &["tab-title", "tab-heading"];

/// A named, ordered rule list.
#[derive(Debug, Clone, Copy)]
pub struct RuleTier {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

/// Explicit "description" containers that are not tab headers.
pub static EXPLICIT_RULES: &[Rule] = &[
    explicit_rule_1,
    explicit_rule_2,
    explicit_rule_3,
];

/// Known tab-panel bodies and storefront description panels.
pub static TAB_PANEL_RULES: &[Rule] = &[
    tab_panel_rule_1,
    tab_panel_rule_2,
    tab_panel_rule_3,
    tab_panel_rule_4,
    tab_panel_rule_5,
    tab_panel_rule_6,
    tab_panel_rule_7,
    tab_panel_rule_8,
    tab_panel_rule_9,
    tab_panel_rule_10,
];

/// Broader containers that usually hold the description among other things.
pub static BROAD_RULES: &[Rule] = &[
    broad_rule_1,
    broad_rule_2,
    broad_rule_3,
    broad_rule_4,
    broad_rule_5,
    broad_rule_6,
    broad_rule_7,
    broad_rule_8,
];

/// Whole-product containers.
pub static PRODUCT_RULES: &[Rule] = &[
    product_rule_1,
    product_rule_2,
    product_rule_3,
    product_rule_4,
];

/// All tiers in evaluation order.
#[must_use]
pub fn tiers() -> [RuleTier; 4] {
    [
        RuleTier { name: "explicit description", rules: EXPLICIT_RULES },
        RuleTier { name: "tab panel", rules: TAB_PANEL_RULES },
        RuleTier { name: "broad container", rules: BROAD_RULES },
        RuleTier { name: "product container", rules: PRODUCT_RULES },
    ]
}

fn div_class_contains(sel: &Selection, fragment: &str) -> bool {
    is_tag(sel, "div") && contains(&class(sel), fragment)
}

fn div_with_id(sel: &Selection, expected: &str) -> bool {
    is_tag(sel, "div") && id(sel) == expected
}

/// `div` whose class mentions "description".
#[must_use]
pub fn explicit_rule_1(sel: &Selection) -> bool {
    is_tag(sel, "div") && class_contains_except(sel, "description", TAB_CHROME)
}

/// `div` whose class mentions "product-description".
#[must_use]
pub fn explicit_rule_2(sel: &Selection) -> bool {
    is_tag(sel, "div") && class_contains_except(sel, "product-description", TAB_CHROME)
}

/// `div#description`.
#[must_use]
pub fn explicit_rule_3(sel: &Selection) -> bool {
    div_with_id(sel, "description") && !TAB_CHROME.iter().any(|ex| contains(&class(sel), ex))
}

/// WooCommerce description tab.
#[must_use]
pub fn tab_panel_rule_1(sel: &Selection) -> bool {
    div_with_id(sel, "tab-description")
}

#[must_use]
pub fn tab_panel_rule_2(sel: &Selection) -> bool {
    div_class_contains(sel, "woocommerce-Tabs-panel--description")
}

/// Description panel somewhere under a bare `div.tab-content`.
#[must_use]
pub fn tab_panel_rule_3(sel: &Selection) -> bool {
    is_tag(sel, "div")
        && contains(&id(sel), "description")
        && has_ancestor(sel, is_bare_tab_content)
}

/// Active panel directly under a bare `div.tab-content`.
#[must_use]
pub fn tab_panel_rule_4(sel: &Selection) -> bool {
    div_class_contains(sel, "active") && parent_matches(sel, is_bare_tab_content)
}

#[must_use]
pub fn tab_panel_rule_5(sel: &Selection) -> bool {
    div_with_id(sel, "product-description")
}

#[must_use]
pub fn tab_panel_rule_6(sel: &Selection) -> bool {
    is_tag(sel, "section") && contains(&class(sel), "product-description")
}

#[must_use]
pub fn tab_panel_rule_7(sel: &Selection) -> bool {
    div_class_contains(sel, "product-details-description")
}

#[must_use]
pub fn tab_panel_rule_8(sel: &Selection) -> bool {
    div_class_contains(sel, "woocommerce-product-details__short-description")
}

#[must_use]
pub fn tab_panel_rule_9(sel: &Selection) -> bool {
    div_class_contains(sel, "product_description")
}

#[must_use]
pub fn tab_panel_rule_10(sel: &Selection) -> bool {
    div_class_contains(sel, "pdp-description")
}

#[must_use]
pub fn broad_rule_1(sel: &Selection) -> bool {
    div_class_contains(sel, "tab-content")
}

#[must_use]
pub fn broad_rule_2(sel: &Selection) -> bool {
    div_class_contains(sel, "product-details")
}

#[must_use]
pub fn broad_rule_3(sel: &Selection) -> bool {
    div_class_contains(sel, "product-info")
}

#[must_use]
pub fn broad_rule_4(sel: &Selection) -> bool {
    div_class_contains(sel, "product-specs")
}

#[must_use]
pub fn broad_rule_5(sel: &Selection) -> bool {
    div_class_contains(sel, "product-specification")
}

#[must_use]
pub fn broad_rule_6(sel: &Selection) -> bool {
    is_tag(sel, "article") && contains(&class(sel), "product")
}

/// Marketplace bullet list.
#[must_use]
pub fn broad_rule_7(sel: &Selection) -> bool {
    div_with_id(sel, "detailBullets")
}

#[must_use]
pub fn broad_rule_8(sel: &Selection) -> bool {
    div_with_id(sel, "productDescription")
}

/// Any `div` whose class mentions "product".
#[must_use]
pub fn product_rule_1(sel: &Selection) -> bool {
    div_class_contains(sel, "product")
}

#[must_use]
pub fn product_rule_2(sel: &Selection) -> bool {
    is_tag(sel, "main") && contains(&class(sel), "product")
}

#[must_use]
pub fn product_rule_3(sel: &Selection) -> bool {
    div_with_id(sel, "product")
}

/// schema.org Product microdata root.
#[must_use]
pub fn product_rule_4(sel: &Selection) -> bool {
    is_tag(sel, "div") && attr(sel, "itemtype") == "http://schema.org/Product"
}

fn is_bare_tab_content(sel: &Selection) -> bool {
    is_tag(sel, "div") && class(sel) == "tab-content"
}
