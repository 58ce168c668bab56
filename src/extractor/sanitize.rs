//! Markup Sanitizer
//!
//! Text-to-text cleanup of a located description. Each rule is a named
//! function over a markup string; [`SANITIZE_RULES`] fixes their order, and
//! earlier rules shrink the input seen by later ones. Rules rewrite text
//! with patterns and never build a tree, so malformed markup passes through
//! untouched where no pattern applies.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::Options;

/// A single sanitizer rule.
pub type SanitizeRule = fn(&str) -> String;

/// Rules in application order.
pub static SANITIZE_RULES: &[(&str, SanitizeRule)] = &[
    ("scripts", remove_scripts),
    ("tab navigation", remove_tab_navigation),
    ("tab chrome", remove_tab_chrome),
    ("review call-outs", remove_review_callouts),
    ("community phrases", remove_phrase_blocks),
    ("notifications", remove_notifications),
    ("tab labels", remove_tab_labels),
    ("action buttons", remove_action_elements),
    ("horizontal rules", remove_horizontal_rules),
    ("character counters", remove_character_counters),
    ("empty blocks", remove_empty_blocks),
    ("line breaks", collapse_line_breaks),
];

/// Literal phrases whose innermost enclosing `div` and `p` are dropped.
pub const REVIEW_PHRASES: &[&str] = &[
    "Be first to review this item",
    "Ask our customer community",
    "Other customers may have experience",
    "Post Question",
];

/// Class fragments of notification, review and Q&A widgets.
pub const NOTIFICATION_CLASSES: &[&str] = &[
    "alert",
    "info",
    "notice",
    "notification",
    "comment-area",
    "review-area",
    "feedback",
    "rating-widget",
    "customer-feedback",
    "review-banner",
    "review-section",
    "qa-section",
    "community-qa",
    "product-qa",
];

/// Text of tab headers that leak into description bodies (regex syntax).
const TAB_LABELS: &[&str] = &["DESCRIPTION", "REVIEWS", r"REVIEWS \(\d+\)", "Q & A"];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("sanitizer regex")
}

fn remove_all(patterns: &[Regex], html: &str) -> String {
    let mut out = html.to_string();
    for re in patterns {
        out = re.replace_all(&out, "").into_owned();
    }
    out
}

static SCRIPT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?is)<script\b[^>]*>.*?</script>"),
        compile(r"(?is)<iframe\b[^>]*>.*?</iframe>"),
    ]
});

static TAB_NAV_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r#"(?is)<ul[^>]*class=["'][^"']*(?:tabs|nav-tabs|wc-tabs)[^"']*["'][^>]*>.*?</ul>"#),
        compile(r#"(?is)<nav[^>]*class=["'][^"']*(?:woocommerce-tabs|tabs)[^"']*["'][^>]*>.*?</nav>"#),
        compile(
            r#"(?is)<div[^>]*class=["'][^"']*(?:tab-nav|tab-header|wc-tabs-wrapper|product-tabs)[^"']*["'][^>]*>.*?</div>"#,
        ),
    ]
});

static TAB_CHROME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r#"(?is)<div[^>]*role=["']tablist["'][^>]*>.*?</div>"#),
        compile(r#"(?is)<ul[^>]*role=["']tablist["'][^>]*>.*?</ul>"#),
        compile(r#"(?is)<h[1-6][^>]*class=["'][^"']*tab[^"']*["'][^>]*>.*?</h[1-6]>"#),
        compile(r#"(?is)<h[1-6][^>]*id=["'][^"']*tab[^"']*["'][^>]*>.*?</h[1-6]>"#),
    ]
});

static CALLOUT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r#"(?is)<div[^>]*style=["'][^"']*background(?:-color)?:\s*#d9edf7[^"']*["'][^>]*>.*?</div>"#),
        compile(r#"(?is)<div[^>]*style=["'][^"']*background(?:-color)?:\s*#eaf[0-9a-f][^"']*["'][^>]*>.*?</div>"#),
        compile(
            r#"(?is)<div[^>]*style=["'][^"']*background(?:-color)?:\s*rgb\(\s*217\s*,\s*237\s*,\s*247[^"']*["'][^>]*>.*?</div>"#,
        ),
    ]
});

static NOTIFICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NOTIFICATION_CLASSES
        .iter()
        .map(|class| {
            compile(&format!(
                r#"(?is)<div[^>]*class=["'][^"']*{}[^"']*["'][^>]*>.*?</div>"#,
                regex::escape(class)
            ))
        })
        .collect()
});

static TAB_LABEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TAB_LABELS
        .iter()
        .flat_map(|label| {
            [
                compile(&format!(r"(?is)<div[^>]*>\s*{label}\s*</div>")),
                compile(&format!(r"(?is)<h[1-6][^>]*>\s*{label}\s*</h[1-6]>")),
            ]
        })
        .collect()
});

static ACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?is)<button[^>]*>.*?(?:Post|Review|Question).*?</button>"),
        compile(r#"(?is)<a\b[^>]*class=["'][^"']*(?:btn|button)[^"']*["'][^>]*>.*?</a>"#),
    ]
});

static HR_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<hr[^>]*>"));

static COUNTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"\(\d+/\d+\)"));

static EMPTY_BLOCK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?is)<p\b[^>]*>\s*</p>"),
        compile(r"(?is)<div[^>]*>\s*</div>"),
    ]
});

static BREAK_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)(\s*<br\s*/?>\s*){3,}"));

/// Remove `script` and `iframe` blocks.
#[must_use]
pub fn remove_scripts(html: &str) -> String {
    remove_all(&SCRIPT_PATTERNS, html)
}

/// Remove tab menus (`ul`/`nav`/`div` carrying tab classes).
#[must_use]
pub fn remove_tab_navigation(html: &str) -> String {
    remove_all(&TAB_NAV_PATTERNS, html)
}

/// Remove `role="tablist"` containers and headings tagged as tabs.
#[must_use]
pub fn remove_tab_chrome(html: &str) -> String {
    remove_all(&TAB_CHROME_PATTERNS, html)
}

/// Remove review/Q&A boxes identified by their pale-blue background.
#[must_use]
pub fn remove_review_callouts(html: &str) -> String {
    remove_all(&CALLOUT_PATTERNS, html)
}

/// Remove the innermost `div`, then `p`, that contains a community phrase.
#[must_use]
pub fn remove_phrase_blocks(html: &str) -> String {
    let mut out = html.to_string();
    for phrase in REVIEW_PHRASES {
        out = remove_enclosing_block(&out, "div", phrase);
        out = remove_enclosing_block(&out, "p", phrase);
    }
    out
}

/// Remove `div`s whose class contains a notification fragment.
#[must_use]
pub fn remove_notifications(html: &str) -> String {
    remove_all(&NOTIFICATION_PATTERNS, html)
}

/// Remove `div`s and headings whose whole text is a tab label.
#[must_use]
pub fn remove_tab_labels(html: &str) -> String {
    remove_all(&TAB_LABEL_PATTERNS, html)
}

/// Remove post/review/question buttons and button-styled links.
#[must_use]
pub fn remove_action_elements(html: &str) -> String {
    remove_all(&ACTION_PATTERNS, html)
}

#[must_use]
pub fn remove_horizontal_rules(html: &str) -> String {
    HR_PATTERN.replace_all(html, "").into_owned()
}

/// Remove inline counters such as `(12/500)`.
#[must_use]
pub fn remove_character_counters(html: &str) -> String {
    COUNTER_PATTERN.replace_all(html, "").into_owned()
}

/// Remove paragraphs and divs left empty by earlier rules.
#[must_use]
pub fn remove_empty_blocks(html: &str) -> String {
    remove_all(&EMPTY_BLOCK_PATTERNS, html)
}

/// Collapse three or more consecutive `<br>` into one.
#[must_use]
pub fn collapse_line_breaks(html: &str) -> String {
    BREAK_RUN_PATTERN.replace_all(html, "<br>").into_owned()
}

/// Remove every block that opens with the nearest `<tag` preceding an
/// occurrence of `phrase` and ends at the first `</tag>` after it.
/// Matching is ASCII case-insensitive.
#[must_use]
pub fn remove_enclosing_block(html: &str, tag: &str, phrase: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let needle = phrase.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}>", tag.to_ascii_lowercase());

    if needle.is_empty() {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    while let Some(rel) = lower[cursor..].find(&needle) {
        let at = cursor + rel;
        let after = at + needle.len();

        let start = lower[cursor..at]
            .rfind(&open)
            .map(|i| cursor + i)
            .filter(|&s| lower[s..at].contains('>'));

        let Some(start) = start else {
            out.push_str(&html[cursor..after]);
            cursor = after;
            continue;
        };
        let Some(end_rel) = lower[after..].find(&close) else {
            break;
        };

        out.push_str(&html[cursor..start]);
        cursor = after + end_rel + close.len();
    }

    out.push_str(&html[cursor..]);
    out
}

/// Run every rule in order with default options.
#[must_use]
pub fn sanitize(markup: &str) -> String {
    sanitize_with_options(markup, &Options::default())
}

/// Run every rule in order. Empty input is returned unchanged.
#[must_use]
pub fn sanitize_with_options(markup: &str, options: &Options) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    let mut html = markup.to_string();
    for (name, rule) in SANITIZE_RULES {
        let before = html.len();
        html = rule(&html);
        if options.debug && html.len() != before {
            tracing::debug!(rule = name, removed = before - html.len(), "sanitizer rule fired");
        }
    }
    html.trim().to_string()
}
