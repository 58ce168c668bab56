//! Specification Field Miner
//!
//! Pulls values for the taxonomy's canonical fields out of sanitized
//! description markup. Strategies run from most to least structured:
//!
//! 1. schema.org style list items (`<span>Label</span><span itemprop="value">`)
//! 2. `<li>Label: Value</li>` patterns with a separator priority list
//! 3. two-column table rows
//! 4. a scan of every list item for a `Label:` prefix
//!
//! Each strategy runs over every field still missing before the next one
//! starts, so a field keeps the value of the most structured strategy that
//! found it. Within a strategy the canonical name is tried before aliases,
//! and the hits are recorded in the order they appear in the markup.

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{normalize_space, LABEL_SEPARATORS};
use crate::result::ExtractedFields;
use crate::taxonomy::{CanonicalField, FieldTaxonomy};
use crate::Options;

/// Parsed description shared by every strategy.
pub struct MiningInput<'a> {
    markup: &'a str,
    doc: Document,
}

impl<'a> MiningInput<'a> {
    /// Parse `markup` as a fragment.
    #[must_use]
    pub fn new(markup: &'a str) -> Self {
        Self {
            markup,
            doc: dom::parse_fragment(markup),
        }
    }

    /// The markup as given.
    #[must_use]
    pub fn markup(&self) -> &str {
        self.markup
    }

    fn elements(&self, tag: &str) -> Vec<Selection<'_>> {
        self.doc
            .select(tag)
            .nodes()
            .iter()
            .map(|node| Selection::from(*node))
            .collect()
    }
}

/// A value one strategy found for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHit {
    pub field: String,
    pub value: String,
}

/// A per-field lookup: the value and its position in the markup. Positions
/// are only compared between hits of the same lookup.
pub type FieldLookup = fn(&MiningInput, &CanonicalField) -> Option<(usize, String)>;

/// A mining strategy: hits for the fields not yet in `found`, in document order.
pub type FieldStrategy = fn(&MiningInput, &FieldTaxonomy, &ExtractedFields) -> Vec<FieldHit>;

/// Strategies in precedence order.
pub static STRATEGIES: &[(&str, FieldStrategy)] = &[
    ("structured data", structured_data_hits),
    ("direct pattern", direct_pattern_hits),
    ("table row", table_row_hits),
    ("list item scan", list_item_scan),
];

fn structured_data_hits(input: &MiningInput, taxonomy: &FieldTaxonomy, found: &ExtractedFields) -> Vec<FieldHit> {
    located_hits(input, taxonomy, found, structured_data_match)
}

fn direct_pattern_hits(input: &MiningInput, taxonomy: &FieldTaxonomy, found: &ExtractedFields) -> Vec<FieldHit> {
    located_hits(input, taxonomy, found, direct_pattern_match)
}

fn table_row_hits(input: &MiningInput, taxonomy: &FieldTaxonomy, found: &ExtractedFields) -> Vec<FieldHit> {
    located_hits(input, taxonomy, found, table_row_match)
}

/// Mine `markup` with the given taxonomy.
#[must_use]
pub fn mine(markup: &str, taxonomy: &FieldTaxonomy) -> ExtractedFields {
    mine_with(markup, taxonomy, false)
}

/// Mine `markup` with the taxonomy and debug flag from `options`.
#[must_use]
pub fn mine_with_options(markup: &str, options: &Options) -> ExtractedFields {
    mine_with(markup, &options.taxonomy, options.debug)
}

fn mine_with(markup: &str, taxonomy: &FieldTaxonomy, debug: bool) -> ExtractedFields {
    let mut fields = ExtractedFields::new();
    if markup.trim().is_empty() || taxonomy.is_empty() {
        return fields;
    }

    let input = MiningInput::new(markup);

    for (name, strategy) in STRATEGIES {
        for hit in strategy(&input, taxonomy, &fields) {
            if debug {
                tracing::debug!(field = %hit.field, strategy = name, value = %hit.value, "field found");
            }
            fields.insert_if_absent(&hit.field, hit.value);
        }
        if fields.len() == taxonomy.len() {
            break;
        }
    }

    if debug {
        let missing: Vec<&str> = taxonomy
            .fields()
            .iter()
            .map(CanonicalField::name)
            .filter(|name| !fields.contains(name))
            .collect();
        tracing::debug!(found = fields.len(), missing = ?missing, "field mining complete");
    }

    fields
}

/// Run `lookup` for every missing field and order the hits by position.
/// Ties keep taxonomy order.
fn located_hits(
    input: &MiningInput,
    taxonomy: &FieldTaxonomy,
    found: &ExtractedFields,
    lookup: FieldLookup,
) -> Vec<FieldHit> {
    let mut located: Vec<(usize, FieldHit)> = taxonomy
        .fields()
        .iter()
        .filter(|field| !found.contains(field.name()))
        .filter_map(|field| {
            lookup(input, field).map(|(position, value)| {
                (
                    position,
                    FieldHit {
                        field: field.name().to_string(),
                        value,
                    },
                )
            })
        })
        .collect();
    located.sort_by_key(|(position, _)| *position);
    located.into_iter().map(|(_, hit)| hit).collect()
}

/// Tier 1: the first list item holding a `span` whose text equals the label
/// (case-insensitive, whitespace-normalized), read through its
/// `span[itemprop="value"]`. Positioned by list item index.
#[must_use]
pub fn structured_data_match(input: &MiningInput, field: &CanonicalField) -> Option<(usize, String)> {
    let items = input.elements("li");

    field.labels().find_map(|label| {
        let key = normalize_space(label).to_lowercase();
        let (index, item) = items.iter().enumerate().find(|(_, li)| {
            li.select("span")
                .nodes()
                .iter()
                .any(|span| normalize_space(&span.text()).to_lowercase() == key)
        })?;

        item.select(r#"span[itemprop="value"]"#)
            .nodes()
            .first()
            .map(|value| (index, value.text().trim().to_string()))
    })
}

/// Tier 2: `<li>Label<sep>Value</li>` in the raw markup. For each label,
/// separators are tried in [`LABEL_SEPARATORS`] order and the first list
/// item using that separator wins. Positioned by byte offset.
#[must_use]
pub fn direct_pattern_match(input: &MiningInput, field: &CanonicalField) -> Option<(usize, String)> {
    field.item_patterns().iter().find_map(|re| {
        let found: Vec<(usize, char, &str)> = re
            .captures_iter(input.markup())
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                let sep = caps.get(1)?.as_str().chars().next()?;
                Some((start, sep, caps.get(2)?.as_str()))
            })
            .collect();

        LABEL_SEPARATORS.iter().find_map(|sep| {
            found
                .iter()
                .find(|(_, s, _)| s == sep)
                .map(|(start, _, value)| (*start, value.trim().to_string()))
        })
    })
}

/// Tier 3: the first table row whose first cell contains the label
/// (case-insensitive); the value is the second cell. Positioned by row index.
#[must_use]
pub fn table_row_match(input: &MiningInput, field: &CanonicalField) -> Option<(usize, String)> {
    let rows = input.elements("tr");

    field.labels().find_map(|label| {
        let key = label.to_lowercase();
        let (index, row) = rows.iter().enumerate().find(|(_, tr)| {
            tr.children()
                .nodes()
                .iter()
                .find(|cell| cell.node_name().is_some_and(|n| &*n == "td"))
                .is_some_and(|first| normalize_space(&first.text()).to_lowercase().contains(&key))
        })?;

        row.children()
            .nodes()
            .iter()
            .filter(|cell| cell.node_name().is_some_and(|n| &*n == "td"))
            .nth(1)
            .map(|cell| (index, cell.text().trim().to_string()))
    })
}

/// Tier 4: one pass over every list item in document order. An item whose
/// text starts with `Label:` (case-insensitive) fills each still-missing
/// field owning that label with everything after the first colon.
#[must_use]
pub fn list_item_scan(input: &MiningInput, taxonomy: &FieldTaxonomy, found: &ExtractedFields) -> Vec<FieldHit> {
    let mut hits: Vec<FieldHit> = Vec::new();

    for li in input.elements("li") {
        let text = li.text();
        let text = text.trim();
        let lower = text.to_lowercase();
        let Some((_, value)) = text.split_once(':') else {
            continue;
        };

        for field in taxonomy.fields() {
            if found.contains(field.name()) || hits.iter().any(|h| h.field == field.name()) {
                continue;
            }
            if field
                .labels()
                .any(|label| lower.starts_with(&format!("{}:", label.to_lowercase())))
            {
                hits.push(FieldHit {
                    field: field.name().to_string(),
                    value: value.trim().to_string(),
                });
            }
        }
    }

    hits
}
