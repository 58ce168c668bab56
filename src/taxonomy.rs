//! Field taxonomy: the ordered set of canonical specification fields and the
//! alternate labels that map onto them.
//!
//! A taxonomy is built once and shared read-only (`Arc`) by every extraction.
//! Labels are matched case-insensitively. When two canonical fields claim the
//! same label, the field declared first keeps it; the later claim is dropped
//! and recorded as an [`AliasConflict`].

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::patterns::labelled_item_pattern;

/// One canonical field and its aliases, in match order.
#[derive(Debug, Clone)]
pub struct CanonicalField {
    name: String,
    aliases: Vec<String>,
    /// One `<li>Label<sep>Value</li>` pattern per label, compiled once.
    item_patterns: Vec<Regex>,
}

impl PartialEq for CanonicalField {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.aliases == other.aliases
    }
}

impl Eq for CanonicalField {}

impl CanonicalField {
    fn new(name: String, aliases: Vec<String>) -> Self {
        let item_patterns = std::iter::once(name.as_str())
            .chain(aliases.iter().map(String::as_str))
            .filter_map(labelled_item_pattern)
            .collect();
        Self {
            name,
            aliases,
            item_patterns,
        }
    }

    /// Compiled list-item patterns, in label order.
    #[must_use]
    pub fn item_patterns(&self) -> &[Regex] {
        &self.item_patterns
    }

    /// Canonical name, used as the key in extracted fields.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate labels, in declaration order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The canonical name followed by every alias.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// A label that two canonical fields both claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub label: String,
    /// Field that keeps the label (declared earlier).
    pub kept_by: String,
    /// Field whose claim was dropped.
    pub dropped_from: String,
}

/// Serialized form of one taxonomy entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Ordered canonical fields with conflict-free aliases.
#[derive(Debug, Clone, Default)]
pub struct FieldTaxonomy {
    fields: Vec<CanonicalField>,
    conflicts: Vec<AliasConflict>,
}

fn label_key(label: &str) -> String {
    label.trim().to_lowercase()
}

impl FieldTaxonomy {
    /// Build a taxonomy from `(name, aliases)` pairs in declaration order.
    ///
    /// Canonical names are registered before any alias, so an alias can
    /// never shadow another field's own name. Blank labels are ignored.
    pub fn new<I, N, A, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, A)>,
        N: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<(String, Vec<String>)> = entries
            .into_iter()
            .map(|(name, aliases)| {
                (
                    name.into().trim().to_string(),
                    aliases.into_iter().map(|a| a.into().trim().to_string()).collect(),
                )
            })
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let mut owner: HashMap<String, String> = HashMap::new();
        let mut conflicts = Vec::new();
        let mut names = Vec::new();

        for (name, _) in &raw {
            let key = label_key(name);
            if let Some(kept_by) = owner.get(&key) {
                conflicts.push(AliasConflict {
                    label: name.clone(),
                    kept_by: kept_by.clone(),
                    dropped_from: name.clone(),
                });
                continue;
            }
            owner.insert(key, name.clone());
            names.push(name.clone());
        }

        let mut fields = Vec::with_capacity(names.len());
        for (name, aliases) in raw {
            // Duplicate canonical entries were already reported above.
            if !names.contains(&name) || fields.iter().any(|f: &CanonicalField| f.name == name) {
                continue;
            }

            let mut kept = Vec::new();
            for alias in aliases.into_iter().filter(|a| !a.is_empty()) {
                let key = label_key(&alias);
                match owner.get(&key) {
                    Some(kept_by) if *kept_by == name => {}
                    Some(kept_by) => conflicts.push(AliasConflict {
                        label: alias,
                        kept_by: kept_by.clone(),
                        dropped_from: name.clone(),
                    }),
                    None => {
                        owner.insert(key, name.clone());
                        kept.push(alias);
                    }
                }
            }
            fields.push(CanonicalField::new(name, kept));
        }

        for conflict in &conflicts {
            tracing::warn!(
                label = %conflict.label,
                kept_by = %conflict.kept_by,
                dropped_from = %conflict.dropped_from,
                "taxonomy label claimed by two fields; keeping the earlier declaration"
            );
        }

        Self { fields, conflicts }
    }

    /// Build from deserialized entries.
    #[must_use]
    pub fn from_entries(entries: Vec<FieldEntry>) -> Self {
        Self::new(entries.into_iter().map(|e| (e.name, e.aliases)))
    }

    /// The firearms product taxonomy the importer ships with.
    #[must_use]
    pub fn firearms() -> Self {
        Self::new([
            ("Caliber", vec![]),
            ("Power Source", vec!["Power", "Power Type", "Source"]),
            ("Velocity", vec![]),
            (
                "Magazine Capacity",
                vec!["Capacity", "Mag Capacity", "Mag. Capacity", "Magazine Size"],
            ),
            ("Action", vec!["Action Type", "Operating System"]),
            ("Frame Material", vec!["Frame", "Material", "Construction"]),
            (
                "Barrel",
                vec!["Barrel Length", "Barrel Size", "Barrel Details", "Barrel Specs"],
            ),
            ("Accessory Rail", vec!["Rail", "Rails", "Accessory", "Rail Type"]),
            ("Finish", vec!["Finish Type", "Surface Finish", "Color"]),
            ("Intended Use", vec!["Use", "Purpose", "Application"]),
            ("Length", vec!["Overall Length", "Total Length", "Gun Length"]),
            ("Safety", vec!["Safety Type", "Safety System", "Safety Features"]),
            ("Sights", vec!["Sight", "Sight System", "Sight Type"]),
            ("Trigger", vec!["Trigger Type", "Trigger System", "Trigger Pull"]),
            ("Weight", vec!["Gun Weight", "Product Weight", "Total Weight"]),
        ])
    }

    /// Process-wide default taxonomy, built on first use.
    #[must_use]
    pub fn shared_default() -> Arc<Self> {
        static DEFAULT: LazyLock<Arc<FieldTaxonomy>> =
            LazyLock::new(|| Arc::new(FieldTaxonomy::firearms()));
        Arc::clone(&DEFAULT)
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by canonical name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CanonicalField> {
        let key = label_key(name);
        self.fields.iter().find(|f| label_key(&f.name) == key)
    }

    /// Canonical field owning `label`, whether it is a name or an alias.
    #[must_use]
    pub fn canonical_for(&self, label: &str) -> Option<&str> {
        let key = label_key(label);
        self.fields
            .iter()
            .find(|f| f.labels().any(|l| label_key(l) == key))
            .map(CanonicalField::name)
    }

    /// Label claims dropped while building.
    #[must_use]
    pub fn conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }
}
