//! Result types for extraction output.
//!
//! This module defines the product record handed to the catalog side, and
//! the intermediate values the extraction components pass between them.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A markup fragment identified as the product description.
///
/// Empty means "no description available", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DescriptionBlock(String);

impl DescriptionBlock {
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the fragment has no visible characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Strategy tier that produced an image candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Storefront-specific gallery markup.
    SiteGallery,
    /// Generic product-image container.
    ProductContainer,
    /// Thumbnail strip.
    ThumbnailList,
    /// Main content area.
    MainContent,
    /// Every image on the page.
    PageFallback,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SiteGallery => "site gallery",
            Self::ProductContainer => "product container",
            Self::ThumbnailList => "thumbnail list",
            Self::MainContent => "main content",
            Self::PageFallback => "page fallback",
        };
        f.write_str(name)
    }
}

/// An absolute image URL plus the tier that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCandidate {
    pub url: String,
    pub source: CandidateSource,
}

/// Canonical field name to extracted value.
///
/// Keys are unique and iterate in discovery order. The first value stored
/// for a field is final.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    entries: Vec<(String, String)>,
}

impl ExtractedFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `field` unless the field already has one.
    /// Returns whether the value was stored.
    pub fn insert_if_absent(&mut self, field: &str, value: impl Into<String>) -> bool {
        if self.contains(field) {
            return false;
        }
        self.entries.push((field.to_string(), value.into()));
        true
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == field)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose value is not blank; these become catalog attributes.
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, v)| !v.trim().is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Aggregate output of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub title: String,

    /// Raw numeric token, currency-agnostic (`"1,299.99"`). Empty when absent.
    pub price: String,

    /// Sanitized description markup.
    pub description: String,

    pub fields: ExtractedFields,

    /// Ranked, deduplicated, absolute image URLs.
    pub images: Vec<String>,

    pub source_url: String,
}
