//! Configuration options for product extraction.
//!
//! The `Options` struct carries everything the extraction components read:
//! the image cap, the debug toggle, the field taxonomy, the image filter
//! rules, and the tier thresholds. It can be built in code or loaded from
//! JSON through [`OptionsConfig`].

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::filters::{ImageRules, ImageRulesConfig};
use crate::taxonomy::{FieldEntry, FieldTaxonomy};

/// Default number of images kept after ranking.
pub const DEFAULT_MAX_IMAGES: usize = 20;

/// Lower bound of the image cap.
pub const MIN_MAX_IMAGES: usize = 1;

/// Upper bound of the image cap.
pub const MAX_MAX_IMAGES: usize = 50;

/// Normalise a user-supplied image cap: absolute value, then clamp to 1..=50.
#[must_use]
pub fn clamp_max_images(requested: i64) -> usize {
    let n = usize::try_from(requested.unsigned_abs()).unwrap_or(MAX_MAX_IMAGES);
    n.clamp(MIN_MAX_IMAGES, MAX_MAX_IMAGES)
}

/// Configuration options for product extraction.
///
/// All fields are public. Use struct-update syntax over `Options::default()`
/// to change a few of them.
///
/// # Example
///
/// ```rust
/// use product_extract::Options;
///
/// let options = Options {
///     debug: true,
///     ..Options::default()
/// }
/// .with_max_images(10);
/// assert_eq!(options.max_images, 10);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of ranked image URLs returned.
    ///
    /// Default: `20`. Readers go through [`Options::image_cap`], so values
    /// outside 1..=50 are clamped when used.
    pub max_images: usize,

    /// Emit per-step diagnostics through `tracing::debug!`.
    ///
    /// Default: `false`
    pub debug: bool,

    /// Canonical fields and aliases mined from the description.
    pub taxonomy: Arc<FieldTaxonomy>,

    /// Blacklist, positive signals and thumbnail rewrites for image URLs.
    pub image_rules: Arc<ImageRules>,

    /// Image tiers keep running while fewer than this many candidates exist.
    ///
    /// Default: `3`
    pub min_candidates: usize,

    /// The whole-page fallback tier stops once this many candidates exist.
    ///
    /// Default: `5`
    pub fallback_image_limit: usize,

    /// How many levels (the image itself included) the related-products
    /// check walks upward.
    ///
    /// Default: `10`
    pub ancestor_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_images: DEFAULT_MAX_IMAGES,
            debug: false,
            taxonomy: FieldTaxonomy::shared_default(),
            image_rules: ImageRules::shared_default(),
            min_candidates: 3,
            fallback_image_limit: 5,
            ancestor_depth: 10,
        }
    }
}

impl Options {
    /// Set the image cap, clamped into 1..=50.
    #[must_use]
    pub fn with_max_images(mut self, requested: i64) -> Self {
        self.max_images = clamp_max_images(requested);
        self
    }

    /// The image cap actually applied: `max_images` clamped into 1..=50,
    /// whatever was assigned to the field.
    #[must_use]
    pub fn image_cap(&self) -> usize {
        self.max_images.clamp(MIN_MAX_IMAGES, MAX_MAX_IMAGES)
    }

    /// Load options from a JSON document. Absent keys keep their defaults.
    ///
    /// ```rust
    /// use product_extract::Options;
    ///
    /// let options = Options::from_json(r#"{"max_images": 80, "debug": true}"#).unwrap();
    /// assert_eq!(options.max_images, 50);
    /// assert!(options.debug);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: OptionsConfig =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        Self::from_config(config)
    }

    /// Build options from an already-deserialized configuration.
    pub fn from_config(config: OptionsConfig) -> Result<Self> {
        let defaults = Self::default();

        let taxonomy = match config.taxonomy {
            Some(entries) => Arc::new(FieldTaxonomy::from_entries(entries)),
            None => defaults.taxonomy,
        };
        let image_rules = match config.image_rules {
            Some(rules) => Arc::new(ImageRules::compile(rules)?),
            None => defaults.image_rules,
        };

        Ok(Self {
            max_images: config
                .max_images
                .map_or(defaults.max_images, clamp_max_images),
            debug: config.debug.unwrap_or(defaults.debug),
            taxonomy,
            image_rules,
            min_candidates: config.min_candidates.unwrap_or(defaults.min_candidates),
            fallback_image_limit: config
                .fallback_image_limit
                .unwrap_or(defaults.fallback_image_limit),
            ancestor_depth: config.ancestor_depth.unwrap_or(defaults.ancestor_depth),
        })
    }
}

/// Serialized options; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub max_images: Option<i64>,
    pub debug: Option<bool>,
    /// Replaces the built-in taxonomy entirely.
    pub taxonomy: Option<Vec<FieldEntry>>,
    /// Replaces the built-in image rules; keys missing inside take defaults.
    pub image_rules: Option<ImageRulesConfig>,
    pub min_candidates: Option<usize>,
    pub fallback_image_limit: Option<usize>,
    pub ancestor_depth: Option<usize>,
}

/// Catalog-side defaults used by the importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    /// Status given to created entries.
    ///
    /// Default: `"draft"`
    pub status: String,

    /// Category assigned to created entries, if any.
    pub category: Option<String>,

    /// Downloaded images smaller than this in either dimension are dropped.
    ///
    /// Default: `200`
    pub min_image_dimension: u32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            status: "draft".to_string(),
            category: None,
            min_image_dimension: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.max_images, 20);
        assert!(!opts.debug);
        assert_eq!(opts.min_candidates, 3);
        assert_eq!(opts.fallback_image_limit, 5);
        assert_eq!(opts.ancestor_depth, 10);
        assert_eq!(opts.taxonomy.len(), 15);
    }

    #[test]
    fn test_clamp_max_images() {
        assert_eq!(clamp_max_images(0), 1);
        assert_eq!(clamp_max_images(-7), 7);
        assert_eq!(clamp_max_images(-500), 50);
        assert_eq!(clamp_max_images(51), 50);
        assert_eq!(clamp_max_images(12), 12);
        assert_eq!(clamp_max_images(i64::MIN), 50);
    }

    #[test]
    fn test_with_max_images() {
        let opts = Options::default().with_max_images(0);
        assert_eq!(opts.max_images, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let opts = Options::from_json(r#"{"max_images": -3}"#).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(opts.max_images, 3);
        assert!(!opts.debug);
        assert_eq!(opts.taxonomy.len(), 15);
    }

    #[test]
    fn test_from_json_custom_taxonomy() {
        let json = r#"{
            "taxonomy": [
                {"name": "Caliber", "aliases": ["Chambering"]},
                {"name": "Weight"}
            ]
        }"#;
        let opts = Options::from_json(json).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(opts.taxonomy.len(), 2);
        assert_eq!(opts.taxonomy.canonical_for("chambering"), Some("Caliber"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(Options::from_json("{not json"), Err(Error::Config(_))));
        assert!(matches!(
            Options::from_json(r#"{"image_rules": {"thumbnail_rewrites": [{"marker": "x", "pattern": "(", "replacement": ""}]}}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_import_settings_defaults() {
        let settings = ImportSettings::default();
        assert_eq!(settings.status, "draft");
        assert!(settings.category.is_none());
        assert_eq!(settings.min_image_dimension, 200);
    }
}
