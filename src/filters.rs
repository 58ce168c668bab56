//! Image URL filter rules.
//!
//! Everything that decides whether a URL looks like product imagery lives here
//! as data: blacklist terms, accepted extensions, path hints, high-resolution
//! markers, and CDN thumbnail rewrites. [`ImageRulesConfig`] is the serde form;
//! [`ImageRules`] is the compiled, shareable form used during extraction.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::patterns::{DIMENSION_IN_URL, STENCIL_SIZE_SEGMENT};
use crate::url_utils;

/// Substrings that mark decorative, UI, or third-party imagery.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "icon", "logo", "placeholder", "pixel", "spinner", "loading", "banner",
    "button", "thumbnail-default", "social", "facebook", "twitter", "instagram",
    "background", "pattern", "avatar", "profile", "cart", "checkout", "payment",
    "shipping", "footer", "header", "navigation", "menu", "search", "sprite", "guarantee",
    "badge", "star", "rating", "share", "wishlist", "compare", "like", "heart",
    "zoom-icon", "zoom-button", "zoom-btn", "magnify", "close", "play", "video-placeholder",
];

pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub const DEFAULT_REJECTED_EXTENSIONS: &[&str] = &["svg"];

pub const DEFAULT_PRODUCT_PATHS: &[&str] = &["/product/", "/products/", "/images/", "/img/"];

pub const DEFAULT_REJECTED_PATHS: &[&str] = &["/related/", "/similar/", "/recommended/"];

pub const DEFAULT_HIGH_RES_MARKERS: &[&str] = &["large", "zoom", "full", "/1280x1280/"];

/// Why a URL was not accepted as a product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    DataUri,
    NotAbsolute,
    Blacklisted(String),
    NonProductPath(String),
    RejectedExtension(String),
    NoPositiveSignal,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty url"),
            Self::DataUri => write!(f, "data uri"),
            Self::NotAbsolute => write!(f, "could not be made absolute"),
            Self::Blacklisted(term) => write!(f, "blacklisted term '{term}'"),
            Self::NonProductPath(seg) => write!(f, "non-product path '{seg}'"),
            Self::RejectedExtension(ext) => write!(f, "rejected extension '.{ext}'"),
            Self::NoPositiveSignal => write!(f, "no image extension, size marker, or image path"),
        }
    }
}

/// Serialized CDN thumbnail rewrite.
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailRewriteConfig {
    /// Literal substring that must be present before the pattern is tried.
    pub marker: String,
    pub pattern: String,
    pub replacement: String,
}

/// Serialized image rules. Missing keys take the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageRulesConfig {
    pub blacklist: Vec<String>,
    pub extensions: Vec<String>,
    pub rejected_extensions: Vec<String>,
    pub product_paths: Vec<String>,
    pub rejected_paths: Vec<String>,
    pub high_res_markers: Vec<String>,
    pub thumbnail_rewrites: Vec<ThumbnailRewriteConfig>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| (*t).to_string()).collect()
}

impl Default for ImageRulesConfig {
    fn default() -> Self {
        Self {
            blacklist: owned(DEFAULT_BLACKLIST),
            extensions: owned(DEFAULT_EXTENSIONS),
            rejected_extensions: owned(DEFAULT_REJECTED_EXTENSIONS),
            product_paths: owned(DEFAULT_PRODUCT_PATHS),
            rejected_paths: owned(DEFAULT_REJECTED_PATHS),
            high_res_markers: owned(DEFAULT_HIGH_RES_MARKERS),
            thumbnail_rewrites: vec![ThumbnailRewriteConfig {
                marker: "/stencil/".to_string(),
                pattern: STENCIL_SIZE_SEGMENT.as_str().to_string(),
                replacement: "/stencil/1280x1280/".to_string(),
            }],
        }
    }
}

/// A compiled thumbnail to high-resolution rewrite.
#[derive(Debug, Clone)]
pub struct ThumbnailRewrite {
    marker: String,
    pattern: Regex,
    replacement: String,
}

impl ThumbnailRewrite {
    /// Compile one serialized rewrite.
    pub fn compile(config: &ThumbnailRewriteConfig) -> Result<Self> {
        let pattern = Regex::new(&config.pattern)
            .map_err(|e| Error::Config(format!("thumbnail rewrite '{}': {e}", config.pattern)))?;
        Ok(Self {
            marker: config.marker.clone(),
            pattern,
            replacement: config.replacement.clone(),
        })
    }

    /// Apply the rewrite; `None` when the URL does not follow this convention.
    #[must_use]
    pub fn apply(&self, url: &str) -> Option<String> {
        if !url.contains(&self.marker) || !self.pattern.is_match(url) {
            return None;
        }
        Some(self.pattern.replace(url, self.replacement.as_str()).into_owned())
    }
}

/// Compiled image rules, shared read-only across extractions.
#[derive(Debug, Clone)]
pub struct ImageRules {
    blacklist: Vec<String>,
    extensions: Vec<String>,
    rejected_extensions: Vec<String>,
    product_paths: Vec<String>,
    rejected_paths: Vec<String>,
    high_res_markers: Vec<String>,
    rewrites: Vec<ThumbnailRewrite>,
}

fn lowered(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl ImageRules {
    /// Compile a configuration. Fails on an invalid rewrite pattern.
    pub fn compile(config: ImageRulesConfig) -> Result<Self> {
        let rewrites = config
            .thumbnail_rewrites
            .iter()
            .map(ThumbnailRewrite::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(config, rewrites))
    }

    fn assemble(config: ImageRulesConfig, rewrites: Vec<ThumbnailRewrite>) -> Self {
        Self {
            blacklist: lowered(config.blacklist),
            extensions: lowered(config.extensions),
            rejected_extensions: lowered(config.rejected_extensions),
            product_paths: lowered(config.product_paths),
            rejected_paths: lowered(config.rejected_paths),
            high_res_markers: lowered(config.high_res_markers),
            rewrites,
        }
    }

    /// Process-wide default rules, built on first use.
    #[must_use]
    pub fn shared_default() -> Arc<Self> {
        static DEFAULT: LazyLock<Arc<ImageRules>> = LazyLock::new(|| Arc::new(ImageRules::default()));
        Arc::clone(&DEFAULT)
    }

    /// First blacklist term contained in `url` (case-insensitive).
    #[must_use]
    pub fn blacklisted_term(&self, url: &str) -> Option<&str> {
        let lower = url.to_lowercase();
        self.blacklist
            .iter()
            .find(|term| lower.contains(term.as_str()))
            .map(String::as_str)
    }

    /// Whether the URL shows any sign of being product imagery.
    #[must_use]
    pub fn has_positive_signal(&self, url: &str) -> bool {
        if url_utils::file_extension(url).is_some_and(|ext| self.extensions.contains(&ext)) {
            return true;
        }
        if DIMENSION_IN_URL.is_match(url) {
            return true;
        }
        let lower = url.to_lowercase();
        self.product_paths.iter().any(|p| lower.contains(p.as_str()))
    }

    /// Check an absolute candidate URL. Blacklist terms veto before any other
    /// rule, so a positive signal can never rescue a blacklisted URL.
    pub fn check(&self, url: &str) -> std::result::Result<(), Rejection> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Rejection::Empty);
        }
        if url_utils::is_data_uri(url) {
            return Err(Rejection::DataUri);
        }
        if let Some(term) = self.blacklisted_term(url) {
            return Err(Rejection::Blacklisted(term.to_string()));
        }

        let lower = url.to_lowercase();
        if let Some(seg) = self.rejected_paths.iter().find(|p| lower.contains(p.as_str())) {
            return Err(Rejection::NonProductPath(seg.clone()));
        }
        if let Some(ext) = url_utils::file_extension(url) {
            if self.rejected_extensions.contains(&ext) {
                return Err(Rejection::RejectedExtension(ext));
            }
        }
        if !url_utils::is_absolute_url(url).0 {
            return Err(Rejection::NotAbsolute);
        }

        if self.has_positive_signal(url) {
            Ok(())
        } else {
            Err(Rejection::NoPositiveSignal)
        }
    }

    /// Upgrade a recognised CDN thumbnail URL to its large variant.
    #[must_use]
    pub fn rewrite_thumbnail(&self, url: &str) -> Option<String> {
        self.rewrites
            .iter()
            .find_map(|r| r.apply(url))
            .filter(|rewritten| rewritten != url)
    }

    /// Whether the URL follows a recognised CDN thumbnail convention,
    /// regardless of the size it currently carries.
    #[must_use]
    pub fn is_cdn_thumbnail(&self, url: &str) -> bool {
        self.rewrites.iter().any(|r| r.apply(url).is_some())
    }

    /// Whether the URL carries an explicit high-resolution marker.
    #[must_use]
    pub fn is_high_res(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        self.high_res_markers.iter().any(|m| lower.contains(m.as_str()))
    }
}

impl Default for ImageRules {
    /// The built-in configuration. Its rewrite patterns are constants that
    /// always compile.
    fn default() -> Self {
        let config = ImageRulesConfig::default();
        let rewrites = config
            .thumbnail_rewrites
            .iter()
            .filter_map(|r| ThumbnailRewrite::compile(r).ok())
            .collect();
        Self::assemble(config, rewrites)
    }
}
