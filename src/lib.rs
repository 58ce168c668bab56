//! # product-extract
//!
//! Heuristic product data extraction from e-commerce pages.
//!
//! Given the markup of a product page and the URL it came from, the library
//! finds the description block, cleans it, mines specification fields out of
//! it, and collects a ranked list of product image URLs, without knowing the
//! storefront's schema in advance.
//!
//! ## Quick Start
//!
//! ```rust
//! use product_extract::extract;
//!
//! let html = r#"<html><head><title>Rifle</title></head><body>
//!   <h1 class="product-title">Model 60</h1>
//!   <span class="price">$249.99</span>
//!   <div class="product-description"><ul>
//!     <li>Caliber: .22 LR</li>
//!     <li>Mag Capacity: 14</li>
//!   </ul></div>
//!   <div class="product-images"><img src="/products/60/main.jpg"></div>
//! </body></html>"#;
//!
//! let record = extract(html, "https://shop.example.com/products/model-60")?;
//! assert_eq!(record.title, "Model 60");
//! assert_eq!(record.price, "249.99");
//! assert_eq!(record.fields.get("Caliber"), Some(".22 LR"));
//! assert_eq!(record.fields.get("Magazine Capacity"), Some("14"));
//! assert_eq!(record.images, vec!["https://shop.example.com/products/60/main.jpg"]);
//! # Ok::<(), product_extract::Error>(())
//! ```
//!
//! ## Pieces
//!
//! - **Description**: tiered structural rules, meta-description fallback
//! - **Sanitizer**: ordered text rules that strip scripts, tab chrome, review widgets
//! - **Field mining**: microdata, `Label: Value` items, table rows, list scan
//! - **Images**: gallery-aware candidate tiers, filter rules as data, quality ranking
//! - **Import**: collaborator traits for fetching, catalog writing, image validation

mod error;
mod extract;
mod options;
mod result;

/// Markup tree access layer.
pub mod dom;

/// Compiled regexes shared across modules.
pub mod patterns;

/// Predicate rules over elements and the declared rule tiers.
pub mod selector;

/// Extraction components.
pub mod extractor;

/// Canonical specification fields and their aliases.
pub mod taxonomy;

/// Image URL filter rules.
pub mod filters;

/// URL resolution and host helpers.
pub mod url_utils;

/// Charset detection and transcoding.
pub mod encoding;

/// Page and image retrieval collaborators.
pub mod fetch;

/// Import orchestration over external collaborators.
pub mod import;

pub use error::{Error, Result};
pub use options::{clamp_max_images, ImportSettings, Options, OptionsConfig};
pub use result::{CandidateSource, DescriptionBlock, ExtractedFields, ImageCandidate, ProductRecord};

/// Extract a product record using default options.
///
/// Fails only when `page_url` is not an absolute http(s) URL.
pub fn extract(markup: &str, page_url: &str) -> Result<ProductRecord> {
    extract_with_options(markup, page_url, &Options::default())
}

/// Extract a product record with custom options.
///
/// ```rust
/// use product_extract::{extract_with_options, Options};
///
/// let options = Options {
///     debug: true,
///     ..Options::default()
/// }
/// .with_max_images(5);
/// let record = extract_with_options("<p>nothing here</p>", "https://example.com/p/1", &options)?;
/// assert!(record.images.is_empty());
/// # Ok::<(), product_extract::Error>(())
/// ```
pub fn extract_with_options(markup: &str, page_url: &str, options: &Options) -> Result<ProductRecord> {
    extract::extract_product(markup, page_url, options)
}

/// Extract from raw bytes, decoding them by their `<meta>` charset first.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
pub fn extract_bytes(markup: &[u8], page_url: &str) -> Result<ProductRecord> {
    extract_bytes_with_options(markup, page_url, &Options::default())
}

/// Extract from raw bytes with custom options.
pub fn extract_bytes_with_options(markup: &[u8], page_url: &str, options: &Options) -> Result<ProductRecord> {
    let text = encoding::transcode_to_utf8(markup);
    extract_with_options(&text, page_url, options)
}
