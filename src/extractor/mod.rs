//! Extraction components.
//!
//! Two independent branches feed one [`crate::ProductRecord`]:
//!
//! - `description` -> `sanitize` -> `fields`: locate the description block,
//!   clean it, and mine specification fields out of it.
//! - `images` -> `ranking`: collect image candidates tier by tier and order
//!   them by likely quality.
//!
//! `product` holds the simple title and price locators.
//!
//! ```rust
//! use product_extract::dom;
//! use product_extract::extractor::{description, fields, sanitize};
//! use product_extract::taxonomy::FieldTaxonomy;
//!
//! let doc = dom::parse(r#"<div class="description"><ul><li>Caliber: 9mm</li></ul></div>"#);
//! let block = description::locate(&doc);
//! let clean = sanitize::sanitize(block.as_str());
//! let found = fields::mine(&clean, &FieldTaxonomy::firearms());
//! assert_eq!(found.get("Caliber"), Some("9mm"));
//! ```

pub mod description;
pub mod fields;
pub mod images;
pub mod product;
pub mod ranking;
pub mod sanitize;
