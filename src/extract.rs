//! Record assembly.
//!
//! Parses the page once and runs both branches over the same tree: the
//! description branch (locate, sanitize, mine) and the image branch (collect,
//! rank). Neither branch can fail; only an unusable page URL aborts.

use crate::dom::PageDocument;
use crate::error::Result;
use crate::extractor::{description, fields, images, product, ranking, sanitize};
use crate::options::Options;
use crate::result::ProductRecord;

/// Build a [`ProductRecord`] from `markup` fetched from `page_url`.
pub(crate) fn extract_product(markup: &str, page_url: &str, options: &Options) -> Result<ProductRecord> {
    let page = PageDocument::parse(markup, page_url)?;
    let doc = page.document();

    if options.debug {
        tracing::debug!(url = %page.url(), bytes = markup.len(), "extracting product");
    }

    let title = product::locate_title(doc);
    let price = product::locate_price(doc);

    let block = description::locate_with_options(doc, options);
    let description = sanitize::sanitize_with_options(block.as_str(), options);
    let fields = fields::mine_with_options(&description, options);

    let candidates = images::extract(doc, page.url(), options);
    let images = ranking::rank(&candidates, page.url(), options);

    if options.debug {
        tracing::debug!(
            title = %title,
            price = %price,
            fields = fields.len(),
            images = images.len(),
            "product extracted"
        );
    }

    Ok(ProductRecord {
        title,
        price,
        description,
        fields,
        images,
        source_url: page_url.trim().to_string(),
    })
}
