//! Import orchestration.
//!
//! Drives the collaborators around the extraction core: fetch the page,
//! extract a [`ProductRecord`], create a catalog entry from it, then download,
//! validate and attach its images. Catalog storage is abstracted behind
//! [`CatalogWriter`]; nothing here knows how entries or images are persisted.
//!
//! Image problems never fail an import. Each failed download, undecodable
//! body, or undersized image is logged with `tracing::warn!` and skipped.

use std::fmt;

use crate::error::{Error, Result};
use crate::fetch::{ImageDownloader, PageFetcher};
use crate::options::{ImportSettings, Options};
use crate::result::ProductRecord;
use crate::url_utils;

/// Extensions the catalog accepts without further URL inspection.
const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Everything needed to create one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDraft {
    pub name: String,
    /// Sanitized description markup.
    pub description: String,
    /// Raw price token; `None` when the page showed none.
    pub price: Option<String>,
    pub status: String,
    pub category: Option<String>,
    pub source_url: String,
    /// One single-valued attribute per non-empty extracted field.
    pub attributes: Vec<(String, String)>,
}

impl CatalogDraft {
    #[must_use]
    pub fn from_record(record: &ProductRecord, settings: &ImportSettings) -> Self {
        Self {
            name: record.title.clone(),
            description: record.description.clone(),
            price: Some(record.price.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            status: settings.status.clone(),
            category: settings.category.clone(),
            source_url: record.source_url.clone(),
            attributes: record
                .fields
                .non_empty()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// A downloaded image that decoded and met the size threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    pub url: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Why an image was not attached.
#[derive(Debug, thiserror::Error)]
pub enum ImageRejection {
    #[error("does not look like an image url")]
    NotImageLike,
    #[error("download failed: {0}")]
    Download(#[from] Error),
    #[error("not a decodable image: {0}")]
    Undecodable(String),
    #[error("too small: {width}x{height}")]
    TooSmall { width: u32, height: u32 },
}

/// Catalog storage.
pub trait CatalogWriter {
    type EntryId: Clone + fmt::Debug;
    type ImageId: Clone + fmt::Debug;

    /// Create an entry; failures abort the import.
    fn create_entry(&mut self, draft: &CatalogDraft) -> Result<Self::EntryId>;

    /// Store one validated image for `entry`.
    fn store_image(&mut self, entry: &Self::EntryId, image: &ValidatedImage) -> Result<Self::ImageId>;

    /// Set the primary image and gallery of `entry`.
    fn attach_images(&mut self, entry: &Self::EntryId, primary: &Self::ImageId, gallery: &[Self::ImageId]) -> Result<()>;
}

/// Result of one import.
#[derive(Debug, Clone)]
pub struct ImportOutcome<Id> {
    pub entry_id: Id,
    pub record: ProductRecord,
    /// Images in the ranked list.
    pub images_found: usize,
    /// Images stored and attached.
    pub images_attached: usize,
}

/// Whether a ranked URL is worth downloading: a known image extension, or an
/// image-ish path when the extension is missing or unknown.
#[must_use]
pub fn looks_like_image(url: &str) -> bool {
    if url_utils::file_extension(url).is_some_and(|ext| UPLOAD_EXTENSIONS.contains(&ext.as_str())) {
        return true;
    }
    url.contains("/images/") || url.contains("/img/") || url.contains("image")
}

/// Decode `bytes` and check both dimensions against `min_dimension`.
pub fn validate_image(url: &str, bytes: Vec<u8>, min_dimension: u32) -> std::result::Result<ValidatedImage, ImageRejection> {
    let decoded = image::load_from_memory(&bytes).map_err(|e| ImageRejection::Undecodable(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());
    if width < min_dimension || height < min_dimension {
        return Err(ImageRejection::TooSmall { width, height });
    }
    Ok(ValidatedImage {
        url: url.to_string(),
        bytes,
        width,
        height,
    })
}

/// Fetch, extract and import product pages.
pub struct Importer<F, D> {
    fetcher: F,
    downloader: D,
    options: Options,
    settings: ImportSettings,
}

impl<F: PageFetcher, D: ImageDownloader> Importer<F, D> {
    pub fn new(fetcher: F, downloader: D) -> Self {
        Self {
            fetcher,
            downloader,
            options: Options::default(),
            settings: ImportSettings::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ImportSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetch `url` and extract its record without touching the catalog.
    pub fn fetch_record(&self, url: &str) -> Result<ProductRecord> {
        let url = url.trim();
        if !url_utils::is_absolute_url(url).0 {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        let page = self.fetcher.fetch(url)?;
        crate::extract_with_options(&page.text(), url, &self.options)
    }

    /// Full import of the product page at `url` into `catalog`.
    pub fn import<W: CatalogWriter>(&self, url: &str, catalog: &mut W) -> Result<ImportOutcome<W::EntryId>> {
        let record = self.fetch_record(url)?;
        self.import_record(record, catalog)
    }

    /// Create a catalog entry for an already extracted record and attach
    /// its images.
    pub fn import_record<W: CatalogWriter>(
        &self,
        record: ProductRecord,
        catalog: &mut W,
    ) -> Result<ImportOutcome<W::EntryId>> {
        let draft = CatalogDraft::from_record(&record, &self.settings);
        let entry_id = catalog.create_entry(&draft)?;
        tracing::info!(entry = ?entry_id, name = %draft.name, attributes = draft.attributes.len(), "catalog entry created");

        let images_found = record.images.len();
        let mut stored = Vec::new();

        for url in record.images.iter().take(self.options.image_cap()) {
            let image = match self.prepare_image(url) {
                Ok(image) => image,
                Err(reason) => {
                    tracing::warn!(url = %url, %reason, "skipping image");
                    continue;
                }
            };
            match catalog.store_image(&entry_id, &image) {
                Ok(id) => stored.push(id),
                Err(e) => tracing::warn!(url = %url, error = %e, "failed to store image"),
            }
        }

        if let Some((primary, gallery)) = stored.split_first() {
            catalog.attach_images(&entry_id, primary, gallery)?;
        }
        tracing::info!(entry = ?entry_id, found = images_found, attached = stored.len(), "images processed");

        Ok(ImportOutcome {
            entry_id,
            record,
            images_found,
            images_attached: stored.len(),
        })
    }

    fn prepare_image(&self, url: &str) -> std::result::Result<ValidatedImage, ImageRejection> {
        if !looks_like_image(url) {
            return Err(ImageRejection::NotImageLike);
        }
        let bytes = self.downloader.download(url)?;
        validate_image(url, bytes, self.settings.min_image_dimension)
    }
}
