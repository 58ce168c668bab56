//! Error types for product-extract.
//!
//! Only conditions that abort a whole product record are errors. Missing
//! descriptions, fields, or images are ordinary (empty) results.

/// Error type for fetch, extraction and import operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page URL is not an absolute http(s) URL.
    #[error("Please provide a valid URL: {0}")]
    InvalidUrl(String),

    /// The page was fetched but the server did not answer 200.
    #[error("Failed to fetch the URL. Response code: {0}")]
    HttpStatus(u16),

    /// The page was fetched but the body was empty.
    #[error("The URL returned an empty response.")]
    EmptyResponse,

    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("Request failed: {0}")]
    Network(String),

    /// The catalog writer could not create the entry.
    #[error("Failed to create the product: {0}")]
    Catalog(String),

    /// Configuration could not be parsed or contains an invalid rule.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure happened while retrieving the page.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::HttpStatus(_) | Self::EmptyResponse | Self::Network(_))
    }
}

/// Result type alias for product-extract operations.
pub type Result<T> = std::result::Result<T, Error>;
