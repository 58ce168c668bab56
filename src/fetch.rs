//! Page and image retrieval.
//!
//! Retrieval sits outside the extraction core: the importer talks to it only
//! through [`PageFetcher`] and [`ImageDownloader`], so tests and embedders can
//! plug in their own transport. [`HttpFetcher`] (feature `http`) is the
//! blocking reqwest implementation used by the `import_url` binary.

use crate::encoding;
use crate::error::Result;

/// A retrieved page body plus the `Content-Type` it was served with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedPage {
    /// A UTF-8 page with no `Content-Type`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            body: text.into().into_bytes(),
            content_type: None,
        }
    }

    /// Body decoded to text: header charset, then `<meta>`, then UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        encoding::decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Retrieves one page.
///
/// Implementations return [`crate::Error::HttpStatus`] for a non-200 answer,
/// [`crate::Error::EmptyResponse`] for an empty body, and
/// [`crate::Error::Network`] for transport failures.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Downloads the raw bytes of one image.
pub trait ImageDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::StatusCode;

    use super::{FetchedPage, ImageDownloader, PageFetcher};
    use crate::error::{Error, Result};

    const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    const TIMEOUT: Duration = Duration::from_secs(60);

    /// Blocking HTTP client with a browser user agent and a 60 second timeout.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
    }

    impl HttpFetcher {
        pub fn new() -> Result<Self> {
            let client = Client::builder()
                .user_agent(USER_AGENT)
                .timeout(TIMEOUT)
                .build()
                .map_err(|e| Error::Network(e.to_string()))?;
            Ok(Self { client })
        }

        fn get(&self, url: &str) -> Result<(Vec<u8>, Option<String>)> {
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| Error::Network(e.to_string()))?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(Error::HttpStatus(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().map_err(|e| Error::Network(e.to_string()))?;
            if body.is_empty() {
                return Err(Error::EmptyResponse);
            }

            tracing::debug!(url, bytes = body.len(), "fetched");
            Ok((body.to_vec(), content_type))
        }
    }

    impl PageFetcher for HttpFetcher {
        fn fetch(&self, url: &str) -> Result<FetchedPage> {
            let (body, content_type) = self.get(url)?;
            Ok(FetchedPage { body, content_type })
        }
    }

    impl ImageDownloader for HttpFetcher {
        fn download(&self, url: &str) -> Result<Vec<u8>> {
            self.get(url).map(|(body, _)| body)
        }
    }
}
