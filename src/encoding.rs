//! Charset handling for fetched pages.
//!
//! A page body is decoded with the charset named by the HTTP `Content-Type`
//! header when there is one, then by the markup's own `<meta>` declaration,
//! and as UTF-8 otherwise. Decoding is always lossy.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes of the body searched for a `<meta>` charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// `<meta charset="...">`
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("META_CHARSET regex")
});

/// `charset=...` parameter of a `Content-Type` value, header or `http-equiv`.
static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("CHARSET_PARAM regex")
});

/// Encoding named by a `Content-Type` header value, if any and known.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CHARSET_PARAM
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().trim().as_bytes()))
}

/// Encoding declared inside the first kilobyte of the markup, if any.
///
/// Covers both `<meta charset>` and `<meta http-equiv="Content-Type">`.
#[must_use]
pub fn charset_from_markup(body: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LIMIT)]);
    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Pick the encoding for a body: header, then markup, then UTF-8.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_markup(body))
        .unwrap_or(UTF_8)
}

/// Decode a fetched body to UTF-8 text. Invalid sequences become U+FFFD.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

/// Decode markup bytes using only what the markup declares.
///
/// ```
/// use product_extract::encoding::transcode_to_utf8;
///
/// let page = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert!(transcode_to_utf8(page).contains("Caf\u{e9}"));
/// ```
#[must_use]
pub fn transcode_to_utf8(body: &[u8]) -> String {
    decode_body(body, None)
}
