//! URL Utility Functions
//!
//! Validation, relative-URL resolution against the page URL, and the host
//! and path inspections used by the image filter and prioritizer.

use url::Url;

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) => {
            if url.host().is_some() {
                (true, Some(url))
            } else {
                (false, None)
            }
        }
        Err(_) => (false, None),
    }
}

/// Convert a relative or absolute URL to absolute form.
///
/// Handles protocol-relative (`//cdn/x.jpg`), root-relative (`/x.jpg`) and
/// path-relative (`../img/x.jpg`) references. Special schemes (`data:`,
/// `javascript:`, ...) are returned unchanged so callers can reject them.
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if is_data_uri(url_str)
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Whether the string is an inline `data:` URI.
#[inline]
#[must_use]
pub fn is_data_uri(s: &str) -> bool {
    s.trim_start()
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Extract the lowercase hostname from a URL, or `None` if it is not absolute.
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    parse_url(url_str).and_then(|url| url.host_str().map(str::to_ascii_lowercase))
}

/// Reduce a hostname to its registrable domain.
///
/// Without a public-suffix list this keeps the last two labels, or the last
/// three when the second-level label looks like a country-code second level
/// (`shop.example.co.uk` -> `example.co.uk`).
#[must_use]
pub fn registrable_domain(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    if labels.len() <= 2 {
        return labels.join(".");
    }

    let tld = labels[labels.len() - 1];
    let sld = labels[labels.len() - 2];
    let keep = if tld.len() == 2 && matches!(sld, "co" | "com" | "net" | "org" | "gov" | "ac" | "edu") {
        3
    } else {
        2
    };

    labels[labels.len() - keep..].join(".")
}

/// Whether two hosts share a registrable domain (`www.a.com` ~ `cdn.a.com`).
#[must_use]
pub fn same_site(host_a: &str, host_b: &str) -> bool {
    let a = registrable_domain(host_a);
    !a.is_empty() && a == registrable_domain(host_b)
}

/// Strip query parameters and fragment from a URL or path.
#[must_use]
pub fn strip_query_and_fragment(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query.split('#').next().unwrap_or(without_query)
}

/// Extract filename from a URL, stripping query parameters and fragments.
///
/// # Examples
/// ```
/// use product_extract::url_utils::extract_filename;
///
/// assert_eq!(extract_filename("https://example.com/images/photo.jpg"), "photo.jpg");
/// assert_eq!(extract_filename("https://example.com/images/photo.jpg?v=123"), "photo.jpg");
/// assert_eq!(extract_filename("https://example.com/"), "");
/// ```
#[must_use]
pub fn extract_filename(url: &str) -> String {
    let url = url.trim();

    if url.is_empty() {
        return String::new();
    }

    let filename = strip_query_and_fragment(url)
        .rsplit('/')
        .next()
        .unwrap_or("")
        .trim();

    if filename.is_empty() || filename == "." || filename == ".." {
        return String::new();
    }

    filename.to_string()
}

/// Lowercase file extension of the URL's last path segment, if any.
#[must_use]
pub fn file_extension(url: &str) -> Option<String> {
    let filename = extract_filename(url);
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
