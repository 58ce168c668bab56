//! Image Prioritizer
//!
//! Orders candidate URLs by likely quality: explicit high-resolution or
//! upgraded CDN thumbnails first, then same-site and CDN-hosted images, then
//! everything else. Duplicates are removed keeping the first occurrence and
//! the list is capped.

use std::collections::HashSet;

use url::Url;

use crate::filters::ImageRules;
use crate::options::{MAX_MAX_IMAGES, MIN_MAX_IMAGES};
use crate::url_utils;
use crate::Options;

/// Ranking bucket of one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    Prioritized,
    Regular,
    LowPriority,
}

/// Rank `candidates` with the rules and cap from `options`.
#[must_use]
pub fn rank(candidates: &[String], page_url: &Url, options: &Options) -> Vec<String> {
    let ranked = rank_with(candidates, page_url, &options.image_rules, options.image_cap());
    if options.debug {
        tracing::debug!(candidates = candidates.len(), kept = ranked.len(), "images ranked");
    }
    ranked
}

/// Rank `candidates` against `page_url` and keep at most `max_images`,
/// clamped into 1..=50.
#[must_use]
pub fn rank_with(candidates: &[String], page_url: &Url, rules: &ImageRules, max_images: usize) -> Vec<String> {
    let cap = max_images.clamp(MIN_MAX_IMAGES, MAX_MAX_IMAGES);
    let page_host = page_url.host_str().unwrap_or_default().to_lowercase();

    let mut prioritized = Vec::new();
    let mut regular = Vec::new();
    let mut low = Vec::new();

    for candidate in candidates {
        let (bucket, url) = classify(candidate, &page_host, rules);
        match bucket {
            Bucket::Prioritized => prioritized.push(url),
            Bucket::Regular => regular.push(url),
            Bucket::LowPriority => low.push(url),
        }
    }

    let mut seen = HashSet::new();
    prioritized
        .into_iter()
        .chain(regular)
        .chain(low)
        .filter(|url| seen.insert(url.clone()))
        .take(cap)
        .collect()
}

/// Bucket for `url`, plus the URL to emit (upgraded when it is a CDN
/// thumbnail).
#[must_use]
pub fn classify(url: &str, page_host: &str, rules: &ImageRules) -> (Bucket, String) {
    if let Some(upgraded) = rules.rewrite_thumbnail(url) {
        return (Bucket::Prioritized, upgraded);
    }
    if rules.is_high_res(url) || rules.is_cdn_thumbnail(url) {
        return (Bucket::Prioritized, url.to_string());
    }

    let host = url_utils::extract_hostname(url).unwrap_or_default();
    if !host.is_empty() && (url_utils::same_site(&host, page_host) || host.contains("cdn")) {
        return (Bucket::Regular, url.to_string());
    }
    (Bucket::LowPriority, url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://www.gunshop.com/products/rifle").unwrap_or_else(|e| panic!("{e}"))
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn buckets_are_concatenated_in_order() {
        let candidates = urls(&[
            "https://ads.tracker.net/products/x.jpg",
            "https://img.gunshop.com/products/a.jpg",
            "https://www.gunshop.com/products/a_large.jpg",
        ]);
        let ranked = rank_with(&candidates, &page(), &ImageRules::default(), 10);
        assert_eq!(
            ranked,
            urls(&[
                "https://www.gunshop.com/products/a_large.jpg",
                "https://img.gunshop.com/products/a.jpg",
                "https://ads.tracker.net/products/x.jpg",
            ])
        );
    }

    #[test]
    fn cdn_host_is_regular() {
        let rules = ImageRules::default();
        let (bucket, _) = classify("https://cdn.shopify.com/s/products/a.jpg", "www.gunshop.com", &rules);
        assert_eq!(bucket, Bucket::Regular);
    }

    #[test]
    fn stencil_thumbnails_are_upgraded_and_prioritized() {
        let rules = ImageRules::default();
        let (bucket, url) = classify(
            "https://cdn11.bigcommerce.com/s-x/images/stencil/100x100/products/1/a.jpg",
            "www.gunshop.com",
            &rules,
        );
        assert_eq!(bucket, Bucket::Prioritized);
        assert_eq!(url, "https://cdn11.bigcommerce.com/s-x/images/stencil/1280x1280/products/1/a.jpg");
    }

    #[test]
    fn duplicates_after_upgrade_collapse() {
        let candidates = urls(&[
            "https://cdn11.bigcommerce.com/s-x/images/stencil/100x100/products/1/a.jpg",
            "https://cdn11.bigcommerce.com/s-x/images/stencil/1280x1280/products/1/a.jpg",
        ]);
        assert_eq!(rank_with(&candidates, &page(), &ImageRules::default(), 10).len(), 1);
    }

    #[test]
    fn cap_is_applied_last() {
        let candidates: Vec<String> = (0..8)
            .map(|i| format!("https://www.gunshop.com/products/{i}.jpg"))
            .collect();
        let ranked = rank_with(&candidates, &page(), &ImageRules::default(), 3);
        assert_eq!(ranked, candidates[..3].to_vec());
    }
}
