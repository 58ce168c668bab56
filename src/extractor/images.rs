//! Image Candidate Extractor
//!
//! Walks ordered strategy tiers over the whole page and collects absolute,
//! deduplicated product image URLs. Every candidate element goes through the
//! same steps: related-products exclusion, attribute lookup, URL resolution,
//! thumbnail upgrade, and the filter rules in [`crate::filters`].

use std::collections::HashSet;

use dom_query::{Document, NodeRef, Selection};
use url::Url;

use crate::dom;
use crate::filters::{ImageRules, Rejection};
use crate::patterns::{RELATED_CONTAINER, RELATED_HEADING};
use crate::result::{CandidateSource, ImageCandidate};
use crate::url_utils;
use crate::Options;

/// Image attributes from explicit full-size down to the plain source.
pub const IMAGE_ATTRIBUTES: &[&str] = &[
    "data-image-gallery-new-image-url",
    "data-zoom-image",
    "data-large",
    "data-src",
    "src",
];

/// Zoom-gallery links carry the full-size URL in both of these.
pub const ZOOM_LINK_ATTRIBUTES: &[&str] = &["href", "data-zoom-image"];

/// How a strategy turns one element into raw URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collect {
    /// The first attribute present with a non-blank value.
    FirstPresent,
    /// Every attribute present with a non-blank value.
    AllPresent,
}

/// A CSS selector plus the attributes to read from what it matches.
#[derive(Debug, Clone, Copy)]
pub struct ImageStrategy {
    pub selector: &'static str,
    pub attributes: &'static [&'static str],
    pub collect: Collect,
}

const fn img(selector: &'static str) -> ImageStrategy {
    ImageStrategy {
        selector,
        attributes: IMAGE_ATTRIBUTES,
        collect: Collect::FirstPresent,
    }
}

/// BigCommerce gallery markup.
pub static SITE_GALLERY_STRATEGIES: &[ImageStrategy] = &[
    img(r#"ul[class*="productView-thumbnails"] > li img"#),
    img(r#"figure[class*="productView-image"] img"#),
    img(r#"div[class*="productView-img-container"] img"#),
    ImageStrategy {
        selector: r#"a[class*="cloud-zoom-gallery"]"#,
        attributes: ZOOM_LINK_ATTRIBUTES,
        collect: Collect::AllPresent,
    },
    img(r#"div[class*="productView"] img[class*="main-image"]"#),
];

pub static PRODUCT_CONTAINER_STRATEGIES: &[ImageStrategy] = &[
    img(r#"div[class*="product-images"] img"#),
    img(r#"div[class*="product-gallery"] img"#),
    img(r#"div[id*="product-images"] img"#),
    img(r#"div[class*="product-detail"] img"#),
    img(r#"div[class*="product-media"] img"#),
    img(r#"div[class*="product-slider"] img"#),
    img(r#"div[class*="woocommerce-product-gallery"] img"#),
];

pub static THUMBNAIL_STRATEGIES: &[ImageStrategy] = &[
    img(r#"ul[class*="thumb"] img"#),
    img(r#"ol[class*="thumb"] img"#),
    img(r#"div[class*="thumb"] img"#),
];

pub static MAIN_CONTENT_STRATEGIES: &[ImageStrategy] = &[
    img(r#"div[class*="main-content"] img"#),
    img("main img"),
    img("article img"),
    img(r#"div[class*="content"] img"#),
];

pub static PAGE_FALLBACK_STRATEGIES: &[ImageStrategy] = &[img("img")];

/// Tiers in evaluation order.
#[must_use]
pub fn tiers() -> [(CandidateSource, &'static [ImageStrategy]); 5] {
    [
        (CandidateSource::SiteGallery, SITE_GALLERY_STRATEGIES),
        (CandidateSource::ProductContainer, PRODUCT_CONTAINER_STRATEGIES),
        (CandidateSource::ThumbnailList, THUMBNAIL_STRATEGIES),
        (CandidateSource::MainContent, MAIN_CONTENT_STRATEGIES),
        (CandidateSource::PageFallback, PAGE_FALLBACK_STRATEGIES),
    ]
}

/// Ordered candidate list with its own "seen" set. One per extraction call.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen: HashSet<String>,
    candidates: Vec<ImageCandidate>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `url` unless an identical URL is already present.
    pub fn insert(&mut self, url: String, source: CandidateSource) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.candidates.push(ImageCandidate { url, source });
        true
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn into_candidates(self) -> Vec<ImageCandidate> {
        self.candidates
    }
}

/// Whether `node` sits inside a related/recommended products block.
///
/// Walks at most `max_levels` nodes upward, starting with `node` itself,
/// and checks class and id values, plus the text of `h1`-`h4` headings.
#[must_use]
pub fn is_excluded(node: &NodeRef, max_levels: usize) -> bool {
    dom::any_ancestor_within(node, max_levels, |n| {
        let class = n.attr("class").map(|c| c.to_string()).unwrap_or_default();
        let id = n.attr("id").map(|i| i.to_string()).unwrap_or_default();
        if RELATED_CONTAINER.is_match(&class) || RELATED_CONTAINER.is_match(&id) {
            return true;
        }
        let is_heading = n
            .node_name()
            .is_some_and(|t| matches!(&*t, "h1" | "h2" | "h3" | "h4"));
        is_heading && RELATED_HEADING.is_match(&n.text())
    })
}

/// Resolve, upgrade, and check one raw attribute value.
pub fn normalize_candidate(raw: &str, base: &Url, rules: &ImageRules) -> Result<String, Rejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Rejection::Empty);
    }
    if url_utils::is_data_uri(raw) {
        return Err(Rejection::DataUri);
    }

    let absolute = url_utils::create_absolute_url(raw, base);
    let upgraded = rules.rewrite_thumbnail(&absolute).unwrap_or(absolute);
    rules.check(&upgraded)?;
    Ok(upgraded)
}

/// Raw URLs an element offers under `strategy`.
#[must_use]
pub fn raw_urls(sel: &Selection, strategy: &ImageStrategy) -> Vec<String> {
    match strategy.collect {
        Collect::FirstPresent => dom::first_present_attribute(sel, strategy.attributes)
            .into_iter()
            .collect(),
        Collect::AllPresent => dom::all_present_attributes(sel, strategy.attributes),
    }
}

/// Collect image candidates from `doc`, tier by tier.
#[must_use]
pub fn extract_candidates(doc: &Document, page_url: &Url, options: &Options) -> Vec<ImageCandidate> {
    let mut set = CandidateSet::new();

    for (index, (source, strategies)) in tiers().into_iter().enumerate() {
        if index > 0 && set.len() >= options.min_candidates {
            break;
        }
        let limit = (source == CandidateSource::PageFallback).then_some(options.fallback_image_limit);

        if options.debug {
            tracing::debug!(tier = %source, have = set.len(), "image tier start");
        }
        run_tier(doc, page_url, options, source, strategies, limit, &mut set);
    }

    if options.debug {
        tracing::debug!(count = set.len(), "image candidates collected");
    }
    set.into_candidates()
}

/// Collect image candidate URLs from `doc`.
#[must_use]
pub fn extract(doc: &Document, page_url: &Url, options: &Options) -> Vec<String> {
    extract_candidates(doc, page_url, options)
        .into_iter()
        .map(|c| c.url)
        .collect()
}

fn run_tier(
    doc: &Document,
    page_url: &Url,
    options: &Options,
    source: CandidateSource,
    strategies: &[ImageStrategy],
    limit: Option<usize>,
    set: &mut CandidateSet,
) {
    for strategy in strategies {
        for node in doc.select(strategy.selector).nodes() {
            if limit.is_some_and(|max| set.len() >= max) {
                return;
            }
            if is_excluded(node, options.ancestor_depth) {
                if options.debug {
                    tracing::debug!(selector = strategy.selector, "skipping image in related products block");
                }
                continue;
            }

            for raw in raw_urls(&Selection::from(*node), strategy) {
                match normalize_candidate(&raw, page_url, &options.image_rules) {
                    Ok(url) => {
                        let added = set.insert(url, source);
                        if options.debug && added {
                            tracing::debug!(selector = strategy.selector, raw = %raw, "image added");
                        }
                    }
                    Err(reason) => {
                        if options.debug {
                            tracing::debug!(raw = %raw, %reason, "image rejected");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://shop.example.com/products/widget").unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn candidate_set_dedups_exact_urls() {
        let mut set = CandidateSet::new();
        assert!(set.insert("https://a.com/1.jpg".into(), CandidateSource::SiteGallery));
        assert!(!set.insert("https://a.com/1.jpg".into(), CandidateSource::PageFallback));
        assert!(set.insert("https://a.com/1.jpg?v=2".into(), CandidateSource::PageFallback));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn normalize_resolves_and_upgrades() {
        let rules = ImageRules::default();
        assert_eq!(
            normalize_candidate("/img/a.jpg", &page(), &rules),
            Ok("https://shop.example.com/img/a.jpg".to_string())
        );
        assert_eq!(
            normalize_candidate("//cdn11.bigcommerce.com/s-x/images/stencil/100x100/products/1/a.jpg", &page(), &rules),
            Ok("https://cdn11.bigcommerce.com/s-x/images/stencil/1280x1280/products/1/a.jpg".to_string())
        );
        assert_eq!(
            normalize_candidate("data:image/gif;base64,R0lGOD", &page(), &rules),
            Err(Rejection::DataUri)
        );
    }

    #[test]
    fn excluded_by_class_id_or_heading() {
        let doc = dom::parse(
            r#"
            <div id="recommended-products"><img id="a" src="a.jpg"></div>
            <section><h3>You may also like <img id="b" src="b.jpg"></h3></section>
            <div class="gallery"><img id="c" src="c.jpg"></div>
        "#,
        );
        let node = |id: &str| doc.select(&format!("#{id}")).nodes()[0];

        assert!(is_excluded(&node("a"), 10));
        assert!(is_excluded(&node("b"), 10));
        assert!(!is_excluded(&node("c"), 10));
    }

    #[test]
    fn raw_urls_respect_collect_mode() {
        let doc = dom::parse(
            r#"<a class="cloud-zoom-gallery" href="/big.jpg" data-zoom-image="/zoom.jpg"></a>
               <img src="/small.jpg" data-zoom-image="/zoom2.jpg">"#,
        );
        let link = doc.select("a");
        let image = doc.select("img");

        assert_eq!(
            raw_urls(&link, &SITE_GALLERY_STRATEGIES[3]),
            vec!["/big.jpg".to_string(), "/zoom.jpg".to_string()]
        );
        assert_eq!(raw_urls(&image, &PAGE_FALLBACK_STRATEGIES[0]), vec!["/zoom2.jpg".to_string()]);
    }

    #[test]
    fn later_tiers_skipped_once_threshold_met() {
        let doc = dom::parse(
            r#"
            <ul class="productView-thumbnails">
                <li><img src="/products/1.jpg"></li>
                <li><img src="/products/2.jpg"></li>
                <li><img src="/products/3.jpg"></li>
            </ul>
            <main><img src="/products/4.jpg"></main>
        "#,
        );
        let urls = extract(&doc, &page(), &Options::default());
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|u| !u.ends_with("4.jpg")));
    }

    #[test]
    fn fallback_tier_stops_at_limit() {
        let imgs: String = (1..=9).map(|i| format!(r#"<img src="/products/{i}.jpg">"#)).collect();
        let doc = dom::parse(&format!("<body>{imgs}</body>"));

        let candidates = extract_candidates(&doc, &page(), &Options::default());
        assert_eq!(candidates.len(), 5);
        assert!(candidates.iter().all(|c| c.source == CandidateSource::PageFallback));
    }
}
