use product_extract::dom;
use product_extract::extractor::images;
use product_extract::filters::{ImageRules, ImageRulesConfig, Rejection};
use product_extract::{Error, Options};
use url::Url;

#[test]
fn defaults() {
    let options = Options::default();
    assert_eq!(options.max_images, 20);
    assert!(!options.debug);
    assert_eq!(options.min_candidates, 3);
    assert_eq!(options.fallback_image_limit, 5);
    assert_eq!(options.ancestor_depth, 10);
    assert_eq!(options.taxonomy.len(), 15);
}

#[test]
fn json_keys_override_defaults() {
    let options = Options::from_json(r#"{"max_images": -3, "min_candidates": 1, "ancestor_depth": 4}"#)
        .unwrap_or_else(|e| panic!("options: {e}"));
    assert_eq!(options.max_images, 3);
    assert_eq!(options.min_candidates, 1);
    assert_eq!(options.ancestor_depth, 4);
    assert_eq!(options.fallback_image_limit, 5);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(Options::from_json("{max_images: 3"), Err(Error::Config(_))));
}

#[test]
fn invalid_rewrite_pattern_is_a_config_error() {
    let json = r#"{"image_rules": {"thumbnail_rewrites": [
        {"marker": "/cache/", "pattern": "/cache/(", "replacement": "/cache/full/"}
    ]}}"#;
    assert!(matches!(Options::from_json(json), Err(Error::Config(_))));
}

#[test]
fn blacklist_terms_are_data() {
    let options = Options::from_json(r#"{"image_rules": {"blacklist": ["watermark"]}}"#)
        .unwrap_or_else(|e| panic!("options: {e}"));

    assert!(matches!(
        options.image_rules.check("https://shop.example.com/products/watermark_1.jpg"),
        Err(Rejection::Blacklisted(_))
    ));
    assert_eq!(options.image_rules.check("https://shop.example.com/products/logo.jpg"), Ok(()));
}

#[test]
fn custom_thumbnail_rewrite() {
    let config = ImageRulesConfig {
        thumbnail_rewrites: vec![serde_json::from_str(
            r#"{"marker": "/cache/", "pattern": "/cache/\\d+x\\d+/", "replacement": "/cache/2000x2000/"}"#,
        )
        .unwrap_or_else(|e| panic!("rewrite: {e}"))],
        ..ImageRulesConfig::default()
    };
    let rules = ImageRules::compile(config).unwrap_or_else(|e| panic!("rules: {e}"));

    assert_eq!(
        rules.rewrite_thumbnail("https://shop.example.com/cache/300x300/products/a.jpg"),
        Some("https://shop.example.com/cache/2000x2000/products/a.jpg".to_string())
    );
    assert_eq!(rules.rewrite_thumbnail("https://shop.example.com/products/a.jpg"), None);
}

#[test]
fn shallow_ancestor_depth_misses_distant_related_container() {
    let html = r#"
        <div class="related-products"><div><div><div>
            <img src="/products/far.jpg">
        </div></div></div></div>
    "#;
    let url = Url::parse("https://shop.example.com/products/x").unwrap_or_else(|e| panic!("{e}"));
    let doc = dom::parse(html);

    let default_depth = images::extract(&doc, &url, &Options::default());
    assert!(default_depth.is_empty());

    let shallow = Options {
        ancestor_depth: 2,
        ..Options::default()
    };
    assert_eq!(
        images::extract(&doc, &url, &shallow),
        vec!["https://shop.example.com/products/far.jpg".to_string()]
    );
}
