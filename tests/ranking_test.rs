use std::collections::HashSet;

use product_extract::extractor::ranking::{rank, rank_with};
use product_extract::filters::ImageRules;
use product_extract::{extract_with_options, Options};
use url::Url;

fn page() -> Url {
    Url::parse("https://www.rangeshop.com/products/carbine").unwrap_or_else(|e| panic!("{e}"))
}

#[test]
fn twelve_candidates_two_duplicates_cap_ten() {
    let mut candidates: Vec<String> = (1..=8)
        .map(|i| format!("https://www.rangeshop.com/products/carbine/{i}.jpg"))
        .collect();
    candidates.insert(3, "https://www.rangeshop.com/products/carbine/large/side.jpg".to_string());
    candidates.push("https://www.rangeshop.com/products/carbine/zoom/top.jpg".to_string());
    candidates.push("https://www.rangeshop.com/products/carbine/2.jpg".to_string());
    candidates.push("https://www.rangeshop.com/products/carbine/large/side.jpg".to_string());
    assert_eq!(candidates.len(), 12);

    let options = Options::default().with_max_images(10);
    let ranked = rank(&candidates, &page(), &options);

    assert_eq!(ranked.len(), 10);
    let unique: HashSet<&String> = ranked.iter().collect();
    assert_eq!(unique.len(), 10);
    assert_eq!(
        ranked[..2].to_vec(),
        vec![
            "https://www.rangeshop.com/products/carbine/large/side.jpg".to_string(),
            "https://www.rangeshop.com/products/carbine/zoom/top.jpg".to_string(),
        ]
    );
}

#[test]
fn third_party_hosts_rank_last_but_are_kept() {
    let candidates = vec![
        "https://images.adnetwork.io/products/promo.jpg".to_string(),
        "https://static.rangeshop.com/products/carbine/1.jpg".to_string(),
        "https://d1cdn.cloudfront.net/products/carbine/2.jpg".to_string(),
    ];
    let ranked = rank_with(&candidates, &page(), &ImageRules::default(), 20);
    assert_eq!(
        ranked,
        vec![
            "https://static.rangeshop.com/products/carbine/1.jpg".to_string(),
            "https://d1cdn.cloudfront.net/products/carbine/2.jpg".to_string(),
            "https://images.adnetwork.io/products/promo.jpg".to_string(),
        ]
    );
}

#[test]
fn output_is_subset_of_input_after_upgrade() {
    let candidates = vec![
        "https://www.rangeshop.com/products/carbine/1.jpg".to_string(),
        "https://www.rangeshop.com/products/carbine/1.jpg".to_string(),
    ];
    let ranked = rank_with(&candidates, &page(), &ImageRules::default(), 20);
    assert_eq!(ranked, vec!["https://www.rangeshop.com/products/carbine/1.jpg".to_string()]);
}

#[test]
fn max_images_is_clamped() {
    assert_eq!(Options::default().with_max_images(0).max_images, 1);
    assert_eq!(Options::default().with_max_images(500).max_images, 50);
    assert_eq!(Options::default().with_max_images(-7).max_images, 7);
    assert_eq!(Options::default().max_images, 20);
}

#[test]
fn record_images_respect_cap() {
    let imgs: String = (0..8)
        .map(|i| format!(r#"<img src="/products/carbine/{i}.jpg">"#))
        .collect();
    let html = format!(r#"<div class="product-gallery">{imgs}</div>"#);
    let options = Options::default().with_max_images(3);

    let record = extract_with_options(&html, "https://www.rangeshop.com/products/carbine", &options)
        .unwrap_or_else(|e| panic!("extract: {e}"));
    assert_eq!(record.images.len(), 3);
    assert_eq!(record.images[0], "https://www.rangeshop.com/products/carbine/0.jpg");
}

#[test]
fn out_of_range_field_value_is_clamped_when_ranking() {
    let candidates: Vec<String> = (1..=60)
        .map(|i| format!("https://www.rangeshop.com/products/carbine/{i}.jpg"))
        .collect();

    let zero = Options {
        max_images: 0,
        ..Options::default()
    };
    assert_eq!(zero.image_cap(), 1);
    assert_eq!(rank(&candidates, &page(), &zero).len(), 1);

    let huge = Options {
        max_images: 500,
        ..Options::default()
    };
    assert_eq!(rank(&candidates, &page(), &huge).len(), 50);
    assert_eq!(rank_with(&candidates, &page(), &ImageRules::default(), 0).len(), 1);
}
