use product_extract::extractor::fields::{mine, mine_with_options};
use product_extract::taxonomy::FieldTaxonomy;
use product_extract::{extract, Options};

#[test]
fn caliber_from_plain_list_item() {
    let fields = mine("<ul><li>Caliber: .22 LR</li></ul>", &FieldTaxonomy::firearms());
    assert_eq!(fields.get("Caliber"), Some(".22 LR"));
}

#[test]
fn alias_is_stored_under_canonical_name() {
    let fields = mine("<ul><li>Mag Capacity: 6 rounds</li></ul>", &FieldTaxonomy::firearms());
    assert_eq!(fields.get("Magazine Capacity"), Some("6 rounds"));
    assert!(!fields.contains("Mag Capacity"));
}

#[test]
fn structured_value_beats_direct_pattern() {
    let html = r#"
        <ul>
            <li>Caliber: .45 ACP</li>
            <li><span class="label">Caliber</span> <span itemprop="value">9mm Luger</span></li>
        </ul>
    "#;
    let fields = mine(html, &FieldTaxonomy::firearms());
    assert_eq!(fields.get("Caliber"), Some("9mm Luger"));
}

#[test]
fn mining_is_idempotent() {
    let html = r#"
        <ul>
            <li><span>Action</span><span itemprop="value">Semi-Auto</span></li>
            <li>Weight: 2 lb 4 oz</li>
            <li>Sights - Fiber optic</li>
        </ul>
        <table><tr><td>Frame Material</td><td>Polymer</td></tr></table>
    "#;
    let taxonomy = FieldTaxonomy::firearms();
    let first = mine(html, &taxonomy);
    let second = mine(html, &taxonomy);

    assert_eq!(first, second);
    assert_eq!(first.get("Action"), Some("Semi-Auto"));
    assert_eq!(first.get("Weight"), Some("2 lb 4 oz"));
    assert_eq!(first.get("Sights"), Some("Fiber optic"));
    assert_eq!(first.get("Frame Material"), Some("Polymer"));
}

#[test]
fn table_rows_match_on_substring_of_first_cell() {
    let html = r#"<table>
        <tr><td>Barrel Length (in)</td><td> 16.1 </td></tr>
        <tr><td>Trigger Pull Weight</td><td>5.5 lb</td></tr>
    </table>"#;
    let fields = mine(html, &FieldTaxonomy::firearms());
    assert_eq!(fields.get("Barrel"), Some("16.1"));
    assert_eq!(fields.get("Trigger"), Some("5.5 lb"));
}

#[test]
fn empty_value_is_still_recorded() {
    let fields = mine("<ul><li>Finish:</li></ul>", &FieldTaxonomy::firearms());
    assert!(fields.contains("Finish"));
    assert_eq!(fields.get("Finish"), Some(""));
    assert_eq!(fields.non_empty().count(), 0);
}

#[test]
fn list_scan_finds_labels_wrapped_in_markup() {
    let fields = mine(
        "<ul><li><strong>Safety:</strong> Manual thumb safety</li></ul>",
        &FieldTaxonomy::firearms(),
    );
    assert_eq!(fields.get("Safety"), Some("Manual thumb safety"));
}

#[test]
fn custom_taxonomy_from_options() {
    let options = Options::from_json(
        r#"{"taxonomy": [
            {"name": "Voltage", "aliases": ["Input Voltage"]},
            {"name": "Runtime"}
        ]}"#,
    )
    .unwrap_or_else(|e| panic!("options: {e}"));

    let html = "<ul><li>Input Voltage: 18V</li><li>Runtime | 45 min</li><li>Caliber: 9mm</li></ul>";
    let fields = mine_with_options(html, &options);

    assert_eq!(fields.get("Voltage"), Some("18V"));
    assert_eq!(fields.get("Runtime"), Some("45 min"));
    assert!(!fields.contains("Caliber"));
}

#[test]
fn no_fields_in_plain_prose() {
    let fields = mine(
        "<p>A compact pistol for everyday carry.</p>",
        &FieldTaxonomy::firearms(),
    );
    assert!(fields.is_empty());
}

#[test]
fn fields_flow_through_full_extraction() {
    let html = r#"
        <html><body>
            <div class="productView-description">
                <p>Lightweight rimfire rifle.</p>
                <ul>
                    <li>Caliber: .22 LR</li>
                    <li>Mag Capacity: 10</li>
                    <li>Intended Use = Plinking</li>
                </ul>
            </div>
        </body></html>
    "#;
    let record = extract(html, "https://shop.example.com/products/rimfire")
        .unwrap_or_else(|e| panic!("extract: {e}"));

    assert_eq!(record.fields.get("Caliber"), Some(".22 LR"));
    assert_eq!(record.fields.get("Magazine Capacity"), Some("10"));
    assert_eq!(record.fields.get("Intended Use"), Some("Plinking"));
}

#[test]
fn fields_keep_document_order() {
    let taxonomy = FieldTaxonomy::firearms();

    let fields = mine("<ul><li>Weight: 5 lb</li><li>Caliber: 9mm</li></ul>", &taxonomy);
    let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Weight", "Caliber"]);

    // Labels wrapped in markup only match the last-resort list scan.
    let fields = mine(
        "<ul><li><b>Weight:</b> 5 lb</li><li><b>Trigger:</b> 4.5 lb</li><li><b>Caliber:</b> 9mm</li></ul>",
        &taxonomy,
    );
    let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Weight", "Trigger", "Caliber"]);
    assert_eq!(fields.get("Trigger"), Some("4.5 lb"));
}
