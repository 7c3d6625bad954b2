use scraper::Html;

use crate::testutil::{test_site, SOLD_PAGE};

use super::*;

fn regions_for(html: &str) -> PageRegions {
    let doc = Html::parse_document(html);
    segment(&doc, &test_site()).unwrap()
}

#[test]
fn title_is_extracted() {
    let regions = regions_for(SOLD_PAGE);
    assert_eq!(regions.title, "8k-Mile 2004 Porsche 911 GT3");
}

#[test]
fn colon_row_splits_into_label_and_value() {
    let regions = regions_for(SOLD_PAGE);
    assert_eq!(regions.structured_value(&["mileage"]), Some("8,456"));
}

#[test]
fn paired_children_row_splits_into_label_and_value() {
    let regions = regions_for(SOLD_PAGE);
    assert_eq!(
        regions.structured_value(&["chassis"]),
        Some("WP0AC29974S692911")
    );
}

#[test]
fn bare_phrase_row_is_kept_unlabeled() {
    let regions = regions_for(SOLD_PAGE);
    let unlabeled: Vec<&str> = regions.unlabeled_rows().collect();
    assert!(unlabeled.contains(&"Finished in GT Silver Metallic"));
}

#[test]
fn body_excludes_nested_comment_subtree() {
    let regions = regions_for(SOLD_PAGE);
    assert!(regions.body.contains("380 horsepower"));
    assert!(
        !regions.body.contains("186,000"),
        "comment text leaked into body: {}",
        regions.body
    );
}

#[test]
fn full_text_still_contains_comment_text() {
    let regions = regions_for(SOLD_PAGE);
    assert!(regions.full_text.contains("186,000"));
}

#[test]
fn sold_banner_is_extracted() {
    let regions = regions_for(SOLD_PAGE);
    assert_eq!(regions.sold_banner, "Sold for $175,000 on 8/29/22");
}

#[test]
fn sold_class_text_finds_price_elements() {
    let regions = regions_for(SOLD_PAGE);
    assert!(regions
        .sold_class_text
        .iter()
        .any(|t| t.contains("$175,000")));
}

#[test]
fn meta_end_date_prefers_meta_tag() {
    let regions = regions_for(SOLD_PAGE);
    assert_eq!(regions.meta_end_date.as_deref(), Some("2022-08-29"));
}

#[test]
fn sold_page_has_no_active_markers() {
    let regions = regions_for(SOLD_PAGE);
    assert!(!regions.has_bid_button);
    assert!(!regions.has_countdown);
}

#[test]
fn active_markers_are_detected() {
    let html = r#"<html><body>
      <h1 class="post-title">2006 Porsche 911 Turbo</h1>
      <button class="bid-button">Place Bid</button>
      <div class="listing-available-countdown">2:14:33</div>
    </body></html>"#;
    let regions = regions_for(html);
    assert!(regions.has_bid_button);
    assert!(regions.has_countdown);
}

#[test]
fn jsonld_end_date_used_when_no_meta_tag() {
    let html = r#"<html><head>
      <script type="application/ld+json">
        {"@type": "Event", "name": "Auction", "endDate": "2022-08-29T17:00:00Z"}
      </script>
    </head><body><h1 class="post-title">t</h1></body></html>"#;
    let regions = regions_for(html);
    assert_eq!(
        regions.meta_end_date.as_deref(),
        Some("2022-08-29T17:00:00Z")
    );
}

#[test]
fn jsonld_graph_container_is_expanded() {
    let html = r#"<html><head>
      <script type="application/ld+json">
        {"@graph": [{"@type": "Event", "endDate": "2021-03-05"}]}
      </script>
    </head><body></body></html>"#;
    let regions = regions_for(html);
    assert_eq!(regions.meta_end_date.as_deref(), Some("2021-03-05"));
}

#[test]
fn missing_regions_yield_empty_defaults() {
    let regions = regions_for("<html><body><p>nothing here</p></body></html>");
    assert!(regions.title.is_empty());
    assert!(regions.structured.is_empty());
    assert!(regions.sold_banner.is_empty());
    assert!(regions.meta_end_date.is_none());
}

#[test]
fn invalid_configured_selector_is_a_typed_error() {
    let mut cfg = test_site();
    cfg.selectors.title = "h1[".to_string();
    let doc = Html::parse_document(SOLD_PAGE);
    let err = segment(&doc, &cfg).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidSelector { ref site, .. } if site == "bringatrailer"));
}
