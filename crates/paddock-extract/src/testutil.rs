//! Shared fixtures for the extraction tests: one site config and canned
//! detail pages in the three classifier states.

use paddock_core::{Pagination, SelectorSet, SiteConfig};

pub(crate) fn test_site() -> SiteConfig {
    SiteConfig {
        id: "bringatrailer".to_string(),
        name: "Bring a Trailer".to_string(),
        base_url: "https://bringatrailer.com".to_string(),
        search_url_template: "https://bringatrailer.com/search/?s={query}".to_string(),
        pagination: Pagination::Page {
            param: "page".to_string(),
        },
        selectors: SelectorSet {
            title: "h1.post-title".to_string(),
            essentials_item: ".essentials .item-list li".to_string(),
            body: ".post-excerpt".to_string(),
            comments: ".comments-section".to_string(),
            sold_banner: ".listing-available-info".to_string(),
            bid_button: ".bid-button".to_string(),
            countdown: ".listing-available-countdown".to_string(),
            listing_link: "a.listing-card".to_string(),
            options_item: ".equipment li".to_string(),
        },
        min_price: 10_000,
        vin_prefixes: vec!["WP0".to_string(), "WP1".to_string()],
        launch_year: 2014,
        title_mileage_first: false,
        notes: None,
    }
}

/// A completed sale with a comment that mentions a much larger mileage —
/// the classic disambiguation trap.
pub(crate) const SOLD_PAGE: &str = r#"<html>
<head>
  <meta property="auction:end_date" content="2022-08-29" />
</head>
<body>
  <h1 class="post-title">8k-Mile 2004 Porsche 911 GT3</h1>
  <div class="essentials">
    <ul class="item-list">
      <li>Mileage: 8,456</li>
      <li><span>Chassis</span><span>WP0AC29974S692911</span></li>
      <li>Finished in GT Silver Metallic</li>
    </ul>
  </div>
  <div class="equipment">
    <ul>
      <li>6-Speed Manual Transaxle</li>
      <li>Sport Bucket Seats</li>
      <li>Carbon-Ceramic Brakes</li>
    </ul>
  </div>
  <div class="post-excerpt">
    This 911 is located in Portland, OR 97201 and produces 380 horsepower.
    The seller reports a black leather interior and a six-speed manual gearbox.
    <div class="comments-section">My old one showed 186,000 miles before I sold it.</div>
  </div>
  <div class="listing-available-info">Sold for $175,000 on 8/29/22</div>
  <span class="sold-price">$175,000</span>
</body>
</html>"#;

/// A live auction whose sidebar mentions a completed sale of a similar car.
pub(crate) const ACTIVE_PAGE: &str = r#"<html>
<body>
  <h1 class="post-title">25K Mile 2006 Porsche 911 Turbo</h1>
  <button class="bid-button">Place Bid</button>
  <div class="listing-available-countdown">Time Remaining: 2:14:33</div>
  <div class="post-excerpt">Current Bid: $150,000 with three days left.</div>
  <aside>Similar car sold for $200,000 last month.</aside>
</body>
</html>"#;

/// No sold or active markers anywhere.
pub(crate) const UNKNOWN_PAGE: &str = r#"<html>
<body>
  <h1 class="post-title">1,234-Mile 2022 Porsche 911 GT3</h1>
  <div class="post-excerpt">Listing preview without auction state.</div>
</body>
</html>"#;
