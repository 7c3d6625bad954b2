//! Per-site extraction configuration.
//!
//! Each source (auction house, dealer marketplace, classifieds aggregator)
//! is described by one immutable [`SiteConfig`] record in a YAML registry.
//! The generic extraction driver is parameterized by these records; adding
//! a simple structured site means adding a record, not new control flow.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How a site's search results are paged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum Pagination {
    /// 1-based page number in a query parameter, e.g. `?page=3`.
    Page { param: String },
    /// Opaque cursor token in a query parameter, echoed from the previous
    /// response.
    Cursor { param: String },
}

/// CSS selectors that segment a detail page into the regions the field
/// extractors consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Primary listing title/heading.
    pub title: String,
    /// Rows of the labeled "essentials" block (definition-list items or
    /// labeled spec rows). Each matched element must contain a label and a
    /// value.
    pub essentials_item: String,
    /// Main description/body block. Comment subtrees are removed before
    /// this text is used.
    pub body: String,
    /// Comment/discussion subtree to exclude from body text.
    pub comments: String,
    /// Sold/result banner ("Sold for $X on ...").
    pub sold_banner: String,
    /// Bid button present only on live auctions.
    pub bid_button: String,
    /// Countdown / time-remaining element present only on live auctions.
    pub countdown: String,
    /// Links to listing detail pages on a search/results page.
    pub listing_link: String,
    /// Option/equipment bullet items.
    pub options_item: String,
}

/// Configuration record for one scrape source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Stable identifier, used downstream as the `source` tag on persisted
    /// records.
    pub id: String,
    pub name: String,
    pub base_url: String,
    /// Search URL template with a `{query}` placeholder.
    pub search_url_template: String,
    pub pagination: Pagination,
    pub selectors: SelectorSet,
    /// Minimum believable sale price in dollars. Guards against parts and
    /// accessory listings; typically 1,000–15,000 depending on the site mix.
    pub min_price: u32,
    /// Known manufacturer VIN prefixes for the marques this site is scraped
    /// for. Empty means only the generic 17-character check applies.
    #[serde(default)]
    pub vin_prefixes: Vec<String>,
    /// Year the platform started operating. Sold dates before this are
    /// treated as extraction noise.
    pub launch_year: i32,
    /// When `true`, the mileage extractor consults the title before the
    /// structured essentials block. Set for sites whose essentials field is
    /// auto-populated from stale data.
    #[serde(default)]
    pub title_mileage_first: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteConfig>,
}

impl SitesFile {
    /// Look up a site record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.id == id)
    }
}

/// Load and validate the site registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile = serde_yaml::from_str(&content)?;

    validate_sites(&sites_file)?;

    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for site in &sites_file.sites {
        if site.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(site.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site id: '{}'",
                site.id
            )));
        }

        if !site.base_url.starts_with("http://") && !site.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "site '{}' has non-absolute base_url '{}'",
                site.id, site.base_url
            )));
        }

        if !site.search_url_template.contains("{query}") {
            return Err(ConfigError::Validation(format!(
                "site '{}' search_url_template is missing the {{query}} placeholder",
                site.id
            )));
        }

        if site.min_price == 0 || site.min_price > 50_000 {
            return Err(ConfigError::Validation(format!(
                "site '{}' has implausible min_price {}; must be 1..=50000",
                site.id, site.min_price
            )));
        }

        if !(1990..=2100).contains(&site.launch_year) {
            return Err(ConfigError::Validation(format!(
                "site '{}' has implausible launch_year {}",
                site.id, site.launch_year
            )));
        }

        if site.selectors.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' has an empty title selector",
                site.id
            )));
        }
    }

    Ok(())
}
