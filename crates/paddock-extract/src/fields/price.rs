//! Sale-price extraction.
//!
//! Only meaningful after the status classifier has confirmed a completed
//! sale; the assembler never calls this for active or unknown pages.
//!
//! Tier order: sold/result banner with explicit "Sold for $X" phrasing,
//! then sold-phrase search over the full page text, then elements whose
//! class/id naming suggests a final price. The validity floor
//! (`SiteConfig::min_price`) keeps parts and accessory listings from
//! registering as vehicle sales. Values captured in cents rather than
//! dollars (> 10^9) are divided down before validation.

use regex::Regex;

use paddock_core::SiteConfig;

use crate::regions::PageRegions;
use crate::scan::scan;
use crate::types::SourceRegion;

/// Above this magnitude the source almost certainly reported cents.
const CENTS_THRESHOLD: u64 = 1_000_000_000;

fn sold_phrase_patterns() -> Vec<Regex> {
    vec![Regex::new(
        r"(?i)\b(?:sold\s+for|winning\s+bid|final\s+price)[:\s]*\$\s*(?P<num>\d{1,3}(?:,\d{3})+|\d+)(?P<k>k)?\b",
    )
    .expect("valid regex")]
}

fn amount_patterns() -> Vec<Regex> {
    vec![
        Regex::new(r"\$\s*(?P<num>\d{1,3}(?:,\d{3})+|\d+)(?P<k>k)?\b").expect("valid regex"),
    ]
}

/// Extract the final sale price in dollars, or `None`.
#[must_use]
pub fn extract(regions: &PageRegions, cfg: &SiteConfig) -> Option<u32> {
    let banner = first_valid(&regions.sold_banner, &sold_phrase_patterns(), cfg);
    let found = banner
        .or_else(|| first_valid(&regions.full_text, &sold_phrase_patterns(), cfg))
        .or_else(|| {
            regions
                .sold_class_text
                .iter()
                .find_map(|text| first_valid(text, &amount_patterns(), cfg))
        });

    if let Some(price) = found {
        tracing::debug!(price, site = %cfg.id, "sale price extracted");
    }
    found
}

fn first_valid(text: &str, patterns: &[Regex], cfg: &SiteConfig) -> Option<u32> {
    scan(text, SourceRegion::Body, patterns)
        .into_iter()
        .filter_map(|c| normalize_magnitude(c.value))
        .find(|&v| v >= u64::from(cfg.min_price))
        .and_then(|v| u32::try_from(v).ok())
}

/// Correct cents-captured values; anything still absurd afterwards is
/// dropped.
fn normalize_magnitude(value: u64) -> Option<u64> {
    let corrected = if value > CENTS_THRESHOLD {
        value / 100
    } else {
        value
    };
    (corrected <= CENTS_THRESHOLD).then_some(corrected)
}
