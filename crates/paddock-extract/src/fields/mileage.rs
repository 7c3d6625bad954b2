//! Mileage extraction.
//!
//! Tier order (first valid candidate wins, later tiers never consulted):
//!
//! 1. Structured row labeled "Mileage"/"Odometer".
//! 2. The listing title.
//! 3. Description body with comment text removed.
//! 4. Full page text, last resort.
//!
//! Comment text frequently quotes *other* vehicles' mileage for comparison;
//! keeping it out of tiers 1–3 is the single most load-bearing rule in this
//! module. A site whose structured field is known to go stale can flip
//! tiers 1 and 2 with `SiteConfig::title_mileage_first`.
//!
//! Validity: integer, strictly between 0 and 500,000. A literal `0` is a
//! data-entry artifact, not "like new", and is rejected. When one tier
//! yields several candidates, the one nearest a model-year token wins
//! (comparison figures tend to sit far from the year), falling back to
//! first occurrence.

use chrono::Datelike;
use regex::Regex;

use paddock_core::SiteConfig;

use crate::fields::year_token_positions;
use crate::regions::PageRegions;
use crate::scan::scan;
use crate::types::{ExtractionCandidate, SourceRegion};

const MAX_MILEAGE: u64 = 500_000;

/// Patterns requiring an explicit miles unit; the `k`-form is listed first
/// so `"25K Mile"` parses as 25,000 rather than 25.
fn unit_patterns() -> Vec<Regex> {
    vec![
        Regex::new(r"(?i)\b(?P<num>\d+(?:\.\d+)?)(?P<k>k)[\s-]*mi(?:les?|\b)").expect("valid regex"),
        Regex::new(r"(?i)\b(?P<num>\d{1,3}(?:,\d{3})+|\d+)[\s-]*mi(?:les?|\b)").expect("valid regex"),
    ]
}

/// Patterns for a structured value that may be a bare figure ("8,456").
fn bare_patterns() -> Vec<Regex> {
    let mut patterns = unit_patterns();
    patterns.push(Regex::new(r"\b(?P<num>\d+(?:\.\d+)?)(?P<k>k)\b").expect("valid regex"));
    patterns.push(Regex::new(r"\b(?P<num>\d{1,3}(?:,\d{3})+|\d+)\b").expect("valid regex"));
    patterns
}

/// Extract the subject vehicle's mileage, or `None`.
#[must_use]
pub fn extract(regions: &PageRegions, cfg: &SiteConfig) -> Option<u32> {
    let structured = || from_structured(regions);
    let title = || from_text(&regions.title, SourceRegion::Title, cfg);

    let first_two = if cfg.title_mileage_first {
        title().or_else(structured)
    } else {
        structured().or_else(title)
    };

    let found = first_two
        .or_else(|| from_text(&regions.body, SourceRegion::Body, cfg))
        .or_else(|| from_text(&regions.full_text, SourceRegion::Body, cfg));

    if let Some(value) = found {
        tracing::debug!(value, site = %cfg.id, "mileage extracted");
    }
    found
}

fn from_structured(regions: &PageRegions) -> Option<u32> {
    let value = regions.structured_value(&["mileage", "odometer"])?;
    scan(value, SourceRegion::Structured, &bare_patterns())
        .into_iter()
        .find(|c| is_valid(c.value))
        .and_then(|c| u32::try_from(c.value).ok())
}

fn from_text(text: &str, region: SourceRegion, cfg: &SiteConfig) -> Option<u32> {
    let candidates = scan(text, region, &unit_patterns());
    pick(&candidates, text, cfg).and_then(|v| u32::try_from(v).ok())
}

pub(crate) fn is_valid(value: u64) -> bool {
    value > 0 && value < MAX_MILEAGE
}

/// Choose among same-tier candidates: nearest to a year token, then first
/// occurrence.
fn pick(candidates: &[ExtractionCandidate], text: &str, cfg: &SiteConfig) -> Option<u64> {
    let valid: Vec<&ExtractionCandidate> =
        candidates.iter().filter(|c| is_valid(c.value)).collect();
    if valid.is_empty() {
        return None;
    }

    let max_year = chrono::Utc::now().date_naive().year() + 1;
    let years = year_token_positions(text, max_year);

    let chosen = if years.is_empty() {
        valid.iter().min_by_key(|c| c.position)?
    } else {
        valid.iter().min_by_key(|c| {
            let nearest = years
                .iter()
                .map(|(_, pos)| c.position.abs_diff(*pos))
                .min()
                .unwrap_or(usize::MAX);
            (nearest, c.position)
        })?
    };

    if valid.len() > 1 {
        tracing::debug!(
            chosen = chosen.value,
            candidates = valid.len(),
            site = %cfg.id,
            raw = %chosen.raw_match,
            "multiple mileage candidates in one tier"
        );
    }
    Some(chosen.value)
}

#[cfg(test)]
#[path = "mileage_test.rs"]
mod mileage_test;
