//! Raw option-text harvesting.
//!
//! Collects equipment bullet texts into the `options_raw` string the
//! options normalizer consumes. Some sites mix spec rows (mileage, chassis,
//! location) into the same list as equipment; those are filtered out by
//! marker words rather than guessed at.

use crate::regions::PageRegions;

/// Row fragments that mark a spec row, not an equipment item.
const SPEC_ROW_MARKERS: [&str; 8] = [
    "mile",
    "chassis",
    "vin",
    "located in",
    "location:",
    "title status",
    "carfax",
    "finished in",
];

/// Join the page's equipment bullets into one raw options string.
/// Empty string when the page lists none.
#[must_use]
pub fn extract_raw(regions: &PageRegions) -> String {
    regions
        .option_items
        .iter()
        .map(|item| item.trim())
        .filter(|item| is_equipment_row(item))
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_equipment_row(item: &str) -> bool {
    if item.len() < 3 || item.len() > 120 {
        return false;
    }
    let lower = item.to_lowercase();
    !SPEC_ROW_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}
