//! Transmission extraction.
//!
//! Structured "Transmission"/"Gearbox" row first, then a closed vocabulary
//! search over unlabeled essentials rows and body text. The vocabulary
//! keeps filler prose out: only recognized gearbox families (with an
//! optional speed-count prefix) are ever returned.

use regex::Regex;

use crate::regions::PageRegions;

fn vocabulary() -> Regex {
    Regex::new(
        r"(?i)\b(?P<t>(?:(?:\d{1,2}|three|four|five|six|seven|eight)-speed\s+)?(?:manual|automatic|automated manual|pdk|tiptronic|dual-clutch))\b",
    )
    .expect("valid regex")
}

/// Extract the transmission description, or `None`.
#[must_use]
pub fn extract(regions: &PageRegions) -> Option<String> {
    if let Some(value) = regions.structured_value(&["transmission", "gearbox"]) {
        let value = value.trim();
        if !value.is_empty() && value.len() <= 60 {
            return Some(value.to_string());
        }
    }

    let re = vocabulary();
    regions
        .unlabeled_rows()
        .chain(std::iter::once(regions.body.as_str()))
        .find_map(|text| {
            re.captures(text)
                .map(|caps| caps["t"].trim().to_string())
        })
}
