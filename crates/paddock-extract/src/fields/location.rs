//! Seller-location extraction.
//!
//! Structured "Location"/"Seller" row first, then a "located in City, ST"
//! body pattern. The regex crate has no lookaround, so filler-word
//! filtering ("the", "with", ...) is a post-match check instead of a
//! negative lookahead. State tokens must be real US postal abbreviations;
//! anything else demotes the match to city-only.

use regex::Regex;

use paddock_core::Location;

use crate::regions::PageRegions;

const STATE_ABBREVS: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const FILLER_WORDS: [&str; 8] = ["the", "a", "an", "this", "my", "his", "her", "with"];

/// Extract the seller's location, or `None`.
#[must_use]
pub fn extract(regions: &PageRegions) -> Option<Location> {
    let structured = regions
        .structured_value(&["location", "seller"])
        .and_then(parse_location_value);

    structured.or_else(|| from_body(&regions.body))
}

/// Parse a structured location value like `"Portland, OR 97201"`.
fn parse_location_value(value: &str) -> Option<Location> {
    let re = Regex::new(
        r"^(?P<city>[A-Za-z][A-Za-z .'-]*?),\s*(?P<state>[A-Za-z]{2})\b(?:\s+(?P<zip>\d{5}))?",
    )
    .expect("valid regex");

    if let Some(caps) = re.captures(value.trim()) {
        let city = clean_city(&caps["city"])?;
        let state = caps["state"].to_uppercase();
        if STATE_ABBREVS.contains(&state.as_str()) {
            return Some(Location {
                city: Some(city),
                state: Some(state),
                zip: caps.name("zip").map(|z| z.as_str().to_string()),
            });
        }
    }

    // No parseable state: accept a plain city name, nothing fancier.
    let trimmed = value.trim();
    if !trimmed.is_empty()
        && trimmed.len() <= 40
        && !trimmed.contains(',')
        && trimmed.chars().all(|c| c.is_alphabetic() || c == ' ' || c == '.' || c == '\'')
    {
        let city = clean_city(trimmed)?;
        return Some(Location {
            city: Some(city),
            state: None,
            zip: None,
        });
    }

    None
}

fn from_body(body: &str) -> Option<Location> {
    let re = Regex::new(
        r"(?i:located in)\s+(?P<city>[A-Za-z][A-Za-z .'-]*?),\s*(?P<state>[A-Z]{2})\b(?:\s+(?P<zip>\d{5}))?",
    )
    .expect("valid regex");

    for caps in re.captures_iter(body) {
        let Some(city) = clean_city(&caps["city"]) else {
            continue;
        };
        let state = caps["state"].to_string();
        if !STATE_ABBREVS.contains(&state.as_str()) {
            continue;
        }
        return Some(Location {
            city: Some(city),
            state: Some(state),
            zip: caps.name("zip").map(|z| z.as_str().to_string()),
        });
    }
    None
}

/// Reject filler-word "cities" and over-long captures.
fn clean_city(raw: &str) -> Option<String> {
    let city = raw.trim();
    if city.is_empty() || city.len() > 40 {
        return None;
    }
    let first_word = city.split_whitespace().next()?.to_lowercase();
    if FILLER_WORDS.contains(&first_word.as_str()) {
        return None;
    }
    Some(city.to_string())
}
