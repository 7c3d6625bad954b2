//! Per-field extractors.
//!
//! Every extractor follows the same contract: an ordered list of search
//! tiers (structured region, then title, then body text), a validity
//! predicate a candidate must pass, and an explicit `None` when nothing
//! valid is found. No extractor ever returns a default, zero, or sentinel.

pub mod colors;
pub mod dates;
pub mod location;
pub mod mileage;
pub mod options;
pub mod price;
pub mod transmission;
pub mod vin;

use regex::Regex;

/// Byte positions of plausible model-year tokens (`19xx`/`20xx` within
/// `1900..=max_year`) in `text`. Used for proximity tie-breaking.
pub(crate) fn year_token_positions(text: &str, max_year: i32) -> Vec<(i32, usize)> {
    let year_re = Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("valid regex");
    year_re
        .find_iter(text)
        .filter_map(|m| {
            let year: i32 = m.as_str().parse().ok()?;
            (1900..=max_year).contains(&year).then_some((year, m.start()))
        })
        .collect()
}

/// First plausible model year in a listing title.
#[must_use]
pub fn extract_title_year(title: &str, max_year: i32) -> Option<i32> {
    year_token_positions(title, max_year)
        .first()
        .map(|(year, _)| *year)
}
