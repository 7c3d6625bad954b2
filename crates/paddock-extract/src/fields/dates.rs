//! Sold-date extraction.
//!
//! Invoked only for pages already classified as sold. Tier order: the
//! sold/result banner ("... on 8/29/22"), then a machine-readable end date
//! from meta tags or JSON-LD, then date patterns in the body text.
//!
//! Two-digit years are resolved against the platform-operation window, not
//! against the scrape date: a scrape running in 2031 must still read
//! `"22"` as 2022. A candidate whose year falls outside
//! `[launch_year, current_year + 1]` is logged and discarded — never
//! replaced with the scrape time or any other timestamp. Absence is a
//! legitimate outcome.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use paddock_core::SiteConfig;

use crate::regions::PageRegions;

/// Extract the sale date, or `None`.
#[must_use]
pub fn extract_sold_date(
    regions: &PageRegions,
    cfg: &SiteConfig,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let window = cfg.launch_year..=today.year() + 1;

    let found = first_date_in(&regions.sold_banner, &window, &cfg.id)
        .or_else(|| {
            regions
                .meta_end_date
                .as_deref()
                .and_then(|meta| meta_date(meta, &window, &cfg.id))
        })
        .or_else(|| first_date_in(&regions.body, &window, &cfg.id));

    if let Some(date) = found {
        tracing::debug!(%date, site = %cfg.id, "sold date extracted");
    }
    found
}

/// Earliest parseable, in-window date in `text`.
fn first_date_in(
    text: &str,
    window: &std::ops::RangeInclusive<i32>,
    site: &str,
) -> Option<NaiveDate> {
    let numeric_re =
        Regex::new(r"\b(?P<m>\d{1,2})/(?P<d>\d{1,2})/(?P<y>\d{2}(?:\d{2})?)\b").expect("valid regex");
    let month_re = Regex::new(
        r"(?i)\b(?P<mon>january|february|march|april|may|june|july|august|september|october|november|december)\s+(?P<d>\d{1,2}),?\s+(?P<y>\d{4})\b",
    )
    .expect("valid regex");

    let mut candidates: Vec<(usize, NaiveDate)> = Vec::new();

    for caps in numeric_re.captures_iter(text) {
        let position = caps.get(0).map_or(0, |m| m.start());
        let month: u32 = caps["m"].parse().ok()?;
        let day: u32 = caps["d"].parse().ok()?;
        if let Some(year) = resolve_year(&caps["y"], window) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                candidates.push((position, date));
            }
        } else {
            tracing::warn!(site, raw = &caps["y"], "sold-date year outside platform window, discarded");
        }
    }

    for caps in month_re.captures_iter(text) {
        let position = caps.get(0).map_or(0, |m| m.start());
        let month = month_number(&caps["mon"]);
        let day: u32 = caps["d"].parse().ok()?;
        let year: i32 = caps["y"].parse().ok()?;
        if window.contains(&year) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                candidates.push((position, date));
            }
        } else {
            tracing::warn!(site, year, "sold-date year outside platform window, discarded");
        }
    }

    candidates
        .into_iter()
        .min_by_key(|(position, _)| *position)
        .map(|(_, date)| date)
}

/// Parse a meta/JSON-LD end date: ISO (`2022-08-29`, optionally with a time
/// suffix) first, then the human-readable patterns.
fn meta_date(
    meta: &str,
    window: &std::ops::RangeInclusive<i32>,
    site: &str,
) -> Option<NaiveDate> {
    if let Some(prefix) = meta.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            if window.contains(&date.year()) {
                return Some(date);
            }
            tracing::warn!(site, %date, "meta end date outside platform window, discarded");
            return None;
        }
    }
    first_date_in(meta, window, site)
}

/// Resolve a 2- or 4-digit year string against the platform window.
///
/// For two digits, both candidate centuries are tried; whichever lands
/// inside the window wins. No fixed rollover pivot: the window ages, a
/// pivot constant would not.
fn resolve_year(raw: &str, window: &std::ops::RangeInclusive<i32>) -> Option<i32> {
    let value: i32 = raw.parse().ok()?;
    if raw.len() == 4 {
        return window.contains(&value).then_some(value);
    }
    let this_century = 2000 + value;
    if window.contains(&this_century) {
        return Some(this_century);
    }
    let last_century = 1900 + value;
    window.contains(&last_century).then_some(last_century)
}

fn month_number(name: &str) -> u32 {
    match name.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        _ => 12,
    }
}
