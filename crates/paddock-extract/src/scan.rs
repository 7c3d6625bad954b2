//! Numeric candidate scanner.
//!
//! Applies unit patterns over a full text blob and returns every match as an
//! [`ExtractionCandidate`], not just the first. Disambiguation between
//! candidates (tier precedence, proximity scoring) belongs to the field
//! extractors; this module only finds and parses values.
//!
//! ## Pattern contract
//!
//! Each pattern must define a named capture group `num` holding the digits
//! (comma grouping and a decimal point allowed) and may define an optional
//! named group `k` whose presence means a thousands multiplier, so that
//! `"8k miles"` scans to `8000` and `"186,000 miles"` to `186000`.

use regex::Regex;

use crate::types::{ExtractionCandidate, SourceRegion};

/// Characters of surrounding text captured on each side of a match.
const CONTEXT_WINDOW: usize = 60;

/// Scan `text` with each pattern in order, returning every parseable match.
///
/// When two patterns match at the same byte offset, the earlier pattern
/// wins. Returns an empty vec on no match; never fails.
#[must_use]
pub fn scan(text: &str, region: SourceRegion, patterns: &[Regex]) -> Vec<ExtractionCandidate> {
    let mut seen_positions = std::collections::HashSet::new();
    let mut candidates = Vec::new();

    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let Some(num) = caps.name("num") else {
                continue;
            };
            let Some(value) = parse_numeric(num.as_str(), caps.name("k").is_some()) else {
                continue;
            };

            let whole = caps.get(0).unwrap_or(num);
            if is_number_fragment(text, whole.start()) {
                continue;
            }
            if !seen_positions.insert(whole.start()) {
                continue;
            }

            candidates.push(ExtractionCandidate {
                value,
                region,
                raw_match: whole.as_str().to_string(),
                position: whole.start(),
                context: context_around(text, whole.start(), whole.end()),
            });
        }
    }

    candidates
}

/// Parse a digit run with optional comma grouping and decimal point,
/// applying a ×1000 multiplier when `k` is set.
///
/// `"1,234"` → 1234; `"8"` + k → 8000; `"1.5"` + k → 1500.
fn parse_numeric(digits: &str, k_multiplier: bool) -> Option<u64> {
    let cleaned = digits.replace(',', "");
    if k_multiplier {
        let base: f64 = cleaned.parse().ok()?;
        if !base.is_finite() || base < 0.0 || base > 1.0e15 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some((base * 1000.0).round() as u64)
    } else {
        // A bare decimal like "8.5" is not an integer quantity; truncate is
        // wrong for mileage/price, so reject fractional values here.
        if cleaned.contains('.') {
            return None;
        }
        cleaned.parse().ok()
    }
}

/// `true` when the match at `start` begins mid-number — directly after a
/// decimal point, a digit, or a digit-comma pair. The regex crate has no
/// lookbehind, so `"8.5 miles"` would otherwise yield a bogus `5`-mile
/// candidate from the tail of the fraction.
fn is_number_fragment(text: &str, start: usize) -> bool {
    let bytes = text.as_bytes();
    if start == 0 {
        return false;
    }
    let prev = bytes[start - 1];
    if prev == b'.' || prev.is_ascii_digit() {
        return true;
    }
    prev == b',' && start >= 2 && bytes[start - 2].is_ascii_digit()
}

/// Slice ±[`CONTEXT_WINDOW`] characters around `[start, end)`, snapped to
/// char boundaries.
fn context_around(text: &str, start: usize, end: usize) -> String {
    let mut lo = start.saturating_sub(CONTEXT_WINDOW);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + CONTEXT_WINDOW).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].to_string()
}
