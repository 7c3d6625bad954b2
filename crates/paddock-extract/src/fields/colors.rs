//! Exterior/interior color extraction.
//!
//! Structured rows first ("Exterior Color: ...", "Interior: ..."), then the
//! "finished in X over Y" phrasing auction copy favors, applied to
//! unlabeled essentials rows and to the body text. A "Paint to Sample"
//! marker is unwrapped to the underlying color name when one is stated.

use regex::Regex;

use crate::regions::PageRegions;

/// Extract `(exterior, interior)` colors. Either side may be absent.
#[must_use]
pub fn extract(regions: &PageRegions) -> (Option<String>, Option<String>) {
    let mut exterior = regions
        .structured_value(&["exterior color", "exterior", "paint"])
        .and_then(clean_color)
        .map(|c| unwrap_paint_to_sample(&c));
    let mut interior = regions
        .structured_value(&["interior color", "interior", "upholstery"])
        .and_then(clean_color);

    if exterior.is_none() || interior.is_none() {
        let phrase_texts = regions
            .unlabeled_rows()
            .chain(std::iter::once(regions.body.as_str()));
        for text in phrase_texts {
            let (ext, int) = finished_in(text);
            if exterior.is_none() {
                exterior = ext.map(|c| unwrap_paint_to_sample(&c));
            }
            if interior.is_none() {
                interior = int;
            }
            if exterior.is_some() && interior.is_some() {
                break;
            }
        }
    }

    if interior.is_none() {
        interior = interior_phrase(&regions.body);
    }

    (exterior, interior)
}

/// Parse `"finished in GT Silver Metallic over black leather"` and the
/// over-less variant.
fn finished_in(text: &str) -> (Option<String>, Option<String>) {
    let over_re = Regex::new(
        r"(?i)\bfinished in\s+(?P<ext>[a-z][a-z0-9' -]{1,40}?)\s+over\s+(?P<int>[a-z][a-z0-9' -]{1,40}?)(?:[.,;]|$)",
    )
    .expect("valid regex");
    if let Some(caps) = over_re.captures(text) {
        return (
            clean_color(&caps["ext"]),
            clean_color(&caps["int"]).map(|c| strip_material(&c)),
        );
    }

    let plain_re =
        Regex::new(r"(?i)\bfinished in\s+(?P<ext>[a-z][a-z0-9' -]{1,40}?)(?:[.,;]|$)")
            .expect("valid regex");
    if let Some(caps) = plain_re.captures(text) {
        return (clean_color(&caps["ext"]), None);
    }

    (None, None)
}

/// `"black leather interior"` → `"black"`.
fn interior_phrase(body: &str) -> Option<String> {
    let re = Regex::new(
        r"(?i)\b(?P<int>[a-z]+)\s+(?:leather|leatherette|cloth|alcantara)\s+interior\b",
    )
    .expect("valid regex");
    re.captures(body).and_then(|caps| clean_color(&caps["int"]))
}

/// Strip a trailing upholstery material word so `"black leather"` and
/// `"black"` normalize identically.
fn strip_material(color: &str) -> String {
    let lower = color.to_lowercase();
    for material in ["leather", "leatherette", "cloth", "alcantara", "vinyl"] {
        if let Some(stripped) = lower.strip_suffix(material) {
            let stripped = stripped.trim();
            if !stripped.is_empty() {
                return color[..stripped.len()].trim().to_string();
            }
        }
    }
    color.to_string()
}

/// Unwrap a custom-paint marker: `"Paint to Sample Mexico Blue"` →
/// `"Mexico Blue"`. A marker with no named color is kept verbatim — it is
/// still the most specific fact the page states.
fn unwrap_paint_to_sample(color: &str) -> String {
    let re = Regex::new(r"(?i)^\s*(?:paint[\s-]*to[\s-]*sample|pts)\s*[:-]?\s*(?P<rest>.*)$")
        .expect("valid regex");
    if let Some(caps) = re.captures(color) {
        let rest = caps["rest"].trim().to_string();
        if !rest.is_empty() {
            return rest;
        }
    }
    color.to_string()
}

fn clean_color(raw: &str) -> Option<String> {
    let color = raw.trim().trim_end_matches(['.', ',', ';']).trim();
    let lower = color.to_lowercase();
    if color.is_empty()
        || color.len() > 40
        || matches!(lower.as_str(), "the" | "a" | "an" | "and" | "with" | "its")
    {
        return None;
    }
    Some(color.to_string())
}
