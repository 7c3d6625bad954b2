//! VIN extraction.
//!
//! Structured "Chassis"/"VIN" row first, then a body-text pattern search.
//! Candidates must match the 17-character VIN alphabet (no I, O, or Q) and
//! contain at least one digit; when the site registry lists manufacturer
//! prefixes for the marque, a candidate must also carry one of them.

use regex::Regex;

use paddock_core::SiteConfig;

use crate::regions::PageRegions;

/// Extract and validate the subject vehicle's VIN, or `None`.
#[must_use]
pub fn extract(regions: &PageRegions, cfg: &SiteConfig) -> Option<String> {
    let structured = regions
        .structured_value(&["vin", "chassis", "serial"])
        .and_then(|value| find_vin(value, &cfg.vin_prefixes));

    let found = structured.or_else(|| find_vin(&regions.body, &cfg.vin_prefixes));
    if let Some(ref vin) = found {
        tracing::debug!(vin = %vin, site = %cfg.id, "vin extracted");
    }
    found
}

fn find_vin(text: &str, prefixes: &[String]) -> Option<String> {
    let vin_re = Regex::new(r"\b([A-HJ-NPR-Z0-9]{17})\b").expect("valid regex");
    let upper = text.to_uppercase();

    let found = vin_re
        .find_iter(&upper)
        .map(|m| m.as_str().to_string())
        .find(|candidate| {
            // An all-letter 17-char token is a word, not a VIN.
            candidate.bytes().any(|b| b.is_ascii_digit())
                && (prefixes.is_empty() || prefixes.iter().any(|p| candidate.starts_with(p)))
        });
    found
}

#[cfg(test)]
mod tests {
    use crate::regions::{PageRegions, StructuredRow};
    use crate::testutil::test_site;

    use super::*;

    fn with_chassis_row(value: &str) -> PageRegions {
        PageRegions {
            structured: vec![StructuredRow {
                label: "Chassis".to_string(),
                value: value.to_string(),
            }],
            ..PageRegions::default()
        }
    }

    #[test]
    fn structured_chassis_row_is_extracted() {
        let r = with_chassis_row("WP0AC29974S692911");
        assert_eq!(
            extract(&r, &test_site()).as_deref(),
            Some("WP0AC29974S692911")
        );
    }

    #[test]
    fn lowercase_vin_is_uppercased() {
        let r = with_chassis_row("wp0ac29974s692911");
        assert_eq!(
            extract(&r, &test_site()).as_deref(),
            Some("WP0AC29974S692911")
        );
    }

    #[test]
    fn body_fallback_finds_vin() {
        let r = PageRegions {
            body: "The chassis number is WP1AB29P88LA40122 per the title.".to_string(),
            ..PageRegions::default()
        };
        assert_eq!(
            extract(&r, &test_site()).as_deref(),
            Some("WP1AB29P88LA40122")
        );
    }

    #[test]
    fn wrong_marque_prefix_is_rejected_when_prefixes_configured() {
        let r = with_chassis_row("1HGBH41JXMN109186");
        assert_eq!(extract(&r, &test_site()), None);
    }

    #[test]
    fn any_vin_accepted_when_no_prefixes_configured() {
        let mut cfg = test_site();
        cfg.vin_prefixes.clear();
        let r = with_chassis_row("1HGBH41JXMN109186");
        assert_eq!(
            extract(&r, &cfg).as_deref(),
            Some("1HGBH41JXMN109186")
        );
    }

    #[test]
    fn sixteen_character_token_is_not_a_vin() {
        let r = with_chassis_row("WP0AC29974S69291");
        assert_eq!(extract(&r, &test_site()), None);
    }

    #[test]
    fn token_with_excluded_letters_is_not_a_vin() {
        // I, O, Q are not in the VIN alphabet.
        let r = with_chassis_row("WP0AC29974S6929IO");
        assert_eq!(extract(&r, &test_site()), None);
    }

    #[test]
    fn all_letter_token_is_not_a_vin() {
        let mut cfg = test_site();
        cfg.vin_prefixes.clear();
        let r = PageRegions {
            body: "stamped BLACKWATCHEDPLATE on the tag".to_string(),
            ..PageRegions::default()
        };
        assert_eq!(extract(&r, &cfg), None);
    }

    #[test]
    fn absent_everywhere_returns_none() {
        let r = PageRegions::default();
        assert_eq!(extract(&r, &test_site()), None);
    }
}
