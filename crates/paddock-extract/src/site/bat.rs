//! Bespoke driver for the Bring a Trailer page shape.
//!
//! BaT's essentials block lists specs as bare phrases ("8,456 Miles Shown")
//! rather than labeled pairs, and its listing titles carry editor-curated
//! mileage. The generic structured-row mileage tier never fires on the
//! bare-phrase rows, so this driver substitutes a mileage extractor that
//! reads them first. Everything else runs the shared extractor set.

use regex::Regex;

use paddock_core::SiteConfig;

use crate::detail::FieldExtractors;
use crate::fields::mileage;
use crate::regions::PageRegions;
use crate::scan::scan;
use crate::types::SourceRegion;

use super::driver::SiteDriver;

/// BaT driver: generic driver with the mileage slot substituted.
#[must_use]
pub fn driver(cfg: SiteConfig) -> SiteDriver {
    let extractors = FieldExtractors {
        mileage: extract_mileage,
        ..FieldExtractors::default()
    };
    SiteDriver::with_extractors(cfg, extractors)
}

/// "8,456 Miles Shown" / "86k Miles Indicated" essentials rows, then the
/// shared tier chain.
fn extract_mileage(regions: &PageRegions, cfg: &SiteConfig) -> Option<u32> {
    let shown_patterns = vec![
        Regex::new(r"(?i)\b(?P<num>\d+(?:\.\d+)?)(?P<k>k)[\s-]*miles?\s+(?:shown|indicated)")
            .expect("valid regex"),
        Regex::new(r"(?i)\b(?P<num>\d{1,3}(?:,\d{3})+|\d+)[\s-]*miles?\s+(?:shown|indicated)")
            .expect("valid regex"),
    ];

    let from_rows = regions.unlabeled_rows().find_map(|row| {
        scan(row, SourceRegion::Structured, &shown_patterns)
            .into_iter()
            .find(|c| mileage::is_valid(c.value))
            .and_then(|c| u32::try_from(c.value).ok())
    });

    from_rows.or_else(|| mileage::extract(regions, cfg))
}
