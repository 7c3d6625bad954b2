//! Listing-detail assembly.
//!
//! Runs the status classifier and field extractors over one parsed detail
//! page and produces a [`ListingDetail`] — or no result at all. Rejection
//! is not an error: an empty title, an unknown auction status, or a sold
//! listing with no valid price means the page cannot be trusted, and the
//! assembler returns `Ok(None)` so the caller logs it and moves on. Any
//! other missing field is simply absent in the record.
//!
//! Model, trim, and generation are left unset here; only the normalizer
//! populates them.

use chrono::{Datelike, NaiveDate};

use paddock_core::{AuctionStatus, ListingDetail, Location, SiteConfig};

use crate::error::ExtractError;
use crate::fields;
use crate::regions::{self, PageRegions};
use crate::status::classify_status;
use crate::types::{PageType, RawPage};

/// The pluggable per-field extractor set the driver runs. Site-specific
/// behavior is an explicit function substitution on one of these slots,
/// not a subclass.
#[derive(Clone, Copy, Debug)]
pub struct FieldExtractors {
    pub mileage: fn(&PageRegions, &SiteConfig) -> Option<u32>,
    pub price: fn(&PageRegions, &SiteConfig) -> Option<u32>,
    pub vin: fn(&PageRegions, &SiteConfig) -> Option<String>,
    pub sold_date: fn(&PageRegions, &SiteConfig, NaiveDate) -> Option<NaiveDate>,
    pub location: fn(&PageRegions) -> Option<Location>,
    pub colors: fn(&PageRegions) -> (Option<String>, Option<String>),
    pub transmission: fn(&PageRegions) -> Option<String>,
    pub options_raw: fn(&PageRegions) -> String,
}

impl Default for FieldExtractors {
    fn default() -> Self {
        FieldExtractors {
            mileage: fields::mileage::extract,
            price: fields::price::extract,
            vin: fields::vin::extract,
            sold_date: fields::dates::extract_sold_date,
            location: fields::location::extract,
            colors: fields::colors::extract,
            transmission: fields::transmission::extract,
            options_raw: fields::options::extract_raw,
        }
    }
}

/// Extract one detail page into a [`ListingDetail`].
///
/// Returns `Ok(None)` when the record must be rejected (empty title,
/// unknown status, sold without a valid price, or a non-detail page).
///
/// # Errors
///
/// Returns [`ExtractError::InvalidSelector`] when the site's configured
/// selectors do not parse.
pub fn assemble(
    cfg: &SiteConfig,
    extractors: &FieldExtractors,
    page: &RawPage,
    source_url: &str,
    today: NaiveDate,
) -> Result<Option<ListingDetail>, ExtractError> {
    if page.page_type != PageType::Detail {
        tracing::debug!(source_url, "not a detail page, skipping");
        return Ok(None);
    }

    let doc = scraper::Html::parse_document(&page.html);
    let regions = regions::segment(&doc, cfg)?;

    if regions.title.is_empty() {
        tracing::debug!(source_url, site = %cfg.id, "rejected: empty title");
        return Ok(None);
    }

    let status = classify_status(&regions);
    if status == AuctionStatus::Unknown {
        tracing::debug!(source_url, site = %cfg.id, "rejected: auction status unknown");
        return Ok(None);
    }

    // Price and sale date are only trusted on completed sales.
    let (price, sold_date) = if status == AuctionStatus::Sold {
        let price = (extractors.price)(&regions, cfg);
        if price.is_none() {
            tracing::debug!(source_url, site = %cfg.id, "rejected: sold without a valid price");
            return Ok(None);
        }
        (price, (extractors.sold_date)(&regions, cfg, today))
    } else {
        (None, None)
    };

    let (exterior_color, interior_color) = (extractors.colors)(&regions);
    let max_year = today.year() + 1;

    Ok(Some(ListingDetail {
        title: regions.title.clone(),
        price,
        mileage: (extractors.mileage)(&regions, cfg),
        year: fields::extract_title_year(&regions.title, max_year),
        vin: (extractors.vin)(&regions, cfg),
        model: None,
        trim: None,
        generation: None,
        exterior_color,
        interior_color,
        transmission: (extractors.transmission)(&regions),
        location: (extractors.location)(&regions),
        status,
        sold_date,
        options_raw: (extractors.options_raw)(&regions),
        options_normalized: Vec::new(),
        source_url: source_url.to_string(),
    }))
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod detail_test;
