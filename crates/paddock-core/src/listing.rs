//! Domain types for one scraped vehicle listing.
//!
//! A [`ListingDetail`] is the single output of an extraction pass over one
//! detail page. Every field that a page may simply not state is an `Option`;
//! extractors never substitute defaults, zeros, or sentinels for missing
//! data, so `None` here always means "the page did not say".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Terminal classification of a listing page's auction state.
///
/// `Unknown` is a legitimate classifier output but is never persisted:
/// the assembler rejects the whole record instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Sold,
    Active,
    Unknown,
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuctionStatus::Sold => write!(f, "sold"),
            AuctionStatus::Active => write!(f, "active"),
            AuctionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Seller location as stated on the page. All parts optional; a bare city
/// with no state is representable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl Location {
    /// `true` when no component was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }
}

/// One scraped vehicle sale/listing, assembled field-by-field from a single
/// detail page and immutable once returned.
///
/// Invariants upheld by the extractors (not re-checked here):
/// - `price`: at or above the site's minimum price threshold when present.
/// - `mileage`: strictly between 0 and 500,000 when present. A literal
///   "0 miles" on a page yields `None`.
/// - `year`: within `1900..=current_year + 1` when present.
/// - `vin`: 17 characters matching `[A-HJ-NPR-Z0-9]{17}`, optionally
///   tightened to a marque prefix.
/// - `sold_date`: within the platform-operation window when present; never
///   backfilled from scrape time or record-creation time.
///
/// The persistence collaborator dedups by `source_url`/`vin`; that logic is
/// out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDetail {
    pub title: String,
    pub price: Option<u32>,
    pub mileage: Option<u32>,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub generation: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub transmission: Option<String>,
    pub location: Option<Location>,
    pub status: AuctionStatus,
    pub sold_date: Option<NaiveDate>,
    pub options_raw: String,
    pub options_normalized: Vec<String>,
    pub source_url: String,
}
