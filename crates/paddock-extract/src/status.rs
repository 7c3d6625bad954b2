//! Auction-status classification.
//!
//! Active markers are checked strictly before sold markers: completed-lot
//! sidebars and comment threads routinely contain "sold for $X" fragments
//! about *other* cars, so a sold-first check would misread live auctions.
//! The reverse error does not occur — a completed listing has no bid button
//! or countdown left on it.

use regex::Regex;

use paddock_core::AuctionStatus;

use crate::regions::PageRegions;

/// Classify one page as sold, active, or unknown.
///
/// `Unknown` means neither marker set matched; the assembler drops such
/// records rather than guessing.
#[must_use]
pub fn classify_status(regions: &PageRegions) -> AuctionStatus {
    if has_active_marker(regions) {
        return AuctionStatus::Active;
    }
    if has_sold_marker(regions) {
        return AuctionStatus::Sold;
    }
    AuctionStatus::Unknown
}

fn has_active_marker(regions: &PageRegions) -> bool {
    if regions.has_bid_button || regions.has_countdown {
        return true;
    }
    let active_re = Regex::new(
        r"(?i)\b(time remaining|current bid|bidding (?:ends|closes)|auction ends in|place a bid)\b",
    )
    .expect("valid regex");
    active_re.is_match(&regions.full_text)
}

fn has_sold_marker(regions: &PageRegions) -> bool {
    let sold_amount_re =
        Regex::new(r"(?i)\b(?:sold for|winning bid[:\s]*|final price[:\s]*)\s*\$[\d,]+")
            .expect("valid regex");
    if sold_amount_re.is_match(&regions.sold_banner) {
        return true;
    }
    let ended_re =
        Regex::new(r"(?i)\b(sold for \$[\d,]+|auction (?:has )?ended|sale ended)").expect("valid regex");
    if ended_re.is_match(&regions.full_text) {
        return true;
    }
    // A structured sold-price element counts even without the phrasing.
    regions
        .sold_class_text
        .iter()
        .any(|t| t.contains('$'))
}
