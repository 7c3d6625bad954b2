pub mod detail;
pub mod error;
pub mod fields;
pub mod regions;
pub mod scan;
pub mod site;
pub mod status;
pub mod types;

#[cfg(test)]
mod testutil;

pub use detail::{assemble, FieldExtractors};
pub use error::ExtractError;
pub use regions::{PageRegions, StructuredRow};
pub use site::{driver_for, PageToken, SiteDriver};
pub use status::classify_status;
pub use types::{ExtractionCandidate, PageType, RawPage, SourceHints, SourceRegion};
