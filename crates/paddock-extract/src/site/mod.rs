//! Site adapters.
//!
//! A [`SiteDriver`] pairs one immutable [`paddock_core::SiteConfig`] record
//! with a set of field-extractor functions. Simple structured sites run the
//! generic driver as-is; complex sites substitute individual extractor
//! functions. There is no inheritance anywhere — a "bespoke" site is a
//! driver constructed with different function pointers.

pub mod bat;
mod driver;

pub use driver::{PageToken, SiteDriver};

use paddock_core::SitesFile;

use crate::error::ExtractError;

/// Build the driver for a registered site, wiring bespoke extractor
/// overrides where the site needs them.
///
/// # Errors
///
/// Returns [`ExtractError::UnknownSite`] when `id` is not in the registry.
pub fn driver_for(sites: &SitesFile, id: &str) -> Result<SiteDriver, ExtractError> {
    let cfg = sites
        .get(id)
        .ok_or_else(|| ExtractError::UnknownSite(id.to_string()))?;

    match id {
        "bringatrailer" => Ok(bat::driver(cfg.clone())),
        _ => Ok(SiteDriver::new(cfg.clone())),
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::test_site;

    use super::*;

    #[test]
    fn unknown_site_is_a_typed_error() {
        let sites = SitesFile { sites: vec![] };
        let err = driver_for(&sites, "nope").unwrap_err();
        assert!(matches!(err, ExtractError::UnknownSite(ref id) if id == "nope"));
    }

    #[test]
    fn registered_site_gets_a_driver() {
        let sites = SitesFile {
            sites: vec![test_site()],
        };
        let driver = driver_for(&sites, "bringatrailer").unwrap();
        assert_eq!(driver.config().id, "bringatrailer");
    }
}
