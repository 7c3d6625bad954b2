//! The generic, config-driven extraction driver.

use chrono::Utc;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use scraper::{Html, Selector};

use paddock_core::{ListingDetail, Pagination, SiteConfig};

use crate::detail::{assemble, FieldExtractors};
use crate::error::ExtractError;
use crate::types::RawPage;

/// Which page of search results to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken<'a> {
    First,
    /// 1-based page number, for [`Pagination::Page`] sites.
    Number(u32),
    /// Opaque cursor echoed from the previous response, for
    /// [`Pagination::Cursor`] sites.
    Cursor(&'a str),
}

/// One site's extraction driver: a config record plus the extractor set.
#[derive(Debug)]
pub struct SiteDriver {
    cfg: SiteConfig,
    extractors: FieldExtractors,
}

impl SiteDriver {
    /// Driver with the default extractor set.
    #[must_use]
    pub fn new(cfg: SiteConfig) -> Self {
        Self::with_extractors(cfg, FieldExtractors::default())
    }

    /// Driver with site-specific extractor substitutions.
    #[must_use]
    pub fn with_extractors(cfg: SiteConfig, extractors: FieldExtractors) -> Self {
        SiteDriver { cfg, extractors }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.cfg
    }

    /// Build the search URL for `query` at the given results page.
    ///
    /// The query is percent-encoded into the site's `{query}` template
    /// slot; the pagination parameter is appended per the site's scheme.
    /// `PageToken::First` and `Number(1)` produce the bare template URL.
    #[must_use]
    pub fn search_url(&self, query: &str, page: PageToken<'_>) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        let url = self.cfg.search_url_template.replace("{query}", &encoded);

        let param_value = match (&self.cfg.pagination, page) {
            (Pagination::Page { param }, PageToken::Number(n)) if n > 1 => {
                Some((param.clone(), n.to_string()))
            }
            (Pagination::Cursor { param }, PageToken::Cursor(cursor)) => Some((
                param.clone(),
                utf8_percent_encode(cursor, NON_ALPHANUMERIC).to_string(),
            )),
            _ => None,
        };

        match param_value {
            Some((param, value)) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{url}{sep}{param}={value}")
            }
            None => url,
        }
    }

    /// Harvest listing detail URLs from a search/results page, absolutized
    /// against the site's base URL and deduplicated in order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSelector`] when the configured
    /// listing-link selector does not parse.
    pub fn listing_urls(&self, page: &RawPage) -> Result<Vec<String>, ExtractError> {
        let link_sel = Selector::parse(&self.cfg.selectors.listing_link).map_err(|e| {
            ExtractError::InvalidSelector {
                site: self.cfg.id.clone(),
                selector: self.cfg.selectors.listing_link.clone(),
                reason: e.to_string(),
            }
        })?;

        let doc = Html::parse_document(&page.html);
        let mut seen = std::collections::HashSet::new();
        let mut urls = Vec::new();

        for el in doc.select(&link_sel) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };
            let Some(url) = self.absolutize(href.trim()) else {
                continue;
            };
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }

        tracing::debug!(site = %self.cfg.id, count = urls.len(), "listing urls harvested");
        Ok(urls)
    }

    /// Extract one detail page with this site's extractor set.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSelector`] when the site's configured
    /// selectors do not parse.
    pub fn extract_detail(
        &self,
        page: &RawPage,
        source_url: &str,
    ) -> Result<Option<ListingDetail>, ExtractError> {
        assemble(
            &self.cfg,
            &self.extractors,
            page,
            source_url,
            Utc::now().date_naive(),
        )
    }

    fn absolutize(&self, href: &str) -> Option<String> {
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            return None;
        }
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        if href.starts_with('/') {
            return Some(format!(
                "{}{}",
                self.cfg.base_url.trim_end_matches('/'),
                href
            ));
        }
        None
    }
}
