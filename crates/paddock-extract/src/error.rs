use thiserror::Error;

/// Errors from the extraction pipeline.
///
/// "No valid candidate" is never an error — extractors return `None` for
/// that. These variants cover genuinely exceptional conditions: broken
/// configuration or an unconfigured source.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("site '{site}' has invalid selector \"{selector}\": {reason}")]
    InvalidSelector {
        site: String,
        selector: String,
        reason: String,
    },

    #[error("no site configuration registered for '{0}'")]
    UnknownSite(String),
}
