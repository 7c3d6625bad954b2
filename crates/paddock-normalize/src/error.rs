use thiserror::Error;

/// Errors from the external classification service.
///
/// The normalizers never surface these to their callers — every variant
/// ends in the deterministic fallback path. The distinction matters for the
/// retry policy: overload-class errors are retried with back-off,
/// rate-limit responses are not (retrying a rate limit spends budget for
/// nothing).
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429. Falls back immediately; never retried.
    #[error("classification service rate limited: {0}")]
    RateLimited(String),

    /// HTTP 5xx. The service is overloaded or briefly down; retried with
    /// back-off up to the configured cap.
    #[error("classification service overloaded (status {status})")]
    Overloaded { status: u16 },

    /// Any other non-2xx status. Not retried.
    #[error("unexpected HTTP status {status} from classification service")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected shape.
    #[error("unparseable classification response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered 2xx but with no usable content.
    #[error("classification service returned no content")]
    EmptyResponse,
}
