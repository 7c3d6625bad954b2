//! Retry with exponential back-off and jitter for the classification client.
//!
//! One policy object for both normalizers: [`retry_with_backoff`] wraps any
//! fallible async operation and retries only overload-class errors.
//! Rate-limit responses short-circuit so the caller can take its
//! deterministic fallback without burning the remaining budget.

use std::future::Future;
use std::time::Duration;

use crate::error::NormalizeError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`NormalizeError::Overloaded`] — 5xx; the service may recover shortly.
/// - Network-level failures: timeout, connection reset.
///
/// **Not retriable (immediate fallback):**
/// - [`NormalizeError::RateLimited`] — retrying spends quota for nothing.
/// - [`NormalizeError::UnexpectedStatus`] — application-level error.
/// - [`NormalizeError::Deserialize`] / [`NormalizeError::EmptyResponse`] —
///   retrying won't change the payload.
pub(crate) fn is_retriable(err: &NormalizeError) -> bool {
    match err {
        NormalizeError::Overloaded { .. } => true,
        NormalizeError::Http(e) => e.is_timeout() || e.is_connect(),
        NormalizeError::RateLimited(_)
        | NormalizeError::UnexpectedStatus { .. }
        | NormalizeError::Deserialize { .. }
        | NormalizeError::EmptyResponse => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// overload-class errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 30 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, NormalizeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, NormalizeError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "classification service overloaded — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn deserialize_err() -> NormalizeError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        NormalizeError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn rate_limited_is_not_retriable() {
        assert!(!is_retriable(&NormalizeError::RateLimited(
            "slow down".to_owned()
        )));
    }

    #[test]
    fn overloaded_is_retriable() {
        assert!(is_retriable(&NormalizeError::Overloaded { status: 503 }));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[test]
    fn empty_response_is_not_retriable() {
        assert!(!is_retriable(&NormalizeError::EmptyResponse));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, NormalizeError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_overloaded_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err::<u32, _>(NormalizeError::Overloaded { status: 503 })
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_rate_limited() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(NormalizeError::RateLimited("429".to_owned()))
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "RateLimited must not be retried"
        );
        assert!(matches!(result, Err(NormalizeError::RateLimited(_))));
    }

    #[tokio::test]
    async fn exhausts_retries_and_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(NormalizeError::Overloaded { status: 529 })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "1 try + 2 retries");
        assert!(matches!(
            result,
            Err(NormalizeError::Overloaded { status: 529 })
        ));
    }
}
