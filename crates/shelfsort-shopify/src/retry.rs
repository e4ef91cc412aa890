//! Retry with exponential back-off and jitter for Admin API calls.
//!
//! Only transient failures are retried. A rejected reorder (`userErrors`) is
//! never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::ShopifyError;

/// Upper bound for a single back-off sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429 and 5xx responses.
/// - GraphQL `THROTTLED` (query cost budget exhausted).
///
/// **Not retriable:** GraphQL errors, user errors, missing collections,
/// malformed bodies, 4xx statuses, pagination guard trips.
pub(crate) fn is_retriable(err: &ShopifyError) -> bool {
    match err {
        ShopifyError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ShopifyError::RateLimited { .. } | ShopifyError::Throttled { .. } => true,
        ShopifyError::UnexpectedStatus { status, .. } => *status >= 500,
        ShopifyError::Deserialize { .. }
        | ShopifyError::GraphQl { .. }
        | ShopifyError::MissingData { .. }
        | ShopifyError::CollectionNotFound { .. }
        | ShopifyError::UserErrors { .. }
        | ShopifyError::PaginationLimit { .. }
        | ShopifyError::InvalidStoreUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// A 429 with a `Retry-After` header waits at least that long. Delay is
/// capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ShopifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
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
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered =
                    (computed.min(MAX_DELAY_MS) as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = match &err {
                    ShopifyError::RateLimited { retry_after_secs } => jittered
                        .max(retry_after_secs.saturating_mul(1_000))
                        .min(MAX_DELAY_MS),
                    _ => jittered,
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Shopify transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
