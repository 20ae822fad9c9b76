//! Retries for transient HTTP failures.
//!
//! Off by default (`max_retries = 0`). When enabled, a timed-out request or a
//! 429/5xx response is retried after an exponentially growing, jittered
//! pause. Title, decode and lookup failures are final.

use std::future::Future;
use std::time::Duration;

use crate::error::ResolutionError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Whether `err` may succeed on a second attempt.
///
/// Transport timeouts and connect failures, `429 Too Many Requests` and any
/// 5xx status qualify. Everything else is final.
pub(crate) fn is_retriable(err: &ResolutionError) -> bool {
    match err {
        ResolutionError::Transport { source, .. } => source.is_timeout() || source.is_connect(),
        ResolutionError::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
        ResolutionError::Client(_)
        | ResolutionError::Parse { .. }
        | ResolutionError::Decode { .. }
        | ResolutionError::ItemNotFound { .. }
        | ResolutionError::MalformedItem { .. }
        | ResolutionError::InvalidUrl { .. } => false,
    }
}

/// Pause before retry number `retry` (1-based): `base_ms × 2^(retry-1)`,
/// capped at [`MAX_DELAY_MS`], then scaled by `jitter` (expected in
/// `0.75..1.25`).
fn backoff_delay(base_ms: u64, retry: u32, jitter: f64) -> Duration {
    let exponent = retry.saturating_sub(1).min(10);
    let capped = base_ms.saturating_mul(1u64 << exponent).min(MAX_DELAY_MS);

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let scaled = (capped as f64 * jitter) as u64;
    Duration::from_millis(scaled)
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// Returns the first success or the last error.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ResolutionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResolutionError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if retry >= max_retries || !is_retriable(&err) {
            return Err(err);
        }
        retry += 1;

        let jitter = 0.75 + rand::random::<f64>() * 0.5;
        let delay = backoff_delay(backoff_base_ms, retry, jitter);
        tracing::warn!(
            retry,
            max_retries,
            delay = ?delay,
            error = %err,
            "transient request failure, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
