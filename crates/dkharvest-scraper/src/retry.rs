//! Retry loop with linear backoff for transient fetch errors.
//!
//! Not-found responses are propagated immediately without retrying; every
//! other [`FetchError`] is retried up to the configured attempt count.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Executes `operation`, retrying transient failures with linearly
/// increasing backoff.
///
/// The sleep before retry `n` (1-based) is `pause * n`, so with
/// `pause = 800ms` and `max_retries = 2` the schedule is: try, sleep 800 ms,
/// retry, sleep 1600 ms, retry. After exhausting `max_retries` additional
/// attempts the last error is returned. Non-retriable errors return
/// immediately without sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    pause: Duration,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retriable() || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = pause.saturating_mul(attempt);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
