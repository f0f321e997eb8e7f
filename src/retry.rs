use std::future::Future;

use tokio::time::sleep;
use tracing::warn;

use crate::config::RetryPolicy;
use crate::error::FetchError;

/// Run `op` until it succeeds, the error is not retryable, or the policy's
/// attempts are exhausted. The delay between attempts grows geometrically.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts || !e.is_retryable() => return Err(e),
            Err(e) => {
                warn!(target_call = %what, attempt, error = %e, retry_in_ms = delay.as_millis() as u64, "Provider call failed, retrying");
                sleep(delay).await;
                delay = policy.next_delay(delay);
                attempt += 1;
            }
        }
    }
}
