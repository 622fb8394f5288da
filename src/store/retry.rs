//! Bounded retries with exponential backoff for transient persistence
//! failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// How often and how patiently to retry.
///
/// `attempts` counts the first try, so `attempts = 1` never retries.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            initial_delay: Duration::from_millis(40),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, initial_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            initial_delay,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.initial_delay
            .saturating_mul(self.multiplier.saturating_pow(retry))
    }
}

/// Run `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or the policy's attempts are used up. The last error is
/// returned in the failure cases.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: RetryPolicy,
    should_retry: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                attempt += 1;
                if attempt >= policy.attempts || !should_retry(&err) {
                    return Err(err);
                }

                let delay = policy.delay_for_retry(attempt - 1);
                tracing::warn!(
                    attempt,
                    max_attempts = policy.attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "operation failed, retrying"
                );
                sleep(delay).await;
            }
        }
    }
}
