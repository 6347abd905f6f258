//! Bounded exponential backoff for single requests.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientResult;

/// Retry policy: `max_attempts` tries, sleeping `base_delay * 2^n` after failed attempt `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,

    /// Delay after the first failed attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create a retry policy.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay }
    }

    /// Backoff after the given 0-based attempt.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or runs out of attempts. Every backoff slept is appended to `backoffs`.
    pub async fn run<T, F, Fut>(&self, mut operation: F, backoffs: &mut Vec<Duration>) -> ClientResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Request failed, backing off"
                    );
                    backoffs.push(delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(attempts = attempt + 1, error = %e, "Request failed, not retrying");
                    return Err(e);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::config::api::MAX_ATTEMPTS, crate::config::api::RETRY_BASE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_secs(10));
        assert_eq!(policy.delay_for(0), Duration::from_secs(10));
        assert_eq!(policy.delay_for(1), Duration::from_secs(20));
        assert_eq!(policy.delay_for(2), Duration::from_secs(40));
    }

    #[test]
    fn test_delay_does_not_overflow() {
        let policy = RetryPolicy::new(3, Duration::from_secs(10));
        assert!(policy.delay_for(200) >= policy.delay_for(31));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);
        let mut backoffs = Vec::new();

        let result = policy
            .run(
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { if n < 2 { Err(ClientError::rate_limited(None)) } else { Ok(n) } }
                },
                &mut backoffs,
            )
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(backoffs, vec![Duration::from_millis(1), Duration::from_millis(2)]);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);
        let mut backoffs = Vec::new();

        let result: ClientResult<()> = policy
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(ClientError::server(503, "busy")) }
                },
                &mut backoffs,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(backoffs.len(), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_fails_immediately() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);
        let mut backoffs = Vec::new();

        let result: ClientResult<()> = policy
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(ClientError::not_found("author")) }
                },
                &mut backoffs,
            )
            .await;

        assert!(matches!(result, Err(ClientError::NotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(backoffs.is_empty());
    }
}
