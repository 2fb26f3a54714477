//! Bounded attempts with exponential backoff.
//!
//! ```text
//! Idle ──▶ Fetching ──ok──────────────────────────▶ Success
//!             │  ▲
//!   retryable │  │ after backoff
//!   & budget  ▼  │
//!           Retrying
//!             │
//!   otherwise └──────────────────────────────────▶ Failed
//! ```

use crate::config::ClientConfig;
use crate::error::{ErrorKind, NetworkFailure, Result};
use exn::ResultExt;
use std::future::Future;
use std::time::Duration;

/// How often, how patiently and how long to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first (never less than one)
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubles for each one after
    pub base_delay: Duration,
    /// Bound on each individual attempt
    pub timeout: Duration,
}
impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.backoff_base(),
            timeout: config.request_timeout(),
        }
    }

    /// Backoff after the failure of zero-based attempt `attempt`:
    /// `2^attempt * base_delay`.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent. The last error is returned as-is.
    ///
    /// The closure receives the zero-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            let err = match self.attempt(operation(attempt)).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let kind: ErrorKind = *err;
            if !kind.is_retryable() || attempt + 1 >= max_attempts {
                return Err(err);
            }
            let delay = self.delay(attempt);
            tracing::warn!(attempt = attempt + 1, max_attempts, ?delay, error = %kind, "attempt failed; retrying");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Runs a single attempt bounded by the timeout. Expiry drops the
    /// in-flight future and is reported as a retryable timeout.
    pub async fn attempt<T>(&self, operation: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .or_raise(|| ErrorKind::Network(NetworkFailure::Timeout))?
    }
}
impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn fail<T>(kind: ErrorKind) -> Result<T> {
        exn::bail!(kind)
    }

    #[rstest]
    #[case(0, 1_000)]
    #[case(1, 2_000)]
    #[case(2, 4_000)]
    #[case(5, 32_000)]
    fn test_delay(#[case] attempt: u32, #[case] expected_ms: u64) {
        assert_eq!(RetryPolicy::default().delay(attempt), Duration::from_millis(expected_ms));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 1_000)]
    #[case(3, 3_000)]
    #[tokio::test(start_paused = true)]
    async fn test_backoff_elapsed(#[case] succeed_on: u32, #[case] expected_wait_ms: u64) {
        let policy = RetryPolicy::default();
        let calls = &AtomicU32::new(0);
        let start = Instant::now();
        let result = policy
            .run(move |_| async move {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if call < succeed_on {
                    fail(ErrorKind::Network(NetworkFailure::ConnectionReset))
                } else {
                    Ok(call)
                }
            })
            .await;
        assert_eq!(result.unwrap(), succeed_on);
        assert_eq!(calls.load(Ordering::SeqCst), succeed_on);
        assert_eq!(start.elapsed(), Duration::from_millis(expected_wait_ms));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_returns_last_error() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let err = policy
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    let failure = if attempt < 2 {
                        NetworkFailure::Dns
                    } else {
                        NetworkFailure::ConnectionRefused
                    };
                    fail::<()>(ErrorKind::Network(failure))
                }
            })
            .await
            .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(*err, ErrorKind::Network(NetworkFailure::ConnectionRefused));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_stops_immediately() {
        let policy = RetryPolicy::default();
        let calls = &AtomicU32::new(0);
        let start = Instant::now();
        let err = policy
            .run(move |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                fail::<()>(ErrorKind::HttpStatus(500))
            })
            .await
            .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*err, ErrorKind::HttpStatus(500));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let start = Instant::now();
        let result = policy
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        tokio::time::sleep(Duration::from_secs(120)).await;
                    }
                    Ok("done")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // One timed-out attempt plus the first backoff.
        assert_eq!(start.elapsed(), Duration::from_secs(31));
    }
}
