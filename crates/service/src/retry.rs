//! Bounded retry for classified-transient errors
//!
//! The oracle's proof-of-authorization propagation makes some unseal
//! failures transient: the request is well-formed but the account is not
//! authorized *yet*. Those calls are retried a bounded number of times with
//! a fixed delay; every other error class is surfaced immediately.

use std::future::Future;
use std::time::Duration;

/// How many times to attempt an operation and how long to wait in between
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

/// Run `op`, retrying under `policy` while `is_transient` classifies the
/// error as retryable
///
/// A non-transient error is returned immediately; a transient error on the
/// final attempt is returned as-is.
pub async fn retry_transient<T, E, F, Fut>(
    policy: RetryPolicy,
    is_transient: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts && is_transient(&err) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    "transient error, retrying in {:?}",
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
    }

    fn transient(err: &TestError) -> bool {
        matches!(err, TestError::Transient)
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_errors() {
        let calls = AtomicU32::new(0);
        let result = retry_transient(RetryPolicy::default(), transient, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(TestError::Transient)
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_transient(RetryPolicy::default(), transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Fatal) }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_exhaust_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        };
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_transient(policy, transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Transient) }
        })
        .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_does_not_sleep() {
        let start = tokio::time::Instant::now();
        let result: Result<_, TestError> =
            retry_transient(RetryPolicy::default(), transient, || async { Ok(42) }).await;

        assert_eq!(result, Ok(42));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
