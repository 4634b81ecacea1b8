//! Bounded retry with exponential backoff.
//!
//! The policy calls the operation, asks a predicate whether a failure is
//! transient, sleeps `base_delay * 2^attempt` and tries again. The sleep
//! goes through [`Sleeper`] so tests can record delays instead of waiting.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;
use tradebot_core::error::TradeError;

/// Default number of attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Suspends the current task for a backoff delay.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Sleeps for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry policy: attempt budget plus exponential backoff.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tradebot_engine::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_for(2), Duration::from_secs(4));
/// assert!(policy.should_retry(2));
/// assert!(!policy.should_retry(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failure.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default 30s delay cap.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Self::default()
        }
    }

    /// Sets the delay cap.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay after the failure of the zero-based `attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        2_u32
            .checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Returns true if `attempts_made` leaves room for another attempt.
    #[must_use]
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }

    /// Runs `op` until it succeeds, fails permanently, or the budget runs out.
    ///
    /// Errors rejected by `is_retryable` are returned at once without
    /// sleeping. Every retryable failure is followed by a backoff sleep,
    /// the last one included, after which
    /// [`TradeError::RetriesExhausted`] is returned.
    pub async fn run<T, F, Fut, P, S>(
        &self,
        mut op: F,
        is_retryable: P,
        sleeper: &S,
    ) -> Result<T, TradeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TradeError>>,
        P: Fn(&TradeError) -> bool,
        S: Sleeper + ?Sized,
    {
        let mut attempt = 0;
        while self.should_retry(attempt) {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !is_retryable(&e) => return Err(e),
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Network issue. Retry {attempt}/{}",
                        self.max_attempts
                    );
                    sleeper.sleep(delay).await;
                }
            }
        }

        Err(TradeError::RetriesExhausted {
            attempts: self.max_attempts,
        })
    }
}
