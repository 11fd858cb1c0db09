//! Retry policy for rate requests.

use std::time::Duration;

use crate::error::FetchError;

/// How often, and how patiently, a single endpoint is retried.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Total attempts per endpoint, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Double the delay after every failed attempt.
    pub exponential_backoff: bool,
    /// Upper bound on any single delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryStrategy {
    /// Creates a strategy with `max_attempts` attempts and default delays.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms: 500,
            exponential_backoff: true,
            max_delay_ms: 8_000,
        }
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enables or disables exponential backoff.
    #[must_use]
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
            self.base_delay_ms.saturating_mul(factor)
        } else {
            self.base_delay_ms
        };

        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    /// Whether attempt number `attempt` failing with `error` warrants another try.
    pub fn should_retry(&self, attempt: u32, error: &FetchError) -> bool {
        attempt < self.max_attempts && error.is_transient()
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;

    #[test]
    fn test_exponential_backoff() {
        let strategy = RetryStrategy::default();

        assert_eq!(strategy.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(strategy.delay_for_attempt(2), Duration::from_millis(1_000));
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_millis(2_000));
    }

    #[test]
    fn test_max_delay_cap() {
        let strategy = RetryStrategy::new(10).with_base_delay(Duration::from_secs(5));

        // Capped at 8 seconds
        assert_eq!(strategy.delay_for_attempt(4), Duration::from_millis(8_000));
        assert_eq!(strategy.delay_for_attempt(64), Duration::from_millis(8_000));
    }

    #[test]
    fn test_flat_delay() {
        let strategy = RetryStrategy::new(3).with_exponential_backoff(false);
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_millis(500));
    }

    #[test]
    fn test_should_retry_only_transient_and_within_budget() {
        let strategy = RetryStrategy::new(2);
        let timeout = FetchError::Http(HttpError::Timeout);
        let bad_body = FetchError::InvalidResponse("missing inr.usd".into());

        assert!(strategy.should_retry(1, &timeout));
        assert!(!strategy.should_retry(2, &timeout));
        assert!(!strategy.should_retry(1, &bad_body));
        assert!(!RetryStrategy::new(1).should_retry(1, &timeout));
    }
}
