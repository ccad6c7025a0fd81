//! Retry policies for HTTP requests.
//!
//! Nothing is retried unless the caller opts in: a failed fetch surfaces as
//! an error on the dashboard and the user decides whether to try again.

use std::time::Duration;

/// Retry policy for the read endpoints (`/api/historical`, `/api/stock-info`).
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// Retry on transport failures, timeouts, 429 and 502/503/504.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add ±25% jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// The config behind [`RetryPolicy::Idempotent`].
    ///
    /// 429 is included: the backend's upstream quote feed is rate limited
    /// per minute, so a short backoff usually clears it.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter(initial_ms: u64, max_ms: u64, factor: f64) -> RetryConfig {
        RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            backoff_factor: factor,
            jitter: false,
            retryable_statuses: vec![],
        }
    }

    #[test]
    fn test_retry_policy_default_is_none() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::None));
    }

    #[test]
    fn test_idempotent_statuses() {
        let config = RetryConfig::idempotent();
        assert_eq!(config.retryable_statuses, vec![429, 502, 503, 504]);
        assert!(!config.retryable_statuses.contains(&500));
    }

    #[test]
    fn test_delay_for_attempt_exponential() {
        let config = no_jitter(100, 10_000, 2.0);
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = no_jitter(1000, 2000, 10.0);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }

    #[test]
    fn test_jitter_stays_within_quarter() {
        let config = RetryConfig {
            jitter: true,
            ..no_jitter(1000, 10_000, 1.0)
        };
        for _ in 0..50 {
            let ms = config.delay_for_attempt(0).as_millis();
            assert!((750..=1250).contains(&ms), "delay {ms} out of range");
        }
    }
}
