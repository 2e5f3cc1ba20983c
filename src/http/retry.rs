//! Retry policies for HTTP requests.

use std::time::Duration;

/// Retry policy for a single request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. The default, and mandatory for mutating endpoints: the
    /// backend treats confirm/cancel/price-edit as non-idempotent.
    #[default]
    None,
    /// Retry transport failures and 502/503/504, with backoff on 429.
    /// Used for all query endpoints.
    Idempotent,
    /// Caller-provided retry behavior.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts beyond the initial request.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Ceiling on the between-retry delay.
    pub max_delay: Duration,
    /// Multiplier applied after each retry.
    pub backoff_factor: f64,
    /// Randomize each delay by ±25%.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// The config used for query (GET) endpoints: also backs off on 429.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Delay for a given attempt (0-indexed), capped and jittered.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * spread;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
