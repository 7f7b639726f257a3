//! Retry policy configuration for request execution.

use std::time::Duration;

/// Configuration for exponential backoff retry behavior.
///
/// Controls how many times a failed transport dispatch is reattempted and
/// how long to wait between attempts. The delay grows as a pure base-2
/// exponential seeded by `backoff_factor`, with no upper cap.
///
/// Only transport-level failures are ever retried; a response that arrived
/// is definitive, whatever it says.
///
/// # Defaults
///
/// - `max_retries`: 3 (four total attempts)
/// - `backoff_factor`: 0.5 seconds
///
/// # Example
///
/// ```
/// use submodel::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::new()
///     .with_max_retries(2)
///     .with_backoff_factor(0.1);
///
/// assert_eq!(config.total_attempts(), 3);
/// assert_eq!(config.delay_for_attempt(1), Duration::from_secs_f64(0.2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    ///
    /// A value of 0 means no retries; only the initial attempt is made.
    pub max_retries: u32,

    /// Seed for the exponential backoff, in seconds.
    ///
    /// The delay before retry `i + 1` is `backoff_factor * 2^i`.
    pub backoff_factor: f64,
}

impl RetryConfig {
    /// Default maximum retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default backoff seed (0.5 seconds).
    pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.5;

    /// Creates a retry configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            backoff_factor: Self::DEFAULT_BACKOFF_FACTOR,
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff seed in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `backoff_factor` is not positive (must be > 0.0).
    #[must_use]
    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        assert!(backoff_factor > 0.0, "backoff_factor must be positive");
        self.backoff_factor = backoff_factor;
        self
    }

    /// Total attempts performed under this configuration.
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Computes the delay before the retry following attempt `attempt`.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The completed attempt's 0-based index (0 = delay after
    ///   the initial attempt, 1 = delay after the first retry, etc.)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Safe cast: attempt values are small (typically < 20) and i32::MAX is ~2 billion
        #[allow(clippy::cast_possible_wrap)]
        let secs = self.backoff_factor * 2.0_f64.powi(attempt as i32);
        // Absurd attempt counts would overflow a Duration; saturate instead
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Returns true if another attempt is allowed after the failed attempt
    /// with 0-based index `attempt`.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod retry_tests;
