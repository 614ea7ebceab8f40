//! Retry delays for failed connection attempts

use crate::config::RetryConfig;

/// Chooses how long to wait before the next connection attempt
///
/// A single connect failure gets the short delay; a run of them, or a failed
/// request write, gets the long one. Any successful connect resets the run.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    consecutive_connect_failures: u32,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            consecutive_connect_failures: 0,
        }
    }

    /// Delay after a DNS failure
    pub fn on_resolve_failed(&mut self) -> u32 {
        self.config.resolve_delay_ms
    }

    /// Delay after a TCP connect failure
    pub fn on_connect_failed(&mut self) -> u32 {
        self.consecutive_connect_failures = self.consecutive_connect_failures.saturating_add(1);
        if self.consecutive_connect_failures > 1 {
            self.config.repeated_connect_delay_ms
        } else {
            self.config.connect_delay_ms
        }
    }

    /// Delay after the request write failed on an open connection
    pub fn on_request_failed(&mut self) -> u32 {
        self.config.repeated_connect_delay_ms
    }

    /// A connection was established
    pub fn on_connected(&mut self) {
        self.consecutive_connect_failures = 0;
    }

    /// Connect failures since the last successful connect
    pub fn consecutive_connect_failures(&self) -> u32 {
        self.consecutive_connect_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_backoff() {
        let mut retry = RetryPolicy::new(RetryConfig::default());
        assert_eq!(retry.on_connect_failed(), 1000);
        assert_eq!(retry.on_connect_failed(), 4000);
        assert_eq!(retry.on_connect_failed(), 4000);
        assert_eq!(retry.consecutive_connect_failures(), 3);
    }

    #[test]
    fn test_connect_resets_backoff() {
        let mut retry = RetryPolicy::new(RetryConfig::default());
        retry.on_connect_failed();
        retry.on_connect_failed();
        retry.on_connected();
        assert_eq!(retry.on_connect_failed(), 1000);
    }

    #[test]
    fn test_resolve_and_request_delays() {
        let mut retry = RetryPolicy::new(RetryConfig::default());
        assert_eq!(retry.on_resolve_failed(), 1000);
        assert_eq!(retry.on_request_failed(), 4000);
        // Neither counts as a connect failure
        assert_eq!(retry.consecutive_connect_failures(), 0);
    }
}
