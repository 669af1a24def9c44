//! Reconnect delay schedule.

use std::time::Duration;

use pdfvault_core::config::RealtimeConfig;

/// Doubling delay between connection attempts, capped at a maximum.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// Delay before the second attempt.
    pub initial: Duration,
    /// Upper bound for any delay.
    pub max: Duration,
    /// Total number of attempts.
    pub attempts: u32,
}

impl Backoff {
    /// Build the schedule from configuration.
    pub fn from_config(config: &RealtimeConfig) -> Self {
        Self {
            initial: Duration::from_millis(config.reconnect_delay_ms),
            max: Duration::from_millis(config.reconnect_delay_max_ms),
            attempts: config.reconnect_attempts.max(1),
        }
    }

    /// Delay to wait after failed attempt number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial.saturating_mul(factor).min(self.max)
    }
}
