//! Backoff schedule for job status polling.
//!
//! Submitted jobs are polled until they reach a terminal status. The delay
//! between polls starts small and doubles up to a cap, and the total wait
//! is bounded so a stuck job cannot hold the caller forever.

use std::time::Duration;

/// Tunable parameters for the polling schedule.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first status poll.
    pub initial_delay: Duration,
    /// Upper bound on the delay between polls.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each poll.
    pub multiplier: f64,
    /// Upper bound on the total time spent waiting for one job.
    pub wait_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(20),
            multiplier: 2.0,
            wait_timeout: Duration::from_secs(2 * 60 * 60),
        }
    }
}

/// Calculate the next poll delay from the current delay and config.
///
/// The result is clamped to [`PollConfig::max_delay`].
pub fn next_delay(current: Duration, config: &PollConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_delay_doubles() {
        let config = PollConfig::default();
        let d = next_delay(Duration::from_secs(1), &config);
        assert_eq!(d, Duration::from_secs(2));
    }

    #[test]
    fn next_delay_clamps_at_max() {
        let config = PollConfig {
            max_delay: Duration::from_secs(10),
            ..Default::default()
        };
        let d = next_delay(Duration::from_secs(8), &config);
        assert_eq!(d, Duration::from_secs(10));
    }

    #[test]
    fn next_delay_already_at_max() {
        let config = PollConfig::default();
        let d = next_delay(Duration::from_secs(20), &config);
        assert_eq!(d, Duration::from_secs(20));
    }

    #[test]
    fn full_backoff_schedule() {
        let config = PollConfig::default();
        let mut delay = config.initial_delay;
        let expected = [1, 2, 4, 8, 16, 20, 20];

        for &expected_secs in &expected {
            assert_eq!(delay.as_secs(), expected_secs);
            delay = next_delay(delay, &config);
        }
    }

    #[test]
    fn default_wait_timeout_is_two_hours() {
        let config = PollConfig::default();
        assert_eq!(config.wait_timeout, Duration::from_secs(7200));
    }
}
