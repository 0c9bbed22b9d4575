//! Configuration for the reservation core.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Tuning knobs for the reservation orchestrator's conflict handling.
///
/// Storage conflicts detected by the conditional commit are transient: the
/// orchestrator re-runs the whole check-then-act sequence up to
/// `max_conflict_retries` times, backing off exponentially between attempts.
/// Business-rule failures are never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// Maximum number of retries after a detected storage conflict
    pub max_conflict_retries: usize,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Cap for the exponential backoff
    pub max_backoff: Duration,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: 3,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(500),
        }
    }
}

impl ReservationConfig {
    /// Loads the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// - `RESERVATION_MAX_CONFLICT_RETRIES`
    /// - `RESERVATION_INITIAL_BACKOFF_MS`
    /// - `RESERVATION_MAX_BACKOFF_MS`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_conflict_retries: env::var("RESERVATION_MAX_CONFLICT_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_conflict_retries),
            initial_backoff: env::var("RESERVATION_INITIAL_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.initial_backoff, Duration::from_millis),
            max_backoff: env::var("RESERVATION_MAX_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.max_backoff, Duration::from_millis),
        }
    }
}

/// Creation-time bounds for events.
///
/// Enforced when an [`Event`](crate::types::Event) is constructed by the
/// event-management flow; the reservation path never re-checks the upper
/// bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EventLimits {
    /// Maximum seat capacity accepted at event creation
    pub max_seats: u32,
}

impl Default for EventLimits {
    fn default() -> Self {
        Self { max_seats: 1000 }
    }
}

impl EventLimits {
    /// Loads the limits from environment variables (`EVENT_MAX_SEATS`),
    /// falling back to the default for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_seats: env::var("EVENT_MAX_SEATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_seats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_defaults() {
        let config = ReservationConfig::default();
        assert_eq!(config.max_conflict_retries, 3);
        assert_eq!(config.initial_backoff, Duration::from_millis(10));
        assert_eq!(config.max_backoff, Duration::from_millis(500));
    }

    #[test]
    fn event_limit_default_is_one_thousand() {
        assert_eq!(EventLimits::default().max_seats, 1000);
    }

    #[test]
    fn from_env_falls_back_to_defaults_when_unset() {
        // The variables are not set in the test environment, so from_env
        // must reproduce the defaults.
        let config = ReservationConfig::from_env();
        assert_eq!(
            config.max_conflict_retries,
            ReservationConfig::default().max_conflict_retries
        );
        assert_eq!(EventLimits::from_env().max_seats, 1000);
    }
}
