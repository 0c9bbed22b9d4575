//! # Seatwise Testing
//!
//! Deterministic in-memory implementations of every Seatwise port, plus a
//! fixed clock. Used by the core's integration tests and by the demo binary;
//! nothing here talks to a real backend.
//!
//! ## Example
//!
//! ```ignore
//! use seatwise_testing::{
//!     test_clock, InMemoryEventStore, InMemoryIdentityStore,
//!     InMemoryRegistrationStore, RecordingNotifier,
//! };
//! use seatwise_core::{ReservationEnvironment, SeatReservations};
//!
//! let notifier = RecordingNotifier::new();
//! let env = ReservationEnvironment::new(
//!     Arc::new(test_clock()),
//!     Arc::new(InMemoryEventStore::new()),
//!     Arc::new(InMemoryRegistrationStore::new()),
//!     Arc::new(InMemoryIdentityStore::new()),
//!     Arc::new(notifier.clone()),
//! );
//! ```

pub mod notifier;
pub mod stores;

/// Mock implementations of environment traits.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use seatwise_core::Clock;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making registration timestamps
    /// reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which should never
    /// happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use notifier::{FailingNotifier, RecordingNotifier, SentNotification};
pub use stores::{
    FlakyRegistrationStore, InMemoryEventStore, InMemoryIdentityStore, InMemoryRegistrationStore,
};

#[cfg(test)]
mod tests {
    use super::*;
    use seatwise_core::Clock;

    #[test]
    fn fixed_clock_is_fixed() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
