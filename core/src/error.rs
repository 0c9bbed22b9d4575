//! Error taxonomy for the reservation operation.

use crate::types::{Capacity, EventId, UserId};
use thiserror::Error;

/// Failure modes of [`reserve_seat`](crate::reservation::SeatReservations::reserve_seat).
///
/// Every variant is an expected, recoverable-by-caller outcome; none is
/// process-fatal. The three business failures are final: re-running the
/// operation with the same inputs yields the same answer (or a success, once
/// a seat frees up in flows outside this core). Only storage conflicts are
/// retried, internally and bounded, before `ConflictRetriesExhausted`
/// surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReserveError {
    /// The referenced event does not exist.
    #[error("event {event_id} not found")]
    EventNotFound {
        /// Id that failed to resolve
        event_id: EventId,
    },

    /// The registrant already holds a seat for this event.
    ///
    /// Idempotent from the registrant's point of view: re-attempting neither
    /// creates a duplicate nor consumes a seat.
    #[error("registrant {registrant} is already registered for event {event_id}")]
    AlreadyRegistered {
        /// Event the duplicate was attempted against
        event_id: EventId,
        /// Registrant who already holds a seat
        registrant: UserId,
    },

    /// Every seat of the event is taken.
    #[error("event {event_id} has no seats remaining (capacity {seats})")]
    CapacityExceeded {
        /// Fully booked event
        event_id: EventId,
        /// Its seat capacity
        seats: Capacity,
    },

    /// Storage conflicts kept winning races past the configured retry budget.
    #[error("reservation abandoned after {attempts} conflicted attempts")]
    ConflictRetriesExhausted {
        /// Number of check-then-act attempts made
        attempts: usize,
    },

    /// A storage backend failed outright (not a conflict).
    #[error("storage failure: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_not_found_names_the_event() {
        let event_id = EventId::new();
        let message = ReserveError::EventNotFound { event_id }.to_string();
        assert!(message.contains(&event_id.to_string()));
    }

    #[test]
    fn capacity_exceeded_reports_capacity() {
        let message = ReserveError::CapacityExceeded {
            event_id: EventId::new(),
            seats: Capacity::new(2),
        }
        .to_string();
        assert!(message.contains("capacity 2"));
    }

    #[test]
    fn exhausted_retries_report_attempts() {
        let message = ReserveError::ConflictRetriesExhausted { attempts: 4 }.to_string();
        assert!(message.contains('4'));
    }
}
