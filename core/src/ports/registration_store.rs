//! Registration store port.

use super::PortFuture;
use crate::types::{EventId, Registration, UserId};
use thiserror::Error;

/// Errors that can occur while reading or writing registrations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStoreError {
    /// Conditional insert lost a race: the event's registration count moved
    /// between the caller's read and the commit.
    ///
    /// This is the transient signal the orchestrator retries on. It is the
    /// same contract as an event-store append with a stale expected version.
    #[error(
        "registration count conflict for event {event_id}: expected {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// Event whose count moved
        event_id: EventId,
        /// Count the caller based its checks on
        expected: u32,
        /// Count the store actually held
        actual: u32,
    },

    /// A registration for this `(event, registrant)` pair already exists.
    #[error("registrant {registrant} already holds a seat for event {event_id}")]
    Duplicate {
        /// Event the duplicate was attempted against
        event_id: EventId,
        /// Registrant who already holds a seat
        registrant: UserId,
    },

    /// The storage backend failed (connection, query, corruption).
    #[error("registration store backend error: {0}")]
    Backend(String),
}

impl RegistrationStoreError {
    /// Whether this error is a transient conflict worth retrying.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

/// The single shared mutable resource of the reservation core.
///
/// Implementations must make `save` atomic with respect to concurrent `save`
/// calls for the same event: the duplicate check and the `expected_count`
/// check happen inside the same critical section or transaction as the
/// insert. That atomicity is what lets the orchestrator treat its
/// check-then-act sequence as serializable.
pub trait RegistrationStore: Send + Sync {
    /// List all registrations committed for an event. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationStoreError::Backend`] if the query fails.
    fn list_by_event(
        &self,
        event_id: EventId,
    ) -> PortFuture<'_, Result<Vec<Registration>, RegistrationStoreError>>;

    /// Conditionally insert a registration.
    ///
    /// With `expected_count: Some(n)`, the insert commits only if the event
    /// currently holds exactly `n` registrations; otherwise it fails with
    /// [`RegistrationStoreError::ConcurrencyConflict`] and writes nothing.
    /// `None` skips the count check (bulk seeding, migrations).
    ///
    /// A duplicate `(event, registrant)` pair is always rejected with
    /// [`RegistrationStoreError::Duplicate`], regardless of `expected_count`.
    ///
    /// # Errors
    ///
    /// - [`RegistrationStoreError::ConcurrencyConflict`] on a stale count
    /// - [`RegistrationStoreError::Duplicate`] on a repeated pair
    /// - [`RegistrationStoreError::Backend`] if the write itself fails
    fn save(
        &self,
        registration: Registration,
        expected_count: Option<u32>,
    ) -> PortFuture<'_, Result<(), RegistrationStoreError>>;
}
