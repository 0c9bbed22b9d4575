//! Domain types for the seat-reservation core.
//!
//! This module contains the identifiers, value objects, and entities shared by
//! the reservation orchestrator and the storage ports. Entities are immutable
//! value snapshots: the core never mutates a persisted `Event`, and a
//! `Registration` is constructed once and never updated.

use crate::config::EventLimits;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Days before its start time during which an event counts as "upcoming".
const GRACE_PERIOD_DAYS: i64 = 3;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user (event owner or registrant)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `UserId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a registration record
///
/// The business identity of a registration is the `(event, registrant)` pair;
/// this id exists for storage and audit purposes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Creates a new random `RegistrationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `RegistrationId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Capacity
// ============================================================================

/// Seat capacity of an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a new `Capacity`
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the capacity value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Identity snapshot of a user, as resolved through the identity port.
///
/// The reservation core only needs enough of the user to address a
/// notification; authentication and profile management live elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Notification address
    pub email: String,
}

impl User {
    /// Creates a new `User`
    #[must_use]
    pub const fn new(id: UserId, name: String, email: String) -> Self {
        Self { id, name, email }
    }
}

/// Validation errors raised when constructing an [`Event`].
///
/// These belong to the event-creation flow; the reservation path assumes it
/// only ever sees events that passed construction.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventValidationError {
    /// Events must hold at least one seat.
    #[error("event capacity must be at least one seat")]
    ZeroCapacity,

    /// Requested capacity exceeds the configured upper bound.
    #[error("event capacity {seats} exceeds the configured maximum of {max}")]
    CapacityAboveLimit {
        /// Capacity that was requested
        seats: u32,
        /// Configured upper bound
        max: u32,
    },
}

/// A capacity-bounded event that users register for.
///
/// Events are created by the event-management flow and are strictly read-only
/// from the reservation core's perspective: the orchestrator loads them,
/// consults their predicates, and never writes them back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier
    pub id: EventId,
    /// User who owns the event; immutable after creation
    pub owner: UserId,
    /// Event title
    pub title: String,
    /// When the event starts
    pub starts_at: DateTime<Utc>,
    /// When the event ends
    pub ends_at: DateTime<Utc>,
    /// Seat capacity
    pub seats: Capacity,
    /// Denormalized cache of registrant ids. Advisory only: the authoritative
    /// registration count always comes from the registration store.
    pub participants: Vec<UserId>,
    /// When the event was created
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new `Event`, enforcing the capacity bounds of `limits`.
    ///
    /// The lower bound (`seats >= 1`) is a hard invariant of the type; the
    /// upper bound is the configurable creation-time limit. The reservation
    /// path never re-checks either.
    ///
    /// # Errors
    ///
    /// - [`EventValidationError::ZeroCapacity`] if `seats` is zero
    /// - [`EventValidationError::CapacityAboveLimit`] if `seats` exceeds
    ///   `limits.max_seats`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EventId,
        owner: UserId,
        title: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        seats: Capacity,
        created_at: DateTime<Utc>,
        limits: &EventLimits,
    ) -> Result<Self, EventValidationError> {
        if seats.value() == 0 {
            return Err(EventValidationError::ZeroCapacity);
        }
        if seats.value() > limits.max_seats {
            return Err(EventValidationError::CapacityAboveLimit {
                seats: seats.value(),
                max: limits.max_seats,
            });
        }

        Ok(Self {
            id,
            owner,
            title,
            starts_at,
            ends_at,
            seats,
            participants: Vec::new(),
            created_at,
        })
    }

    /// Whether the event starts in the future and within the grace window
    /// (less than three days from `now`).
    ///
    /// Used by event-management flows; the reservation path does not consult
    /// this predicate.
    #[must_use]
    pub fn is_upcoming_within_grace(&self, now: DateTime<Utc>) -> bool {
        self.starts_at > now && self.starts_at - now < Duration::days(GRACE_PERIOD_DAYS)
    }

    /// Whether another registration fits, given the current committed count.
    #[must_use]
    pub const fn has_capacity(&self, current_registration_count: u32) -> bool {
        current_registration_count < self.seats.value()
    }

    /// Whether `user` owns this event.
    #[must_use]
    pub fn is_owner(&self, user: &UserId) -> bool {
        self.owner == *user
    }

    /// Seats left once `committed` registrations are counted.
    #[must_use]
    pub const fn remaining(&self, committed: u32) -> u32 {
        self.seats.value().saturating_sub(committed)
    }
}

/// A committed claim on one seat of an event by one registrant.
///
/// Constructed exclusively by the reservation orchestrator once all checks
/// pass. Immutable; cancellation does not exist in this core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Storage identity of this record
    pub id: RegistrationId,
    /// Event the seat belongs to
    pub event_id: EventId,
    /// User holding the seat
    pub registrant: UserId,
    /// When the registration was committed; audit and ordering only
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Creates a new `Registration`
    #[must_use]
    pub const fn new(
        id: RegistrationId,
        event_id: EventId,
        registrant: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            registrant,
            created_at,
        }
    }

    /// Whether this registration belongs to `registrant`.
    #[must_use]
    pub fn is_held_by(&self, registrant: &UserId) -> bool {
        self.registrant == *registrant
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_event(seats: u32) -> Event {
        let now = Utc::now();
        Event::new(
            EventId::new(),
            UserId::new(),
            "Rust Meetup".to_string(),
            now + Duration::days(1),
            now + Duration::days(1) + Duration::hours(2),
            Capacity::new(seats),
            now,
            &EventLimits::default(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_zero_capacity() {
        let now = Utc::now();
        let result = Event::new(
            EventId::new(),
            UserId::new(),
            "Empty".to_string(),
            now,
            now,
            Capacity::new(0),
            now,
            &EventLimits::default(),
        );
        assert_eq!(result.unwrap_err(), EventValidationError::ZeroCapacity);
    }

    #[test]
    fn rejects_capacity_above_limit() {
        let now = Utc::now();
        let result = Event::new(
            EventId::new(),
            UserId::new(),
            "Stadium".to_string(),
            now,
            now,
            Capacity::new(1001),
            now,
            &EventLimits::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            EventValidationError::CapacityAboveLimit {
                seats: 1001,
                max: 1000
            }
        );
    }

    #[test]
    fn accepts_capacity_at_limit() {
        let now = Utc::now();
        let event = Event::new(
            EventId::new(),
            UserId::new(),
            "Full house".to_string(),
            now,
            now,
            Capacity::new(1000),
            now,
            &EventLimits::default(),
        );
        assert!(event.is_ok());
    }

    #[test]
    fn has_capacity_is_strict() {
        let event = sample_event(2);
        assert!(event.has_capacity(0));
        assert!(event.has_capacity(1));
        assert!(!event.has_capacity(2));
        assert!(!event.has_capacity(3));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let event = sample_event(2);
        assert_eq!(event.remaining(0), 2);
        assert_eq!(event.remaining(2), 0);
        assert_eq!(event.remaining(5), 0);
    }

    #[test]
    fn owner_comparison() {
        let event = sample_event(1);
        let owner = event.owner;
        assert!(event.is_owner(&owner));
        assert!(!event.is_owner(&UserId::new()));
    }

    #[test]
    fn grace_period_boundaries() {
        let now = Utc::now();
        let mut event = sample_event(1);

        event.starts_at = now + Duration::days(1);
        assert!(event.is_upcoming_within_grace(now));

        event.starts_at = now + Duration::days(3);
        assert!(!event.is_upcoming_within_grace(now));

        event.starts_at = now - Duration::hours(1);
        assert!(!event.is_upcoming_within_grace(now));
    }

    #[test]
    fn registration_holder_check() {
        let registrant = UserId::new();
        let registration =
            Registration::new(RegistrationId::new(), EventId::new(), registrant, Utc::now());
        assert!(registration.is_held_by(&registrant));
        assert!(!registration.is_held_by(&UserId::new()));
    }
}
