//! Reservation orchestrator.
//!
//! [`SeatReservations::reserve_seat`] is the one operation with cross-cutting
//! invariants: for any event, committed registrations never exceed its seat
//! capacity and no `(event, registrant)` pair commits twice, no matter how
//! many callers race.
//!
//! **Concurrency strategy**: optimistic conditional commit. One attempt reads
//! the event's registrations, runs the duplicate and capacity checks against
//! that read, and commits through
//! [`RegistrationStore::save`](crate::ports::RegistrationStore::save) with the
//! read count as `expected_count`. The store applies the checks and the insert
//! atomically, so a stale read surfaces as a
//! [`ConcurrencyConflict`](crate::ports::RegistrationStoreError::ConcurrencyConflict)
//! and the whole attempt is re-run under a bounded backoff policy. The result
//! is indistinguishable from running the attempts in some sequential order.
//!
//! Owner notification happens after the commit, outside the atomic region;
//! nothing on the notification path can undo or fail a registration.

use crate::config::ReservationConfig;
use crate::environment::ReservationEnvironment;
use crate::error::ReserveError;
use crate::notification::OwnerNotification;
use crate::ports::RegistrationStoreError;
use crate::retry::{RetryPolicy, retry_if};
use crate::types::{Event, EventId, Registration, RegistrationId, UserId};
use std::fmt;

/// Outcome of a single check-then-act attempt.
///
/// Splits the one retryable signal (a lost commit race) from everything
/// final, so the retry predicate cannot accidentally replay a business
/// failure.
#[derive(Debug)]
enum AttemptError {
    /// Final answer; surfaced to the caller as-is.
    Fatal(ReserveError),
    /// The conditional commit lost a race; the attempt is worth re-running.
    Conflict {
        /// Count the attempt based its checks on
        expected: u32,
        /// Count the store actually held
        actual: u32,
    },
}

impl AttemptError {
    const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal(err) => write!(f, "{err}"),
            Self::Conflict { expected, actual } => {
                write!(f, "commit conflict: expected count {expected}, found {actual}")
            }
        }
    }
}

/// The reservation orchestrator.
///
/// Holds the injected ports and the conflict-retry policy; construct one per
/// service and share it freely. All methods take `&self` and the ports are
/// `Arc`s.
#[derive(Clone)]
pub struct SeatReservations {
    env: ReservationEnvironment,
    retry: RetryPolicy,
}

impl SeatReservations {
    /// Creates a new `SeatReservations` service.
    #[must_use]
    pub fn new(env: ReservationEnvironment, config: &ReservationConfig) -> Self {
        Self {
            env,
            retry: RetryPolicy::from(config),
        }
    }

    /// Registers `registrant` for one seat of `event_id`.
    ///
    /// On success exactly one registration has been persisted and, if the
    /// event's owner resolves, one notification delivery was attempted. On
    /// any failure nothing was persisted and nothing was sent.
    ///
    /// # Errors
    ///
    /// - [`ReserveError::EventNotFound`] if the event id does not resolve
    /// - [`ReserveError::AlreadyRegistered`] if the registrant already holds
    ///   a seat for this event
    /// - [`ReserveError::CapacityExceeded`] if no seats remain
    /// - [`ReserveError::ConflictRetriesExhausted`] if commit races kept
    ///   being lost past the configured retry budget
    /// - [`ReserveError::Storage`] if a storage backend fails outright
    pub async fn reserve_seat(
        &self,
        event_id: EventId,
        registrant: UserId,
    ) -> Result<(), ReserveError> {
        tracing::debug!(%event_id, %registrant, "reservation requested");

        let event = self
            .env
            .event_store
            .get(event_id)
            .await
            .map_err(|err| ReserveError::Storage(err.to_string()))?
            .ok_or(ReserveError::EventNotFound { event_id })?;

        let count_before = retry_if(
            &self.retry,
            || self.attempt(&event, registrant),
            AttemptError::is_conflict,
        )
        .await
        .map_err(|err| match err {
            AttemptError::Fatal(err) => err,
            AttemptError::Conflict { .. } => ReserveError::ConflictRetriesExhausted {
                attempts: self.retry.max_attempts(),
            },
        })?;

        tracing::info!(
            %event_id,
            %registrant,
            seats_left = event.remaining(count_before + 1),
            "registration committed"
        );

        self.notify_owner(&event, count_before).await;
        Ok(())
    }

    /// One check-then-act pass: read, validate, conditionally commit.
    ///
    /// Returns the registration count observed *before* the commit; the
    /// notification content is derived from it.
    async fn attempt(&self, event: &Event, registrant: UserId) -> Result<u32, AttemptError> {
        let existing = self
            .env
            .registrations
            .list_by_event(event.id)
            .await
            .map_err(|err| AttemptError::Fatal(ReserveError::Storage(err.to_string())))?;

        if existing.iter().any(|r| r.is_held_by(&registrant)) {
            tracing::debug!(event_id = %event.id, %registrant, "duplicate registration rejected");
            return Err(AttemptError::Fatal(ReserveError::AlreadyRegistered {
                event_id: event.id,
                registrant,
            }));
        }

        let count = u32::try_from(existing.len())
            .map_err(|_| AttemptError::Fatal(ReserveError::Storage(
                "registration count exceeds u32".to_string(),
            )))?;

        if !event.has_capacity(count) {
            tracing::warn!(
                event_id = %event.id,
                %registrant,
                capacity = %event.seats,
                "no seats remaining"
            );
            return Err(AttemptError::Fatal(ReserveError::CapacityExceeded {
                event_id: event.id,
                seats: event.seats,
            }));
        }

        let registration = Registration::new(
            RegistrationId::new(),
            event.id,
            registrant,
            self.env.clock.now(),
        );

        match self.env.registrations.save(registration, Some(count)).await {
            Ok(()) => Ok(count),
            Err(RegistrationStoreError::ConcurrencyConflict {
                expected, actual, ..
            }) => Err(AttemptError::Conflict { expected, actual }),
            // A racing caller inserted the same pair between our read and the
            // commit; to the registrant this is the same final answer.
            Err(RegistrationStoreError::Duplicate {
                event_id,
                registrant,
            }) => Err(AttemptError::Fatal(ReserveError::AlreadyRegistered {
                event_id,
                registrant,
            })),
            Err(err @ RegistrationStoreError::Backend(_)) => {
                Err(AttemptError::Fatal(ReserveError::Storage(err.to_string())))
            }
        }
    }

    /// Resolves the owner and sends the registration notice.
    ///
    /// Nothing here can fail the reservation: an unresolved owner skips the
    /// notification silently, and a delivery failure is logged and dropped.
    async fn notify_owner(&self, event: &Event, count_before: u32) {
        let owner = match self.env.identity.get(event.owner).await {
            Ok(Some(owner)) => owner,
            Ok(None) => {
                tracing::debug!(
                    event_id = %event.id,
                    owner = %event.owner,
                    "owner not found, skipping notification"
                );
                return;
            }
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    owner = %event.owner,
                    error = %err,
                    "owner lookup failed, skipping notification"
                );
                return;
            }
        };

        let notice =
            OwnerNotification::registration_committed(event, event.remaining(count_before + 1));

        if let Err(err) = self
            .env
            .notifier
            .send(&owner.email, &notice.subject, &notice.body)
            .await
        {
            tracing::warn!(
                event_id = %event.id,
                error = %err,
                "owner notification failed; registration unaffected"
            );
        }
    }
}
