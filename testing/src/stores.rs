//! In-memory store implementations.
//!
//! The registration store is the interesting one: it implements the
//! conditional-insert contract (duplicate and count checks inside the same
//! mutex acquisition as the insert) so concurrency tests exercise the exact
//! semantics a transactional backend would provide.

use seatwise_core::ports::{
    EventStore, EventStoreError, IdentityError, IdentityStore, PortFuture, RegistrationStore,
    RegistrationStoreError,
};
use seatwise_core::types::{Event, EventId, Registration, User, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory event store.
///
/// Events are seeded through [`InMemoryEventStore::insert`]; the reservation
/// core itself never writes events.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<Mutex<HashMap<EventId, Event>>>,
}

impl InMemoryEventStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event, replacing any previous snapshot with the same id.
    pub fn insert(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.insert(event.id, event);
        }
    }
}

impl EventStore for InMemoryEventStore {
    fn get(&self, event_id: EventId) -> PortFuture<'_, Result<Option<Event>, EventStoreError>> {
        let events = Arc::clone(&self.events);

        Box::pin(async move {
            let events = events
                .lock()
                .map_err(|_| EventStoreError::Backend("poisoned lock".to_string()))?;
            Ok(events.get(&event_id).cloned())
        })
    }
}

/// In-memory registration store with atomic conditional inserts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrationStore {
    rows: Arc<Mutex<HashMap<EventId, Vec<Registration>>>>,
}

impl InMemoryRegistrationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations currently committed for `event_id`.
    #[must_use]
    pub fn count(&self, event_id: EventId) -> usize {
        self.rows
            .lock()
            .map(|rows| rows.get(&event_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Snapshot of the registrations committed for `event_id`.
    #[must_use]
    pub fn snapshot(&self, event_id: EventId) -> Vec<Registration> {
        self.rows
            .lock()
            .map(|rows| rows.get(&event_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl RegistrationStore for InMemoryRegistrationStore {
    fn list_by_event(
        &self,
        event_id: EventId,
    ) -> PortFuture<'_, Result<Vec<Registration>, RegistrationStoreError>> {
        let rows = Arc::clone(&self.rows);

        Box::pin(async move {
            let rows = rows
                .lock()
                .map_err(|_| RegistrationStoreError::Backend("poisoned lock".to_string()))?;
            Ok(rows.get(&event_id).cloned().unwrap_or_default())
        })
    }

    fn save(
        &self,
        registration: Registration,
        expected_count: Option<u32>,
    ) -> PortFuture<'_, Result<(), RegistrationStoreError>> {
        let rows = Arc::clone(&self.rows);

        Box::pin(async move {
            // One lock acquisition covers every check and the insert; this is
            // the atomicity the port contract demands.
            let mut rows = rows
                .lock()
                .map_err(|_| RegistrationStoreError::Backend("poisoned lock".to_string()))?;
            let registrations = rows.entry(registration.event_id).or_default();

            if registrations
                .iter()
                .any(|existing| existing.registrant == registration.registrant)
            {
                return Err(RegistrationStoreError::Duplicate {
                    event_id: registration.event_id,
                    registrant: registration.registrant,
                });
            }

            if let Some(expected) = expected_count {
                let actual = u32::try_from(registrations.len()).map_err(|_| {
                    RegistrationStoreError::Backend("registration count exceeds u32".to_string())
                })?;
                if actual != expected {
                    return Err(RegistrationStoreError::ConcurrencyConflict {
                        event_id: registration.event_id,
                        expected,
                        actual,
                    });
                }
            }

            registrations.push(registration);
            Ok(())
        })
    }
}

/// Registration store that loses its first `n` commit races on purpose.
///
/// Wraps an [`InMemoryRegistrationStore`] and answers the first `n` `save`
/// calls with a fabricated [`RegistrationStoreError::ConcurrencyConflict`],
/// then behaves normally. Lets tests drive the orchestrator's retry path
/// without real contention.
#[derive(Debug, Clone)]
pub struct FlakyRegistrationStore {
    inner: InMemoryRegistrationStore,
    conflicts_left: Arc<AtomicUsize>,
}

impl FlakyRegistrationStore {
    /// Create a store that conflicts on the first `conflicts` saves.
    #[must_use]
    pub fn conflicting_times(inner: InMemoryRegistrationStore, conflicts: usize) -> Self {
        Self {
            inner,
            conflicts_left: Arc::new(AtomicUsize::new(conflicts)),
        }
    }
}

impl RegistrationStore for FlakyRegistrationStore {
    fn list_by_event(
        &self,
        event_id: EventId,
    ) -> PortFuture<'_, Result<Vec<Registration>, RegistrationStoreError>> {
        self.inner.list_by_event(event_id)
    }

    fn save(
        &self,
        registration: Registration,
        expected_count: Option<u32>,
    ) -> PortFuture<'_, Result<(), RegistrationStoreError>> {
        let inject = self
            .conflicts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                left.checked_sub(1)
            })
            .is_ok();

        if inject {
            let expected = expected_count.unwrap_or(0);
            return Box::pin(async move {
                Err(RegistrationStoreError::ConcurrencyConflict {
                    event_id: registration.event_id,
                    expected,
                    actual: expected + 1,
                })
            });
        }

        self.inner.save(registration, expected_count)
    }
}

/// In-memory identity store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryIdentityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user.
    pub fn insert(&self, user: User) {
        if let Ok(mut users) = self.users.lock() {
            users.insert(user.id, user);
        }
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn get(&self, user_id: UserId) -> PortFuture<'_, Result<Option<User>, IdentityError>> {
        let users = Arc::clone(&self.users);

        Box::pin(async move {
            let users = users
                .lock()
                .map_err(|_| IdentityError::Backend("poisoned lock".to_string()))?;
            Ok(users.get(&user_id).cloned())
        })
    }
}
