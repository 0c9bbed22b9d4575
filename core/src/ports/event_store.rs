//! Event store port.

use super::PortFuture;
use crate::types::{Event, EventId};
use thiserror::Error;

/// Errors that can occur while reading events from storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventStoreError {
    /// The storage backend failed (connection, query, corruption).
    #[error("event store backend error: {0}")]
    Backend(String),
}

/// Read-only access to persisted events.
///
/// The reservation core only ever performs point lookups; event creation and
/// editing belong to the event-management flow and are not part of this
/// contract. A missing event is `Ok(None)`, not an error; the orchestrator
/// turns it into its own failure kind.
pub trait EventStore: Send + Sync {
    /// Load an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::Backend`] if the lookup itself fails.
    fn get(&self, event_id: EventId) -> PortFuture<'_, Result<Option<Event>, EventStoreError>>;
}
