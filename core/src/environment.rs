//! Dependency injection for the reservation core.
//!
//! All external collaborators are abstracted behind traits and handed to the
//! orchestrator in one bundle at construction time.

use crate::ports::{EventStore, IdentityStore, Notifier, RegistrationStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability
///
/// Production code uses [`SystemClock`]; tests pin time with a fixed clock so
/// registration timestamps are deterministic.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Environment dependencies for the reservation orchestrator.
///
/// The registration store is the single shared mutable resource; the event
/// store and identity store are read-only, and the notifier is
/// side-effect-only.
#[derive(Clone)]
pub struct ReservationEnvironment {
    /// Clock for registration timestamps
    pub clock: Arc<dyn Clock>,
    /// Point lookup of events
    pub event_store: Arc<dyn EventStore>,
    /// Listing and conditional insertion of registrations
    pub registrations: Arc<dyn RegistrationStore>,
    /// Owner resolution for notifications
    pub identity: Arc<dyn IdentityStore>,
    /// Outbound notification delivery
    pub notifier: Arc<dyn Notifier>,
}

impl ReservationEnvironment {
    /// Creates a new `ReservationEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        event_store: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        identity: Arc<dyn IdentityStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clock,
            event_store,
            registrations,
            identity,
            notifier,
        }
    }
}
