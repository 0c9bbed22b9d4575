//! Capability ports consumed by the reservation core.
//!
//! Every external collaborator (event storage, registration storage,
//! identity lookup, notification delivery) is reached through one of these
//! traits. Implementations are injected at construction via
//! [`ReservationEnvironment`](crate::environment::ReservationEnvironment),
//! which keeps the core substitutable for testing without any global state.
//!
//! # Dyn Compatibility
//!
//! All port methods return explicit `Pin<Box<dyn Future>>` instead of
//! `async fn` so the traits stay dyn-compatible and can be held as
//! `Arc<dyn Port>` inside the environment.

mod event_store;
mod identity;
mod notifier;
mod registration_store;

pub use event_store::{EventStore, EventStoreError};
pub use identity::{IdentityError, IdentityStore};
pub use notifier::{Notifier, NotifyError};
pub use registration_store::{RegistrationStore, RegistrationStoreError};

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by port methods.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
