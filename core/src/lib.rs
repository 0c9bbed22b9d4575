//! # Seatwise Core
//!
//! The seat-reservation core for capacity-constrained event registration.
//!
//! A fixed-capacity [`Event`](types::Event) accepts registrants up to its
//! seat limit, rejects duplicates, and notifies its owner on each successful
//! registration. The hard part is not the data model: it is keeping the
//! capacity invariant ("never more committed registrations than seats")
//! intact while independent callers race through
//! [`reserve_seat`](reservation::SeatReservations::reserve_seat).
//!
//! ## Architecture
//!
//! - **Entities** ([`types`]): immutable value snapshots. The core never
//!   mutates a persisted event; registrations are written once.
//! - **Ports** ([`ports`]): every external collaborator (event storage,
//!   registration storage, identity lookup, notification delivery) is a
//!   capability trait injected through a
//!   [`ReservationEnvironment`](environment::ReservationEnvironment).
//! - **Orchestrator** ([`reservation`]): the one operation with cross-cutting
//!   invariants, built on an optimistic conditional commit with bounded
//!   conflict retries ([`retry`]).
//!
//! ## Example
//!
//! ```ignore
//! use seatwise_core::{ReservationEnvironment, SeatReservations, SystemClock};
//! use seatwise_core::config::ReservationConfig;
//! use std::sync::Arc;
//!
//! let env = ReservationEnvironment::new(
//!     Arc::new(SystemClock),
//!     event_store,
//!     registration_store,
//!     identity_store,
//!     notifier,
//! );
//! let reservations = SeatReservations::new(env, &ReservationConfig::from_env());
//!
//! reservations.reserve_seat(event_id, registrant).await?;
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod config;
pub mod environment;
pub mod error;
pub mod notification;
pub mod ports;
pub mod reservation;
pub mod retry;
pub mod types;

pub use environment::{Clock, ReservationEnvironment, SystemClock};
pub use error::ReserveError;
pub use reservation::SeatReservations;
