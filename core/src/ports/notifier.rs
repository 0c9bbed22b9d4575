//! Notifier port.

use super::PortFuture;
use thiserror::Error;

/// Errors that can occur while delivering a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The transport rejected or failed to deliver the message.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Outbound notification delivery.
///
/// Fire-and-forget from the core's perspective: a delivery failure is logged
/// by the caller and never propagates to the reservation outcome. This trait
/// abstracts over whatever transport the host wires in (email, chat, push).
pub trait Notifier: Send + Sync {
    /// Deliver a message to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Delivery`] if the transport fails; callers on
    /// the reservation path swallow this after logging it.
    fn send<'a>(
        &'a self,
        to: &'a str,
        subject: &'a str,
        body: &'a str,
    ) -> PortFuture<'a, Result<(), NotifyError>>;
}
