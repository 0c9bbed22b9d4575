//! Owner notification content.
//!
//! Composing the message is separated from delivering it so the content can
//! be asserted on without a transport in the way.

use crate::types::Event;

/// Subject and body of the message sent to an event owner after a successful
/// registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerNotification {
    /// Message subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

impl OwnerNotification {
    /// Composes the notice for a registration that just committed.
    ///
    /// `remaining` is the seat count left *after* the new registration, i.e.
    /// `seats - count_before - 1`.
    #[must_use]
    pub fn registration_committed(event: &Event, remaining: u32) -> Self {
        Self {
            subject: format!("New registration for {}", event.title),
            body: format!(
                "A new attendee registered for \"{}\". {remaining} seats remaining.",
                event.title
            ),
        }
    }
}
