//! Identity store port.

use super::PortFuture;
use crate::types::{User, UserId};
use thiserror::Error;

/// Errors that can occur while resolving users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The storage backend failed (connection, query, corruption).
    #[error("identity store backend error: {0}")]
    Backend(String),
}

/// Read-only lookup of user identities.
///
/// Authentication happens before the core is ever invoked; this port only
/// resolves an id to a notification address. An unknown user is `Ok(None)`,
/// and for the notification step that simply means the notification is
/// skipped.
pub trait IdentityStore: Send + Sync {
    /// Resolve a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Backend`] if the lookup itself fails.
    fn get(&self, user_id: UserId) -> PortFuture<'_, Result<Option<User>, IdentityError>>;
}
