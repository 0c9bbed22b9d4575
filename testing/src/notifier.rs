//! Notifier doubles.

use seatwise_core::ports::{Notifier, NotifyError, PortFuture};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// Delivery address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

/// Notifier that records every delivery instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingNotifier {
    /// Create a notifier with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Number of deliveries so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }
}

impl Notifier for RecordingNotifier {
    fn send<'a>(
        &'a self,
        to: &'a str,
        subject: &'a str,
        body: &'a str,
    ) -> PortFuture<'a, Result<(), NotifyError>> {
        let sent = Arc::clone(&self.sent);
        let notification = SentNotification {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        Box::pin(async move {
            sent.lock()
                .map_err(|_| NotifyError::Delivery("poisoned lock".to_string()))?
                .push(notification);
            Ok(())
        })
    }
}

/// Notifier whose transport always fails.
///
/// Counts the attempts so tests can assert a delivery was tried even though
/// it never lands.
#[derive(Debug, Clone, Default)]
pub struct FailingNotifier {
    attempts: Arc<AtomicUsize>,
}

impl FailingNotifier {
    /// Create a failing notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deliveries attempted against this notifier.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Notifier for FailingNotifier {
    fn send<'a>(
        &'a self,
        _to: &'a str,
        _subject: &'a str,
        _body: &'a str,
    ) -> PortFuture<'a, Result<(), NotifyError>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        Box::pin(async move { Err(NotifyError::Delivery("transport down".to_string())) })
    }
}
