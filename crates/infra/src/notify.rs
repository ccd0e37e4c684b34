//! Alert delivery.
//!
//! Fire-and-forget: a notifier never reports success or failure back to the
//! caller.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use shelflife_inventory::ExpiryAlert;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub source: String,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn from_alert(alert: &ExpiryAlert, source: &str) -> Self {
        Self::new(alert.title(), alert.message(), source)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// Prints each alert on stderr and records it in the log. Stdout stays free
/// for command output such as `--json` reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::info!(
            title = %notification.title,
            source = %notification.source,
            "{}",
            notification.message
        );
        eprintln!(
            "[{}] {}: {}",
            notification.source, notification.title, notification.message
        );
    }
}

/// Keeps every notification in memory (tests/dev).
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        let mut sent = match self.sent.lock() {
            Ok(sent) => sent,
            Err(poisoned) => poisoned.into_inner(),
        };
        sent.push(notification.clone());
    }
}
