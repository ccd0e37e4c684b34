//! Infrastructure layer: persistence, configuration, alert delivery.

pub mod config;
pub mod notify;
pub mod store;

pub use config::AppConfig;
pub use notify::{ConsoleNotifier, Notification, Notifier, RecordingNotifier};
pub use store::{InMemoryInventoryStore, InventoryStore, SqliteInventoryStore, StoreError};
