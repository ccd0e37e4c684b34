//! Food inventory domain module.
//!
//! This crate contains the item model and the expiry rules, implemented purely
//! as deterministic domain logic (no IO, no clock, no storage). Callers pass
//! "today" in explicitly.

pub mod expiry;
pub mod item;

pub use expiry::{
    ExpiryAlert, ExpiryReport, ExpiryStatus, UpcomingItem, UpcomingWindow, classify,
    days_until_expiry, extends_expiry, find_expired, find_upcoming,
};
pub use item::{AddItem, DeleteItem, FoodItem, ItemName, RenameItem, UpdateExpiry};
