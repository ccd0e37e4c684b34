//! `shelflife-cli`
//!
//! **Responsibility:** the user-facing boundary of the food inventory.
//!
//! This crate provides:
//! - Command handlers that validate input, call the store, and turn every
//!   failure into a readable message
//! - Expiry checks that raise one alert per expired or soon-expiring item
//! - The `shelflife` command-line front end
//!
//! Handlers receive their store and notifier through [`AppState`]; nothing
//! here holds a process-wide connection.

pub mod cli;
pub mod commands;
pub mod types;

pub use cli::{Cli, Command, WindowPreset, run};
pub use commands::AppState;
pub use types::{FoodItemView, TodayView};
