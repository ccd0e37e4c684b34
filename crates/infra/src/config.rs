//! Configuration loading and representation.
//!
//! Every setting comes from an environment variable with a default. A value
//! that fails to parse is replaced by the default rather than aborting
//! startup; the fallback is kept in `warnings` so it can be logged once the
//! subscriber (whose format is itself configured here) is running.

use std::path::PathBuf;

use serde::Serialize;

use shelflife_inventory::UpcomingWindow;
use shelflife_observability::LogFormat;

pub const DATABASE_URL_VAR: &str = "SHELFLIFE_DATABASE_URL";
pub const UPCOMING_LOW_VAR: &str = "SHELFLIFE_UPCOMING_LOW";
pub const UPCOMING_HIGH_VAR: &str = "SHELFLIFE_UPCOMING_HIGH";
pub const LOG_FORMAT_VAR: &str = "SHELFLIFE_LOG_FORMAT";
pub const ALERT_SOURCE_VAR: &str = "SHELFLIFE_ALERT_SOURCE";

pub const DEFAULT_ALERT_SOURCE: &str = "shelflife";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub database_url: String,
    pub window: UpcomingWindow,
    pub log_format: LogFormat,
    /// `sourceLabel` attached to every alert.
    pub alert_source: String,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut warnings = Vec::new();

        let database_url = get(DATABASE_URL_VAR).unwrap_or_else(default_database_url);

        let low = parse_or(
            get(UPCOMING_LOW_VAR),
            UPCOMING_LOW_VAR,
            UpcomingWindow::DEFAULT_LOW,
            &mut warnings,
        );
        let high = parse_or(
            get(UPCOMING_HIGH_VAR),
            UPCOMING_HIGH_VAR,
            UpcomingWindow::DEFAULT_HIGH,
            &mut warnings,
        );
        let window = UpcomingWindow::new(low, high).unwrap_or_else(|err| {
            warnings.push(format!(
                "invalid upcoming window {low}..={high} ({err}); using default"
            ));
            UpcomingWindow::default()
        });

        let log_format = parse_or(
            get(LOG_FORMAT_VAR),
            LOG_FORMAT_VAR,
            LogFormat::default(),
            &mut warnings,
        );

        let alert_source =
            get(ALERT_SOURCE_VAR).unwrap_or_else(|| DEFAULT_ALERT_SOURCE.to_string());

        Self {
            database_url,
            window,
            log_format,
            alert_source,
            warnings,
        }
    }

    /// Emit the fallbacks taken while loading; call after logging is set up.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T, warnings: &mut Vec<String>) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warnings.push(format!("ignoring invalid {key}={raw:?}: {err}"));
            default
        }),
    }
}

/// `sqlite://{app_data_dir}/shelflife/inventory.db`.
pub fn default_database_url() -> String {
    format!("sqlite://{}", default_database_path().display())
}

fn default_database_path() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .unwrap_or_else(|| {
            tracing::warn!("no app data directory found; using the current directory");
            PathBuf::from(".")
        });

    base.join("shelflife").join("inventory.db")
}
