//! Command-line front end.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use shelflife_infra::AppConfig;
use shelflife_inventory::{ExpiryReport, UpcomingWindow};
use shelflife_observability::LogFormat;

use crate::commands::{self, AppState};
use crate::types::FoodItemView;

#[derive(Debug, Parser)]
#[command(name = "shelflife")]
#[command(about = "Track food expiry dates (dates in the Jalali calendar, YYYY/M/D)")]
pub struct Cli {
    /// SQLite database URL (overrides SHELFLIFE_DATABASE_URL)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Days-until-expiry range that counts as "expiring soon"
    #[arg(
        long,
        global = true,
        num_args = 2,
        value_names = ["LOW", "HIGH"],
        allow_negative_numbers = true
    )]
    pub window: Option<Vec<i64>>,

    /// Log format: json or pretty (overrides SHELFLIFE_LOG_FORMAT)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add an item
    Add {
        name: String,
        /// Expiry date, e.g. 1402/5/16
        expiry_date: String,
    },

    /// List all items
    List {
        #[arg(long)]
        json: bool,
    },

    /// Rename an item
    Rename { current: String, new_name: String },

    /// Change an item's expiry date
    SetExpiry {
        name: String,
        /// New expiry date, e.g. 1402/5/16
        expiry_date: String,
    },

    /// Delete an item
    Delete { name: String },

    /// Alert on expired items and items expiring soon
    Check {
        #[arg(long)]
        json: bool,

        /// Use a preset upcoming window instead of the configured one
        #[arg(long, value_enum)]
        preset: Option<WindowPreset>,
    },

    /// Show today's date in both calendars
    Today,
}

/// Upcoming windows offered without spelling out `--window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowPreset {
    /// 7 to 15 days
    Soon,
    /// 15 to 30 days
    Later,
}

impl WindowPreset {
    pub fn window(self) -> UpcomingWindow {
        match self {
            WindowPreset::Soon => UpcomingWindow::SOON,
            WindowPreset::Later => UpcomingWindow::LATER,
        }
    }
}

impl Cli {
    /// Apply command-line flags on top of the environment configuration.
    pub fn apply_overrides(&self, mut config: AppConfig) -> Result<AppConfig, String> {
        if let Some(database) = &self.database {
            config.database_url = database.clone();
        }
        if let Some(window) = &self.window {
            let &[low, high] = window.as_slice() else {
                return Err("--window takes exactly two values: LOW HIGH".to_string());
            };
            config.window = UpcomingWindow::new(low, high).map_err(|err| err.to_string())?;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

/// Execute one command and return the text to print on success.
pub async fn run(command: Command, state: &AppState, today: NaiveDate) -> Result<String, String> {
    match command {
        Command::Add { name, expiry_date } => {
            commands::add_item(state, &name, &expiry_date).await
        }
        Command::List { json } => {
            let items = commands::list_items(state, today).await?;
            if json {
                to_json(&items)
            } else {
                Ok(render_table(&items))
            }
        }
        Command::Rename { current, new_name } => {
            commands::rename_item(state, &current, &new_name).await
        }
        Command::SetExpiry { name, expiry_date } => {
            commands::update_expiry(state, &name, &expiry_date, today).await
        }
        Command::Delete { name } => commands::delete_item(state, &name).await,
        Command::Check { json, preset } => {
            let window = preset.map_or(state.window, WindowPreset::window);
            let report = commands::check_expiry_within(state, today, window).await?;
            if json {
                to_json(&report)
            } else {
                Ok(summarize(&report))
            }
        }
        Command::Today => {
            let view = commands::today(today)?;
            Ok(format!("{} ({})", view.jalali, view.gregorian))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("could not encode output: {err}"))
}

fn render_table(items: &[FoodItemView]) -> String {
    if items.is_empty() {
        return "No items.".to_string();
    }

    let name_width = items
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut lines = vec![format!(
        "{:<4} {:<name_width$} {:<10} {:<10} STATUS",
        "ID", "NAME", "EXPIRES", "GREGORIAN"
    )];
    for item in items {
        lines.push(format!(
            "{:<4} {:<name_width$} {:<10} {:<10} {}",
            item.id.to_string(),
            item.name,
            item.expiry_date.to_string(),
            item.expiry_gregorian.to_string(),
            item.status_label()
        ));
    }
    lines.join("\n")
}

fn summarize(report: &ExpiryReport) -> String {
    if report.is_empty() {
        return "Nothing expired or expiring soon.".to_string();
    }
    format!(
        "{} expired, {} expiring within {}..={} days.",
        report.expired.len(),
        report.upcoming.len(),
        report.window.low(),
        report.window.high()
    )
}
