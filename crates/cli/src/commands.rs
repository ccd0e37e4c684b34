//! Boundary handlers.
//!
//! Each handler validates raw input, performs at most one store mutation, and
//! returns either a confirmation or a message meant for the user. Missing and
//! duplicate names are reported here; the store itself treats them as no-ops.
//! A duplicate add is not a failure: the inventory already holds the item.

use std::sync::Arc;

use chrono::NaiveDate;

use shelflife_calendar::from_gregorian;
use shelflife_core::DomainError;
use shelflife_infra::{InventoryStore, Notification, Notifier, StoreError};
use shelflife_inventory::{
    AddItem, DeleteItem, ExpiryAlert, ExpiryReport, ItemName, RenameItem, UpcomingWindow,
    UpdateExpiry, extends_expiry,
};

use crate::types::{FoodItemView, TodayView};

/// Everything a handler needs, injected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub notifier: Arc<dyn Notifier>,
    pub window: UpcomingWindow,
    pub alert_source: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        notifier: Arc<dyn Notifier>,
        window: UpcomingWindow,
        alert_source: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            window,
            alert_source: alert_source.into(),
        }
    }
}

fn invalid(err: DomainError) -> String {
    err.to_string()
}

fn storage(err: StoreError) -> String {
    tracing::error!("inventory store failed: {err:?}");
    format!("could not access the inventory: {err}")
}

/// Add an item.
pub async fn add_item(state: &AppState, name: &str, expiry_date: &str) -> Result<String, String> {
    let cmd = AddItem::parse(name, expiry_date).map_err(invalid)?;

    let added = state
        .store
        .add_item(&cmd.name, cmd.expiry_date)
        .await
        .map_err(storage)?;
    if !added {
        tracing::info!(name = %cmd.name, "item already present; add ignored");
        return Ok(format!(
            "An item named {:?} already exists; nothing was added.",
            cmd.name.as_str()
        ));
    }

    tracing::info!(name = %cmd.name, expiry_date = %cmd.expiry_date, "item added");
    Ok(format!("Added {} (expires {}).", cmd.name, cmd.expiry_date))
}

/// List every item with its status relative to `today`.
pub async fn list_items(state: &AppState, today: NaiveDate) -> Result<Vec<FoodItemView>, String> {
    let items = state.store.list_items().await.map_err(storage)?;
    Ok(items
        .iter()
        .map(|item| FoodItemView::new(item, today, state.window))
        .collect())
}

/// Rename the item currently called `current`.
pub async fn rename_item(state: &AppState, current: &str, new_name: &str) -> Result<String, String> {
    let cmd = RenameItem::parse(current, new_name).map_err(invalid)?;

    let renamed = state
        .store
        .rename_item(&cmd.current, &cmd.new_name)
        .await
        .map_err(storage)?;
    if !renamed {
        let message = if exists(state, &cmd.current).await? {
            format!("an item named {:?} already exists", cmd.new_name.as_str())
        } else {
            missing(&cmd.current)
        };
        return Err(invalid(DomainError::validation(message)));
    }

    tracing::info!(from = %cmd.current, to = %cmd.new_name, "item renamed");
    Ok(format!("Renamed {} to {}.", cmd.current, cmd.new_name))
}

/// Replace the expiry date of an item.
///
/// Dates are expected to move later. An earlier or unchanged date is still
/// written, but the confirmation carries a warning. Moving the date to a later
/// day that is still ahead of `today` raises a notification.
pub async fn update_expiry(
    state: &AppState,
    name: &str,
    expiry_date: &str,
    today: NaiveDate,
) -> Result<String, String> {
    let cmd = UpdateExpiry::parse(name, expiry_date).map_err(invalid)?;

    let Some(mut item) = state.store.get_item(&cmd.name).await.map_err(storage)? else {
        return Err(invalid(DomainError::validation(missing(&cmd.name))));
    };
    let previous = item.expiry_date();

    let updated = state
        .store
        .update_expiry(&cmd.name, cmd.expiry_date)
        .await
        .map_err(storage)?;
    if !updated {
        return Err(invalid(DomainError::validation(missing(&cmd.name))));
    }

    if !extends_expiry(&item, cmd.expiry_date) {
        tracing::warn!(
            name = %cmd.name,
            previous = %previous,
            expiry_date = %cmd.expiry_date,
            "expiry date did not move later"
        );
        return Ok(format!(
            "{} now expires {}. Warning: new expiry date must be after the current date ({}).",
            cmd.name, cmd.expiry_date, previous
        ));
    }

    tracing::info!(name = %cmd.name, expiry_date = %cmd.expiry_date, "expiry updated");
    item.set_expiry_date(cmd.expiry_date);
    if item.expiry_gregorian() > today {
        state.notifier.notify(&Notification::from_alert(
            &ExpiryAlert::Rescheduled(item),
            &state.alert_source,
        ));
    }
    Ok(format!("{} now expires {}.", cmd.name, cmd.expiry_date))
}

/// Delete an item.
pub async fn delete_item(state: &AppState, name: &str) -> Result<String, String> {
    let cmd = DeleteItem::parse(name).map_err(invalid)?;

    let deleted = state.store.delete_item(&cmd.name).await.map_err(storage)?;
    if !deleted {
        return Err(invalid(DomainError::validation(missing(&cmd.name))));
    }

    tracing::info!(name = %cmd.name, "item deleted");
    Ok(format!("Deleted {}.", cmd.name))
}

/// Evaluate a fresh read of the inventory and raise one alert per expired or
/// soon-expiring item.
pub async fn check_expiry(state: &AppState, today: NaiveDate) -> Result<ExpiryReport, String> {
    check_expiry_within(state, today, state.window).await
}

/// [`check_expiry`] with an explicit upcoming window instead of the configured one.
pub async fn check_expiry_within(
    state: &AppState,
    today: NaiveDate,
    window: UpcomingWindow,
) -> Result<ExpiryReport, String> {
    let items = state.store.list_items().await.map_err(storage)?;
    let report = ExpiryReport::evaluate(&items, today, window);

    for alert in report.alerts() {
        state
            .notifier
            .notify(&Notification::from_alert(&alert, &state.alert_source));
    }

    tracing::info!(
        expired = report.expired.len(),
        upcoming = report.upcoming.len(),
        "expiry check finished"
    );
    Ok(report)
}

/// Today's date in both calendars.
pub fn today(today: NaiveDate) -> Result<TodayView, String> {
    let jalali = from_gregorian(today).map_err(|err| invalid(err.into()))?;
    Ok(TodayView {
        jalali,
        gregorian: today,
    })
}

async fn exists(state: &AppState, name: &ItemName) -> Result<bool, String> {
    Ok(state.store.get_item(name).await.map_err(storage)?.is_some())
}

fn missing(name: &ItemName) -> String {
    format!("no item named {:?}", name.as_str())
}
