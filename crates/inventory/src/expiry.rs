//! Expiry rules: which items are past their date and which are close to it.
//!
//! All comparisons use Gregorian `NaiveDate` values at calendar-day
//! granularity. An item expiring today counts as expired; the upcoming window
//! only ever sees items that expire strictly after today.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelflife_calendar::JalaliDate;
use shelflife_core::{DomainError, DomainResult};

use crate::item::FoodItem;

/// Inclusive range of days-until-expiry that counts as "expiring soon".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct UpcomingWindow {
    low: i64,
    high: i64,
}

#[derive(Deserialize)]
struct WindowBounds {
    low: i64,
    high: i64,
}

impl TryFrom<WindowBounds> for UpcomingWindow {
    type Error = DomainError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.low, bounds.high)
    }
}

impl UpcomingWindow {
    pub const DEFAULT_LOW: i64 = 7;
    pub const DEFAULT_HIGH: i64 = 15;

    /// Next one to two weeks.
    pub const SOON: Self = Self { low: 7, high: 15 };
    /// Two weeks to a month out.
    pub const LATER: Self = Self { low: 15, high: 30 };

    pub fn new(low: i64, high: i64) -> DomainResult<Self> {
        if low < 0 {
            return Err(DomainError::validation("window start cannot be negative"));
        }
        if low > high {
            return Err(DomainError::validation(format!(
                "window start {low} is after window end {high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn contains(&self, days: i64) -> bool {
        (self.low..=self.high).contains(&days)
    }
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self::SOON
    }
}

/// Where a single item stands relative to today.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ExpiryStatus {
    Expired,
    Upcoming { days_until_expiry: i64 },
    Fresh,
}

/// Whole days from `today` to the item's expiry date (negative once passed).
pub fn days_until_expiry(item: &FoodItem, today: NaiveDate) -> i64 {
    item.expiry_gregorian()
        .signed_duration_since(today)
        .num_days()
}

pub fn classify(item: &FoodItem, today: NaiveDate, window: UpcomingWindow) -> ExpiryStatus {
    if item.expiry_gregorian() <= today {
        return ExpiryStatus::Expired;
    }
    let days = days_until_expiry(item, today);
    if window.contains(days) {
        ExpiryStatus::Upcoming {
            days_until_expiry: days,
        }
    } else {
        ExpiryStatus::Fresh
    }
}

/// Items whose expiry date is on or before `today`, in input order.
pub fn find_expired(items: &[FoodItem], today: NaiveDate) -> Vec<FoodItem> {
    items
        .iter()
        .filter(|item| item.expiry_gregorian() <= today)
        .cloned()
        .collect()
}

/// An item inside the upcoming window, with the raw day count used to select it
/// and the count shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingItem {
    pub item: FoodItem,
    pub days_until_expiry: i64,
    pub days_remaining: i64,
}

impl UpcomingItem {
    pub fn new(item: FoodItem, days_until_expiry: i64) -> Self {
        Self {
            item,
            days_until_expiry,
            days_remaining: ExpiryAlert::displayed_days_remaining(days_until_expiry),
        }
    }
}

/// Items expiring strictly after `today` whose day count falls in `window`.
pub fn find_upcoming(
    items: &[FoodItem],
    today: NaiveDate,
    window: UpcomingWindow,
) -> Vec<UpcomingItem> {
    items
        .iter()
        .filter(|item| item.expiry_gregorian() > today)
        .filter_map(|item| {
            let days = days_until_expiry(item, today);
            window
                .contains(days)
                .then(|| UpcomingItem::new(item.clone(), days))
        })
        .collect()
}

/// Whether moving `item` to `new_date` pushes its expiry later.
///
/// Expiry dates are expected to move forward only; an earlier or unchanged
/// date is still accepted but should be flagged to the user.
pub fn extends_expiry(item: &FoodItem, new_date: JalaliDate) -> bool {
    new_date.to_gregorian() > item.expiry_gregorian()
}

/// User-facing alert for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryAlert {
    Expired(FoodItem),
    Upcoming(UpcomingItem),
    /// The item's expiry date was moved to a later day that is still ahead.
    Rescheduled(FoodItem),
}

impl ExpiryAlert {
    pub fn title(&self) -> &'static str {
        match self {
            ExpiryAlert::Expired(_) => "Expired food",
            ExpiryAlert::Upcoming(_) => "Food expiring soon",
            ExpiryAlert::Rescheduled(_) => "Expiry date updated",
        }
    }

    /// Days remaining as shown to the user.
    ///
    /// One more than the day count used for filtering; kept as-is because
    /// users already read the messages this way.
    pub fn displayed_days_remaining(days_until_expiry: i64) -> i64 {
        days_until_expiry + 1
    }

    pub fn message(&self) -> String {
        match self {
            ExpiryAlert::Expired(item) => {
                format!("{} expired on {}.", item.name(), item.expiry_date())
            }
            ExpiryAlert::Upcoming(upcoming) => {
                let days = upcoming.days_remaining;
                let unit = if days == 1 { "day" } else { "days" };
                format!(
                    "{} expires in {} {} ({}).",
                    upcoming.item.name(),
                    days,
                    unit,
                    upcoming.item.expiry_date()
                )
            }
            ExpiryAlert::Rescheduled(item) => {
                format!("{} now expires on {}.", item.name(), item.expiry_date())
            }
        }
    }
}

/// Result of one evaluation pass over the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryReport {
    pub today: NaiveDate,
    pub window: UpcomingWindow,
    pub expired: Vec<FoodItem>,
    pub upcoming: Vec<UpcomingItem>,
}

impl ExpiryReport {
    pub fn evaluate(items: &[FoodItem], today: NaiveDate, window: UpcomingWindow) -> Self {
        Self {
            today,
            window,
            expired: find_expired(items, today),
            upcoming: find_upcoming(items, today, window),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.upcoming.is_empty()
    }

    /// Expired alerts first, then upcoming ones.
    pub fn alerts(&self) -> Vec<ExpiryAlert> {
        self.expired
            .iter()
            .cloned()
            .map(ExpiryAlert::Expired)
            .chain(self.upcoming.iter().cloned().map(ExpiryAlert::Upcoming))
            .collect()
    }
}
