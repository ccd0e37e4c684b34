//! Read-side shapes returned by the handlers and rendered by the CLI.

use chrono::NaiveDate;
use serde::Serialize;

use shelflife_calendar::JalaliDate;
use shelflife_core::{Entity, ItemId};
use shelflife_inventory::{
    ExpiryAlert, ExpiryStatus, FoodItem, UpcomingWindow, classify, days_until_expiry,
};

/// One inventory row as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodItemView {
    pub id: ItemId,
    pub name: String,
    pub expiry_date: JalaliDate,
    pub expiry_gregorian: NaiveDate,
    #[serde(flatten)]
    pub status: ExpiryStatus,
    /// Days left as displayed (one more than the raw difference); `None` once
    /// expired.
    pub days_remaining: Option<i64>,
}

impl FoodItemView {
    pub fn new(item: &FoodItem, today: NaiveDate, window: UpcomingWindow) -> Self {
        let status = classify(item, today, window);
        let days_remaining = match status {
            ExpiryStatus::Expired => None,
            _ => Some(ExpiryAlert::displayed_days_remaining(days_until_expiry(
                item, today,
            ))),
        };

        Self {
            id: *item.id(),
            name: item.name().to_string(),
            expiry_date: item.expiry_date(),
            expiry_gregorian: item.expiry_gregorian(),
            status,
            days_remaining,
        }
    }

    pub fn status_label(&self) -> String {
        match (self.status, self.days_remaining) {
            (ExpiryStatus::Expired, _) => "expired".to_string(),
            (ExpiryStatus::Upcoming { .. }, Some(days)) => format!("expiring soon ({days} days left)"),
            (_, Some(days)) => format!("fresh ({days} days left)"),
            (_, None) => "fresh".to_string(),
        }
    }
}

/// Today's date in both calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodayView {
    pub jalali: JalaliDate,
    pub gregorian: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelflife_inventory::ItemName;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, 7).unwrap()
    }

    fn item(date: &str) -> FoodItem {
        FoodItem::new(ItemId::new(1), ItemName::new("Milk").unwrap(), date.parse().unwrap())
    }

    #[test]
    fn expired_rows_have_no_days_remaining() {
        let view = FoodItemView::new(&item("1402/5/16"), today(), UpcomingWindow::default());
        assert_eq!(view.status, ExpiryStatus::Expired);
        assert_eq!(view.days_remaining, None);
        assert_eq!(view.status_label(), "expired");
    }

    #[test]
    fn upcoming_rows_show_one_extra_day() {
        let view = FoodItemView::new(&item("1402/5/26"), today(), UpcomingWindow::default());
        assert_eq!(
            view.status,
            ExpiryStatus::Upcoming {
                days_until_expiry: 10
            }
        );
        assert_eq!(view.days_remaining, Some(11));
        assert_eq!(view.status_label(), "expiring soon (11 days left)");
    }

    #[test]
    fn serialises_with_flat_status() {
        let view = FoodItemView::new(&item("1402/6/31"), today(), UpcomingWindow::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "fresh");
        assert_eq!(json["expiry_date"], "1402/6/31");
        assert_eq!(json["expiry_gregorian"], "2023-09-22");
        assert_eq!(json["days_remaining"], 47);
    }
}
