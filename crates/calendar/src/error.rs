use chrono::NaiveDate;
use thiserror::Error;

use shelflife_core::DomainError;

/// Failure to parse or convert a Jalali date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Input is not three `/`-separated integers.
    #[error("expected a date in YYYY/M/D form, got {0:?}")]
    Malformed(String),

    #[error("year {0} is outside the supported range -61..=3177")]
    YearOutOfRange(i32),

    #[error("month {0} does not exist (expected 1..=12)")]
    MonthOutOfRange(i32),

    #[error("day {day} does not exist in {year}/{month}")]
    DayOutOfRange { year: i32, month: u32, day: i32 },

    #[error("gregorian date {0} has no supported Jalali equivalent")]
    GregorianOutOfRange(NaiveDate),
}

impl From<CalendarError> for DomainError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::Malformed(_) => DomainError::validation(err.to_string()),
            _ => DomainError::conversion(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_maps_to_validation_and_range_errors_to_conversion() {
        let err: DomainError = CalendarError::Malformed("1402/5".into()).into();
        assert!(matches!(err, DomainError::Validation(_)));

        let err: DomainError = CalendarError::MonthOutOfRange(13).into();
        assert!(matches!(err, DomainError::Conversion(_)));

        let err: DomainError = CalendarError::DayOutOfRange {
            year: 1402,
            month: 12,
            day: 30,
        }
        .into();
        assert_eq!(
            err.message(),
            "day 30 does not exist in 1402/12"
        );
    }
}
