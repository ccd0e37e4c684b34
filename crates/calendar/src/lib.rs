//! Jalali (Solar Hijri) calendar support.
//!
//! Users enter and read dates in the Jalali calendar (`YYYY/M/D`), while all
//! date arithmetic and ordering happens on Gregorian `chrono::NaiveDate`
//! values. This crate is the only place the two meet.

pub mod error;
pub mod jalali;

pub use error::CalendarError;
pub use jalali::{
    JalaliDate, MAX_YEAR, MIN_YEAR, from_gregorian, is_leap_year, month_length, to_gregorian,
};
