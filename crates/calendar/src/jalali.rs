//! Jalali date value and its conversion to and from the Gregorian calendar.
//!
//! The leap-year rule follows the 33-year cycle re-anchored at the years in
//! `BREAKS`, which matches the astronomical calendar for years -61..=3177.
//! Outside that range conversion is refused rather than guessed.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use shelflife_core::ValueObject;

use crate::error::CalendarError;

const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Earliest supported Jalali year.
pub const MIN_YEAR: i32 = BREAKS[0];

/// Latest supported Jalali year.
pub const MAX_YEAR: i32 = BREAKS[BREAKS.len() - 1] - 1;

/// Months 1..=6 have 31 days, so month 7 starts at this day-of-year offset.
const FIRST_HALF_DAYS: u32 = 186;

struct YearInfo {
    leap: bool,
    /// Gregorian date of 1 Farvardin.
    nowruz: NaiveDate,
}

fn year_info(year: i32) -> Result<YearInfo, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::YearOutOfRange(year));
    }

    let gregorian_year = year + 621;
    let mut leap_days = -14;
    let mut previous_break = BREAKS[0];
    let mut jump = 0;
    for &next_break in &BREAKS[1..] {
        jump = next_break - previous_break;
        if year < next_break {
            break;
        }
        leap_days += jump / 33 * 8 + (jump % 33) / 4;
        previous_break = next_break;
    }

    let mut since_break = year - previous_break;
    leap_days += since_break / 33 * 8 + (since_break % 33 + 3) / 4;
    if jump % 33 == 4 && jump - since_break == 4 {
        leap_days += 1;
    }

    let gregorian_leap_days =
        gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_days - gregorian_leap_days;

    if jump - since_break < 6 {
        since_break = since_break - jump + (jump + 4) / 33 * 33;
    }
    let mut cycle_position = ((since_break + 1) % 33 - 1) % 4;
    if cycle_position == -1 {
        cycle_position = 4;
    }

    let nowruz = u32::try_from(march_day)
        .ok()
        .and_then(|day| NaiveDate::from_ymd_opt(gregorian_year, 3, day))
        .ok_or(CalendarError::YearOutOfRange(year))?;

    Ok(YearInfo {
        leap: cycle_position == 0,
        nowruz,
    })
}

fn days_in_month(leap: bool, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        _ if leap => 30,
        _ => 29,
    }
}

/// Whether `year` has 366 days (Esfand gets a 30th day).
pub fn is_leap_year(year: i32) -> Result<bool, CalendarError> {
    Ok(year_info(year)?.leap)
}

/// Number of days in `month` of `year`.
pub fn month_length(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::MonthOutOfRange(
            i32::try_from(month).unwrap_or(i32::MAX),
        ));
    }
    Ok(days_in_month(year_info(year)?.leap, month))
}

/// A validated Jalali calendar date.
///
/// Only constructible through [`JalaliDate::new`], parsing, or
/// [`from_gregorian`], so every value names a real day and converts to
/// Gregorian without failure. Serialises as the `YYYY/M/D` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
    gregorian: NaiveDate,
}

impl ValueObject for JalaliDate {}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::MonthOutOfRange(
                i32::try_from(month).unwrap_or(i32::MAX),
            ));
        }
        let info = year_info(year)?;
        if day == 0 || day > days_in_month(info.leap, month) {
            return Err(CalendarError::DayOutOfRange {
                year,
                month,
                day: i32::try_from(day).unwrap_or(i32::MAX),
            });
        }

        let month_start = if month <= 6 {
            (month - 1) * 31
        } else {
            FIRST_HALF_DAYS + (month - 7) * 30
        };
        let offset = month_start + day - 1;
        let gregorian = info
            .nowruz
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or(CalendarError::YearOutOfRange(year))?;

        Ok(Self {
            year,
            month,
            day,
            gregorian,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The same calendar day in the proleptic Gregorian calendar.
    pub fn to_gregorian(&self) -> NaiveDate {
        self.gregorian
    }
}

/// Convert a Gregorian date to its Jalali equivalent.
pub fn from_gregorian(date: NaiveDate) -> Result<JalaliDate, CalendarError> {
    let out_of_range = || CalendarError::GregorianOutOfRange(date);

    let guess = date.year() - 621;
    let (year, info) = match year_info(guess) {
        Ok(info) if date >= info.nowruz => (guess, info),
        _ => (
            guess - 1,
            year_info(guess - 1).map_err(|_| out_of_range())?,
        ),
    };

    let offset = u32::try_from(date.signed_duration_since(info.nowruz).num_days())
        .map_err(|_| out_of_range())?;
    let year_length = if info.leap { 366 } else { 365 };
    if offset >= year_length {
        return Err(out_of_range());
    }

    let (month, day) = if offset < FIRST_HALF_DAYS {
        (offset / 31 + 1, offset % 31 + 1)
    } else {
        let rest = offset - FIRST_HALF_DAYS;
        (rest / 30 + 7, rest % 30 + 1)
    };

    Ok(JalaliDate {
        year,
        month,
        day,
        gregorian: date,
    })
}

/// Parse a `YYYY/M/D` Jalali string and convert it to Gregorian.
pub fn to_gregorian(input: &str) -> Result<NaiveDate, CalendarError> {
    input.parse::<JalaliDate>().map(|date| date.to_gregorian())
}

impl FromStr for JalaliDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CalendarError::Malformed(s.to_string());

        let parts = s
            .split('/')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;
        let &[year, month, day] = parts.as_slice() else {
            return Err(malformed());
        };

        let month = u32::try_from(month).map_err(|_| CalendarError::MonthOutOfRange(month))?;
        let day = u32::try_from(day).map_err(|_| CalendarError::DayOutOfRange { year, month, day })?;
        JalaliDate::new(year, month, day)
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.month, self.day)
    }
}

impl From<JalaliDate> for String {
    fn from(value: JalaliDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for JalaliDate {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
