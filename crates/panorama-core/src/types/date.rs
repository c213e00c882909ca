//! Date type for calendar-aligned series.

use chrono::{Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PanoramaError, PanoramaResult};

pub use chrono::Weekday;

/// A timezone-naive calendar date.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. All series
/// observations are keyed by this type, so sources with different
/// timezone annotations (exchange-local vs. UTC) compare equal when they
/// refer to the same calendar day: the conversion constructors drop the
/// timezone before the date ever enters a series.
///
/// # Example
///
/// ```rust
/// use panorama_core::types::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// assert_eq!(date.add_days(16), Date::from_ymd(2025, 7, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `PanoramaError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> PanoramaResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| PanoramaError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `PanoramaError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> PanoramaResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| PanoramaError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Creates a date from a timezone-aware timestamp, dropping the
    /// timezone annotation.
    ///
    /// The calendar day is taken in the timestamp's own timezone, so an
    /// exchange-local close and a UTC-stamped macro release that fall on
    /// the same local day key to the same `Date`.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(dt: &chrono::DateTime<Tz>) -> Self {
        Date(dt.date_naive())
    }

    /// Creates a date from a `chrono::NaiveDate`.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    /// Returns the underlying `chrono::NaiveDate`.
    #[must_use]
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Adds a number of days to the date (negative moves backwards).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Returns the number of calendar days from `other` to `self`.
    ///
    /// Positive when `self` is later than `other`.
    #[must_use]
    pub fn days_since(&self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }

    /// Returns the next calendar day.
    #[must_use]
    pub fn succ(&self) -> Self {
        self.add_days(1)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
