//! Sample-date selection for snapshot series.

use serde::{Deserialize, Serialize};

use panorama_core::{Date, Weekday};
use panorama_series::AlignedTable;

/// How often to sample the calendar into animation frames.
///
/// The cadence is a parameter, not a constant: the liquidity treemap
/// samples weekly on Fridays, a daily radar samples every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleCadence {
    /// Every calendar date.
    EveryDay,
    /// The calendar date with the given weekday, once per week.
    Weekly(Weekday),
    /// The last calendar date of each month.
    MonthEnd,
}

impl SampleCadence {
    /// Selects the sample dates from a table's calendar, in order.
    #[must_use]
    pub fn sample_dates(&self, table: &AlignedTable) -> Vec<Date> {
        let calendar = table.calendar();
        match self {
            SampleCadence::EveryDay => calendar.to_vec(),
            SampleCadence::Weekly(weekday) => calendar
                .iter()
                .copied()
                .filter(|date| date.weekday() == *weekday)
                .collect(),
            SampleCadence::MonthEnd => calendar
                .iter()
                .copied()
                .filter(|date| date.succ().month() != date.month())
                .collect(),
        }
    }
}

/// Keeps only the trailing `n` dates (e.g. the last 52 weekly frames).
#[must_use]
pub fn last_n(mut dates: Vec<Date>, n: usize) -> Vec<Date> {
    if dates.len() > n {
        dates.drain(..dates.len() - n);
    }
    dates
}
