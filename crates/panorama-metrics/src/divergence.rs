//! Cross-sectional divergence metrics.
//!
//! Measures whether a group of columns (e.g. the eleven sector ETFs)
//! moves together or apart: the dispersion of their one-day changes,
//! and each column's performance rebased to the start of the table.

use panorama_core::{Date, SeriesId};
use panorama_series::AlignedTable;

use crate::rolling::{mean, pct_change, sample_std};

/// Cross-sectional dispersion on one date: the sample standard
/// deviation, across the given columns, of each column's percent change
/// from the previous calendar day.
///
/// `None` when fewer than two columns have a defined change (the first
/// calendar day never has one).
#[must_use]
pub fn dispersion_at(table: &AlignedTable, ids: &[SeriesId], date: Date) -> Option<f64> {
    let index = table.index_of(date)?;
    if index == 0 {
        return None;
    }

    let mut changes = Vec::with_capacity(ids.len());
    for id in ids {
        let current = table.value_at_index(id, index);
        let previous = table.value_at_index(id, index - 1);
        if let (Some(current), Some(previous)) = (current, previous) {
            if let Some(change) = pct_change(current, previous) {
                changes.push(change);
            }
        }
    }
    if changes.len() < 2 {
        return None;
    }
    sample_std(&changes)
}

/// Dispersion for every calendar date, aligned with the table calendar.
#[must_use]
pub fn dispersion_series(table: &AlignedTable, ids: &[SeriesId]) -> Vec<Option<f64>> {
    table
        .calendar()
        .iter()
        .map(|date| dispersion_at(table, ids, *date))
        .collect()
}

/// Trailing rolling mean over an `Option` series.
///
/// A smoothed value is defined only when the entire trailing window is
/// defined, so the smoothed series starts `window - 1` slots after the
/// raw one.
#[must_use]
pub fn rolling_mean(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; series.len()];
    }
    let mut out = Vec::with_capacity(series.len());
    for index in 0..series.len() {
        if index + 1 < window {
            out.push(None);
            continue;
        }
        let trailing = &series[index + 1 - window..=index];
        if trailing.iter().all(Option::is_some) {
            let values: Vec<f64> = trailing.iter().filter_map(|v| *v).collect();
            out.push(mean(&values));
        } else {
            out.push(None);
        }
    }
    out
}

/// Smoothed dispersion: [`dispersion_series`] through a trailing
/// rolling mean (default use: a 20-day smoothing of sector dispersion).
#[must_use]
pub fn smoothed_dispersion(
    table: &AlignedTable,
    ids: &[SeriesId],
    window: usize,
) -> Vec<Option<f64>> {
    rolling_mean(&dispersion_series(table, ids), window)
}

/// A column rebased to its first defined value, in percent: 0 at the
/// start, +50 when the column is 1.5x its starting level.
///
/// Slots before the column's first value, and columns starting at zero,
/// are `None`.
#[must_use]
pub fn rebased_performance(table: &AlignedTable, id: &str) -> Vec<Option<f64>> {
    let base = table.first_value(id).filter(|b| *b != 0.0);
    (0..table.num_days())
        .map(|index| {
            let base = base?;
            let value = table.value_at_index(id, index)?;
            Some((value / base - 1.0) * 100.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use panorama_core::{Frequency, SeriesStore, TimeSeries};
    use panorama_series::align;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn daily(id: &str, start: &str, values: &[f64]) -> TimeSeries {
        let start = d(start);
        TimeSeries::new(
            id,
            Frequency::Daily,
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start.add_days(i as i64), *v)),
        )
    }

    fn ids(names: &[&str]) -> Vec<SeriesId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dispersion_zero_when_moving_together() {
        let store = SeriesStore::from_series([
            daily("XLK", "2025-01-01", &[100.0, 110.0]),
            daily("XLF", "2025-01-01", &[50.0, 55.0]),
            daily("XLE", "2025-01-01", &[20.0, 22.0]),
        ]);
        let table = align(&store, d("2025-01-01"), d("2025-01-02")).unwrap();
        // Every column moved +10%: dispersion is exactly zero
        let value = dispersion_at(&table, &ids(&["XLK", "XLF", "XLE"]), d("2025-01-02"));
        assert_relative_eq!(value.unwrap(), 0.0);
    }

    #[test]
    fn test_dispersion_closed_form() {
        let store = SeriesStore::from_series([
            daily("XLK", "2025-01-01", &[100.0, 102.0]),
            daily("XLF", "2025-01-01", &[100.0, 98.0]),
        ]);
        let table = align(&store, d("2025-01-01"), d("2025-01-02")).unwrap();
        // Changes +2% and -2%: sample std = sqrt(8)
        let value = dispersion_at(&table, &ids(&["XLK", "XLF"]), d("2025-01-02")).unwrap();
        assert_relative_eq!(value, 8.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_dispersion_undefined_cases() {
        let store = SeriesStore::from_series([
            daily("XLK", "2025-01-01", &[100.0, 102.0]),
            daily("XLF", "2025-01-01", &[100.0, 98.0]),
        ]);
        let table = align(&store, d("2025-01-01"), d("2025-01-02")).unwrap();
        // First calendar day has no previous day
        assert_eq!(
            dispersion_at(&table, &ids(&["XLK", "XLF"]), d("2025-01-01")),
            None
        );
        // A single defined change is not a cross-section
        assert_eq!(dispersion_at(&table, &ids(&["XLK"]), d("2025-01-02")), None);
    }

    #[test]
    fn test_rolling_mean_min_periods() {
        let series = vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let smoothed = rolling_mean(&series, 2);
        assert_eq!(smoothed[0], None);
        // Window [None, Some(1.0)] is incomplete
        assert_eq!(smoothed[1], None);
        assert_relative_eq!(smoothed[2].unwrap(), 1.5);
        assert_relative_eq!(smoothed[4].unwrap(), 3.5);
    }

    #[test]
    fn test_rebased_performance() {
        let store = SeriesStore::from_series([daily(
            "SPY",
            "2025-01-02",
            &[100.0, 120.0, 90.0],
        )]);
        let table = align(&store, d("2025-01-01"), d("2025-01-04")).unwrap();
        let rebased = rebased_performance(&table, "SPY");

        assert_eq!(rebased[0], None); // before inception
        assert_relative_eq!(rebased[1].unwrap(), 0.0);
        assert_relative_eq!(rebased[2].unwrap(), 20.0);
        assert_relative_eq!(rebased[3].unwrap(), -10.0);
    }

    #[test]
    fn test_rebased_performance_zero_base() {
        let store = SeriesStore::from_series([daily("X", "2025-01-01", &[0.0, 5.0])]);
        let table = align(&store, d("2025-01-01"), d("2025-01-02")).unwrap();
        let rebased = rebased_performance(&table, "X");
        assert!(rebased.iter().all(Option::is_none));
    }
}
