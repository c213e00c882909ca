//! Nearest-prior date resolution against an aligned table.

use panorama_core::Date;

use crate::aligner::AlignedTable;

/// Resolves reference dates and lookback offsets against a table's
/// calendar, tolerant of weekends, holidays, and reporting gaps.
///
/// Every method answers with a date at or before the reference date:
/// the resolver never looks forward in time, so no metric computed
/// through it can carry lookahead bias. `None` means the offset exceeds
/// the available history; callers treat the dependent computation as
/// degraded, never as zero by default.
#[derive(Debug, Clone, Copy)]
pub struct LookbackResolver<'a> {
    table: &'a AlignedTable,
}

impl<'a> LookbackResolver<'a> {
    /// Creates a resolver over the given table.
    #[must_use]
    pub fn new(table: &'a AlignedTable) -> Self {
        Self { table }
    }

    /// Returns the latest calendar date at or before `date`
    /// ("as of" semantics).
    #[must_use]
    pub fn as_of(&self, date: Date) -> Option<Date> {
        if date < self.table.start() {
            return None;
        }
        Some(date.min(self.table.end()))
    }

    /// Returns the latest calendar date at or before `date - days`.
    #[must_use]
    pub fn calendar_days_back(&self, date: Date, days: u32) -> Option<Date> {
        self.as_of(date.add_days(-i64::from(days)))
    }

    /// Returns the latest calendar date at or before `date - weeks`.
    #[must_use]
    pub fn weeks_back(&self, date: Date, weeks: u32) -> Option<Date> {
        self.calendar_days_back(date, weeks * 7)
    }

    /// Returns the date of the native observation `steps` observations
    /// before the last one of `series` at or before `date`.
    #[must_use]
    pub fn observations_back(&self, series: &str, date: Date, steps: usize) -> Option<Date> {
        self.table
            .observation_back(series, date, steps)
            .map(|(resolved, _)| resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::align;
    use panorama_core::{Frequency, SeriesStore, TimeSeries};

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn table() -> AlignedTable {
        let store = SeriesStore::from_series([TimeSeries::new(
            "SPY",
            Frequency::Daily,
            vec![
                (d("2025-03-03"), 100.0),
                (d("2025-03-04"), 101.0),
                (d("2025-03-06"), 103.0),
            ],
        )]);
        align(&store, d("2025-03-01"), d("2025-03-10")).unwrap()
    }

    #[test]
    fn test_as_of_clamps_to_calendar_end() {
        let table = table();
        let resolver = LookbackResolver::new(&table);
        assert_eq!(resolver.as_of(d("2025-03-05")), Some(d("2025-03-05")));
        assert_eq!(resolver.as_of(d("2025-04-01")), Some(d("2025-03-10")));
        assert_eq!(resolver.as_of(d("2025-02-20")), None);
    }

    #[test]
    fn test_calendar_days_back() {
        let table = table();
        let resolver = LookbackResolver::new(&table);
        assert_eq!(
            resolver.calendar_days_back(d("2025-03-08"), 5),
            Some(d("2025-03-03"))
        );
        // Offset exceeding history is unavailable, not clamped to start
        assert_eq!(resolver.calendar_days_back(d("2025-03-08"), 30), None);
    }

    #[test]
    fn test_weeks_back() {
        let table = table();
        let resolver = LookbackResolver::new(&table);
        assert_eq!(
            resolver.weeks_back(d("2025-03-10"), 1),
            Some(d("2025-03-03"))
        );
        assert_eq!(resolver.weeks_back(d("2025-03-10"), 3), None);
    }

    #[test]
    fn test_no_lookahead() {
        let table = table();
        let resolver = LookbackResolver::new(&table);
        let reference = d("2025-03-05");
        for days in 0..8 {
            if let Some(resolved) = resolver.calendar_days_back(reference, days) {
                assert!(resolved <= reference);
            }
        }
        if let Some(resolved) = resolver.observations_back("SPY", reference, 0) {
            assert!(resolved <= reference);
        }
    }

    #[test]
    fn test_observations_back_skips_gap() {
        let table = table();
        let resolver = LookbackResolver::new(&table);
        // From the 6th, one observation back lands on the 4th (the 5th
        // had no native observation)
        assert_eq!(
            resolver.observations_back("SPY", d("2025-03-06"), 1),
            Some(d("2025-03-04"))
        );
        assert_eq!(resolver.observations_back("SPY", d("2025-03-06"), 3), None);
    }
}
