//! Time series and the series store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Date, Frequency};

/// Identifier of a raw series (ticker or macro release code).
pub type SeriesId = String;

/// Identifier of a plotted entity. Entities map 1:1 to series columns.
pub type EntityId = String;

/// A single named time series at its native frequency.
///
/// Observations are keyed by timezone-naive [`Date`] and ordered by it.
/// A `TimeSeries` is immutable once ingested: the data-fetch collaborator
/// creates it, everything downstream only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    id: SeriesId,
    frequency: Frequency,
    observations: BTreeMap<Date, f64>,
}

impl TimeSeries {
    /// Creates a series from (date, value) observations.
    ///
    /// Non-finite values are dropped at ingestion; duplicate dates keep
    /// the last value supplied.
    #[must_use]
    pub fn new(
        id: impl Into<SeriesId>,
        frequency: Frequency,
        observations: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        let observations = observations
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .collect();
        Self {
            id: id.into(),
            frequency,
            observations,
        }
    }

    /// Returns the series identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the native reporting frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the ordered observations.
    #[must_use]
    pub fn observations(&self) -> &BTreeMap<Date, f64> {
        &self.observations
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the date of the first observation.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.observations.keys().next().copied()
    }

    /// Returns the date of the last observation.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.observations.keys().next_back().copied()
    }

    /// Returns the value observed exactly on `date`, if any.
    #[must_use]
    pub fn value_at(&self, date: Date) -> Option<f64> {
        self.observations.get(&date).copied()
    }

    /// Returns the latest observation at or before `date`.
    ///
    /// This is the forward-fill primitive: a value holds until a newer
    /// observation appears.
    #[must_use]
    pub fn latest_at(&self, date: Date) -> Option<(Date, f64)> {
        self.observations
            .range(..=date)
            .next_back()
            .map(|(d, v)| (*d, *v))
    }
}

/// A collection of named time series awaiting alignment.
///
/// Backed by an ordered map so that iteration (and everything computed
/// from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStore {
    series: BTreeMap<SeriesId, TimeSeries>,
}

impl SeriesStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an iterator of series.
    #[must_use]
    pub fn from_series(series: impl IntoIterator<Item = TimeSeries>) -> Self {
        let series = series.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { series }
    }

    /// Inserts a series, replacing any existing series with the same id.
    pub fn insert(&mut self, series: TimeSeries) {
        self.series.insert(series.id.clone(), series);
    }

    /// Returns the series with the given id, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TimeSeries> {
        self.series.get(id)
    }

    /// Returns true if a series with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.series.contains_key(id)
    }

    /// Returns the stored series ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Iterates over the stored series in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TimeSeries> {
        self.series.values()
    }

    /// Returns the number of stored series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if the store holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_new_drops_non_finite() {
        let series = TimeSeries::new(
            "SPY",
            Frequency::Daily,
            vec![
                (d("2025-01-02"), 100.0),
                (d("2025-01-03"), f64::NAN),
                (d("2025-01-06"), f64::INFINITY),
                (d("2025-01-07"), 101.5),
            ],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.value_at(d("2025-01-03")), None);
        assert_eq!(series.value_at(d("2025-01-07")), Some(101.5));
    }

    #[test]
    fn test_ordering_and_bounds() {
        let series = TimeSeries::new(
            "GLD",
            Frequency::Daily,
            vec![(d("2025-01-06"), 190.0), (d("2025-01-02"), 188.0)],
        );
        assert_eq!(series.first_date(), Some(d("2025-01-02")));
        assert_eq!(series.last_date(), Some(d("2025-01-06")));
    }

    #[test]
    fn test_latest_at_holds_value() {
        let series = TimeSeries::new(
            "WALCL",
            Frequency::Weekly,
            vec![(d("2025-01-01"), 7700.0), (d("2025-01-08"), 7650.0)],
        );
        // A Saturday between releases resolves to the prior Wednesday
        assert_eq!(
            series.latest_at(d("2025-01-04")),
            Some((d("2025-01-01"), 7700.0))
        );
        // Before the first release there is nothing to hold
        assert_eq!(series.latest_at(d("2024-12-31")), None);
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = SeriesStore::new();
        store.insert(TimeSeries::new(
            "TLT",
            Frequency::Daily,
            vec![(d("2025-01-02"), 88.0)],
        ));
        store.insert(TimeSeries::new("SPY", Frequency::Daily, vec![]));

        assert_eq!(store.len(), 2);
        assert!(store.contains("TLT"));
        // Sorted iteration order
        let ids: Vec<&str> = store.ids().collect();
        assert_eq!(ids, vec!["SPY", "TLT"]);
    }
}
