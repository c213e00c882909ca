//! Alignment of heterogeneous-frequency series onto one daily calendar.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use panorama_core::{Date, PanoramaError, PanoramaResult, SeriesId, SeriesStore};

use crate::derive::DerivedColumn;

/// One aligned column: daily forward-filled values plus the calendar
/// positions that carry native (non-forward-filled) observations.
///
/// The native positions make "N trading observations back" lookbacks
/// exact even on a calendar that includes weekends and reporting gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Column {
    filled: Vec<Option<f64>>,
    obs_positions: Vec<usize>,
    obs_values: Vec<f64>,
}

/// A wide table of series aligned onto a contiguous daily calendar.
///
/// Invariants:
/// - the calendar has no gaps;
/// - every column has exactly one slot per calendar date, forward-filled
///   from the latest observation at or before that date;
/// - slots before a column's first known value are `None`, never zero.
///
/// Built by [`align`]; immutable afterwards apart from
/// [`AlignedTable::with_derived`], which adds columns without touching
/// existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTable {
    calendar: Vec<Date>,
    columns: BTreeMap<SeriesId, Column>,
}

impl AlignedTable {
    /// Returns the daily calendar.
    #[must_use]
    pub fn calendar(&self) -> &[Date] {
        &self.calendar
    }

    /// Returns the first calendar date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.calendar[0]
    }

    /// Returns the last calendar date.
    #[must_use]
    pub fn end(&self) -> Date {
        self.calendar[self.calendar.len() - 1]
    }

    /// Returns the number of calendar days.
    #[must_use]
    pub fn num_days(&self) -> usize {
        self.calendar.len()
    }

    /// Returns the column ids in sorted order.
    pub fn series_ids(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns true if the table has a column for `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.columns.contains_key(id)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_series(&self) -> usize {
        self.columns.len()
    }

    /// Returns the calendar position of `date`, or `None` when outside
    /// the calendar. The calendar is contiguous, so this is O(1).
    #[must_use]
    pub fn index_of(&self, date: Date) -> Option<usize> {
        if date < self.start() || date > self.end() {
            return None;
        }
        Some(date.days_since(self.start()) as usize)
    }

    /// Returns the date at a calendar position.
    #[must_use]
    pub fn date_at(&self, index: usize) -> Option<Date> {
        self.calendar.get(index).copied()
    }

    /// Returns the forward-filled value of `id` on `date`.
    ///
    /// `None` when the column is missing, the date is outside the
    /// calendar, or the date precedes the column's first known value.
    #[must_use]
    pub fn value(&self, id: &str, date: Date) -> Option<f64> {
        let index = self.index_of(date)?;
        self.columns.get(id)?.filled[index]
    }

    /// Returns the forward-filled value of `id` at a calendar position.
    #[must_use]
    pub fn value_at_index(&self, id: &str, index: usize) -> Option<f64> {
        self.columns.get(id)?.filled.get(index).copied().flatten()
    }

    /// Returns the number of native observations of `id` at or before
    /// `date`. Dates past the calendar end count the whole column.
    #[must_use]
    pub fn observation_count(&self, id: &str, date: Date) -> usize {
        let Some(column) = self.columns.get(id) else {
            return 0;
        };
        let Some(bound) = self.clamped_index(date) else {
            return 0;
        };
        column.obs_positions.partition_point(|&p| p <= bound)
    }

    /// Returns the trailing native observation values of `id` ending at
    /// the last observation at or before `date`, at most `max_len` long.
    ///
    /// `None` when the column is missing; an empty slice when no
    /// observation precedes `date`.
    #[must_use]
    pub fn observation_window(&self, id: &str, date: Date, max_len: usize) -> Option<&[f64]> {
        let column = self.columns.get(id)?;
        let count = self.observation_count(id, date);
        let lo = count.saturating_sub(max_len);
        Some(&column.obs_values[lo..count])
    }

    /// Returns every native observation value of `id` at or before `date`.
    #[must_use]
    pub fn observations_through(&self, id: &str, date: Date) -> Option<&[f64]> {
        let column = self.columns.get(id)?;
        let count = self.observation_count(id, date);
        Some(&column.obs_values[..count])
    }

    /// Returns the native observation `steps` observations before the
    /// last one at or before `date` (`steps == 0` is that observation).
    #[must_use]
    pub fn observation_back(&self, id: &str, date: Date, steps: usize) -> Option<(Date, f64)> {
        let column = self.columns.get(id)?;
        let count = self.observation_count(id, date);
        if steps >= count {
            return None;
        }
        let at = count - 1 - steps;
        let position = column.obs_positions[at];
        Some((self.calendar[position], column.obs_values[at]))
    }

    /// Returns the last native observation value of the column.
    #[must_use]
    pub fn last_value(&self, id: &str) -> Option<f64> {
        let column = self.columns.get(id)?;
        column
            .obs_values
            .last()
            .copied()
            .or_else(|| column.filled.last().copied().flatten())
    }

    /// Returns the first defined value of the column (the fill seed when
    /// the series was observed before the calendar start).
    #[must_use]
    pub fn first_value(&self, id: &str) -> Option<f64> {
        let column = self.columns.get(id)?;
        column.filled.iter().find_map(|v| *v)
    }

    /// Adds a derived column as a linear combination of existing columns.
    ///
    /// The derived value is defined only on dates where every input is
    /// defined; its native observation positions are the union of the
    /// inputs' positions (the derived value changes whenever any input
    /// does).
    ///
    /// # Errors
    ///
    /// Returns `PanoramaError::UnknownSeries` if a term references a
    /// column not present in the table, and
    /// `PanoramaError::InvalidConfig` if the derived id collides with an
    /// existing column.
    pub fn with_derived(mut self, spec: &DerivedColumn) -> PanoramaResult<Self> {
        if self.columns.contains_key(spec.id()) {
            return Err(PanoramaError::invalid_config(format!(
                "derived column id '{}' already present",
                spec.id()
            )));
        }
        for (series, _) in spec.terms() {
            if !self.columns.contains_key(series) {
                return Err(PanoramaError::unknown_series(series.clone()));
            }
        }

        let mut filled = Vec::with_capacity(self.calendar.len());
        for index in 0..self.calendar.len() {
            let mut sum = 0.0;
            let mut defined = true;
            for (series, coefficient) in spec.terms() {
                match self.columns[series].filled[index] {
                    Some(v) => sum += coefficient * v,
                    None => {
                        defined = false;
                        break;
                    }
                }
            }
            filled.push(if defined { Some(sum) } else { None });
        }

        let mut positions: Vec<usize> = spec
            .terms()
            .iter()
            .flat_map(|(series, _)| self.columns[series].obs_positions.iter().copied())
            .filter(|&p| filled[p].is_some())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        let obs_values = positions.iter().filter_map(|&p| filled[p]).collect();
        self.columns.insert(
            spec.id().to_string(),
            Column {
                filled,
                obs_positions: positions,
                obs_values,
            },
        );
        Ok(self)
    }

    /// Calendar position for `date` clamped to the calendar end; `None`
    /// when `date` precedes the calendar start.
    fn clamped_index(&self, date: Date) -> Option<usize> {
        if date < self.start() {
            None
        } else if date > self.end() {
            Some(self.calendar.len() - 1)
        } else {
            Some(date.days_since(self.start()) as usize)
        }
    }
}

/// Aligns every series in `store` onto a daily calendar spanning
/// `[start, end]`, forward-filling each column.
///
/// A series whose latest observation precedes the window seeds the fill,
/// so weekly releases published just before the window start are defined
/// from day one. A series with no observation at or before `end` is
/// omitted from the table (logged, never an error): downstream components
/// treat a missing column as "entity temporarily out of scope".
///
/// # Errors
///
/// Returns `PanoramaError::InvalidRange` if `start > end`.
pub fn align(store: &SeriesStore, start: Date, end: Date) -> PanoramaResult<AlignedTable> {
    if start > end {
        return Err(PanoramaError::invalid_range(
            start.to_string(),
            end.to_string(),
        ));
    }

    let num_days = end.days_since(start) as usize + 1;
    let mut calendar = Vec::with_capacity(num_days);
    let mut day = start;
    while day <= end {
        calendar.push(day);
        day = day.succ();
    }

    let mut columns = BTreeMap::new();
    for series in store.iter() {
        let seed = series
            .observations()
            .range(..start)
            .next_back()
            .map(|(_, v)| *v);

        let mut filled = Vec::with_capacity(num_days);
        let mut obs_positions = Vec::new();
        let mut obs_values = Vec::new();
        let mut current = seed;
        for (position, date) in calendar.iter().enumerate() {
            if let Some(value) = series.value_at(*date) {
                obs_positions.push(position);
                obs_values.push(value);
                current = Some(value);
            }
            filled.push(current);
        }

        if obs_positions.is_empty() && seed.is_none() {
            warn!(series = series.id(), "no observations in range, omitting");
            continue;
        }

        columns.insert(
            series.id().to_string(),
            Column {
                filled,
                obs_positions,
                obs_values,
            },
        );
    }

    Ok(AlignedTable { calendar, columns })
}
