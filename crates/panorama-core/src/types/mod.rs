//! Core domain types.

mod date;
mod frequency;
mod series;

pub use date::{Date, Weekday};
pub use frequency::Frequency;
pub use series::{EntityId, SeriesId, SeriesStore, TimeSeries};
