//! # Panorama Core
//!
//! Core types for the Panorama market radar engine.
//!
//! This crate provides the foundational building blocks used throughout
//! Panorama:
//!
//! - **`Date`**: a timezone-naive calendar date (newtype over `chrono`)
//! - **`Frequency`**: native reporting cadence of an ingested series
//! - **`TimeSeries` / `SeriesStore`**: immutable observation maps and
//!   their deterministic, name-indexed collection
//! - **`PanoramaError`**: structured errors for genuine construction
//!   failures
//!
//! ## Design Philosophy
//!
//! - **Pure data**: nothing here performs I/O; series are created by an
//!   external data-fetch collaborator and never mutated afterwards
//! - **Determinism**: every collection is ordered so identical inputs
//!   always produce identical outputs downstream
//! - **Degradation as values**: partial data is modelled with `Option`
//!   and explicit skip reasons in the downstream crates, not with errors

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{PanoramaError, PanoramaResult};
pub use types::{Date, EntityId, Frequency, SeriesId, SeriesStore, TimeSeries, Weekday};
