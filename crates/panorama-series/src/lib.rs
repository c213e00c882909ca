//! # Panorama Series
//!
//! Calendar alignment and lookback resolution for the Panorama engine.
//!
//! This crate turns a [`panorama_core::SeriesStore`] of
//! heterogeneous-frequency series into one wide [`AlignedTable`] indexed
//! by a contiguous daily calendar:
//!
//! - **[`align`]**: reindex + forward-fill every series onto the
//!   calendar; leading dates stay undefined, unavailable series are
//!   omitted rather than failing the table
//! - **[`DerivedColumn`]**: linear combinations of aligned columns
//!   (e.g. a net-liquidity aggregate)
//! - **[`LookbackResolver`]**: nearest-prior date resolution for
//!   calendar-day, week, and trading-observation offsets, with no
//!   lookahead by construction

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aligner;
pub mod derive;
pub mod lookback;

pub use aligner::{align, AlignedTable};
pub use derive::DerivedColumn;
pub use lookback::LookbackResolver;
