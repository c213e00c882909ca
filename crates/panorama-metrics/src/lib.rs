//! # Panorama Metrics
//!
//! Rolling valuation, momentum, and trend metrics for the Panorama
//! engine.
//!
//! Given an immutable [`panorama_series::AlignedTable`], this crate
//! computes, per entity per date:
//!
//! - **Z-score**: price against its trailing rolling window
//! - **Momentum**: percent change over a short observation horizon
//! - **RSI**: average-gain/average-loss ratio, clipped to [0, 100]
//! - **Relative strength**: momentum against a configured benchmark,
//!   with an explicit fallback when the benchmark degrades
//! - **Trend state**: classification of the 20/60/120/200 EMA ladder
//!
//! plus the cross-sectional divergence measures (dispersion, rebased
//! performance) used by the differentiation radar.
//!
//! Entities below the minimum-history policy produce an inspectable
//! [`MetricOutcome::Skipped`] instead of an error: partial data
//! degrades output, it never aborts the batch.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod calculator;
pub mod config;
pub mod divergence;
pub mod rolling;
pub mod rsi;
pub mod trend;

pub use calculator::{
    momentum, MetricOutcome, MetricRecord, RelativeStrength, RollingMetricsCalculator, SkipReason,
    Skipped,
};
pub use config::MetricsConfig;
pub use divergence::{dispersion_at, rebased_performance, smoothed_dispersion};
pub use trend::{ema, trend_biases, TrendBiases, TrendState};
