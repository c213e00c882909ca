//! Configuration for rolling-metric computation.

use serde::{Deserialize, Serialize};

use panorama_core::SeriesId;

/// Configuration for per-entity rolling metrics.
///
/// Window sizes are counted in native observations (trading days for a
/// daily series), not calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Rolling window for the valuation Z-score, in observations.
    pub window: usize,

    /// Fraction of `window` that must be available before an entity
    /// produces any record. Below this the entity is silently excluded
    /// for that date (a policy, not an error).
    pub min_history_fraction: f64,

    /// Momentum horizon, in observations.
    pub short_horizon: usize,

    /// RSI averaging period, in observation-to-observation changes.
    pub rsi_period: usize,

    /// EMA spans for the multi-horizon trend state, shortest first.
    pub ema_spans: [usize; 4],

    /// Benchmark entity for relative strength. With no benchmark
    /// configured, records carry no relative strength.
    pub benchmark: Option<SeriesId>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window: 250,
            min_history_fraction: 0.8, // 200 of 250 observations
            short_horizon: 20,
            rsi_period: 14,
            ema_spans: [20, 60, 120, 200],
            benchmark: None,
        }
    }
}

impl MetricsConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Z-score window.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the minimum-history fraction.
    #[must_use]
    pub fn with_min_history_fraction(mut self, fraction: f64) -> Self {
        self.min_history_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the momentum horizon.
    #[must_use]
    pub fn with_short_horizon(mut self, horizon: usize) -> Self {
        self.short_horizon = horizon;
        self
    }

    /// Sets the RSI period.
    #[must_use]
    pub fn with_rsi_period(mut self, period: usize) -> Self {
        self.rsi_period = period;
        self
    }

    /// Sets the EMA spans, shortest first.
    #[must_use]
    pub fn with_ema_spans(mut self, spans: [usize; 4]) -> Self {
        self.ema_spans = spans;
        self
    }

    /// Sets the benchmark entity for relative strength.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: impl Into<SeriesId>) -> Self {
        self.benchmark = Some(benchmark.into());
        self
    }

    /// Minimum native observations required before an entity is
    /// eligible. Never below 2, since a sample standard deviation needs
    /// two points.
    #[must_use]
    pub fn min_observations(&self) -> usize {
        let required = (self.window as f64 * self.min_history_fraction).ceil() as usize;
        required.max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = MetricsConfig::default();
        assert_eq!(config.window, 250);
        assert_eq!(config.min_observations(), 200);
        assert_eq!(config.short_horizon, 20);
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.ema_spans, [20, 60, 120, 200]);
        assert!(config.benchmark.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MetricsConfig::new()
            .with_window(60)
            .with_min_history_fraction(0.5)
            .with_short_horizon(10)
            .with_benchmark("SPY");

        assert_eq!(config.window, 60);
        assert_eq!(config.min_observations(), 30);
        assert_eq!(config.short_horizon, 10);
        assert_eq!(config.benchmark.as_deref(), Some("SPY"));
    }

    #[test]
    fn test_min_observations_floor() {
        let config = MetricsConfig::new()
            .with_window(10)
            .with_min_history_fraction(0.0);
        assert_eq!(config.min_observations(), 2);
    }

    #[test]
    fn test_fraction_clamped() {
        let config = MetricsConfig::new().with_min_history_fraction(1.5);
        assert_eq!(config.min_history_fraction, 1.0);
    }

    #[test]
    fn test_serde() {
        let config = MetricsConfig::new().with_window(120).with_benchmark("SPY");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MetricsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
