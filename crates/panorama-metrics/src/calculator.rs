//! Per-entity, per-date metric computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use panorama_core::{Date, EntityId};
use panorama_series::AlignedTable;

use crate::config::MetricsConfig;
use crate::rolling::{pct_change, zscore};
use crate::rsi::rsi;
use crate::trend::{trend_biases, TrendBiases, TrendState};

/// Momentum of `entity` as of `date`: percentage change over `horizon`
/// native observations.
///
/// `None` when the lookback cannot be resolved (fewer than `horizon`
/// prior observations) or the base price is zero; the caller's neutral
/// fallback stays distinguishable from a true 0% move.
#[must_use]
pub fn momentum(table: &AlignedTable, entity: &str, date: Date, horizon: usize) -> Option<f64> {
    let (_, current) = table.observation_back(entity, date, 0)?;
    let (_, previous) = table.observation_back(entity, date, horizon)?;
    pct_change(current, previous)
}

/// Benchmark-relative strength, with the degraded-benchmark case kept
/// explicit rather than silently collapsing to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeStrength {
    /// Entity momentum minus benchmark momentum over the same horizon.
    VsBenchmark(f64),
    /// The benchmark lacked sufficient history; this is the entity's
    /// absolute momentum.
    AbsoluteFallback(f64),
}

impl RelativeStrength {
    /// Returns the underlying percentage value.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            RelativeStrength::VsBenchmark(v) | RelativeStrength::AbsoluteFallback(v) => *v,
        }
    }

    /// Returns true when the benchmark comparison degraded to absolute
    /// momentum.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, RelativeStrength::AbsoluteFallback(_))
    }
}

/// Why an entity produced no record for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entity has no column in the aligned table (fetch failure or
    /// unknown id).
    SeriesMissing,
    /// The date precedes the entity's first known value.
    NoObservation,
    /// Fewer observations than the minimum-history policy requires.
    InsufficientHistory {
        /// Observations available at the date.
        have: usize,
        /// Observations the policy requires.
        need: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SeriesMissing => write!(f, "series missing"),
            SkipReason::NoObservation => write!(f, "no observation at date"),
            SkipReason::InsufficientHistory { have, need } => {
                write!(f, "insufficient history ({have} of {need})")
            }
        }
    }
}

/// A recorded skip: which entity, which date, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skipped {
    /// The entity that produced no record.
    pub entity_id: EntityId,
    /// The evaluation date.
    pub date: Date,
    /// Why the entity was skipped.
    pub reason: SkipReason,
}

/// Computed metrics for one entity on one date.
///
/// `None` fields encode a degraded metric (unresolvable lookback,
/// missing benchmark input), distinguishable from a true zero; the
/// `*_or_neutral` accessors collapse them to the neutral value for
/// plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Evaluation date.
    pub date: Date,
    /// Entity id (column id in the aligned table).
    pub entity_id: EntityId,
    /// Forward-filled price on the evaluation date.
    pub price: f64,
    /// Rolling valuation Z-score.
    pub z_score: Option<f64>,
    /// Short-horizon momentum, in percent.
    pub momentum_pct: Option<f64>,
    /// RSI, clipped to [0, 100].
    pub rsi: Option<f64>,
    /// Benchmark-relative strength.
    pub relative_strength: Option<RelativeStrength>,
    /// The four EMA ladder biases behind the trend state.
    pub trend_biases: Option<TrendBiases>,
    /// Multi-horizon trend classification.
    pub trend_state: TrendState,
}

impl MetricRecord {
    /// Z-score, or the neutral 0 when degraded.
    #[must_use]
    pub fn z_score_or_neutral(&self) -> f64 {
        self.z_score.unwrap_or(0.0)
    }

    /// Momentum, or the neutral 0 when degraded.
    #[must_use]
    pub fn momentum_or_neutral(&self) -> f64 {
        self.momentum_pct.unwrap_or(0.0)
    }

    /// Relative strength value, or the neutral 0 when degraded.
    #[must_use]
    pub fn relative_strength_or_neutral(&self) -> f64 {
        self.relative_strength.map_or(0.0, |rs| rs.value())
    }
}

/// Outcome of a per-entity computation: a record, or an inspectable
/// skip. Replaces blanket per-entity exception swallowing with a value
/// the caller can aggregate and test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricOutcome {
    /// The entity was eligible and produced a record.
    Computed(MetricRecord),
    /// The entity produced no record for this date.
    Skipped(Skipped),
}

impl MetricOutcome {
    /// Returns the record, if computed.
    #[must_use]
    pub fn record(self) -> Option<MetricRecord> {
        match self {
            MetricOutcome::Computed(record) => Some(record),
            MetricOutcome::Skipped(_) => None,
        }
    }

    /// Returns a reference to the record, if computed.
    #[must_use]
    pub fn as_record(&self) -> Option<&MetricRecord> {
        match self {
            MetricOutcome::Computed(record) => Some(record),
            MetricOutcome::Skipped(_) => None,
        }
    }

    /// Returns true if the entity was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, MetricOutcome::Skipped(_))
    }
}

/// Computes rolling metrics for entities against an aligned table.
///
/// All methods are pure reads of the immutable table: computing the same
/// (entity, date) twice yields identical outcomes.
#[derive(Debug, Clone, Copy)]
pub struct RollingMetricsCalculator<'a> {
    table: &'a AlignedTable,
    config: &'a MetricsConfig,
}

impl<'a> RollingMetricsCalculator<'a> {
    /// Creates a calculator over a table with the given configuration.
    #[must_use]
    pub fn new(table: &'a AlignedTable, config: &'a MetricsConfig) -> Self {
        Self { table, config }
    }

    /// Computes the metric record for one entity on one date.
    #[must_use]
    pub fn compute(&self, entity_id: &str, date: Date) -> MetricOutcome {
        let skip = |reason| {
            MetricOutcome::Skipped(Skipped {
                entity_id: entity_id.to_string(),
                date,
                reason,
            })
        };

        if !self.table.contains(entity_id) {
            return skip(SkipReason::SeriesMissing);
        }
        let Some(price) = self.table.value(entity_id, date) else {
            return skip(SkipReason::NoObservation);
        };

        let have = self.table.observation_count(entity_id, date);
        let need = self.config.min_observations();
        if have < need {
            return skip(SkipReason::InsufficientHistory { have, need });
        }

        let window = self
            .table
            .observation_window(entity_id, date, self.config.window)
            .unwrap_or(&[]);
        let z_score = zscore(window);
        let rsi = rsi(window, self.config.rsi_period);
        let momentum_pct = momentum(self.table, entity_id, date, self.config.short_horizon);

        let relative_strength = match (&self.config.benchmark, momentum_pct) {
            (Some(benchmark), Some(entity_momentum)) => {
                match momentum(self.table, benchmark, date, self.config.short_horizon) {
                    Some(benchmark_momentum) => Some(RelativeStrength::VsBenchmark(
                        entity_momentum - benchmark_momentum,
                    )),
                    None => Some(RelativeStrength::AbsoluteFallback(entity_momentum)),
                }
            }
            _ => None,
        };

        let history = self
            .table
            .observations_through(entity_id, date)
            .unwrap_or(&[]);
        let trend_biases = trend_biases(history, self.config.ema_spans);
        let trend_state = trend_biases
            .as_ref()
            .map_or(TrendState::Choppy, TrendState::classify);

        MetricOutcome::Computed(MetricRecord {
            date,
            entity_id: entity_id.to_string(),
            price,
            z_score,
            momentum_pct,
            rsi,
            relative_strength,
            trend_biases,
            trend_state,
        })
    }

    /// Computes records for a list of entities, partitioning the
    /// outcomes into records and inspectable skips. Entity order is
    /// preserved.
    #[must_use]
    pub fn compute_all(
        &self,
        entities: &[EntityId],
        date: Date,
    ) -> (Vec<MetricRecord>, Vec<Skipped>) {
        let mut records = Vec::with_capacity(entities.len());
        let mut skipped = Vec::new();
        for entity in entities {
            match self.compute(entity, date) {
                MetricOutcome::Computed(record) => records.push(record),
                MetricOutcome::Skipped(skip) => {
                    debug!(entity = %skip.entity_id, date = %skip.date, reason = %skip.reason, "entity skipped");
                    skipped.push(skip);
                }
            }
        }
        (records, skipped)
    }
}
