//! Snapshot series construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use panorama_core::Date;
use panorama_metrics::{MetricRecord, MetricsConfig, RollingMetricsCalculator, Skipped};
use panorama_series::AlignedTable;

use crate::aggregator::{HierarchyAggregator, DEFAULT_COLOR_LOOKBACK_DAYS};
use crate::parallel::{maybe_parallel_map, ParallelPolicy};
use crate::scaling::ScalingPolicy;
use crate::schema::HierarchySchema;
use crate::tree::HierarchyNode;

/// The fully computed state for one sampled date: metric records, the
/// skips behind any missing records, and the conservation-constrained
/// tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The sampled date.
    pub date: Date,
    /// Records for every eligible entity, in schema order.
    pub records: Vec<MetricRecord>,
    /// Inspectable skip reasons for the rest.
    pub skipped: Vec<Skipped>,
    /// Root of the hierarchy tree for this date.
    pub tree: HierarchyNode,
}

/// Drives the metrics calculator and hierarchy aggregator across an
/// ordered list of sample dates, producing the frame sequence an
/// animation renderer consumes.
///
/// Guarantees frame-to-frame schema stability: every snapshot's tree
/// contains the same node ids, with data-less entities present as
/// zero-valued leaves. Rebuilding from the same table yields identical
/// snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotSeriesBuilder<'a> {
    table: &'a AlignedTable,
    schema: &'a HierarchySchema,
    scaling: ScalingPolicy,
    metrics: MetricsConfig,
    color_lookback_days: u32,
    parallel: ParallelPolicy,
}

impl<'a> SnapshotSeriesBuilder<'a> {
    /// Creates a builder with default scaling, metrics, and parallelism.
    #[must_use]
    pub fn new(table: &'a AlignedTable, schema: &'a HierarchySchema) -> Self {
        Self {
            table,
            schema,
            scaling: ScalingPolicy::real_size(),
            metrics: MetricsConfig::default(),
            color_lookback_days: DEFAULT_COLOR_LOOKBACK_DAYS,
            parallel: ParallelPolicy::default(),
        }
    }

    /// Sets the leaf scaling policy.
    #[must_use]
    pub fn with_scaling(mut self, scaling: ScalingPolicy) -> Self {
        self.scaling = scaling;
        self
    }

    /// Sets the metrics configuration.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the calendar lookback for leaf colors.
    #[must_use]
    pub fn with_color_lookback_days(mut self, days: u32) -> Self {
        self.color_lookback_days = days;
        self
    }

    /// Sets the parallelism policy for `build_series`.
    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelPolicy) -> Self {
        self.parallel = parallel;
        self
    }

    /// Computes the snapshot for one date.
    #[must_use]
    pub fn snapshot(&self, date: Date) -> Snapshot {
        let calculator = RollingMetricsCalculator::new(self.table, &self.metrics);
        let entities = self.schema.entity_ids();
        let (records, skipped) = calculator.compute_all(&entities, date);

        let tree = HierarchyAggregator::new(self.table, self.schema, &self.scaling)
            .with_color_lookback_days(self.color_lookback_days)
            .build(date, &records);

        debug!(
            date = %date,
            records = records.len(),
            skipped = skipped.len(),
            "snapshot built"
        );
        Snapshot {
            date,
            records,
            skipped,
            tree,
        }
    }

    /// Computes one snapshot per sample date, in order.
    ///
    /// Snapshots are independent of each other, so construction
    /// parallelizes across dates when the `parallel` feature and policy
    /// allow; the output order always matches `sample_dates`.
    #[must_use]
    pub fn build_series(&self, sample_dates: &[Date]) -> Vec<Snapshot> {
        maybe_parallel_map(sample_dates, &self.parallel, |date| self.snapshot(*date))
    }
}
