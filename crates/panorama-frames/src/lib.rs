//! # Panorama Frames
//!
//! Conservation-constrained hierarchy snapshots for animated treemaps.
//!
//! This crate assembles the fixed root -> category -> entity tree for a
//! sequence of sample dates:
//!
//! - **[`HierarchySchema`]**: the data-independent tree shape, with
//!   overlapping category declarations resolved into a strict partition
//! - **[`ScalingPolicy`]**: leaf sizing (absolute magnitude,
//!   anchored-proxy, or change intensity)
//! - **[`HierarchyAggregator`]**: one tree per date, with every internal
//!   value recomputed as the exact sum of its children
//! - **[`SnapshotSeriesBuilder`]**: the frame sequence, schema-stable
//!   across dates so a renderer can interpolate node-by-node
//!
//! ## The conservation invariant
//!
//! For every snapshot and every internal node,
//! `node.value == sum(child.value)` holds identically. This is the
//! invariant that keeps an animated treemap free of area glitches. It is
//! guaranteed by construction: leaf values are computed first and every
//! ancestor is overwritten by [`HierarchyNode::recompute_totals`].
//!
//! ## Feature Flags
//!
//! - `parallel`: rayon-based parallel snapshot construction

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod display;
pub mod parallel;
pub mod sampling;
pub mod scaling;
pub mod schema;
pub mod snapshot;
pub mod tree;

pub use aggregator::{HierarchyAggregator, DEFAULT_COLOR_LOOKBACK_DAYS};
pub use display::format_billions;
pub use parallel::{maybe_parallel_map, ParallelPolicy};
pub use sampling::{last_n, SampleCadence};
pub use scaling::{ScalingPolicy, SizingMode};
pub use schema::{CategorySpec, EntitySpec, HierarchySchema};
pub use snapshot::{Snapshot, SnapshotSeriesBuilder};
pub use tree::{HierarchyNode, NodeId};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use panorama_frames::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregator::HierarchyAggregator;
    pub use crate::sampling::{last_n, SampleCadence};
    pub use crate::scaling::{ScalingPolicy, SizingMode};
    pub use crate::schema::{CategorySpec, EntitySpec, HierarchySchema};
    pub use crate::snapshot::{Snapshot, SnapshotSeriesBuilder};
    pub use crate::tree::{HierarchyNode, NodeId};

    pub use panorama_core::{Date, Frequency, SeriesStore, TimeSeries, Weekday};
    pub use panorama_metrics::{MetricRecord, MetricsConfig, TrendState};
    pub use panorama_series::{align, AlignedTable, DerivedColumn, LookbackResolver};
}
