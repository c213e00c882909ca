//! Building one conservation-constrained tree per date.

use std::collections::HashMap;

use panorama_core::Date;
use panorama_series::{AlignedTable, LookbackResolver};

use panorama_metrics::rolling::pct_change;
use panorama_metrics::MetricRecord;

use crate::scaling::ScalingPolicy;
use crate::schema::HierarchySchema;
use crate::tree::HierarchyNode;

/// Default calendar lookback for the leaf color metric, matching a
/// "30-day change" treemap coloring.
pub const DEFAULT_COLOR_LOOKBACK_DAYS: u32 = 30;

/// Assembles the fixed schema tree for single dates: leaf values from
/// the scaling policy, leaf colors from a calendar lookback, and every
/// ancestor recomputed as the exact sum of its children.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyAggregator<'a> {
    table: &'a AlignedTable,
    schema: &'a HierarchySchema,
    scaling: &'a ScalingPolicy,
    color_lookback_days: u32,
}

impl<'a> HierarchyAggregator<'a> {
    /// Creates an aggregator with the default color lookback.
    #[must_use]
    pub fn new(
        table: &'a AlignedTable,
        schema: &'a HierarchySchema,
        scaling: &'a ScalingPolicy,
    ) -> Self {
        Self {
            table,
            schema,
            scaling,
            color_lookback_days: DEFAULT_COLOR_LOOKBACK_DAYS,
        }
    }

    /// Sets the calendar lookback for the leaf color metric.
    #[must_use]
    pub fn with_color_lookback_days(mut self, days: u32) -> Self {
        self.color_lookback_days = days;
        self
    }

    /// Builds the tree for `date` from the records computed for that
    /// date.
    ///
    /// Every schema entity appears as a leaf: entities without a record
    /// get `value = 0` and no color, so the node-id set is identical
    /// across frames. Internal node values are derived by the
    /// conservation pass, never assigned.
    #[must_use]
    pub fn build(&self, date: Date, records: &[MetricRecord]) -> HierarchyNode {
        let by_entity: HashMap<&str, &MetricRecord> = records
            .iter()
            .filter(|r| r.date == date)
            .map(|r| (r.entity_id.as_str(), r))
            .collect();

        let mut categories = Vec::with_capacity(self.schema.categories().len());
        for category in self.schema.categories() {
            let mut leaves = Vec::with_capacity(category.members.len());
            for member in &category.members {
                let price = by_entity.get(member.id.as_str()).map(|r| r.price);
                let color = price.and_then(|p| self.color_change(&member.id, date, p));
                let value = self.scaling.leaf_value(
                    &member.id,
                    price,
                    self.table.last_value(&member.id),
                    color,
                );
                leaves.push(HierarchyNode::leaf(
                    member.id.clone(),
                    category.id.clone(),
                    member.label.clone(),
                    value,
                    color,
                ));
            }
            categories.push(HierarchyNode::branch(
                category.id.clone(),
                Some(HierarchySchema::ROOT_ID.to_string()),
                category.label.clone(),
                leaves,
            ));
        }

        let mut root = HierarchyNode::branch(
            HierarchySchema::ROOT_ID,
            None,
            self.schema.root_label(),
            categories,
        );
        root.recompute_totals();
        root
    }

    /// Percent change of an entity over the color lookback, resolved
    /// against the nearest prior calendar date (never forward).
    fn color_change(&self, entity: &str, date: Date, price: f64) -> Option<f64> {
        let resolver = LookbackResolver::new(self.table);
        let prior = resolver.calendar_days_back(date, self.color_lookback_days)?;
        let previous = self.table.value(entity, prior)?;
        pct_change(price, previous)
    }
}
