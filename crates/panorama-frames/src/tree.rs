//! The hierarchy node tree and its conservation pass.

use serde::{Deserialize, Serialize};

/// Identifier of a node in the hierarchy tree.
pub type NodeId = String;

/// One node of the root -> category -> entity tree handed to the
/// renderer.
///
/// Leaf values are assigned by the scaling policy; internal node values
/// are derived, never independently assigned: after
/// [`HierarchyNode::recompute_totals`] every internal value equals the
/// sum of its direct children, so an animated treemap never shows
/// impossible totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Node id, stable across every frame of a series.
    pub id: NodeId,
    /// Parent node id; `None` for the root.
    pub parent_id: Option<NodeId>,
    /// Display label.
    pub label: String,
    /// Node value (leaf: scaled magnitude; internal: sum of children).
    pub value: f64,
    /// Presentation-only color driver (e.g. a percent change). Not
    /// subject to conservation; for internal nodes this is a
    /// value-weighted aggregate of the children and must never be
    /// confused with `value`.
    pub color_metric: Option<f64>,
    /// Child nodes; empty for leaves.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn leaf(
        id: impl Into<NodeId>,
        parent_id: impl Into<NodeId>,
        label: impl Into<String>,
        value: f64,
        color_metric: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id.into()),
            label: label.into(),
            value,
            color_metric,
            children: Vec::new(),
        }
    }

    /// Creates an internal node; its value is filled in by the
    /// conservation pass.
    #[must_use]
    pub fn branch(
        id: impl Into<NodeId>,
        parent_id: Option<NodeId>,
        label: impl Into<String>,
        children: Vec<HierarchyNode>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            label: label.into(),
            value: 0.0,
            color_metric: None,
            children,
        }
    }

    /// Returns true if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a node by id in this subtree.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Returns every node id in the subtree, depth-first preorder.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id.clone());
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// The conservation pass: recomputes every internal node's value as
    /// the exact sum of its direct children, leaves up to the root, and
    /// refreshes internal color metrics as value-weighted child
    /// aggregates.
    pub fn recompute_totals(&mut self) {
        if self.is_leaf() {
            return;
        }
        for child in &mut self.children {
            child.recompute_totals();
        }
        self.value = self.children.iter().map(|c| c.value).sum();
        self.color_metric = weighted_color(&self.children);
    }

    /// Returns true when every internal node's value equals the sum of
    /// its children within `tolerance`.
    #[must_use]
    pub fn conservation_holds(&self, tolerance: f64) -> bool {
        if self.is_leaf() {
            return true;
        }
        let sum: f64 = self.children.iter().map(|c| c.value).sum();
        (self.value - sum).abs() <= tolerance
            && self.children.iter().all(|c| c.conservation_holds(tolerance))
    }
}

/// Value-weighted mean of the children's color metrics; `None` when no
/// child carries both weight and a color.
fn weighted_color(children: &[HierarchyNode]) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight = 0.0;
    for child in children {
        if let Some(color) = child.color_metric {
            weighted_sum += color * child.value;
            weight += child.value;
        }
    }
    if weight > 0.0 {
        Some(weighted_sum / weight)
    } else {
        None
    }
}
