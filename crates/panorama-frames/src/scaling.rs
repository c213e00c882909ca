//! Leaf sizing policies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use panorama_core::EntityId;

/// What a leaf's area represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Leaf area tracks estimated real-world size: anchored-proxy
    /// scaling for entities with a configured anchor, absolute magnitude
    /// for the rest.
    #[default]
    RealSize,
    /// Leaf area tracks how violently the entity is moving:
    /// `|change| + floor`.
    ChangeIntensity,
}

/// Computes leaf values for the hierarchy.
///
/// Anchor magnitudes are explicit configuration: a fixed "current
/// real-world size" estimate for entities whose true capitalization is
/// not tracked as a series. Under anchored-proxy scaling the anchor
/// breathes with price history:
/// `value = anchor * price[date] / price[reference_date]` where the
/// reference is the entity's latest available price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScalingPolicy {
    mode: SizingMode,
    anchors: BTreeMap<EntityId, f64>,
    intensity_floor: f64,
}

impl ScalingPolicy {
    /// Default floor added to change-intensity sizes so that a
    /// motionless entity still renders.
    pub const DEFAULT_INTENSITY_FLOOR: f64 = 0.1;

    /// Creates a real-size policy with no anchors.
    #[must_use]
    pub fn real_size() -> Self {
        Self {
            mode: SizingMode::RealSize,
            anchors: BTreeMap::new(),
            intensity_floor: Self::DEFAULT_INTENSITY_FLOOR,
        }
    }

    /// Creates a change-intensity policy.
    #[must_use]
    pub fn change_intensity() -> Self {
        Self {
            mode: SizingMode::ChangeIntensity,
            anchors: BTreeMap::new(),
            intensity_floor: Self::DEFAULT_INTENSITY_FLOOR,
        }
    }

    /// Sets the anchor magnitude for an entity.
    #[must_use]
    pub fn with_anchor(mut self, entity: impl Into<EntityId>, magnitude: f64) -> Self {
        self.anchors.insert(entity.into(), magnitude);
        self
    }

    /// Sets anchor magnitudes from an iterator.
    #[must_use]
    pub fn with_anchors(
        mut self,
        anchors: impl IntoIterator<Item = (EntityId, f64)>,
    ) -> Self {
        self.anchors.extend(anchors);
        self
    }

    /// Sets the change-intensity floor.
    #[must_use]
    pub fn with_intensity_floor(mut self, floor: f64) -> Self {
        self.intensity_floor = floor;
        self
    }

    /// Returns the sizing mode.
    #[must_use]
    pub fn mode(&self) -> SizingMode {
        self.mode
    }

    /// Returns the anchor for an entity, if configured.
    #[must_use]
    pub fn anchor(&self, entity: &str) -> Option<f64> {
        self.anchors.get(entity).copied()
    }

    /// Computes a leaf value.
    ///
    /// `price` is the entity's price on the frame date (`None` when the
    /// entity produced no record: the leaf is 0, distinguishing "zero
    /// because unavailable" from "excluded from the schema").
    /// `reference_price` anchors the proxy scaling; `change_pct` drives
    /// the intensity mode.
    #[must_use]
    pub fn leaf_value(
        &self,
        entity: &str,
        price: Option<f64>,
        reference_price: Option<f64>,
        change_pct: Option<f64>,
    ) -> f64 {
        let Some(price) = price else {
            return 0.0;
        };
        match self.mode {
            SizingMode::RealSize => match self.anchors.get(entity) {
                Some(anchor) => match reference_price {
                    Some(reference) if reference != 0.0 => anchor * price / reference,
                    _ => *anchor,
                },
                None => price.abs(),
            },
            SizingMode::ChangeIntensity => {
                change_pct.map_or(0.0, f64::abs) + self.intensity_floor
            }
        }
    }
}
