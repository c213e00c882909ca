//! Derived-column specifications.

use serde::{Deserialize, Serialize};

use panorama_core::SeriesId;

/// A linear combination of aligned columns, e.g. net liquidity as
/// `WALCL/1000 - WTREGEN/1000 - RRPONTSYD`.
///
/// # Example
///
/// ```rust
/// use panorama_series::DerivedColumn;
///
/// let net_liquidity = DerivedColumn::new("NET_LIQ")
///     .term("WALCL", 0.001)
///     .term("WTREGEN", -0.001)
///     .term("RRPONTSYD", -1.0);
/// assert_eq!(net_liquidity.terms().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumn {
    id: SeriesId,
    terms: Vec<(SeriesId, f64)>,
}

impl DerivedColumn {
    /// Creates an empty specification for the given derived id.
    #[must_use]
    pub fn new(id: impl Into<SeriesId>) -> Self {
        Self {
            id: id.into(),
            terms: Vec::new(),
        }
    }

    /// Adds a `coefficient * column` term.
    #[must_use]
    pub fn term(mut self, series: impl Into<SeriesId>, coefficient: f64) -> Self {
        self.terms.push((series.into(), coefficient));
        self
    }

    /// Returns the derived column id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the terms in declaration order.
    #[must_use]
    pub fn terms(&self) -> &[(SeriesId, f64)] {
        &self.terms
    }
}
