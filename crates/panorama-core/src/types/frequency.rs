//! Native reporting frequency for ingested series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native publication cadence of a time series.
///
/// A daily equity close, a weekly macro release, and a monthly aggregate
/// all land on the same daily calendar after alignment; the frequency is
/// retained for diagnostics and for choosing sensible window parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// One observation per trading day.
    #[default]
    Daily,
    /// One observation per week, often with an irregular publish lag.
    Weekly,
    /// One observation per month.
    Monthly,
}

impl Frequency {
    /// Approximate number of calendar days between observations.
    #[must_use]
    pub fn approx_days_per_period(&self) -> u32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
        }
    }

    /// Returns true if this is the daily cadence.
    #[must_use]
    pub fn is_daily(&self) -> bool {
        matches!(self, Frequency::Daily)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_days() {
        assert_eq!(Frequency::Daily.approx_days_per_period(), 1);
        assert_eq!(Frequency::Weekly.approx_days_per_period(), 7);
        assert_eq!(Frequency::Monthly.approx_days_per_period(), 30);
    }

    #[test]
    fn test_display() {
        assert_eq!(Frequency::Weekly.to_string(), "Weekly");
    }

    #[test]
    fn test_default_is_daily() {
        assert!(Frequency::default().is_daily());
    }
}
