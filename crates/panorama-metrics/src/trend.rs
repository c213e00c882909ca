//! Multi-horizon moving-average trend classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded at
/// the first observation (the recursive, non-adjusted form).
///
/// `None` for an empty history or a zero span.
#[must_use]
pub fn ema(values: &[f64], span: usize) -> Option<f64> {
    if span == 0 {
        return None;
    }
    let mut iter = values.iter();
    let mut current = *iter.next()?;
    let alpha = 2.0 / (span as f64 + 1.0);
    for value in iter {
        // Incremental form: exact for a constant series, so a flat
        // ladder produces exactly-zero biases
        current += alpha * (value - current);
    }
    Some(current)
}

/// The four signed percentage biases that drive trend classification:
/// price against the short EMA, and each EMA against the next slower
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendBiases {
    /// Price vs the short EMA, in percent.
    pub price_vs_short: f64,
    /// Short EMA vs medium EMA, in percent.
    pub short_vs_medium: f64,
    /// Medium EMA vs long EMA, in percent.
    pub medium_vs_long: f64,
    /// Long EMA vs very-long EMA, in percent.
    pub long_vs_very_long: f64,
}

/// Computes the four biases from a full observation history and EMA
/// spans ordered shortest first.
///
/// `None` for an empty history. Degenerate histories (a zero EMA level)
/// produce non-finite biases, which [`TrendState::classify`] maps to
/// [`TrendState::Choppy`].
#[must_use]
pub fn trend_biases(values: &[f64], spans: [usize; 4]) -> Option<TrendBiases> {
    let price = *values.last()?;
    let short = ema(values, spans[0])?;
    let medium = ema(values, spans[1])?;
    let long = ema(values, spans[2])?;
    let very_long = ema(values, spans[3])?;

    let bias = |a: f64, b: f64| (a - b) / b * 100.0;
    Some(TrendBiases {
        price_vs_short: bias(price, short),
        short_vs_medium: bias(short, medium),
        medium_vs_long: bias(medium, long),
        long_vs_very_long: bias(long, very_long),
    })
}

/// Categorical multi-horizon trend state.
///
/// Classification is a total function of the four signed biases; an
/// exactly-zero bias counts as non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    /// All four biases non-negative: price above a fully stacked
    /// bullish ladder.
    StrongUptrend,
    /// All four biases negative: fully stacked bearish ladder.
    StrongDowntrend,
    /// Long-term bias non-negative but the short-term bias negative.
    BullPullback,
    /// Long-term bias negative but the short-term bias non-negative.
    BearBounce,
    /// Long-term bias non-negative with mixed middle horizons.
    LongTermBullish,
    /// Long-term bias negative with mixed middle horizons.
    LongTermBearish,
    /// Degenerate input (non-finite bias): no readable structure.
    Choppy,
}

impl TrendState {
    /// Classifies the four biases into a trend state.
    #[must_use]
    pub fn classify(biases: &TrendBiases) -> Self {
        let all = [
            biases.price_vs_short,
            biases.short_vs_medium,
            biases.medium_vs_long,
            biases.long_vs_very_long,
        ];
        if all.iter().any(|b| !b.is_finite()) {
            return TrendState::Choppy;
        }

        let positive = |b: f64| b >= 0.0;
        if all.iter().all(|b| positive(*b)) {
            TrendState::StrongUptrend
        } else if all.iter().all(|b| !positive(*b)) {
            TrendState::StrongDowntrend
        } else if positive(biases.long_vs_very_long) {
            if positive(biases.price_vs_short) {
                TrendState::LongTermBullish
            } else {
                TrendState::BullPullback
            }
        } else if positive(biases.price_vs_short) {
            TrendState::BearBounce
        } else {
            TrendState::LongTermBearish
        }
    }

    /// Returns true for the two long-term bullish-side states and the
    /// strong uptrend.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            TrendState::StrongUptrend | TrendState::BullPullback | TrendState::LongTermBullish
        )
    }
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendState::StrongUptrend => "Strong Uptrend",
            TrendState::StrongDowntrend => "Strong Downtrend",
            TrendState::BullPullback => "Bull Pullback",
            TrendState::BearBounce => "Bear Bounce",
            TrendState::LongTermBullish => "Long-Term Bullish",
            TrendState::LongTermBearish => "Long-Term Bearish",
            TrendState::Choppy => "Choppy",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn biases(cs: f64, sm: f64, ml: f64, lvl: f64) -> TrendBiases {
        TrendBiases {
            price_vs_short: cs,
            short_vs_medium: sm,
            medium_vs_long: ml,
            long_vs_very_long: lvl,
        }
    }

    #[test]
    fn test_ema_single_value() {
        assert_eq!(ema(&[42.0], 20), Some(42.0));
        assert_eq!(ema(&[], 20), None);
        assert_eq!(ema(&[42.0], 0), None);
    }

    #[test]
    fn test_ema_constant_series_is_exact() {
        // The incremental form has the constant as a fixpoint, even for
        // values that are not exactly representable
        let values = [0.1; 500];
        assert_eq!(ema(&values, 13), Some(0.1));
        assert_eq!(ema(&values, 200), Some(0.1));
    }

    #[test]
    fn test_ema_recursion() {
        // span 3 -> alpha 0.5
        let values = [10.0, 20.0, 30.0];
        // 10 -> 15 -> 22.5
        assert_relative_eq!(ema(&values, 3).unwrap(), 22.5);
    }

    #[test]
    fn test_ema_ordering_on_rising_series() {
        let values: Vec<f64> = (0..300).map(|i| 100.0 + i as f64).collect();
        let short = ema(&values, 20).unwrap();
        let long = ema(&values, 200).unwrap();
        // The shorter span hugs the rising price more closely
        assert!(short > long);
        assert!(*values.last().unwrap() > short);
    }

    #[test]
    fn test_classify_strong_states() {
        assert_eq!(
            TrendState::classify(&biases(1.0, 2.0, 0.5, 0.3)),
            TrendState::StrongUptrend
        );
        assert_eq!(
            TrendState::classify(&biases(-1.0, -2.0, -0.5, -0.3)),
            TrendState::StrongDowntrend
        );
    }

    #[test]
    fn test_classify_pullback_and_bounce() {
        assert_eq!(
            TrendState::classify(&biases(-1.0, 2.0, 0.5, 0.3)),
            TrendState::BullPullback
        );
        assert_eq!(
            TrendState::classify(&biases(1.0, -2.0, -0.5, -0.3)),
            TrendState::BearBounce
        );
    }

    #[test]
    fn test_classify_mixed_middle() {
        assert_eq!(
            TrendState::classify(&biases(1.0, -2.0, 0.5, 0.3)),
            TrendState::LongTermBullish
        );
        assert_eq!(
            TrendState::classify(&biases(-1.0, 2.0, 0.5, -0.3)),
            TrendState::LongTermBearish
        );
    }

    #[test]
    fn test_classify_zero_bias_is_non_negative() {
        // An exactly flat ladder counts as the bullish branch
        assert_eq!(
            TrendState::classify(&biases(0.0, 0.0, 0.0, 0.0)),
            TrendState::StrongUptrend
        );
        // Zero long bias with a negative short bias is still a pullback
        assert_eq!(
            TrendState::classify(&biases(-1.0, 1.0, -0.5, 0.0)),
            TrendState::BullPullback
        );
    }

    #[test]
    fn test_classify_non_finite_is_choppy() {
        assert_eq!(
            TrendState::classify(&biases(f64::NAN, 1.0, 1.0, 1.0)),
            TrendState::Choppy
        );
        assert_eq!(
            TrendState::classify(&biases(1.0, 1.0, 1.0, f64::INFINITY)),
            TrendState::Choppy
        );
    }

    #[test]
    fn test_trend_biases_rising_series() {
        let values: Vec<f64> = (0..300).map(|i| 100.0 + i as f64 / 3.0).collect();
        let b = trend_biases(&values, [20, 60, 120, 200]).unwrap();
        assert!(b.price_vs_short > 0.0);
        assert!(b.short_vs_medium > 0.0);
        assert!(b.medium_vs_long > 0.0);
        assert!(b.long_vs_very_long > 0.0);
        assert_eq!(TrendState::classify(&b), TrendState::StrongUptrend);
    }

    #[test]
    fn test_display() {
        assert_eq!(TrendState::BullPullback.to_string(), "Bull Pullback");
    }
}
