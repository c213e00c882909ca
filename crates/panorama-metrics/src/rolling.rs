//! Trailing-window statistics over native observations.

/// Arithmetic mean of a window. `None` for an empty window.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator) of a window.
///
/// `None` for windows shorter than two observations.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Z-score of the window's last value against the whole window.
///
/// A flat window (zero standard deviation) yields the neutral value 0
/// rather than an infinity or NaN; the entity stays included. `None`
/// only when the window is too short to form a standard deviation.
#[must_use]
pub fn zscore(window: &[f64]) -> Option<f64> {
    let current = *window.last()?;
    let m = mean(window)?;
    let std = sample_std(window)?;
    if std == 0.0 {
        return Some(0.0);
    }
    let z = (current - m) / std;
    if z.is_finite() {
        Some(z)
    } else {
        Some(0.0)
    }
}

/// Percentage change from `previous` to `current`.
///
/// `None` when the base is zero or either value is non-finite: the
/// caller's neutral fallback stays distinguishable from a true 0%
/// change.
#[must_use]
pub fn pct_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current / previous - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        // Sample std of the classic example: sqrt(32/7)
        assert_relative_eq!(
            sample_std(&values).unwrap(),
            (32.0f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_empty_and_short_windows() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std(&[1.0]), None);
        assert_eq!(zscore(&[1.0]), None);
    }

    #[test]
    fn test_zscore_flat_window_is_neutral() {
        let flat = [100.0; 250];
        assert_eq!(zscore(&flat), Some(0.0));
    }

    #[test]
    fn test_zscore_closed_form() {
        // Window [1..=5]: mean 3, sample std sqrt(2.5), last value 5
        let window = [1.0, 2.0, 3.0, 4.0, 5.0];
        let expected = (5.0 - 3.0) / 2.5f64.sqrt();
        assert_relative_eq!(zscore(&window).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_change() {
        assert_relative_eq!(pct_change(110.0, 100.0).unwrap(), 10.0);
        assert_relative_eq!(pct_change(90.0, 100.0).unwrap(), -10.0);
        assert_relative_eq!(pct_change(100.0, 100.0).unwrap(), 0.0);
        assert_eq!(pct_change(100.0, 0.0), None);
        assert_eq!(pct_change(f64::NAN, 100.0), None);
    }
}
