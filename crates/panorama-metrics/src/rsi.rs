//! Relative strength index over trailing observations.

/// RSI over the trailing `period` observation-to-observation changes.
///
/// `values` must hold at least `period + 1` observations ending at the
/// evaluation date; the average gain and average loss are simple means
/// over the last `period` changes. A loss-free window saturates at 100,
/// a gain-free window at 0, and the result is clipped to `[0, 100]`.
///
/// `None` when the window is too short.
#[must_use]
pub fn rsi(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period + 1 {
        return None;
    }
    let window = &values[values.len() - period - 1..];

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum -= delta;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rsi_insufficient_history() {
        let values = [100.0, 101.0, 102.0];
        assert_eq!(rsi(&values, 14), None);
        assert_eq!(rsi(&values, 0), None);
    }

    #[test]
    fn test_rsi_all_gains_saturates() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&values, 14), Some(100.0));
    }

    #[test]
    fn test_rsi_all_losses_is_zero() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert_relative_eq!(rsi(&values, 14).unwrap(), 0.0);
    }

    #[test]
    fn test_rsi_flat_is_saturated() {
        // No losses at all, even with no gains
        let values = [100.0; 16];
        assert_eq!(rsi(&values, 14), Some(100.0));
    }

    #[test]
    fn test_rsi_balanced_alternation() {
        // Equal alternating gains and losses: avg gain == avg loss, RSI 50
        let mut values = vec![100.0];
        for i in 0..14 {
            let last = *values.last().unwrap();
            values.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        assert_relative_eq!(rsi(&values, 14).unwrap(), 50.0);
    }

    #[test]
    fn test_rsi_closed_form() {
        // 2 gains of 1.0 and 1 loss of 1.0 over a period of 3:
        // avg gain 2/3, avg loss 1/3, rs = 2, rsi = 100 - 100/3
        let values = [100.0, 101.0, 100.0, 101.0];
        assert_relative_eq!(
            rsi(&values, 3).unwrap(),
            100.0 - 100.0 / 3.0,
            epsilon = 1e-12
        );
    }
}
