//! Relative Strength Index (RSI) over a simple moving window.

/// RSI of the most recent price.
///
/// Gains and losses are averaged with a simple mean over the trailing `period`
/// entries. The first price has no predecessor and contributes a zero gain and
/// loss, so the value is defined from `period` prices on.
///
/// Returns `None` when fewer than `period` prices are available, or when the
/// window is flat (no gains and no losses). A window with gains but no losses
/// saturates at 100.
pub fn compute_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let start = prices.len() - period;
    let (gain_sum, loss_sum) = (start..prices.len())
        .map(|i| {
            if i == 0 {
                return (0.0, 0.0);
            }
            let delta = prices[i] - prices[i - 1];
            (delta.max(0.0), (-delta).max(0.0))
        })
        .fold((0.0, 0.0), |(g, l), (gain, loss)| (g + gain, l + loss));

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
