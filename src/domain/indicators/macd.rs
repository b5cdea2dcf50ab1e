//! Moving Average Convergence Divergence (MACD).

use ta::Next;
use ta::indicators::MovingAverageConvergenceDivergence;

/// Latest MACD line and signal line values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
}

impl MacdOutput {
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

/// MACD over the full price series.
///
/// A fresh indicator is fed every price of the window, so the EMAs are seeded at
/// the first price of the window and the signal line at the first MACD value.
/// Returns `None` for an empty series or a zero period.
pub fn compute_macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdOutput> {
    let mut indicator = MovingAverageConvergenceDivergence::new(fast, slow, signal).ok()?;

    let last = prices.iter().map(|&price| indicator.next(price)).last()?;

    Some(MacdOutput {
        macd: last.macd,
        signal: last.signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(prices: &[f64]) -> (f64, f64) {
        let (a12, a26, a9) = (2.0 / 13.0, 2.0 / 27.0, 2.0 / 10.0);
        let (mut e12, mut e26) = (prices[0], prices[0]);
        let mut sig = 0.0;
        let mut macd = 0.0;
        for (i, &p) in prices.iter().enumerate() {
            if i > 0 {
                e12 = a12 * p + (1.0 - a12) * e12;
                e26 = a26 * p + (1.0 - a26) * e26;
            }
            macd = e12 - e26;
            sig = if i == 0 { macd } else { a9 * macd + (1.0 - a9) * sig };
        }
        (macd, sig)
    }

    #[test]
    fn test_linear_series_matches_reference() {
        for n in [35usize, 50, 99] {
            let prices: Vec<f64> = (0..=n).map(|i| 10.0 + i as f64).collect();
            let out = compute_macd(&prices, 12, 26, 9).unwrap();
            let (macd, signal) = reference(&prices);
            assert!((out.macd - macd).abs() < 1e-6, "n={n}");
            assert!((out.signal - signal).abs() < 1e-6, "n={n}");
        }
    }

    #[test]
    fn test_single_price_is_zero() {
        let out = compute_macd(&[100.0], 12, 26, 9).unwrap();
        assert_eq!(out.macd, 0.0);
        assert_eq!(out.signal, 0.0);
        assert_eq!(out.histogram(), 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(compute_macd(&[], 12, 26, 9), None);
    }

    #[test]
    fn test_zero_period_is_rejected() {
        assert_eq!(compute_macd(&[1.0, 2.0], 0, 26, 9), None);
    }

    #[test]
    fn test_constant_series_is_flat() {
        let out = compute_macd(&[5.0; 30], 12, 26, 9).unwrap();
        assert!(out.macd.abs() < 1e-12);
        assert!(out.signal.abs() < 1e-12);
    }

    #[test]
    fn test_window_start_seeds_the_averages() {
        // Same tail, different first price: the result depends on where the window starts.
        let a = compute_macd(&[10.0, 20.0, 20.0, 20.0], 12, 26, 9).unwrap();
        let b = compute_macd(&[20.0, 20.0, 20.0, 20.0], 12, 26, 9).unwrap();
        assert!(a.macd > 0.0);
        assert_eq!(b.macd, 0.0);
    }

    #[test]
    fn test_rising_series_macd_above_signal() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let out = compute_macd(&prices, 12, 26, 9).unwrap();
        assert!(out.macd > 0.0);
        assert!(out.histogram() > 0.0);
    }
}
