//! Technical indicators computed over a closing-price window.
//!
//! Everything here is a pure function of the input slice; the caller recomputes
//! over the whole window on every closed candle.

pub mod macd;
pub mod rsi;

pub use macd::{MacdOutput, compute_macd};
pub use rsi::compute_rsi;

use crate::domain::types::IndicatorSnapshot;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// RSI(14) and MACD(12, 26, 9) over `prices`. `None` for an empty window.
pub fn compute_indicators(prices: &[f64]) -> Option<IndicatorSnapshot> {
    let macd = compute_macd(prices, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?;

    Some(IndicatorSnapshot {
        rsi: compute_rsi(prices, RSI_PERIOD),
        macd: macd.macd,
        macd_signal: macd.signal,
    })
}
