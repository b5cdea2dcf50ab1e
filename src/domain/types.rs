use serde::{Deserialize, Serialize};
use std::fmt;

/// A single kline update. Only closed candles feed the indicator pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub close_time: i64,
    pub close_price: f64,
    pub is_closed: bool,
}

/// Discrete trading signal derived from RSI and MACD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    None,
}

impl Signal {
    /// Wire representation: `"BUY"`, `"SELL"` or null.
    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            Signal::Buy => Some("BUY"),
            Signal::Sell => Some("SELL"),
            Signal::None => None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::None)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::None => write!(f, "NONE"),
        }
    }
}

/// Indicator values computed over the current price window.
///
/// `rsi` is `None` until the window holds enough prices (or when the window is flat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
}

impl IndicatorSnapshot {
    /// Round every value to 2 decimals for publication.
    pub fn rounded(&self) -> Self {
        Self {
            rsi: self.rsi.map(round2),
            macd: round2(self.macd),
            macd_signal: round2(self.macd_signal),
        }
    }
}

/// Immutable result of processing one closed candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub timestamp: i64,
    pub signal: Signal,
    pub price: f64,
    pub indicators: IndicatorSnapshot,
}

/// Round to 2 decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_wire_format() {
        assert_eq!(Signal::Buy.as_wire(), Some("BUY"));
        assert_eq!(Signal::Sell.as_wire(), Some("SELL"));
        assert_eq!(Signal::None.as_wire(), None);
        assert_eq!(Signal::None.to_string(), "NONE");
    }

    #[test]
    fn test_rounding_only_touches_published_copy() {
        let raw = IndicatorSnapshot {
            rsi: Some(45.678_9),
            macd: -0.123_456,
            macd_signal: 1.005_1,
        };
        let published = raw.rounded();

        assert_eq!(published.rsi, Some(45.68));
        assert_eq!(published.macd, -0.12);
        assert_eq!(published.macd_signal, 1.01);
        assert_eq!(raw.rsi, Some(45.678_9));
    }

    #[test]
    fn test_rounding_keeps_undefined_rsi() {
        let raw = IndicatorSnapshot {
            rsi: None,
            macd: 0.0,
            macd_signal: 0.0,
        };
        assert_eq!(raw.rounded().rsi, None);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(2.5), 2.5);
    }
}
