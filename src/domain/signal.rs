use crate::domain::types::{IndicatorSnapshot, Signal};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Oversold RSI with MACD above its signal line buys; overbought RSI with MACD
/// below its signal line sells. An undefined RSI never produces a signal.
pub fn classify(rsi: Option<f64>, macd: f64, macd_signal: f64) -> Signal {
    let Some(rsi) = rsi else {
        return Signal::None;
    };

    if rsi < RSI_OVERSOLD && macd > macd_signal {
        Signal::Buy
    } else if rsi > RSI_OVERBOUGHT && macd < macd_signal {
        Signal::Sell
    } else {
        Signal::None
    }
}

pub fn classify_snapshot(indicators: &IndicatorSnapshot) -> Signal {
    classify(indicators.rsi, indicators.macd, indicators.macd_signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_table() {
        assert_eq!(classify(Some(25.0), 5.0, 3.0), Signal::Buy);
        assert_eq!(classify(Some(25.0), 3.0, 5.0), Signal::None);
        assert_eq!(classify(Some(75.0), 3.0, 5.0), Signal::Sell);
        assert_eq!(classify(Some(75.0), 5.0, 3.0), Signal::None);
    }

    #[test]
    fn test_neutral_rsi_never_signals() {
        for (macd, signal) in [(5.0, 3.0), (3.0, 5.0), (1.0, 1.0), (-10.0, 10.0)] {
            assert_eq!(classify(Some(50.0), macd, signal), Signal::None);
        }
    }

    #[test]
    fn test_undefined_rsi_never_signals() {
        assert_eq!(classify(None, 5.0, 3.0), Signal::None);
        assert_eq!(classify(None, 3.0, 5.0), Signal::None);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(classify(Some(30.0), 5.0, 3.0), Signal::None);
        assert_eq!(classify(Some(70.0), 3.0, 5.0), Signal::None);
        assert_eq!(classify(Some(25.0), 4.0, 4.0), Signal::None);
    }

    #[test]
    fn test_saturated_rsi() {
        assert_eq!(classify(Some(100.0), 1.0, 2.0), Signal::Sell);
        assert_eq!(classify(Some(0.0), 2.0, 1.0), Signal::Buy);
    }

    #[test]
    fn test_classify_snapshot() {
        let snapshot = IndicatorSnapshot {
            rsi: Some(12.0),
            macd: 0.4,
            macd_signal: 0.1,
        };
        assert_eq!(classify_snapshot(&snapshot), Signal::Buy);
    }
}
