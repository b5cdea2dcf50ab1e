use crate::domain::types::ResultSnapshot;
use serde::{Deserialize, Serialize};

/// Indicator block of the outbound record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorsResponse {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

/// Outbound record served to readers. Every field is null until the first
/// closed candle has been processed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalResponse {
    pub timestamp: Option<i64>,
    pub signal: Option<String>,
    pub price: Option<f64>,
    pub indicators: IndicatorsResponse,
}

impl SignalResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<&ResultSnapshot> for SignalResponse {
    fn from(snapshot: &ResultSnapshot) -> Self {
        Self {
            timestamp: Some(snapshot.timestamp),
            signal: snapshot.signal.as_wire().map(str::to_string),
            price: Some(snapshot.price),
            indicators: IndicatorsResponse {
                rsi: snapshot.indicators.rsi,
                macd: Some(snapshot.indicators.macd),
                macd_signal: Some(snapshot.indicators.macd_signal),
            },
        }
    }
}

impl From<Option<&ResultSnapshot>> for SignalResponse {
    fn from(snapshot: Option<&ResultSnapshot>) -> Self {
        snapshot.map(SignalResponse::from).unwrap_or_default()
    }
}
