//! Decoding of Binance kline frames into [`Candle`] values.
//!
//! Accepts raw stream frames (`{"e":"kline","k":{..}}`) as well as combined
//! stream frames (`{"stream":"..","data":{..}}`).

use crate::domain::errors::StreamError;
use crate::domain::types::Candle;
use serde::Deserialize;

/// Result of decoding one inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Kline(Candle),
    /// Subscription acknowledgements and other non-market frames
    Control,
}

#[derive(Debug, Deserialize)]
struct KlinePayload {
    #[serde(rename = "T")]
    close_time: i64,
    #[serde(rename = "c")]
    close_price: PriceField,
    #[serde(rename = "x")]
    is_closed: bool,
}

// Binance sends prices as strings; numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(f64),
}

impl PriceField {
    fn to_f64(&self) -> Result<f64, StreamError> {
        let price = match self {
            PriceField::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| StreamError::parse(format!("invalid close price {raw:?}: {e}")))?,
            PriceField::Number(n) => *n,
        };

        if !price.is_finite() {
            return Err(StreamError::parse(format!(
                "close price is not finite: {price}"
            )));
        }
        Ok(price)
    }
}

pub fn decode_kline_message(text: &str) -> Result<InboundEvent, StreamError> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    if value.get("result").is_some() && value.get("id").is_some() {
        return Ok(InboundEvent::Control);
    }

    let payload = value.get("data").unwrap_or(&value);
    let kline = payload
        .get("k")
        .ok_or_else(|| StreamError::parse("missing kline payload `k`"))?;

    let data = KlinePayload::deserialize(kline)?;

    Ok(InboundEvent::Kline(Candle {
        close_time: data.close_time,
        close_price: data.close_price.to_f64()?,
        is_closed: data.is_closed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame(close: &str, closed: bool) -> String {
        format!(
            r#"{{"e":"kline","E":1700000060001,"s":"BTCUSDT","k":{{"t":1700000000000,"T":1700000059999,"s":"BTCUSDT","i":"1m","o":"36500.00","c":{close},"h":"36600.00","l":"36400.00","v":"12.5","x":{closed}}}}}"#
        )
    }

    #[test]
    fn test_decode_closed_kline() {
        let event = decode_kline_message(&raw_frame("\"36550.12\"", true)).unwrap();
        assert_eq!(
            event,
            InboundEvent::Kline(Candle {
                close_time: 1_700_000_059_999,
                close_price: 36550.12,
                is_closed: true,
            })
        );
    }

    #[test]
    fn test_decode_open_kline() {
        match decode_kline_message(&raw_frame("\"36550.12\"", false)).unwrap() {
            InboundEvent::Kline(candle) => assert!(!candle.is_closed),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_numeric_price() {
        match decode_kline_message(&raw_frame("101.5", true)).unwrap() {
            InboundEvent::Kline(candle) => assert_eq!(candle.close_price, 101.5),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_combined_stream_frame() {
        let text = format!(
            r#"{{"stream":"btcusdt@kline_1m","data":{}}}"#,
            raw_frame("\"42.0\"", true)
        );
        match decode_kline_message(&text).unwrap() {
            InboundEvent::Kline(candle) => assert_eq!(candle.close_price, 42.0),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_subscription_ack_is_control() {
        assert_eq!(
            decode_kline_message(r#"{"result":null,"id":1}"#).unwrap(),
            InboundEvent::Control
        );
    }

    #[test]
    fn test_malformed_frames_fail_with_parse_error() {
        let cases = [
            "not json",
            r#"{"e":"kline"}"#,
            r#"{"k":{"T":1,"x":true}}"#,
            r#"{"k":{"T":1,"c":"abc","x":true}}"#,
            r#"{"k":{"T":"late","c":"1.0","x":true}}"#,
        ];
        for text in cases {
            let err = decode_kline_message(text).unwrap_err();
            assert!(
                matches!(err, StreamError::Parse { .. }),
                "{text} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_non_finite_price_rejected() {
        for close in ["\"NaN\"", "\"inf\""] {
            assert!(matches!(
                decode_kline_message(&raw_frame(close, true)),
                Err(StreamError::Parse { .. })
            ));
        }
    }
}
