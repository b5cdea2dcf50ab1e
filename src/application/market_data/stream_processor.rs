use crate::application::market_data::latest_result::LatestResultStore;
use crate::domain::errors::StreamError;
use crate::domain::indicators::compute_indicators;
use crate::domain::market::{InboundEvent, PriceHistory, decode_kline_message};
use crate::domain::ports::MessageSource;
use crate::domain::signal::classify_snapshot;
use crate::domain::types::{Candle, ResultSnapshot};
use crate::infrastructure::observability::Metrics;
use chrono::DateTime;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle of a processor bound to one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    AwaitingConnection,
    Streaming,
    Disconnected,
}

impl fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorState::AwaitingConnection => write!(f, "AWAITING_CONNECTION"),
            ProcessorState::Streaming => write!(f, "STREAMING"),
            ProcessorState::Disconnected => write!(f, "DISCONNECTED"),
        }
    }
}

/// Handed back to the owner when the inbound transport goes away.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionLost {
    pub reason: String,
    pub candles_processed: u64,
}

/// Turns closed candles into published [`ResultSnapshot`]s.
///
/// Owns the price window exclusively. A processor serves one connection: after
/// a disconnect a new one must be created, which starts from an empty window.
pub struct StreamProcessor {
    history: PriceHistory,
    store: Arc<LatestResultStore>,
    metrics: Metrics,
    state: ProcessorState,
    candles_processed: u64,
}

impl StreamProcessor {
    pub fn new(store: Arc<LatestResultStore>, metrics: Metrics) -> Self {
        Self {
            history: PriceHistory::new(),
            store,
            metrics,
            state: ProcessorState::AwaitingConnection,
            candles_processed: 0,
        }
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    pub fn candles_processed(&self) -> u64 {
        self.candles_processed
    }

    pub fn mark_connected(&mut self) {
        if self.state == ProcessorState::AwaitingConnection {
            self.state = ProcessorState::Streaming;
            debug!("StreamProcessor: connection established, streaming");
        }
    }

    pub fn disconnect(&mut self, reason: impl Into<String>) -> ConnectionLost {
        self.state = ProcessorState::Disconnected;
        ConnectionLost {
            reason: reason.into(),
            candles_processed: self.candles_processed,
        }
    }

    /// Decode one inbound frame and process it if it is a closed candle.
    ///
    /// Returns the published snapshot, or `None` when the frame was ignored.
    pub fn handle_message(&mut self, text: &str) -> Result<Option<Arc<ResultSnapshot>>, StreamError> {
        self.ensure_streaming()?;

        match decode_kline_message(text) {
            Ok(InboundEvent::Kline(candle)) => self.on_candle(candle),
            Ok(InboundEvent::Control) => {
                debug!("StreamProcessor: control frame ignored");
                self.metrics.messages_ignored_total.inc();
                Ok(None)
            }
            Err(e) => {
                self.metrics.parse_errors_total.inc();
                Err(e)
            }
        }
    }

    fn ensure_streaming(&self) -> Result<(), StreamError> {
        if self.state != ProcessorState::Streaming {
            return Err(StreamError::NotStreaming {
                state: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Run one candle through the pipeline. Open candles are ignored.
    pub fn on_candle(&mut self, candle: Candle) -> Result<Option<Arc<ResultSnapshot>>, StreamError> {
        self.ensure_streaming()?;

        if !candle.is_closed {
            self.metrics.messages_ignored_total.inc();
            return Ok(None);
        }

        self.history.append(candle.close_price);
        let Some(indicators) = compute_indicators(&self.history.snapshot()) else {
            return Ok(None);
        };
        let signal = classify_snapshot(&indicators);

        let snapshot = ResultSnapshot {
            timestamp: candle.close_time,
            signal,
            price: candle.close_price,
            indicators: indicators.rounded(),
        };
        let published = self.store.publish(snapshot);
        self.candles_processed += 1;

        self.metrics.candles_processed_total.inc();
        self.metrics.last_close_price.set(candle.close_price);
        if let Some(rsi) = indicators.rsi {
            self.metrics.last_rsi.set(rsi);
        }
        self.metrics.inc_signals(&signal.to_string());

        let closed_at = DateTime::from_timestamp_millis(candle.close_time)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| candle.close_time.to_string());
        if signal.is_actionable() {
            info!(
                "StreamProcessor: {} signal at {} (close={}, rsi={:?}, macd={:.4}, signal={:.4})",
                signal,
                closed_at,
                candle.close_price,
                indicators.rsi,
                indicators.macd,
                indicators.macd_signal
            );
        } else {
            debug!(
                "StreamProcessor: candle closed at {} (close={}, window={})",
                closed_at,
                candle.close_price,
                self.history.len()
            );
        }

        Ok(Some(published))
    }

    /// Drive `source` until the transport goes away.
    ///
    /// Malformed frames are logged and skipped. Consumes the processor so that a
    /// reconnect always starts over with an empty price window.
    pub async fn run<S>(mut self, source: &mut S) -> ConnectionLost
    where
        S: MessageSource + ?Sized,
    {
        self.mark_connected();

        loop {
            match source.next_message().await {
                Ok(Some(text)) => {
                    if let Err(e) = self.handle_message(&text) {
                        warn!("StreamProcessor: discarding message: {}", e);
                    }
                }
                Ok(None) => {
                    info!("StreamProcessor: inbound stream closed by peer");
                    return self.disconnect("stream closed by peer");
                }
                Err(e) => {
                    warn!("StreamProcessor: {}", e);
                    let reason = match e {
                        StreamError::ConnectionLost { reason } => reason,
                        other => other.to_string(),
                    };
                    return self.disconnect(reason);
                }
            }
        }
    }
}
