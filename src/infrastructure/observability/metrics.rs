//! Prometheus metrics definitions for signalstream
//!
//! All metrics use the `signalstream_` prefix.

use prometheus::{
    CounterVec, Gauge, IntCounter, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the ingestion pipeline
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Closed candles run through the indicator pipeline
    pub candles_processed_total: IntCounter,
    /// Frames that were valid but not actionable (open candles, acks)
    pub messages_ignored_total: IntCounter,
    /// Frames discarded as malformed
    pub parse_errors_total: IntCounter,
    /// Published snapshots by signal
    pub signals_total: CounterVec,
    /// WebSocket reconnection attempts
    pub websocket_reconnects_total: IntCounter,
    /// Close price of the last processed candle
    pub last_close_price: GenericGauge<AtomicF64>,
    /// Last defined RSI value
    pub last_rsi: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let candles_processed_total = IntCounter::with_opts(Opts::new(
            "signalstream_candles_processed_total",
            "Closed candles processed",
        ))?;
        registry.register(Box::new(candles_processed_total.clone()))?;

        let messages_ignored_total = IntCounter::with_opts(Opts::new(
            "signalstream_messages_ignored_total",
            "Inbound frames ignored (open candles, control frames)",
        ))?;
        registry.register(Box::new(messages_ignored_total.clone()))?;

        let parse_errors_total = IntCounter::with_opts(Opts::new(
            "signalstream_parse_errors_total",
            "Inbound frames discarded as malformed",
        ))?;
        registry.register(Box::new(parse_errors_total.clone()))?;

        let signals_total = CounterVec::new(
            Opts::new("signalstream_signals_total", "Published snapshots by signal"),
            &["signal"],
        )?;
        registry.register(Box::new(signals_total.clone()))?;

        let websocket_reconnects_total = IntCounter::with_opts(Opts::new(
            "signalstream_websocket_reconnects_total",
            "Total WebSocket reconnection attempts",
        ))?;
        registry.register(Box::new(websocket_reconnects_total.clone()))?;

        let last_close_price = Gauge::with_opts(Opts::new(
            "signalstream_last_close_price",
            "Close price of the last processed candle",
        ))?;
        registry.register(Box::new(last_close_price.clone()))?;

        let last_rsi = Gauge::with_opts(Opts::new(
            "signalstream_last_rsi",
            "Last defined RSI(14) value",
        ))?;
        registry.register(Box::new(last_rsi.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            candles_processed_total,
            messages_ignored_total,
            parse_errors_total,
            signals_total,
            websocket_reconnects_total,
            last_close_price,
            last_rsi,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_signals(&self, signal: &str) {
        self.signals_total.with_label_values(&[signal]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        assert!(metrics.render().contains("signalstream_"));
    }

    #[test]
    fn test_last_price_update() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.last_close_price.set(36550.5);
        let output = metrics.render();
        assert!(output.contains("signalstream_last_close_price 36550.5"));
    }

    #[test]
    fn test_signal_counter() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_signals("BUY");
        metrics.inc_signals("NONE");
        let output = metrics.render();
        assert!(output.contains("signalstream_signals_total"));
        assert!(output.contains("signal=\"BUY\""));
    }

    #[test]
    fn test_independent_registries() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.candles_processed_total.inc();
        assert_eq!(a.candles_processed_total.get(), 1);
        assert_eq!(b.candles_processed_total.get(), 0);
    }
}
