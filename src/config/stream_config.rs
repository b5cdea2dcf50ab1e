//! Candle stream configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Kline intervals accepted by the Binance stream API
pub const KLINE_INTERVALS: &[&str] = &[
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w",
    "1M",
];

/// Stream environment configuration
#[derive(Debug, Clone)]
pub struct StreamEnvConfig {
    pub ws_url: String,
    pub symbol: String,
    pub interval: String,
    pub reconnect_max_backoff_secs: u64,
    pub reconnect_max_attempts: Option<u32>,
}

impl Default for StreamEnvConfig {
    fn default() -> Self {
        Self {
            ws_url: "wss://stream.binance.com:9443".to_string(),
            symbol: "btcusdt".to_string(),
            interval: "1m".to_string(),
            reconnect_max_backoff_secs: 60,
            reconnect_max_attempts: None,
        }
    }
}

impl StreamEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            ws_url: env::var("BINANCE_WS_URL").unwrap_or(defaults.ws_url),
            symbol: env::var("SYMBOL")
                .unwrap_or(defaults.symbol)
                .to_lowercase(),
            interval: env::var("KLINE_INTERVAL").unwrap_or(defaults.interval),
            reconnect_max_backoff_secs: env::var("RECONNECT_MAX_BACKOFF_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reconnect_max_backoff_secs),
            reconnect_max_attempts: env::var("RECONNECT_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() || !self.symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            anyhow::bail!("Invalid SYMBOL: {:?}. Must be a non-empty alphanumeric pair", self.symbol);
        }
        if !KLINE_INTERVALS.contains(&self.interval.as_str()) {
            anyhow::bail!(
                "Invalid KLINE_INTERVAL: {}. Must be one of {}",
                self.interval,
                KLINE_INTERVALS.join(", ")
            );
        }
        self.stream_url()?;
        Ok(())
    }

    /// Full kline stream endpoint, e.g. `wss://host/ws/btcusdt@kline_1m`
    pub fn stream_url(&self) -> Result<Url> {
        let raw = format!(
            "{}/ws/{}@kline_{}",
            self.ws_url.trim_end_matches('/'),
            self.symbol.to_lowercase(),
            self.interval
        );
        let url = Url::parse(&raw).with_context(|| format!("Invalid stream URL: {raw}"))?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => anyhow::bail!("Unsupported stream URL scheme '{}': expected ws or wss", other),
        }
    }
}
