//! Configuration module for signalstream.
//!
//! Structured configuration loaded from environment variables, organized by
//! concern: candle Stream, query Server and Observability.

mod observability_config;
mod server_config;
mod stream_config;

pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;
pub use stream_config::{KLINE_INTERVALS, StreamEnvConfig};

use crate::application::market_data::ingestion::ReconnectPolicy;
use anyhow::{Context, Result};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub stream: StreamEnvConfig,
    pub server: ServerEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            stream: StreamEnvConfig::from_env().context("Failed to load stream config")?,
            server: ServerEnvConfig::from_env(),
            observability: ObservabilityEnvConfig::from_env(),
        })
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            max_backoff: Duration::from_secs(self.stream.reconnect_max_backoff_secs.max(1)),
            max_attempts: self.stream.reconnect_max_attempts,
            ..ReconnectPolicy::default()
        }
    }
}
