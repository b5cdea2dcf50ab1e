use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::application::market_data::LatestResultStore;
use crate::application::market_data::ingestion::{IngestionStatus, IngestionSupervisor};
use crate::config::Config;
use crate::domain::ports::SourceConnector;
use crate::infrastructure::binance::BinanceKlineConnector;
use crate::infrastructure::observability::Metrics;
use crate::interfaces::http::ServerState;

pub struct SystemHandle {
    pub store: Arc<LatestResultStore>,
    pub status: Arc<IngestionStatus>,
    pub metrics: Metrics,
    pub ingestion: JoinHandle<Result<()>>,
    observability_enabled: bool,
}

impl SystemHandle {
    /// State for the query server
    pub fn server_state(&self) -> ServerState {
        let metrics = self
            .observability_enabled
            .then(|| self.metrics.clone());
        ServerState::new(self.store.clone(), self.status.clone(), metrics)
    }

    /// Stop ingestion. The store keeps serving the last published snapshot.
    pub fn shutdown(&self) {
        info!("Initiating Graceful Shutdown Sequence...");
        self.ingestion.abort();

        match self.store.read() {
            Some(last) => info!(
                "Ingestion stopped. Last snapshot: ts={} price={} signal={}",
                last.timestamp, last.price, last.signal
            ),
            None => info!("Ingestion stopped before any candle closed."),
        }
    }
}

pub struct Application {
    pub config: Config,
    pub connector: Arc<dyn SourceConnector>,
    pub store: Arc<LatestResultStore>,
    pub metrics: Metrics,
}

impl Application {
    pub fn build(config: Config) -> Result<Self> {
        let connector = Arc::new(BinanceKlineConnector::from_config(&config.stream)?);
        Self::with_connector(config, connector)
    }

    /// Build around an arbitrary transport (tests, replays).
    pub fn with_connector(config: Config, connector: Arc<dyn SourceConnector>) -> Result<Self> {
        info!(
            "Building signalstream (symbol={}, interval={})...",
            config.stream.symbol, config.stream.interval
        );

        Ok(Self {
            config,
            connector,
            store: Arc::new(LatestResultStore::new()),
            metrics: Metrics::new()?,
        })
    }

    pub async fn start(self) -> Result<SystemHandle> {
        info!("Starting ingestion from {}", self.connector.endpoint());

        let supervisor = IngestionSupervisor::new(
            self.connector.clone(),
            self.store.clone(),
            self.metrics.clone(),
            self.config.reconnect_policy(),
        );
        let status = supervisor.status();

        let ingestion = tokio::spawn(async move {
            let result = supervisor.run().await;
            if let Err(e) = &result {
                warn!("Ingestion terminated: {:#}", e);
            }
            result
        });

        Ok(SystemHandle {
            store: self.store,
            status,
            metrics: self.metrics,
            ingestion,
            observability_enabled: self.config.observability.enabled,
        })
    }
}
