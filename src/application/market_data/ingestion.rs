use crate::application::market_data::latest_result::LatestResultStore;
use crate::application::market_data::stream_processor::StreamProcessor;
use crate::domain::ports::SourceConnector;
use crate::infrastructure::observability::Metrics;
use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{error, info, warn};

/// When and how often to reconnect after the transport is lost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconnectPolicy {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// `None` reconnects forever
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            max_attempts: None,
        }
    }
}

/// Ingestion state shared with the query side
#[derive(Debug, Default)]
pub struct IngestionStatus {
    streaming: AtomicBool,
    sessions: AtomicU64,
}

impl IngestionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    /// Number of connections opened so far
    pub fn sessions(&self) -> u64 {
        self.sessions.load(Ordering::Acquire)
    }

    fn session_started(&self) {
        self.sessions.fetch_add(1, Ordering::AcqRel);
        self.streaming.store(true, Ordering::Release);
    }

    fn session_ended(&self) {
        self.streaming.store(false, Ordering::Release);
    }
}

/// Owns the connect / process / reconnect loop.
///
/// Each connection gets a brand new [`StreamProcessor`], so price windows from
/// before and after a disconnect are never mixed. The store outlives every
/// session and keeps serving the last published snapshot in between.
pub struct IngestionSupervisor {
    connector: Arc<dyn SourceConnector>,
    store: Arc<LatestResultStore>,
    metrics: Metrics,
    status: Arc<IngestionStatus>,
    policy: ReconnectPolicy,
}

impl IngestionSupervisor {
    pub fn new(
        connector: Arc<dyn SourceConnector>,
        store: Arc<LatestResultStore>,
        metrics: Metrics,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            connector,
            store,
            metrics,
            status: Arc::new(IngestionStatus::new()),
            policy,
        }
    }

    pub fn status(&self) -> Arc<IngestionStatus> {
        self.status.clone()
    }

    /// Runs until the reconnect budget is exhausted (never, without a budget).
    ///
    /// The budget counts consecutive reconnects without a productive session: a
    /// session that processed at least one candle resets it along with the backoff.
    pub async fn run(self) -> Result<()> {
        let mut backoff = ReconnectBackoff::new(&self.policy);
        let mut attempts: u32 = 0;

        loop {
            match self.connector.connect().await {
                Ok(mut source) => {
                    info!("Ingestion: connected to {}", self.connector.endpoint());
                    self.status.session_started();

                    let processor = StreamProcessor::new(self.store.clone(), self.metrics.clone());
                    let lost = processor.run(source.as_mut()).await;

                    self.status.session_ended();
                    warn!(
                        "Ingestion: connection lost ({}) after {} candles",
                        lost.reason, lost.candles_processed
                    );

                    if lost.candles_processed > 0 {
                        backoff.reset();
                        attempts = 0;
                    }
                }
                Err(e) => {
                    error!(
                        "Ingestion: failed to connect to {}: {:#}",
                        self.connector.endpoint(),
                        e
                    );
                }
            }

            if let Some(max) = self.policy.max_attempts
                && attempts >= max
            {
                anyhow::bail!("Giving up after {} reconnect attempts", attempts);
            }
            attempts += 1;
            self.metrics.websocket_reconnects_total.inc();

            let delay = backoff.next_delay();
            info!("Ingestion: reconnecting in {:?}...", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

/// Exponential reconnect delay: starts at `initial_backoff`, doubles on every
/// attempt and is capped at `max_backoff`.
#[derive(Debug, Clone)]
pub struct ReconnectBackoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl ReconnectBackoff {
    pub fn new(policy: &ReconnectPolicy) -> Self {
        let initial = policy.initial_backoff.min(policy.max_backoff);
        Self {
            initial,
            max: policy.max_backoff,
            current: initial,
        }
    }

    /// Delay before the next attempt; advances the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
