use crate::application::market_data::LatestResultStore;
use crate::application::market_data::ingestion::IngestionStatus;
use crate::infrastructure::observability::Metrics;
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// Handlers only read: the store is written by the ingestion task alone.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<LatestResultStore>,
    pub status: Arc<IngestionStatus>,
    pub metrics: Option<Metrics>,
}

impl ServerState {
    pub fn new(
        store: Arc<LatestResultStore>,
        status: Arc<IngestionStatus>,
        metrics: Option<Metrics>,
    ) -> Self {
        Self {
            store,
            status,
            metrics,
        }
    }
}
