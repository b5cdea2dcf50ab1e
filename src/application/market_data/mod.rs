// Stream ingestion and publication of the latest result
pub mod ingestion;
pub mod latest_result;
pub mod signal_response;
pub mod stream_processor;

pub use ingestion::{IngestionStatus, IngestionSupervisor, ReconnectBackoff, ReconnectPolicy};
pub use latest_result::LatestResultStore;
pub use signal_response::{IndicatorsResponse, SignalResponse};
pub use stream_processor::{ConnectionLost, ProcessorState, StreamProcessor};
