use crate::domain::errors::StreamError;
use anyhow::Result;
use async_trait::async_trait;

/// Inbound transport delivering raw kline frames in arrival order.
#[async_trait]
pub trait MessageSource: Send {
    /// Next text frame.
    ///
    /// `Ok(None)` means the peer closed the stream; `Err(ConnectionLost)` means
    /// the transport failed. Either way no further frames will arrive.
    async fn next_message(&mut self) -> Result<Option<String>, StreamError>;
}

/// Opens a fresh [`MessageSource`] for each connection attempt.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn MessageSource>>;

    /// Human readable endpoint, for logs.
    fn endpoint(&self) -> String;
}
