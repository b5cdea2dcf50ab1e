use thiserror::Error;

/// Errors raised while ingesting the candle stream
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    #[error("Malformed kline message: {reason}")]
    Parse { reason: String },

    #[error("Connection lost: {reason}")]
    ConnectionLost { reason: String },

    #[error("Stream processor is not streaming (state: {state})")]
    NotStreaming { state: String },
}

impl StreamError {
    pub fn parse(reason: impl Into<String>) -> Self {
        StreamError::Parse {
            reason: reason.into(),
        }
    }

    pub fn connection_lost(reason: impl Into<String>) -> Self {
        StreamError::ConnectionLost {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::parse(err.to_string())
    }
}
