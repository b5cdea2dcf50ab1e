use crate::domain::errors::StreamError;
use crate::domain::ports::{MessageSource, SourceConnector};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Binance-shaped kline frame, handy for feeding mocks.
pub fn kline_frame(close_time: i64, close_price: f64, is_closed: bool) -> String {
    serde_json::json!({
        "e": "kline",
        "E": close_time + 1,
        "s": "BTCUSDT",
        "k": {
            "t": close_time - 59_999,
            "T": close_time,
            "s": "BTCUSDT",
            "i": "1m",
            "c": close_price.to_string(),
            "x": is_closed,
        }
    })
    .to_string()
}

#[derive(Debug, Clone)]
enum StreamEnd {
    Closed,
    Failed(String),
}

/// Replays canned frames, then ends the way it was told to.
#[derive(Debug)]
pub struct MockMessageSource {
    frames: VecDeque<String>,
    end: StreamEnd,
}

impl MockMessageSource {
    /// Ends with a clean close from the peer.
    pub fn closing(frames: Vec<String>) -> Self {
        Self {
            frames: frames.into(),
            end: StreamEnd::Closed,
        }
    }

    /// Ends with a transport failure.
    pub fn failing(frames: Vec<String>, reason: &str) -> Self {
        Self {
            frames: frames.into(),
            end: StreamEnd::Failed(reason.to_string()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl MessageSource for MockMessageSource {
    async fn next_message(&mut self) -> Result<Option<String>, StreamError> {
        if let Some(frame) = self.frames.pop_front() {
            return Ok(Some(frame));
        }
        match &self.end {
            StreamEnd::Closed => Ok(None),
            StreamEnd::Failed(reason) => Err(StreamError::connection_lost(reason.clone())),
        }
    }
}

/// Hands out one scripted source per connection; fails once they run out.
#[derive(Debug)]
pub struct MockConnector {
    sessions: Mutex<VecDeque<Option<MockMessageSource>>>,
    attempts: AtomicU32,
}

impl MockConnector {
    pub fn new(sessions: Vec<MockMessageSource>) -> Self {
        Self::with_failures(sessions.into_iter().map(Some).collect())
    }

    /// `None` entries make the corresponding connection attempt fail.
    pub fn with_failures(sessions: Vec<Option<MockMessageSource>>) -> Self {
        Self {
            sessions: Mutex::new(sessions.into()),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceConnector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn MessageSource>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let next = match self.sessions.lock() {
            Ok(mut guard) => guard.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };

        match next {
            Some(Some(source)) => Ok(Box::new(source)),
            Some(None) => anyhow::bail!("mock: scripted connection failure"),
            None => anyhow::bail!("mock: no more scripted sessions"),
        }
    }

    fn endpoint(&self) -> String {
        "mock://klines".to_string()
    }
}
