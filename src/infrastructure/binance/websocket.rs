use crate::config::StreamEnvConfig;
use crate::domain::errors::StreamError;
use crate::domain::ports::{MessageSource, SourceConnector};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

type WsRead = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

const PING_INTERVAL_SECS: u64 = 180;

/// One live connection to a Binance kline stream.
///
/// Reads happen on the caller's task; a small writer task owns the sink so pongs
/// and keep-alive pings can be sent while the reader waits.
pub struct BinanceKlineStream {
    read: WsRead,
    ws_tx: mpsc::Sender<Message>,
    writer: JoinHandle<()>,
    pinger: JoinHandle<()>,
}

impl BinanceKlineStream {
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Binance WebSocket: {}", url);

        let (ws_stream, _) = connect_async(url)
            .await
            .context("Failed to connect to Binance WebSocket")?;

        info!("Binance WebSocket connected successfully");

        let (mut write, read) = ws_stream.split();
        let (ws_tx, mut ws_rx) = mpsc::channel::<Message>(100);

        let writer = tokio::spawn(async move {
            while let Some(msg) = ws_rx.recv().await {
                if write.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let tx_ping = ws_tx.clone();
        let pinger = tokio::spawn(async move {
            let mut ping_interval =
                tokio::time::interval(tokio::time::Duration::from_secs(PING_INTERVAL_SECS));
            // The first tick completes immediately.
            ping_interval.tick().await;
            loop {
                ping_interval.tick().await;
                if tx_ping.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            read,
            ws_tx,
            writer,
            pinger,
        })
    }
}

impl Drop for BinanceKlineStream {
    fn drop(&mut self) {
        self.pinger.abort();
        self.writer.abort();
    }
}

#[async_trait]
impl MessageSource for BinanceKlineStream {
    async fn next_message(&mut self) -> Result<Option<String>, StreamError> {
        while let Some(msg_result) = self.read.next().await {
            match msg_result {
                Ok(Message::Text(text)) => return Ok(Some(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => return Ok(Some(text)),
                    Err(_) => warn!("Dropping non UTF-8 binary frame ({} bytes)", bytes.len()),
                },
                Ok(Message::Ping(payload)) => {
                    debug!("Received ping from Binance");
                    let _ = self.ws_tx.send(Message::Pong(payload)).await;
                }
                Ok(Message::Pong(_)) => {
                    debug!("Received pong from Binance");
                }
                Ok(Message::Close(frame)) => {
                    if let Some(cf) = frame {
                        info!(
                            "Binance WebSocket closed by server: Code {} Reason '{}'",
                            cf.code, cf.reason
                        );
                    } else {
                        info!("Binance WebSocket closed by server (No info)");
                    }
                    return Ok(None);
                }
                Ok(Message::Frame(_)) => {}
                Err(e) => {
                    return Err(StreamError::connection_lost(format!(
                        "Binance WebSocket read error: {e}"
                    )));
                }
            }
        }

        Ok(None)
    }
}

/// Opens a new [`BinanceKlineStream`] for every connection attempt.
#[derive(Debug, Clone)]
pub struct BinanceKlineConnector {
    url: String,
}

impl BinanceKlineConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn from_config(config: &StreamEnvConfig) -> Result<Self> {
        Ok(Self::new(config.stream_url()?.to_string()))
    }
}

#[async_trait]
impl SourceConnector for BinanceKlineConnector {
    async fn connect(&self) -> Result<Box<dyn MessageSource>> {
        let stream = BinanceKlineStream::connect(&self.url).await?;
        Ok(Box::new(stream))
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_from_default_config() {
        let config = StreamEnvConfig::default();
        let connector = BinanceKlineConnector::from_config(&config).unwrap();
        assert_eq!(
            connector.endpoint(),
            "wss://stream.binance.com:9443/ws/btcusdt@kline_1m"
        );
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported() {
        // Nothing listens on port 9 of localhost in the test environment.
        let connector = BinanceKlineConnector::new("ws://127.0.0.1:9/ws/btcusdt@kline_1m");
        let err = connector.connect().await.err().unwrap();
        assert!(format!("{err:#}").contains("Failed to connect"));
    }
}
