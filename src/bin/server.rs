//! signalstream server
//!
//! Streams closed klines from Binance, recomputes RSI(14) and MACD(12, 26, 9)
//! on every close and serves the latest result at `GET /signal`.
//!
//! # Usage
//! ```sh
//! RUST_LOG=debug cargo run --bin server -- --symbol ethusdt --port 8080
//! ```
//!
//! # Environment Variables
//! - `BINANCE_WS_URL` - stream host (default: wss://stream.binance.com:9443)
//! - `SYMBOL` / `KLINE_INTERVAL` - stream to follow (default: btcusdt / 1m)
//! - `SERVER_BIND_ADDRESS` / `SERVER_PORT` - query server (default: 127.0.0.1:8000)
//! - `OBSERVABILITY_ENABLED` - expose `GET /metrics` (default: true)

use anyhow::Result;
use clap::Parser;
use signalstream::application::system::Application;
use signalstream::config::Config;
use signalstream::interfaces::http;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Trading pair to follow (overrides SYMBOL)
    #[arg(short, long)]
    symbol: Option<String>,

    /// Kline interval (overrides KLINE_INTERVAL)
    #[arg(short, long)]
    interval: Option<String>,

    /// Query server port (overrides SERVER_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(symbol) = cli.symbol {
        config.stream.symbol = symbol.to_lowercase();
    }
    if let Some(interval) = cli.interval {
        config.stream.interval = interval;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.stream.validate()?;

    info!("signalstream {} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: Symbol={}, Interval={}, Server={}:{}",
        config.stream.symbol,
        config.stream.interval,
        config.server.bind_address,
        config.server.port
    );

    let addr = config.server.socket_addr()?;
    let app = Application::build(config)?;
    let handle = app.start().await?;

    info!("Server running. Press Ctrl+C to shutdown.");

    http::serve(addr, handle.server_state(), async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received. Exiting...");
    })
    .await?;

    handle.shutdown();
    Ok(())
}
