//! Read-only HTTP surface over the latest result.

pub mod routes;
pub mod state;

pub use state::ServerState;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use tracing::info;

/// Create the Axum application with all routes.
pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/signal", get(routes::get_signal))
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: ServerState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind query server on {addr}"))?;

    info!("Query server listening on http://{}", addr);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Query server failed")
}
