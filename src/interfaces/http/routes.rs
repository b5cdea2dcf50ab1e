//! Query endpoints.
//!
//! - `GET /signal` - latest published result (all-null before the first closed candle)
//! - `GET /health` - liveness and ingestion state
//! - `GET /metrics` - Prometheus text format, 404 when observability is disabled

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::state::ServerState;
use crate::application::market_data::SignalResponse;

pub async fn get_signal(State(state): State<ServerState>) -> Json<SignalResponse> {
    Json(state.store.response())
}

/// Response for /health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub streaming: bool,
    pub sessions: u64,
    pub has_data: bool,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        streaming: state.status.is_streaming(),
        sessions: state.status.sessions(),
        has_data: state.store.has_data(),
    })
}

pub async fn metrics(State(state): State<ServerState>) -> Response {
    match &state.metrics {
        Some(metrics) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            metrics.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
