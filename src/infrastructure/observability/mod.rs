//! Observability for signalstream
//!
//! Counters and gauges for the ingestion pipeline, rendered in Prometheus text
//! format by the HTTP layer at `GET /metrics`.

pub mod metrics;

pub use metrics::Metrics;
