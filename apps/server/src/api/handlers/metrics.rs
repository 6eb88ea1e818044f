//! Metrics endpoint handler

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::{
    metrics::{DB_CONNECTIONS_ACTIVE, DB_CONNECTIONS_IDLE},
    state::AppState,
};

/// `GET /metrics` in Prometheus text format. Pool gauges are refreshed on scrape.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(status) = state.store.pool_status() {
        let idle = i64::try_from(status.idle).unwrap_or(i64::MAX);
        DB_CONNECTIONS_IDLE.set(idle);
        DB_CONNECTIONS_ACTIVE.set((i64::from(status.size) - idle).max(0));
    }

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}
