//! Operational routes: Prometheus scrape and health

use crate::api::handlers::{health, metrics};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/healths", get(health::health_check))
}
