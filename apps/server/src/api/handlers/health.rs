//! Health endpoint

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    #[serde(rename = "AppStatus")]
    pub app_status: &'static str,
    #[serde(rename = "Database")]
    pub database: &'static str,
}

/// `GET /healths`. Always 200; the database entry reflects a live ping.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    let database = match state.store.ping().await {
        Ok(()) => "Healthy",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed during health check");
            "Unhealthy"
        }
    };

    Json(HealthReport {
        app_status: "Healthy",
        database,
    })
}
