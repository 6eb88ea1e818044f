//! Metrics collection for the rentals server
//!
//! Prometheus metrics registered in the default registry and exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    register_int_gauge_vec, HistogramVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "rentals_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "rentals_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "rentals_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Rental Query Metrics

    /// Repository calls by operation (`get_one`, `get_many`) and outcome
    pub static ref RENTAL_QUERIES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "rentals_queries_total",
        "Total number of rental repository calls",
        &["operation", "outcome"]
    )
    .expect("Failed to register RENTAL_QUERIES_TOTAL");

    /// Rentals returned per listing call
    pub static ref RENTAL_RESULTS: HistogramVec = register_histogram_vec!(
        "rentals_listing_results",
        "Number of rentals returned by a listing call",
        &["filtered"],
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0, 1000.0]
    )
    .expect("Failed to register RENTAL_RESULTS");

    // Database Metrics

    /// Database call duration
    pub static ref DB_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "rentals_db_query_duration_seconds",
        "Database query duration in seconds",
        &["query_type"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 3.0, 5.0]
    )
    .expect("Failed to register DB_QUERY_DURATION_SECONDS");

    /// Database call errors
    pub static ref DB_QUERY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "rentals_db_query_errors_total",
        "Total number of database query errors",
        &["query_type", "error_type"]
    )
    .expect("Failed to register DB_QUERY_ERRORS_TOTAL");

    /// Active database connections
    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "rentals_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    /// Idle database connections
    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "rentals_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");

    /// Pools replaced by the health monitor
    pub static ref DB_RECONNECTS_TOTAL: IntCounter = register_int_counter!(
        "rentals_db_reconnects_total",
        "Number of times the database pool was reopened after a failed health check"
    )
    .expect("Failed to register DB_RECONNECTS_TOTAL");
}

/// Collapse request paths to route templates so label cardinality stays bounded.
pub fn sanitize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/".to_string(),
        ["rentals"] => "/rentals".to_string(),
        ["rentals", _] => "/rentals/{id}".to_string(),
        ["healths"] => "/healths".to_string(),
        ["metrics"] => "/metrics".to_string(),
        _ => "/other".to_string(),
    }
}
