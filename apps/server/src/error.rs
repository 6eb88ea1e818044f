//! Error types for the rentals server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rentals_query::ValidationError;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected query parameters. Displays as the bare reason so it can be
    /// returned to clients unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the request was rejected before any query ran.
    pub fn failed_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            // A missing rental is reported as an empty 204, not as an error.
            Error::NotFound(_) => StatusCode::NO_CONTENT.into_response(),
            Error::Validation(_) | Error::InvalidParameter(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            Error::Database(_) | Error::Timeout(_) | Error::Migration(_) | Error::Config(_) => {
                tracing::error!(error = %self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
