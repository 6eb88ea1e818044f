//! Rentals server
//!
//! Read-only HTTP API over vehicle rental listings backed by PostgreSQL:
//! - `GET /rentals/{id}` and filtered, sorted, paginated `GET /rentals`
//! - Query parameter validation and clause composition via `rentals-query`
//! - Database health monitor that reopens the pool after failed pings

pub mod api;
pub mod background;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
