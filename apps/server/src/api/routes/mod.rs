//! Route tables

pub mod metrics;
pub mod rentals;

pub use metrics::{health_routes, metrics_routes};
pub use rentals::rental_routes;
