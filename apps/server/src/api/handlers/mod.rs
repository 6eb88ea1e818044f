//! Request handlers for API endpoints

pub mod health;
pub mod metrics;
pub mod rentals;

pub use health::*;
pub use metrics::*;
pub use rentals::*;
