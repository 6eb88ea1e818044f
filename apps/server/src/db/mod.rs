//! Database layer - store, queries and the rental repository

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod queries;
pub mod rentals;
pub mod traits;

pub use postgres::PostgresDatabase;
pub use rentals::RentalRepository;
pub use traits::{PoolStatus, RentalStore};
