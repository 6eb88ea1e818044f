//! Storage collaborator seen by the rental repository

use crate::{models::RentalRow, Result};
use async_trait::async_trait;
use rentals_query::Statement;

/// Connection pool occupancy, for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: usize,
}

/// Executes rental statements against a backing database.
///
/// Implementations own their connections, timeouts and any reconnect logic.
/// Errors are passed through to callers untouched.
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// Run a statement expected to match exactly one row.
    ///
    /// # Errors
    /// * `NotFound` - the statement matched no rows
    /// * `Database` / `Timeout` - anything else
    async fn fetch_one(&self, statement: &Statement) -> Result<RentalRow>;

    /// Run a statement and return every matching row in database order.
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<RentalRow>>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<()>;

    fn pool_status(&self) -> Option<PoolStatus> {
        None
    }
}
