//! Background tasks
//!
//! The database health monitor pings the store on a fixed interval and
//! replaces the connection pool whenever a ping fails.

use crate::{db::PostgresDatabase, db::RentalStore, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<()>;

    async fn reconnect(&self) -> Result<()>;
}

#[async_trait]
impl HealthCheck for PostgresDatabase {
    async fn ping(&self) -> Result<()> {
        RentalStore::ping(self).await
    }

    async fn reconnect(&self) -> Result<()> {
        PostgresDatabase::reconnect(self).await
    }
}

/// Run one health check. Returns `true` when the ping succeeded.
pub async fn check_once(target: &dyn HealthCheck) -> bool {
    match target.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed, reconnecting");
            match target.reconnect().await {
                Ok(()) => tracing::info!("Database connection pool reopened"),
                Err(e) => tracing::error!(error = %e, "Database reconnect failed"),
            }
            false
        }
    }
}

/// Spawn the health monitor. Abort the returned handle to stop it.
pub fn spawn_health_monitor<H>(target: Arc<H>, every: Duration) -> JoinHandle<()>
where
    H: HealthCheck + 'static,
{
    tracing::info!(interval_seconds = every.as_secs(), "Starting database health monitor");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately, so the pool is checked on startup.
        loop {
            ticker.tick().await;
            check_once(target.as_ref()).await;
        }
    })
}
