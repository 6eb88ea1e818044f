//! PostgreSQL-backed rental store
//!
//! Owns the connection pool. Every call is bounded by the configured query
//! timeout, and the pool can be swapped out wholesale by [`PostgresDatabase::reconnect`]
//! (used by the background health monitor).

use crate::{
    config::DatabaseConfig,
    db::traits::{PoolStatus, RentalStore},
    models::RentalRow,
    Error, Result,
};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rentals_query::{BindValue, Statement};
use sqlx::{
    migrate::Migrator,
    postgres::{PgArguments, PgConnectOptions, PgPool, PgPoolOptions},
    query::QueryAs,
    Postgres,
};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub struct PostgresDatabase {
    config: DatabaseConfig,
    pool: RwLock<PgPool>,
}

impl PostgresDatabase {
    /// Create the pool. Connections are established lazily, so an unreachable
    /// database does not prevent startup; the health monitor keeps retrying.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let pool = connect(config)?;
        Ok(Self::from_pool(config.clone(), pool))
    }

    /// Wrap an existing pool (e.g. one built from a test database URL).
    pub fn from_pool(config: DatabaseConfig, pool: PgPool) -> Self {
        Self {
            config,
            pool: RwLock::new(pool),
        }
    }

    pub async fn pool(&self) -> PgPool {
        self.pool.read().await.clone()
    }

    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool().await;
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.read().await.close().await;
        tracing::info!("Database connection pool closed");
    }

    /// Replace the pool with a fresh one (possibly on a different host) and
    /// close the old one. In-flight calls on the old pool finish or fail on their own.
    pub async fn reconnect(&self) -> Result<()> {
        let fresh = connect(&self.config)?;
        let stale = {
            let mut guard = self.pool.write().await;
            std::mem::replace(&mut *guard, fresh)
        };
        stale.close().await;
        crate::metrics::DB_RECONNECTS_TOTAL.inc();
        Ok(())
    }

    async fn timed<T, F>(&self, query_type: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        let timeout = self.config.query_timeout();
        let start = Instant::now();
        let outcome = tokio::time::timeout(timeout, fut).await;

        crate::metrics::DB_QUERY_DURATION_SECONDS
            .with_label_values(&[query_type])
            .observe(start.elapsed().as_secs_f64());

        let result = match outcome {
            Ok(result) => result.map_err(Error::Database),
            Err(_) => Err(Error::Timeout(timeout)),
        };

        if let Err(e) = &result {
            let error_type = match e {
                Error::Timeout(_) => "timeout",
                Error::Database(sqlx::Error::RowNotFound) => "not_found",
                _ => "database",
            };
            crate::metrics::DB_QUERY_ERRORS_TOTAL
                .with_label_values(&[query_type, error_type])
                .inc();
        }

        result
    }
}

#[async_trait]
impl RentalStore for PostgresDatabase {
    async fn fetch_one(&self, statement: &Statement) -> Result<RentalRow> {
        let pool = self.pool().await;
        let query = bind_values(sqlx::query_as(&statement.sql), &statement.binds);

        match self.timed("fetch_one", query.fetch_one(&pool)).await {
            Err(Error::Database(sqlx::Error::RowNotFound)) => {
                Err(Error::NotFound("no rows in result set".to_string()))
            }
            other => other,
        }
    }

    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<RentalRow>> {
        let pool = self.pool().await;
        let query = bind_values(sqlx::query_as(&statement.sql), &statement.binds);

        self.timed("fetch_all", query.fetch_all(&pool)).await
    }

    async fn ping(&self) -> Result<()> {
        let pool = self.pool().await;
        self.timed("ping", sqlx::query("SELECT 1").execute(&pool))
            .await
            .map(|_| ())
    }

    fn pool_status(&self) -> Option<PoolStatus> {
        let pool = self.pool.try_read().ok()?;
        Some(PoolStatus {
            size: pool.size(),
            idle: pool.num_idle(),
        })
    }
}

fn bind_values<'q>(
    mut query: QueryAs<'q, Postgres, RentalRow, PgArguments>,
    binds: &[BindValue],
) -> QueryAs<'q, Postgres, RentalRow, PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Float(v) => query.bind(*v),
        };
    }
    query
}

fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let hosts = config.host_list();
    let host = hosts
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| Error::Config("database.hosts must name at least one host".to_string()))?;

    tracing::info!(
        host = %host,
        port = config.port,
        database = %config.name,
        max_connections = config.max_connections,
        "Opening database connection pool"
    );

    let options = PgConnectOptions::new()
        .host(host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.name);

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .max_lifetime(Duration::from_secs(config.max_lifetime_seconds))
        .acquire_timeout(config.query_timeout())
        .connect_lazy_with(options))
}
