//! Shared application state handed to every handler.

use crate::{
    config::Config,
    db::{PostgresDatabase, RentalRepository, RentalStore},
    Result,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn RentalStore>,
    pub rentals: Arc<RentalRepository>,
}

impl AppState {
    /// Build state around any store. Used directly by tests.
    pub fn with_store(config: Config, store: Arc<dyn RentalStore>) -> Self {
        let rentals = Arc::new(RentalRepository::new(store.clone()));
        Self {
            config: Arc::new(config),
            store,
            rentals,
        }
    }

    /// Open the Postgres pool described by `config`, running migrations first
    /// when `database.run_migrations` is set.
    pub async fn connect(config: Config) -> Result<(Self, Arc<PostgresDatabase>)> {
        let database = Arc::new(PostgresDatabase::open(&config.database)?);

        if config.database.run_migrations {
            database.migrate().await?;
        }

        let state = Self::with_store(config, database.clone());
        Ok((state, database))
    }
}
