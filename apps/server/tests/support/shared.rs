use anyhow::Context as _;
use rentals_server::config::{Config, DatabaseConfig, LoggingConfig, ServerConfig};
use std::sync::Arc;
use tokio::sync::OnceCell;
use url::Url;

pub const TEST_DATABASE_URL_ENV: &str = "RENTALS_TEST_DATABASE_URL";

static SHARED: OnceCell<Option<Arc<SharedTestResources>>> = OnceCell::const_new();

pub struct SharedTestResources {
    pub base_config: Config,
    pub database_url: String,
}

/// `None` when no test database is configured; callers skip in that case.
pub async fn shared() -> Option<Arc<SharedTestResources>> {
    SHARED
        .get_or_init(|| async {
            init_tracing();

            let database_url = std::env::var(TEST_DATABASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())?;

            let database = database_config(&database_url)
                .unwrap_or_else(|e| panic!("{TEST_DATABASE_URL_ENV} is unusable: {e:?}"));

            Some(Arc::new(SharedTestResources {
                base_config: Config {
                    server: ServerConfig::default(),
                    database,
                    logging: LoggingConfig::default(),
                },
                database_url,
            }))
        })
        .await
        .clone()
}

/// Store settings pointing at the same server as `database_url`, so a pool
/// rebuilt by `PostgresDatabase::reconnect` lands on the test database.
pub fn database_config(database_url: &str) -> anyhow::Result<DatabaseConfig> {
    let url = Url::parse(database_url).context("parse database URL")?;
    let host = url.host_str().filter(|h| !h.is_empty()).unwrap_or("localhost");
    let username = match url.username() {
        "" => "postgres",
        name => name,
    };

    Ok(DatabaseConfig {
        hosts: host.to_string(),
        port: url.port().unwrap_or(5432),
        username: username.to_string(),
        password: url.password().unwrap_or_default().to_string(),
        name: url.path().trim_start_matches('/').to_string(),
        max_connections: 2,
        idle_timeout_seconds: 30,
        max_lifetime_seconds: 30,
        query_timeout_seconds: 10,
        health_check_interval_seconds: 5,
        run_migrations: true,
    })
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "rentals_server=info,sqlx=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
