#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod shared;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use futures::FutureExt as _;
use rentals_server::{api::create_router, db::PostgresDatabase, AppState, Config};
use sqlx::{postgres::PgPoolOptions, Connection as _};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt as _;
use url::Url;
use uuid::Uuid;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub database: Arc<PostgresDatabase>,
    schema: String,
    admin_database_url: String,
}

impl TestApp {
    /// Per-test schema, migrated and seeded. `None` when no test database is configured.
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let Some(shared) = shared::shared().await else {
            return Ok(None);
        };
        let config: Config = shared.base_config.clone();
        let admin_database_url = shared.database_url.clone();

        let schema = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = sqlx::PgConnection::connect(&admin_database_url)
            .await
            .context("connect admin db for schema create")?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&with_search_path(&admin_database_url, &schema)?)
            .await
            .context("connect test pool")?;

        let database = Arc::new(PostgresDatabase::from_pool(
            config.database.clone(),
            pool.clone(),
        ));
        database.migrate().await.context("run migrations")?;
        seed_rentals(&pool).await?;

        let state = AppState::with_store(config, database.clone());
        let router = create_router(state.clone());

        Ok(Some(Self {
            router,
            state,
            database,
            schema,
            admin_database_url,
        }))
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.database.close().await;

        let mut admin_conn = sqlx::PgConnection::connect(&self.admin_database_url)
            .await
            .context("connect admin db for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .execute(&mut admin_conn)
            .await
            .context("drop test schema")?;

        Ok(())
    }

    pub async fn get(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let request = Request::get(path_and_query)
            .header("host", "example.org")
            .body(Body::empty())
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }
}

/// Run `f` against a fresh seeded app, dropping its schema afterwards.
/// Returns early without running `f` when no test database is configured.
pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let Some(app) = TestApp::new().await? else {
        eprintln!(
            "skipping: {} is not set",
            shared::TEST_DATABASE_URL_ENV
        );
        return Ok(());
    };

    let result = std::panic::AssertUnwindSafe(f(&app)).catch_unwind().await;
    let cleanup_result = app.cleanup().await;

    if let Err(e) = cleanup_result {
        eprintln!("test schema cleanup failed: {e:?}");
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn with_search_path(database_url: &str, schema: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(database_url).context("parse database URL")?;
    url.query_pairs_mut()
        .append_pair("options", &format!("-c search_path={}", schema));
    Ok(url.to_string())
}
