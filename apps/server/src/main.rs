//! Rentals server - web server entry point

use anyhow::Context;
use clap::Parser;
use rentals_server::{api::create_router, background, config::Config, logging, state::AppState};
use std::path::PathBuf;
use validator::Validate;

#[derive(Debug, Parser)]
#[clap(name = "rentals-server", version, about = "Read-only HTTP API over rental listings")]
struct Args {
    /// Configuration file (defaults to ./config.toml when present)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_from(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.logging.deployment_environment,
        "Starting rentals server"
    );
    if config.is_local() {
        tracing::info!(config = ?config, "Effective configuration");
    }

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;
    let health_interval = config.database.health_check_interval();

    let (state, database) = AppState::connect(config)
        .await
        .context("Failed to initialize application state")?;

    let monitor = background::spawn_health_monitor(database.clone(), health_interval);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    tracing::info!(listen_addr = %addr, "Rentals server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    monitor.abort();
    database.close().await;

    if let Err(e) = served {
        tracing::error!(error = %e, "Server terminated unexpectedly");
        return Err(e.into());
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT.
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler, waiting for SIGINT only");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for CTRL+C");
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
