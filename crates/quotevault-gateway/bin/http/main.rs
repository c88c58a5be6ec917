mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::{anyhow, Context};
use clap::Parser;
use quotevault_gateway::{cors_layer, App, AppState};
use quotevault_service::QuoteService;
use quotevault_storage::{InMemoryRepository, PostgresRepository, Repository, SqliteRepository};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let _guard = quotevault_telemetry::init(config.telemetry())
        .context("failed to initialise telemetry")?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        max_connections = config.max_connections,
        "starting quote vault http server"
    );

    match config.storage {
        StorageBackendArg::InMemory => run_server(&config, InMemoryRepository::new()).await,
        StorageBackendArg::Sqlite => {
            let url = database_url(&config)?;
            let repository = SqliteRepository::connect(url, config.max_connections)
                .await
                .context("failed to open sqlite database")?;
            run_server(&config, repository).await
        }
        StorageBackendArg::Postgres => {
            let url = database_url(&config)?;
            let repository = PostgresRepository::connect(url, config.max_connections)
                .await
                .context("failed to connect to postgres")?;
            run_server(&config, repository).await
        }
    }
}

fn database_url(config: &CLI) -> anyhow::Result<&str> {
    config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow!("database url is required when storage backend is {}", config.storage))
}

async fn run_server<R: Repository>(config: &CLI, repository: R) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(QuoteService::new(repository)));
    let cors = cors_layer(&config.cors_origin)
        .with_context(|| format!("invalid cors origin '{}'", config.cors_origin))?;
    let router = App::router(state, cors);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, router).with_graceful_shutdown({
        let shutdown = Arc::clone(&shutdown);
        async move { shutdown.notified().await }
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut server => {
            result.context("server task panicked")??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    let timeout = Duration::from_secs(config.shutdown_timeout_secs);
    info!(timeout_secs = config.shutdown_timeout_secs, "shutting down");
    shutdown.notify_one();

    match tokio::time::timeout(timeout, server).await {
        Ok(result) => result.context("server task panicked")??,
        Err(_) => warn!("in-flight requests did not finish before the shutdown timeout"),
    }

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}
