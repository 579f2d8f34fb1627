mod app;
mod config;
mod handlers;
mod state;
mod storage;

use std::{future::IntoFuture, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal, sync::watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::{Config, StorageBackend},
    state::AppState,
};

/// Students API - CRUD service for student records
#[derive(Parser, Debug)]
#[command(name = "students-api")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, short, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Host address to bind the server to (overrides the config file)
    #[arg(long, short = 'H')]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(long, short)]
    port: Option<u16>,

    /// Storage backend (overrides the config file)
    #[arg(long, value_enum)]
    storage: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "students=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    config.override_listen(cli.host.as_deref(), cli.port);
    if let Some(backend) = cli.storage {
        config.storage.backend = backend;
    }

    tracing::info!(env = %config.env, "Starting students API");

    let repo = storage::connect(&config.storage).await?;
    tracing::info!(backend = %config.storage.backend, "Storage initialized");

    let app = create_app(AppState::new(repo));

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => TcpListener::bind(&config.http_server.address)
            .await
            .with_context(|| format!("failed to bind {}", config.http_server.address))?,
    };

    tracing::info!("Server running at {}", listener.local_addr()?);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    // In-flight requests get a bounded grace period once a signal arrives.
    let grace = config.shutdown_grace();
    let deadline = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server.into_future() => result?,
        _ = deadline => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, forcing exit"
            );
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
