//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! [`StudentRepository`] defined in `students_core::storage`. Each backend is
//! compiled in behind a feature flag; the one to use is chosen from
//! configuration when the process starts.
//!
//! # Feature Flags
//!
//! - `postgres` (default): PostgreSQL backend using `sqlx`
//! - `sqlite` (default): SQLite backend using `rusqlite` and `tokio-rusqlite`
//!
//! # Examples
//!
//! Build with SQLite only:
//! ```bash
//! cargo build -p students --no-default-features --features sqlite
//! ```

use std::sync::Arc;

use anyhow::Context;
use students_core::storage::StudentRepository;

use crate::config::{StorageBackend, StorageConfig};

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!(
    "No storage backend selected. Enable 'postgres' or 'sqlite' feature. \
    Example: cargo build -p students --features sqlite"
);

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

/// Opens the configured backend and bootstraps its schema.
pub async fn connect(config: &StorageConfig) -> anyhow::Result<Arc<dyn StudentRepository>> {
    tracing::info!(backend = %config.backend, "Initializing storage");

    match config.backend {
        StorageBackend::Postgres => connect_postgres(config).await,
        StorageBackend::Sqlite => connect_sqlite(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &StorageConfig) -> anyhow::Result<Arc<dyn StudentRepository>> {
    let repo = PostgresRepository::connect(&config.database_url, config.max_connections)
        .await
        .context("failed to initialize PostgreSQL storage")?;
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_config: &StorageConfig) -> anyhow::Result<Arc<dyn StudentRepository>> {
    anyhow::bail!("storage backend 'postgres' is not compiled in; rebuild with --features postgres")
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(config: &StorageConfig) -> anyhow::Result<Arc<dyn StudentRepository>> {
    let path = &config.sqlite_path;
    let repo = SqliteRepository::new(path)
        .await
        .with_context(|| format!("failed to initialize SQLite storage at {path}"))?;
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_config: &StorageConfig) -> anyhow::Result<Arc<dyn StudentRepository>> {
    anyhow::bail!("storage backend 'sqlite' is not compiled in; rebuild with --features sqlite")
}
