// src/config/db.rs
// DOCUMENTATION: Entity Store initialization
// PURPOSE: Pick the storage backend once, at startup

use crate::config::{Config, StorageType};
use crate::db::{EntityStore, FileStore, PgStore};
use anyhow::{anyhow, Context};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
/// Only called when HBNB_TYPE_STORAGE=db
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool");

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Build the configured Entity Store
/// DOCUMENTATION: Business logic only ever sees the returned trait object
pub async fn init_store(config: &Config) -> anyhow::Result<Arc<dyn EntityStore>> {
    let storage = config.storage_type().map_err(|e| anyhow!(e))?;

    let store: Arc<dyn EntityStore> = match storage {
        StorageType::Db => {
            let pool = init_db_pool(config)
                .await
                .context("Failed to connect to database")?;
            Arc::new(PgStore::new(pool).await?)
        }
        StorageType::File if config.file_path.is_empty() => Arc::new(FileStore::in_memory()),
        StorageType::File => Arc::new(
            FileStore::open(&config.file_path)
                .await
                .with_context(|| format!("Failed to open {}", config.file_path))?,
        ),
    };

    log::info!("Entity store ready (backend: {})", store.backend());
    Ok(store)
}
