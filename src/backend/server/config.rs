/**
 * Server Configuration
 *
 * Chooses the store backing the application. With a `DATABASE_URL` the
 * server connects to PostgreSQL and runs the bundled migrations. Without
 * one it runs on the in-memory store.
 *
 * # Error Handling
 *
 * A configured database that cannot be reached stops start-up. A failed
 * migration is logged and the pool is still used.
 */

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::backend::store::{DynStore, MemoryStore, PgStore, StoreError};
use crate::shared::AppConfig;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Load the configured store
///
/// Returns a `PgStore` when `config.database_url` is set, a `MemoryStore`
/// when it is not.
pub async fn load_store(config: &AppConfig) -> Result<DynStore, StoreError> {
    match load_database(config).await? {
        Some(store) => Ok(Arc::new(store)),
        None => {
            tracing::warn!("Using in-memory store. Data will be lost on shutdown.");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Connect to PostgreSQL and run migrations
///
/// `Ok(None)` if `DATABASE_URL` is not set.
pub async fn load_database(config: &AppConfig) -> Result<Option<PgStore>, StoreError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return Ok(None);
    };

    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .inspect_err(|e| tracing::error!("Failed to create database connection pool: {:?}", e))?;

    tracing::info!("Database connection pool created successfully");

    let store = PgStore::new(pool);

    tracing::info!("Running database migrations...");
    match store.migrate().await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(Some(store))
}
