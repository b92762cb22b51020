// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup and manage the SQLite connection pool

use crate::config::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Pool type shared by repositories and handlers
pub type DbPool = SqlitePool;

/// Initialize SQLite connection pool
/// DOCUMENTATION: Creates connection pool with foreign keys enforced
/// Called once during application startup in main.rs (and per test fixture)
pub async fn init_db_pool(config: &Config) -> Result<DbPool, sqlx::Error> {
    log::info!("Initializing database pool: {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // Every connection to an in-memory database sees its own empty database,
    // so the pool must hold exactly one connection for its whole lifetime.
    let in_memory = config.database_url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            // Connection idle timeout (5 minutes)
            .idle_timeout(Duration::from_secs(300))
            // Connection lifetime (30 minutes before recycle)
            .max_lifetime(Duration::from_secs(1800))
    };

    let pool = pool_options
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        .connect_with(options)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}
