//! PostgreSQL connection pool configuration and setup
//!
//! This module handles the creation and configuration of a connection pool
//! for PostgreSQL database access.

pub(crate) use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use std::time::Duration;
use tokio_postgres::NoTls;

use crate::types::StartupError;

/// Default values for database configuration
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Creates a PostgreSQL connection pool for `database_url`
pub fn create_pool(database_url: &str, max_connections: usize) -> Result<Pool, StartupError> {
    let mut cfg = Config::new();
    cfg.url = Some(database_url.to_string());
    cfg.pool = Some(PoolConfig::new(max_connections));
    cfg.connect_timeout = Some(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| StartupError::Database(format!("Failed to create connection pool: {e}")))
}

/// Checks if the database connection is working
pub async fn health_check(pool: &Pool) -> Result<(), StartupError> {
    let client = pool
        .get()
        .await
        .map_err(|e| StartupError::Database(format!("Failed to get database connection: {e}")))?;

    client
        .query_one("SELECT 1", &[])
        .await
        .map_err(|e| StartupError::Database(format!("Database health check failed: {e}")))?;

    Ok(())
}
