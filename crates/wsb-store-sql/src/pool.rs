//! Database connection pool management.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use wsb_store::StoreError;

/// Database pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Path to the `SQLite` database file.
    pub path: String,
    /// Maximum number of connections.
    pub max_connections: u32,
    /// Connection acquire timeout.
    pub connect_timeout: Duration,
    /// Create the database file if it does not exist.
    pub create_if_missing: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            path: "wsbridge.db".to_string(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
            create_if_missing: true,
        }
    }
}

impl PoolConfig {
    /// Creates a new pool configuration for the given database file.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the maximum number of connections.
    #[must_use]
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection acquire timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Creates a `SQLite` connection pool for the configured database file.
///
/// ## Errors
///
/// Returns an error if the pool cannot be created.
pub async fn create_pool(config: &PoolConfig) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(config.create_if_missing);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))
}

/// Creates an in-memory `SQLite` pool, for tests and ephemeral runs.
///
/// The pool is pinned to a single connection: an in-memory database lives
/// and dies with its connection.
///
/// ## Errors
///
/// Returns an error if the pool cannot be created.
pub async fn create_memory_pool() -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::new().in_memory(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))
}
