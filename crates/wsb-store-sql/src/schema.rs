//! Database schema management.

use sqlx::SqlitePool;
use wsb_store::{StoreError, StoreResult};

/// The bindings table.
///
/// `external_id` and `username` are both unique: the bijection between
/// chat identity and unix account is enforced here, atomically, which is
/// what makes concurrent create calls safe.
const CREATE_BINDINGS: &str = r"
CREATE TABLE IF NOT EXISTS bindings (
    external_id TEXT PRIMARY KEY NOT NULL,
    username    TEXT NOT NULL UNIQUE,
    is_sysadm   INTEGER NOT NULL DEFAULT 0,
    ssh_keys    TEXT NOT NULL DEFAULT '[]'
)";

/// Creates the schema if it does not exist yet. Idempotent.
///
/// ## Errors
///
/// Returns an error if the schema statement fails.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(CREATE_BINDINGS)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

    Ok(())
}
