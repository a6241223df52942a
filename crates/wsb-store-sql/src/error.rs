//! SQL store error mapping.

use sqlx::Error as SqlxError;
use wsb_store::StoreError;

/// Converts a `SQLx` error to a store error.
///
/// Unique-constraint violations are mapped to `Duplicate`, with the
/// conflicting column recovered from the `SQLite` message
/// (`UNIQUE constraint failed: bindings.<column>`).
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StoreError {
    match err {
        SqlxError::Database(db_err) => {
            let message = db_err.message().to_string();
            if message.contains("UNIQUE constraint failed") {
                let field = if message.contains("bindings.username") {
                    "username"
                } else {
                    "external_id"
                };
                StoreError::duplicate(field, message)
            } else {
                StoreError::Query(message)
            }
        }
        SqlxError::PoolTimedOut => StoreError::Connection("connection pool timeout".to_string()),
        SqlxError::PoolClosed => StoreError::Connection("connection pool closed".to_string()),
        _ => StoreError::Internal(err.to_string()),
    }
}
