//! Database row types.

use sqlx::FromRow;

/// A row from the `bindings` table.
#[derive(Debug, Clone, FromRow)]
pub struct BindingRow {
    /// External chat identity.
    pub external_id: String,
    /// Unix account name.
    pub username: String,
    /// Sysadmin roster flag.
    pub is_sysadm: bool,
    /// SSH keys as a JSON string array.
    pub ssh_keys: String,
}
