//! Conversions between database rows and domain models.

use wsb_model::{AccountBinding, Username};
use wsb_store::{StoreError, StoreResult};

use crate::entities::BindingRow;

/// Converts a database row into an [`AccountBinding`].
///
/// A row that fails conversion means the table was written by something
/// that bypassed the store; it is reported, not repaired.
pub fn binding_from_row(row: BindingRow) -> StoreResult<AccountBinding> {
    let username = Username::parse(row.username)
        .map_err(|e| StoreError::invalid_record(e.to_string()))?;
    let ssh_keys = keys_from_json(&row.ssh_keys)?;

    Ok(AccountBinding {
        external_id: row.external_id,
        username,
        is_sysadm: row.is_sysadm,
        ssh_keys,
    })
}

/// Serializes a key list into the JSON column format.
pub fn keys_to_json(keys: &[String]) -> StoreResult<String> {
    serde_json::to_string(keys).map_err(|e| StoreError::Internal(e.to_string()))
}

/// Deserializes the JSON key column into a key list.
pub fn keys_from_json(json: &str) -> StoreResult<Vec<String>> {
    serde_json::from_str(json).map_err(|e| StoreError::invalid_record(e.to_string()))
}
