//! `SQLite` implementation of the binding store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use wsb_model::AccountBinding;
use wsb_store::{BindingStore, StoreError, StoreResult};

use crate::convert::{binding_from_row, keys_to_json};
use crate::entities::BindingRow;
use crate::error::from_sqlx_error;

/// `SQLite` binding store.
pub struct SqliteBindingStore {
    pool: SqlitePool,
}

impl SqliteBindingStore {
    /// Creates a new store over the given pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BindingStore for SqliteBindingStore {
    async fn get(&self, external_id: &str) -> StoreResult<Option<AccountBinding>> {
        let row: Option<BindingRow> =
            sqlx::query_as("SELECT * FROM bindings WHERE external_id = ?1")
                .bind(external_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        row.map(binding_from_row).transpose()
    }

    async fn create(&self, binding: &AccountBinding) -> StoreResult<()> {
        if binding.external_id.is_empty() {
            return Err(StoreError::invalid_record("external_id must not be empty"));
        }

        let ssh_keys = keys_to_json(&binding.ssh_keys)?;

        // The unique constraints make this an atomic check-and-insert;
        // a lost race surfaces as Duplicate, never as a second row.
        sqlx::query(
            r"INSERT INTO bindings (external_id, username, is_sysadm, ssh_keys)
            VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&binding.external_id)
        .bind(binding.username.as_str())
        .bind(binding.is_sysadm)
        .bind(ssh_keys)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, binding: &AccountBinding) -> StoreResult<()> {
        let ssh_keys = keys_to_json(&binding.ssh_keys)?;

        let result = sqlx::query(
            r"UPDATE bindings SET username = ?2, is_sysadm = ?3, ssh_keys = ?4
            WHERE external_id = ?1",
        )
        .bind(&binding.external_id)
        .bind(binding.username.as_str())
        .bind(binding.is_sysadm)
        .bind(ssh_keys)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(&binding.external_id));
        }

        Ok(())
    }

    async fn delete(&self, external_id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM bindings WHERE external_id = ?1")
            .bind(external_id)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(external_id));
        }

        Ok(())
    }

    async fn list_sysadmins(&self) -> StoreResult<Vec<AccountBinding>> {
        let rows: Vec<BindingRow> =
            sqlx::query_as("SELECT * FROM bindings WHERE is_sysadm = 1 ORDER BY username")
                .fetch_all(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        rows.into_iter().map(binding_from_row).collect()
    }
}
