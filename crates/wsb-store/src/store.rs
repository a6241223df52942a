//! Binding store trait.

use async_trait::async_trait;
use wsb_model::AccountBinding;

use crate::error::StoreResult;

/// Provider for account binding persistence.
///
/// Implementations must be thread-safe and support concurrent access.
/// Every operation touches at most one record; the keyed create/update/
/// delete semantics are the serialization point for concurrent mutations
/// on the same external identity.
#[async_trait]
pub trait BindingStore: Send + Sync {
    /// Gets the binding for an external identity.
    async fn get(&self, external_id: &str) -> StoreResult<Option<AccountBinding>>;

    /// Creates a new binding.
    ///
    /// The insert must be an atomic check-and-insert: two concurrent
    /// creates for the same external identity (or username) must not both
    /// succeed.
    ///
    /// ## Errors
    ///
    /// Returns `StoreError::Duplicate` if a binding with the same external
    /// id or username exists, and `StoreError::InvalidRecord` if the
    /// external id is empty.
    async fn create(&self, binding: &AccountBinding) -> StoreResult<()>;

    /// Updates an existing binding, keyed by external id.
    ///
    /// ## Errors
    ///
    /// Returns `StoreError::NotFound` if no binding with that external id
    /// exists.
    async fn update(&self, binding: &AccountBinding) -> StoreResult<()>;

    /// Deletes the binding for an external identity.
    ///
    /// ## Errors
    ///
    /// Returns `StoreError::NotFound` if no binding with that external id
    /// exists.
    async fn delete(&self, external_id: &str) -> StoreResult<()>;

    /// Lists all bindings whose account is on the sysadmin roster.
    async fn list_sysadmins(&self) -> StoreResult<Vec<AccountBinding>>;
}
