//! Account provisioner trait.

use async_trait::async_trait;

use crate::error::ProvisionResult;

/// Capability that creates and removes the actual unix account.
///
/// The synchronization core calls this but never reimplements it; the
/// account-creation procedure is an external side effect owned by the
/// site. Each call reports plain success or failure, with no retry.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Checks whether a unix account with this name already exists,
    /// anywhere the system resolves accounts from (local files or the
    /// directory itself).
    async fn exists(&self, username: &str) -> ProvisionResult<bool>;

    /// Provisions the OS account and its matching directory entry as one
    /// external side effect.
    async fn create_account(&self, username: &str) -> ProvisionResult<()>;

    /// Removes the account's directory entry.
    ///
    /// Home directory removal is explicitly NOT part of this contract;
    /// callers treat it as a separate best-effort step.
    async fn remove_account(&self, username: &str) -> ProvisionResult<()>;
}
