//! Synchronization core error taxonomy.
//!
//! Outcomes fall into four groups: validation errors (bad input shape,
//! no state change), conflicts (the requested state collides with an
//! existing binding or account, no state change), dependency failures
//! (a collaborator call failed), and warnings (a secondary step failed
//! after the primary mutation already committed). Warnings ride on the
//! operation outcome, never in `Err`; the core does not roll back a
//! committed mutation because of them.

use thiserror::Error;
use wsb_directory::DirectoryError;
use wsb_model::{InvalidShell, InvalidUsername, Username};
use wsb_provision::ProvisionError;
use wsb_store::StoreError;

/// Errors from synchronization core operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Username fails the account-name grammar.
    #[error(transparent)]
    InvalidUsername(#[from] InvalidUsername),

    /// Shell is not on the allow-list.
    #[error(transparent)]
    InvalidShell(#[from] InvalidShell),

    /// Key text does not parse as an SSH public key.
    #[error("the key does not parse as an SSH public key")]
    InvalidKeyFormat,

    /// The identity already has a binding.
    #[error("already bound to username '{existing}'")]
    AlreadyBound {
        /// Username of the existing binding.
        existing: Username,
    },

    /// A unix account with the requested name already exists, including
    /// accounts not tracked by the bridge.
    #[error("a unix account named '{0}' already exists")]
    NameTaken(Username),

    /// The identity has no binding.
    #[error("no binding exists for this identity")]
    NotBound,

    /// The exact key text is already registered.
    #[error("the exact same key is already registered")]
    DuplicateKey,

    /// Account creation failed; nothing was recorded.
    #[error("account provisioning failed: {0}")]
    ProvisionFailed(#[source] ProvisionError),

    /// Account removal failed; the binding record is kept so the
    /// username stays tracked while its directory entry still exists.
    #[error("account removal failed: {0}")]
    DeprovisionFailed(#[source] ProvisionError),

    /// The key validation capability itself could not run.
    #[error("key validation could not run: {0}")]
    KeyValidationFailed(#[source] ProvisionError),

    /// A directory write failed; the record store was not touched.
    #[error("directory update failed: {0}")]
    DirectoryUpdateFailed(#[source] DirectoryError),

    /// The record store write failed after the directory was already
    /// updated; the two stores now disagree and the caller must know.
    #[error("record store write failed after the directory was updated: {0}")]
    RecordUpdateFailed(#[source] StoreError),

    /// The sysadmin group recompute failed as a primary operation.
    #[error("sysadmin group update failed: {0}")]
    RoleMirrorFailed(#[source] DirectoryError),

    /// Record store infrastructure error on a read or create.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),
}

impl SyncError {
    /// Checks if this is a validation error: the input was malformed and
    /// nothing changed.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUsername(_) | Self::InvalidShell(_) | Self::InvalidKeyFormat
        )
    }

    /// Checks if this is a conflict: the request collides with existing
    /// state and nothing changed.
    #[must_use]
    pub const fn is_conflict_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyBound { .. } | Self::NameTaken(_) | Self::NotBound | Self::DuplicateKey
        )
    }

    /// Checks if this is a dependency failure: a collaborator call
    /// failed.
    #[must_use]
    pub const fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            Self::ProvisionFailed(_)
                | Self::DeprovisionFailed(_)
                | Self::KeyValidationFailed(_)
                | Self::DirectoryUpdateFailed(_)
                | Self::RecordUpdateFailed(_)
                | Self::RoleMirrorFailed(_)
                | Self::Store(_)
        )
    }
}

/// A secondary step that failed after the primary mutation committed.
#[derive(Debug, Error)]
pub enum Warning {
    /// The sysadmin group recompute did not complete; the group may be
    /// stale until the next role-affecting mutation.
    #[error("sysadmin group may be stale: {0}")]
    RoleMirror(#[source] SyncError),

    /// The home directory could not be removed.
    #[error("home directory cleanup failed: {0}")]
    HomeDirCleanup(#[source] ProvisionError),
}
