//! Sysadmin role mirror.
//!
//! The directory group is never patched incrementally: every recompute
//! reads the full sysadmin set from the record store and replaces the
//! group's member list wholesale, so a missed deletion can never leave a
//! stale member behind.

use std::collections::HashMap;
use std::sync::Arc;

use wsb_directory::schema::MEMBER_UID_ATTR;
use wsb_directory::Directory;
use wsb_store::BindingStore;

use crate::error::SyncError;

/// Keeps a directory group's membership equal to the sysadmin set.
pub struct RoleMirror {
    store: Arc<dyn BindingStore>,
    directory: Arc<dyn Directory>,
    group_dn: String,
}

impl RoleMirror {
    /// Creates a mirror targeting the given group entry.
    #[must_use]
    pub fn new(
        store: Arc<dyn BindingStore>,
        directory: Arc<dyn Directory>,
        group_dn: impl Into<String>,
    ) -> Self {
        Self {
            store,
            directory,
            group_dn: group_dn.into(),
        }
    }

    /// Recomputes the membership list and pushes the full replacement.
    ///
    /// Returns the number of members written.
    ///
    /// ## Errors
    ///
    /// Returns `RoleMirrorFailed` when the directory rejects the update;
    /// the triggering mutation is not rolled back by callers.
    pub async fn recompute(&self) -> Result<usize, SyncError> {
        let admins = self.store.list_sysadmins().await?;
        let members: Vec<String> = admins
            .iter()
            .map(|binding| binding.username.to_string())
            .collect();
        let count = members.len();

        let attrs = HashMap::from([(MEMBER_UID_ATTR.to_string(), members)]);
        self.directory
            .replace_attributes(&self.group_dn, attrs)
            .await
            .map_err(SyncError::RoleMirrorFailed)?;

        tracing::debug!(group_dn = %self.group_dn, count, "sysadmin group recomputed");
        Ok(count)
    }
}
