//! Account binding model.
//!
//! A binding associates one external chat identity with one unix account.
//! Live bindings form a bijection: no two bindings share a username, and
//! no external identity is bound twice concurrently. The record store
//! enforces both sides with unique keys.

use serde::{Deserialize, Serialize};

use crate::username::Username;

/// The association between a chat identity and a unix account.
///
/// Owned by the record store; mutation flows hold transient copies and
/// write the authoritative copy back before an operation counts as done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBinding {
    /// Opaque external identity (chat user id). Unique key.
    pub external_id: String,

    /// Unix account name. Unique across live bindings.
    pub username: Username,

    /// Whether this account is on the sysadmin roster.
    pub is_sysadm: bool,

    /// Registered SSH public keys, in insertion order, unique by content.
    pub ssh_keys: Vec<String>,
}

impl AccountBinding {
    /// Creates a fresh binding with no keys and no sysadmin role.
    #[must_use]
    pub fn new(external_id: impl Into<String>, username: Username) -> Self {
        Self {
            external_id: external_id.into(),
            username,
            is_sysadm: false,
            ssh_keys: Vec::new(),
        }
    }

    /// Sets the sysadmin flag.
    #[must_use]
    pub const fn with_sysadm(mut self, is_sysadm: bool) -> Self {
        self.is_sysadm = is_sysadm;
        self
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.ssh_keys.len()
    }

    /// Checks whether the exact key text is already registered.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.ssh_keys.iter().any(|k| k == key)
    }
}
