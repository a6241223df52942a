//! Directory client trait and `ldap3` implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Mod, Scope, SearchEntry};

use crate::config::DirectoryConfig;
use crate::entry::DirectoryEntry;
use crate::error::{DirectoryError, DirectoryResult};

/// LDAP result code for an entry that does not exist.
const NO_SUCH_OBJECT: u32 = 32;

/// Directory operations the synchronization core depends on.
///
/// Each call is a single unit that either fully succeeds or fully fails;
/// no partial attribute application is assumed across one call. There is
/// no internal retry.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Looks up the entry at a DN, `None` when absent.
    async fn lookup(&self, dn: &str) -> DirectoryResult<Option<DirectoryEntry>>;

    /// Replaces attributes on an existing entry.
    ///
    /// The current entry is fetched first and only attributes whose value
    /// set differs are replaced, so untouched attributes survive. No lock
    /// is held between the fetch and the write; a concurrent external
    /// edit of the same attribute can be lost.
    ///
    /// ## Errors
    ///
    /// Returns `DirectoryError::NotFound` when no entry exists at the DN.
    /// Entry creation is the provisioner's job, never this client's.
    async fn replace_attributes(
        &self,
        dn: &str,
        attrs: HashMap<String, Vec<String>>,
    ) -> DirectoryResult<()>;

    /// Deletes the entry at a DN.
    ///
    /// ## Errors
    ///
    /// Returns `DirectoryError::NotFound` when no entry exists at the DN.
    async fn delete(&self, dn: &str) -> DirectoryResult<()>;
}

/// Computes the minimal replace set for a desired attribute state.
///
/// Attributes whose value set already matches produce no modification.
/// The result is ordered by attribute name so identical inputs produce
/// identical modify requests.
fn compute_mods(
    current: &DirectoryEntry,
    desired: &HashMap<String, Vec<String>>,
) -> Vec<Mod<String>> {
    let mut names: Vec<&String> = desired.keys().collect();
    names.sort();

    names
        .into_iter()
        .filter_map(|name| {
            let values = &desired[name];
            let new_set: HashSet<String> = values.iter().cloned().collect();
            let unchanged = current.attr_set(name)
                == new_set.iter().map(String::as_str).collect();

            if unchanged {
                None
            } else {
                Some(Mod::Replace(name.clone(), new_set))
            }
        })
        .collect()
}

/// `ldap3`-backed directory client.
///
/// Uses one authenticated session per logical operation: connect, bind
/// with the service account, perform the operation, unbind. No pooling.
pub struct LdapDirectory {
    config: Arc<DirectoryConfig>,
}

impl LdapDirectory {
    /// Creates a new client for the given configuration.
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Opens a connection and binds with the service account.
    async fn open(&self) -> DirectoryResult<Ldap> {
        let settings = LdapConnSettings::new().set_conn_timeout(self.config.connect_timeout);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &self.config.url)
            .await
            .map_err(|e| DirectoryError::connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                tracing::warn!(error = %e, "LDAP connection driver error");
            }
        });

        ldap.simple_bind(&self.config.bind_dn, &self.config.bind_credential)
            .await
            .map_err(|e| DirectoryError::Bind(e.to_string()))?
            .success()
            .map_err(|e| DirectoryError::Bind(e.to_string()))?;

        Ok(ldap)
    }

    /// Reads the entry at a DN over an open connection.
    async fn fetch(&self, ldap: &mut Ldap, dn: &str) -> DirectoryResult<Option<DirectoryEntry>> {
        let result = ldap
            .search(dn, Scope::Base, "(objectClass=*)", vec!["*"])
            .await
            .map_err(|e| DirectoryError::Search(e.to_string()))?;

        match result.success() {
            Ok((entries, _)) => Ok(entries
                .into_iter()
                .next()
                .map(SearchEntry::construct)
                .map(DirectoryEntry::from_search_entry)),
            Err(LdapError::LdapResult { result }) if result.rc == NO_SUCH_OBJECT => Ok(None),
            Err(e) => Err(DirectoryError::Search(e.to_string())),
        }
    }

    /// Verifies connectivity by binding and reading the base entry.
    ///
    /// ## Errors
    ///
    /// Returns an error when the server is unreachable or the service
    /// bind is rejected.
    pub async fn test_connection(&self) -> DirectoryResult<()> {
        let mut ldap = self.open().await?;
        let outcome = self.fetch(&mut ldap, &self.config.base_dn).await;
        let _ = ldap.unbind().await;

        outcome.map(|_| ())
    }
}

#[async_trait]
impl Directory for LdapDirectory {
    async fn lookup(&self, dn: &str) -> DirectoryResult<Option<DirectoryEntry>> {
        let mut ldap = self.open().await?;
        let outcome = self.fetch(&mut ldap, dn).await;
        let _ = ldap.unbind().await;

        outcome
    }

    async fn replace_attributes(
        &self,
        dn: &str,
        attrs: HashMap<String, Vec<String>>,
    ) -> DirectoryResult<()> {
        let mut ldap = self.open().await?;
        let outcome = replace_over(&mut ldap, self, dn, attrs).await;
        let _ = ldap.unbind().await;

        outcome
    }

    async fn delete(&self, dn: &str) -> DirectoryResult<()> {
        let mut ldap = self.open().await?;
        let outcome = delete_over(&mut ldap, dn).await;
        let _ = ldap.unbind().await;

        outcome
    }
}

/// Fetch-diff-modify over an open connection.
async fn replace_over(
    ldap: &mut Ldap,
    client: &LdapDirectory,
    dn: &str,
    attrs: HashMap<String, Vec<String>>,
) -> DirectoryResult<()> {
    let current = client
        .fetch(ldap, dn)
        .await?
        .ok_or_else(|| DirectoryError::not_found(dn))?;

    let mods = compute_mods(&current, &attrs);
    if mods.is_empty() {
        tracing::debug!(dn, "entry already matches desired attributes");
        return Ok(());
    }

    ldap.modify(dn, mods)
        .await
        .map_err(|e| DirectoryError::Modify(e.to_string()))?
        .success()
        .map_err(|e| DirectoryError::Modify(e.to_string()))?;

    tracing::debug!(dn, "replaced directory attributes");
    Ok(())
}

/// Delete over an open connection, mapping the missing-entry result code.
async fn delete_over(ldap: &mut Ldap, dn: &str) -> DirectoryResult<()> {
    let result = ldap
        .delete(dn)
        .await
        .map_err(|e| DirectoryError::Modify(e.to_string()))?;

    match result.success() {
        Ok(_) => {
            tracing::debug!(dn, "deleted directory entry");
            Ok(())
        }
        Err(LdapError::LdapResult { result }) if result.rc == NO_SUCH_OBJECT => {
            Err(DirectoryError::not_found(dn))
        }
        Err(e) => Err(DirectoryError::Modify(e.to_string())),
    }
}
