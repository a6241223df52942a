//! Shared test harness.
//!
//! The record store is the real `SQLite` implementation over an
//! in-memory database; the directory and provisioner are in-memory
//! fakes that behave like their production counterparts, including the
//! provisioner materializing a directory entry on account creation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wsb_core::{CoreConfig, SyncService};
use wsb_directory::schema::LOGIN_SHELL_ATTR;
use wsb_directory::{Directory, DirectoryEntry, DirectoryError, DirectoryResult, DnScheme};
use wsb_provision::{KeyValidator, ProvisionError, ProvisionResult, Provisioner};
use wsb_store::BindingStore;
use wsb_store_sql::{create_memory_pool, run_migrations, SqliteBindingStore};

/// Group whose membership mirrors the sysadmin roster.
pub const SYSADM_GROUP: &str = "sysadm";

/// In-memory directory with failure injection.
#[derive(Default)]
pub struct MemoryDirectory {
    entries: Mutex<HashMap<String, HashMap<String, Vec<String>>>>,
    pub fail_replace: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl MemoryDirectory {
    pub fn insert(&self, dn: &str, attrs: HashMap<String, Vec<String>>) {
        self.entries.lock().unwrap().insert(dn.to_string(), attrs);
    }

    pub fn attr(&self, dn: &str, name: &str) -> Option<Vec<String>> {
        self.entries.lock().unwrap().get(dn)?.get(name).cloned()
    }

    pub fn has_entry(&self, dn: &str) -> bool {
        self.entries.lock().unwrap().contains_key(dn)
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn lookup(&self, dn: &str) -> DirectoryResult<Option<DirectoryEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(dn)
            .map(|attrs| DirectoryEntry {
                dn: dn.to_string(),
                attributes: attrs.clone(),
            }))
    }

    async fn replace_attributes(
        &self,
        dn: &str,
        attrs: HashMap<String, Vec<String>>,
    ) -> DirectoryResult<()> {
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(DirectoryError::Modify("directory offline".to_string()));
        }
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .get_mut(dn)
            .ok_or_else(|| DirectoryError::not_found(dn))?;
        entry.extend(attrs);
        Ok(())
    }

    async fn delete(&self, dn: &str) -> DirectoryResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(DirectoryError::Modify("directory offline".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .remove(dn)
            .map(|_| ())
            .ok_or_else(|| DirectoryError::not_found(dn))
    }
}

/// Provisioner fake that creates directory entries the way the site
/// account-creation script does.
pub struct ScriptedProvisioner {
    directory: Arc<MemoryDirectory>,
    dns: DnScheme,
    taken: Mutex<HashSet<String>>,
    pub fail_create: AtomicBool,
}

impl ScriptedProvisioner {
    pub fn new(directory: Arc<MemoryDirectory>, dns: DnScheme) -> Self {
        Self {
            directory,
            dns,
            taken: Mutex::new(HashSet::new()),
            fail_create: AtomicBool::new(false),
        }
    }

    /// Marks a username as taken outside the bridge, like a pre-existing
    /// system account.
    pub fn reserve(&self, username: &str) {
        self.taken.lock().unwrap().insert(username.to_string());
    }
}

#[async_trait]
impl Provisioner for ScriptedProvisioner {
    async fn exists(&self, username: &str) -> ProvisionResult<bool> {
        Ok(self.taken.lock().unwrap().contains(username))
    }

    async fn create_account(&self, username: &str) -> ProvisionResult<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ProvisionError::exit("wsb-adduser.sh", Some(1)));
        }
        self.reserve(username);
        self.directory.insert(
            &self.dns.user_dn(username),
            HashMap::from([(LOGIN_SHELL_ATTR.to_string(), vec!["/bin/bash".to_string()])]),
        );
        Ok(())
    }

    async fn remove_account(&self, username: &str) -> ProvisionResult<()> {
        self.directory.delete(&self.dns.user_dn(username)).await?;
        self.taken.lock().unwrap().remove(username);
        Ok(())
    }
}

/// Validator accepting anything that looks like an OpenSSH public key.
pub struct SshPrefixValidator;

#[async_trait]
impl KeyValidator for SshPrefixValidator {
    async fn is_valid(&self, key: &str) -> ProvisionResult<bool> {
        Ok(key.starts_with("ssh-") || key.starts_with("ecdsa-"))
    }
}

/// A fully wired service plus handles to every backend.
pub struct Harness {
    pub service: SyncService,
    pub store: Arc<SqliteBindingStore>,
    pub directory: Arc<MemoryDirectory>,
    pub provisioner: Arc<ScriptedProvisioner>,
    pub dns: DnScheme,
    pub home_root: tempfile::TempDir,
}

impl Harness {
    pub fn user_dn(&self, username: &str) -> String {
        self.dns.user_dn(username)
    }

    pub fn group_dn(&self) -> String {
        self.dns.group_dn(SYSADM_GROUP)
    }
}

/// Builds a harness with an empty store and a directory holding only
/// the (possibly stale) sysadmin group entry.
pub async fn harness() -> Harness {
    let pool = create_memory_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();
    let store = Arc::new(SqliteBindingStore::new(pool));

    let dns = DnScheme::new("dc=ws,dc=example,dc=org", "people", "groups");
    let directory = Arc::new(MemoryDirectory::default());
    directory.insert(
        &dns.group_dn(SYSADM_GROUP),
        HashMap::from([(
            "memberUid".to_string(),
            vec!["left-over-admin".to_string()],
        )]),
    );

    let provisioner = Arc::new(ScriptedProvisioner::new(Arc::clone(&directory), dns.clone()));
    let home_root = tempfile::tempdir().unwrap();

    let service = SyncService::new(
        Arc::clone(&store) as Arc<dyn BindingStore>,
        Arc::clone(&directory) as Arc<dyn Directory>,
        Arc::clone(&provisioner) as Arc<dyn Provisioner>,
        Arc::new(SshPrefixValidator),
        CoreConfig::new(dns.clone(), SYSADM_GROUP, home_root.path()),
    );

    Harness {
        service,
        store,
        directory,
        provisioner,
        dns,
        home_root,
    }
}
