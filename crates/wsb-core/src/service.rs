//! The synchronization core.
//!
//! `SyncService` is the hub every mutation flows through. It validates
//! input, checks cross-store invariants, performs the mutation against
//! the directory and the record store in a fixed order, and reports
//! partial failure instead of papering over it.
//!
//! Ordering rule for bind: the directory/OS account is created before
//! the local record is written. A crash in between leaves an orphaned
//! directory account, which is detectable and safe to re-create over; a
//! dangling local record pointing at nothing would silently break every
//! later command for that identity.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use wsb_directory::schema::{LOGIN_SHELL_ATTR, SSH_PUBLIC_KEY_ATTR};
use wsb_directory::{Directory, DnScheme};
use wsb_model::{sshkey, AccountBinding, LoginShell, Username};
use wsb_provision::{remove_home_dir, KeyValidator, Provisioner};
use wsb_store::BindingStore;

use crate::error::{SyncError, Warning};
use crate::mirror::RoleMirror;

/// Core configuration.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// DN construction scheme shared with the directory client.
    pub dns: DnScheme,
    /// Name of the directory group mirroring the sysadmin roster.
    pub sysadm_group: String,
    /// Root under which user home directories live.
    pub home_root: PathBuf,
}

impl CoreConfig {
    /// Creates a new core configuration.
    #[must_use]
    pub fn new(
        dns: DnScheme,
        sysadm_group: impl Into<String>,
        home_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dns,
            sysadm_group: sysadm_group.into(),
            home_root: home_root.into(),
        }
    }
}

/// Result of a successful bind.
#[derive(Debug)]
pub struct BindOutcome {
    /// The username now bound to the identity.
    pub username: Username,
    /// Secondary failure after the bind itself committed, if any.
    pub warning: Option<Warning>,
}

/// Result of a successful unbind.
#[derive(Debug)]
pub struct UnbindOutcome {
    /// The username that was released.
    pub username: Username,
    /// Secondary failures after the unbind itself committed.
    pub warnings: Vec<Warning>,
}

/// Result of a successful key registration.
#[derive(Debug)]
pub struct AddKeyOutcome {
    /// The account the key was registered for.
    pub username: Username,
    /// Number of keys registered after the addition.
    pub key_count: usize,
}

/// Binding status for an external identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingStatus {
    /// The identity has no binding.
    Unbound,
    /// The identity is bound.
    Bound {
        /// Bound username.
        username: Username,
        /// Number of registered SSH keys.
        key_count: usize,
    },
}

/// The account state synchronization core.
///
/// Holds the four collaborator capabilities behind trait objects; all
/// state lives in the collaborators, so the service itself is cheap to
/// share.
pub struct SyncService {
    store: Arc<dyn BindingStore>,
    directory: Arc<dyn Directory>,
    provisioner: Arc<dyn Provisioner>,
    keys: Arc<dyn KeyValidator>,
    mirror: RoleMirror,
    config: CoreConfig,
}

impl SyncService {
    /// Creates a new synchronization service.
    #[must_use]
    pub fn new(
        store: Arc<dyn BindingStore>,
        directory: Arc<dyn Directory>,
        provisioner: Arc<dyn Provisioner>,
        keys: Arc<dyn KeyValidator>,
        config: CoreConfig,
    ) -> Self {
        let mirror = RoleMirror::new(
            Arc::clone(&store),
            Arc::clone(&directory),
            config.dns.group_dn(&config.sysadm_group),
        );

        Self {
            store,
            directory,
            provisioner,
            keys,
            mirror,
            config,
        }
    }

    /// Binds an external identity to a new unix account.
    ///
    /// ## Errors
    ///
    /// `InvalidUsername`, `AlreadyBound`, `NameTaken`, `ProvisionFailed`,
    /// or a record store error. A provisioning failure writes no record.
    pub async fn bind(
        &self,
        external_id: &str,
        username: &str,
        sysadm: bool,
    ) -> Result<BindOutcome, SyncError> {
        let username = Username::parse(username)?;

        if let Some(existing) = self.store.get(external_id).await? {
            return Err(SyncError::AlreadyBound {
                existing: existing.username,
            });
        }

        if self
            .provisioner
            .exists(username.as_str())
            .await
            .map_err(SyncError::ProvisionFailed)?
        {
            return Err(SyncError::NameTaken(username));
        }

        self.provisioner
            .create_account(username.as_str())
            .await
            .map_err(SyncError::ProvisionFailed)?;

        let binding = AccountBinding::new(external_id, username).with_sysadm(sysadm);
        match self.store.create(&binding).await {
            Ok(()) => {}
            Err(e) if e.is_duplicate() => {
                // Lost a concurrent race after the earlier check; report
                // the binding that won.
                let existing = self.store.get(external_id).await?.map(|b| b.username);
                return Err(match existing {
                    Some(existing) => SyncError::AlreadyBound { existing },
                    None => SyncError::Store(e),
                });
            }
            Err(e) => return Err(SyncError::Store(e)),
        }

        tracing::info!(
            external_id,
            username = %binding.username,
            sysadm,
            "bound identity to workstation account"
        );

        let mut warning = None;
        if binding.is_sysadm {
            if let Err(e) = self.mirror.recompute().await {
                tracing::warn!(error = %e, "sysadmin group recompute failed after bind");
                warning = Some(Warning::RoleMirror(e));
            }
        }

        Ok(BindOutcome {
            username: binding.username,
            warning,
        })
    }

    /// Unbinds an external identity and removes its account.
    ///
    /// ## Errors
    ///
    /// `NotBound`, `DeprovisionFailed` (the record is kept so the
    /// username stays tracked for the still-existing directory entry),
    /// or `RecordUpdateFailed` when the record delete fails after the
    /// account was already removed.
    pub async fn unbind(&self, external_id: &str) -> Result<UnbindOutcome, SyncError> {
        let binding = self
            .store
            .get(external_id)
            .await?
            .ok_or(SyncError::NotBound)?;

        self.provisioner
            .remove_account(binding.username.as_str())
            .await
            .map_err(SyncError::DeprovisionFailed)?;

        self.store
            .delete(external_id)
            .await
            .map_err(SyncError::RecordUpdateFailed)?;

        tracing::info!(
            external_id,
            username = %binding.username,
            "unbound identity and removed account"
        );

        let mut warnings = Vec::new();

        if let Err(e) = remove_home_dir(&self.config.home_root, binding.username.as_str()).await {
            tracing::warn!(error = %e, "home directory cleanup failed");
            warnings.push(Warning::HomeDirCleanup(e));
        }

        if binding.is_sysadm {
            if let Err(e) = self.mirror.recompute().await {
                tracing::warn!(error = %e, "sysadmin group recompute failed after unbind");
                warnings.push(Warning::RoleMirror(e));
            }
        }

        Ok(UnbindOutcome {
            username: binding.username,
            warnings,
        })
    }

    /// Registers an SSH public key for a bound identity.
    ///
    /// The directory receives the full replacement key list before the
    /// record store is written; a directory failure therefore leaves the
    /// stored key list untouched.
    ///
    /// ## Errors
    ///
    /// `NotBound`, `DuplicateKey`, `InvalidKeyFormat`,
    /// `KeyValidationFailed`, `DirectoryUpdateFailed`, or
    /// `RecordUpdateFailed` when the store write fails after the
    /// directory accepted the list.
    pub async fn add_key(
        &self,
        external_id: &str,
        raw_key: &str,
    ) -> Result<AddKeyOutcome, SyncError> {
        let mut binding = self
            .store
            .get(external_id)
            .await?
            .ok_or(SyncError::NotBound)?;

        let key = sshkey::normalize(raw_key);
        if binding.has_key(&key) {
            return Err(SyncError::DuplicateKey);
        }

        match self.keys.is_valid(&key).await {
            Ok(true) => {}
            Ok(false) => return Err(SyncError::InvalidKeyFormat),
            Err(e) => return Err(SyncError::KeyValidationFailed(e)),
        }

        binding.ssh_keys.push(key);

        let attrs = HashMap::from([(
            SSH_PUBLIC_KEY_ATTR.to_string(),
            binding.ssh_keys.clone(),
        )]);
        let dn = self.config.dns.user_dn(binding.username.as_str());
        self.directory
            .replace_attributes(&dn, attrs)
            .await
            .map_err(SyncError::DirectoryUpdateFailed)?;

        self.store
            .update(&binding)
            .await
            .map_err(SyncError::RecordUpdateFailed)?;

        tracing::info!(
            external_id,
            username = %binding.username,
            key_count = binding.key_count(),
            "registered ssh public key"
        );

        Ok(AddKeyOutcome {
            key_count: binding.key_count(),
            username: binding.username,
        })
    }

    /// Changes the login shell for a bound identity.
    ///
    /// The shell is directory-only state, so no record mutation happens.
    ///
    /// ## Errors
    ///
    /// `InvalidShell`, `NotBound`, or `DirectoryUpdateFailed`.
    pub async fn change_shell(
        &self,
        external_id: &str,
        shell: &str,
    ) -> Result<Username, SyncError> {
        let shell = LoginShell::parse(shell)?;

        let binding = self
            .store
            .get(external_id)
            .await?
            .ok_or(SyncError::NotBound)?;

        let attrs = HashMap::from([(
            LOGIN_SHELL_ATTR.to_string(),
            vec![shell.path().to_string()],
        )]);
        let dn = self.config.dns.user_dn(binding.username.as_str());
        self.directory
            .replace_attributes(&dn, attrs)
            .await
            .map_err(SyncError::DirectoryUpdateFailed)?;

        tracing::info!(username = %binding.username, shell = %shell, "changed login shell");
        Ok(binding.username)
    }

    /// Reports the binding status for an external identity.
    ///
    /// Pure read, no side effects.
    ///
    /// ## Errors
    ///
    /// Returns a record store error when the read fails.
    pub async fn whoami(&self, external_id: &str) -> Result<BindingStatus, SyncError> {
        Ok(match self.store.get(external_id).await? {
            None => BindingStatus::Unbound,
            Some(binding) => BindingStatus::Bound {
                key_count: binding.key_count(),
                username: binding.username,
            },
        })
    }

    /// Recomputes the sysadmin group membership as a primary operation.
    ///
    /// ## Errors
    ///
    /// `RoleMirrorFailed` or a record store error.
    pub async fn recompute_sysadmins(&self) -> Result<usize, SyncError> {
        self.mirror.recompute().await
    }
}
