//! Script-backed account provisioner.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use wsb_directory::{Directory, DnScheme};

use crate::error::{ProvisionError, ProvisionResult};
use crate::provisioner::Provisioner;

/// `getent` exit code when the requested key was not found.
const GETENT_NOT_FOUND: i32 = 2;

/// Provisioner backed by the site's account-creation script.
///
/// Existence checks go through `getent passwd`, so accounts visible only
/// via the directory's NSS integration are found too. Account creation
/// invokes the configured script with the username as its single
/// argument; zero exit means success. Deprovisioning deletes the user's
/// directory entry through the directory client.
pub struct ScriptProvisioner {
    create_script: PathBuf,
    directory: Arc<dyn Directory>,
    dns: DnScheme,
}

impl ScriptProvisioner {
    /// Creates a new provisioner.
    #[must_use]
    pub fn new(
        create_script: impl Into<PathBuf>,
        directory: Arc<dyn Directory>,
        dns: DnScheme,
    ) -> Self {
        Self {
            create_script: create_script.into(),
            directory,
            dns,
        }
    }
}

#[async_trait]
impl Provisioner for ScriptProvisioner {
    async fn exists(&self, username: &str) -> ProvisionResult<bool> {
        let status = Command::new("getent")
            .args(["passwd", username])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ProvisionError::io("getent", e))?;

        match status.code() {
            Some(0) => Ok(true),
            Some(GETENT_NOT_FOUND) => Ok(false),
            code => Err(ProvisionError::exit("getent passwd", code)),
        }
    }

    async fn create_account(&self, username: &str) -> ProvisionResult<()> {
        let script = self.create_script.display().to_string();

        let status = Command::new(&self.create_script)
            .arg(username)
            .status()
            .await
            .map_err(|e| ProvisionError::io(script.clone(), e))?;

        if !status.success() {
            return Err(ProvisionError::exit(script, status.code()));
        }

        tracing::info!(username, "provisioned workstation account");
        Ok(())
    }

    async fn remove_account(&self, username: &str) -> ProvisionResult<()> {
        let dn = self.dns.user_dn(username);
        self.directory.delete(&dn).await?;

        tracing::info!(username, "removed workstation account entry");
        Ok(())
    }
}
