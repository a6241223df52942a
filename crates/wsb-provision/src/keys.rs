//! SSH public key format validation.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{ProvisionError, ProvisionResult};

/// Capability that decides whether raw key text parses as a structurally
/// valid SSH public key.
///
/// Implementations are swappable; the core never parses key formats
/// itself.
#[async_trait]
pub trait KeyValidator: Send + Sync {
    /// Returns whether the key text is a valid public key.
    ///
    /// ## Errors
    ///
    /// Returns an error only when the validation capability itself fails
    /// to run; an invalid key is `Ok(false)`.
    async fn is_valid(&self, key: &str) -> ProvisionResult<bool>;
}

/// Validator that pipes the key to `ssh-keygen -lf -`.
///
/// `ssh-keygen` computes the key fingerprint and exits non-zero for
/// anything it cannot parse, which is exactly the structural check we
/// need.
#[derive(Debug, Clone, Copy, Default)]
pub struct SshKeygenValidator;

impl SshKeygenValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValidator for SshKeygenValidator {
    async fn is_valid(&self, key: &str) -> ProvisionResult<bool> {
        let mut child = Command::new("ssh-keygen")
            .args(["-l", "-f", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ProvisionError::io("ssh-keygen", e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(key.as_bytes())
                .await
                .map_err(|e| ProvisionError::io("ssh-keygen", e))?;
            stdin
                .write_all(b"\n")
                .await
                .map_err(|e| ProvisionError::io("ssh-keygen", e))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ProvisionError::io("ssh-keygen", e))?;

        Ok(status.success())
    }
}
