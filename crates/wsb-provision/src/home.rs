//! Best-effort home directory removal.

use std::path::Path;

use crate::error::{ProvisionError, ProvisionResult};

/// Removes a user's home directory under the given root.
///
/// This is a fire-and-forget cleanup with its own failure channel:
/// callers log failures as warnings and never roll back the account
/// removal that preceded it. A home directory that does not exist is
/// success.
///
/// ## Errors
///
/// Returns `UnsafePath` for usernames that would escape the home root,
/// and an I/O error when removal itself fails.
pub async fn remove_home_dir(home_root: &Path, username: &str) -> ProvisionResult<()> {
    // The username grammar already excludes separators; check again at
    // the boundary since this function takes a plain string.
    if username.is_empty() || username.contains(['/', '\\']) || username.contains("..") {
        return Err(ProvisionError::UnsafePath(username.to_string()));
    }

    let home = home_root.join(username);
    match tokio::fs::metadata(&home).await {
        Ok(meta) if meta.is_dir() => {
            tokio::fs::remove_dir_all(&home)
                .await
                .map_err(|e| ProvisionError::io(format!("remove {}", home.display()), e))?;
            tracing::info!(path = %home.display(), "removed home directory");
            Ok(())
        }
        Ok(_) | Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_existing_home() {
        let root = tempfile::tempdir().unwrap();
        let home = root.path().join("alice");
        tokio::fs::create_dir_all(home.join(".ssh")).await.unwrap();

        remove_home_dir(root.path(), "alice").await.unwrap();
        assert!(!home.exists());
    }

    #[tokio::test]
    async fn missing_home_is_success() {
        let root = tempfile::tempdir().unwrap();
        remove_home_dir(root.path(), "nobody").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_traversal_names() {
        let root = tempfile::tempdir().unwrap();

        for name in ["../etc", "a/b", "", ".."] {
            let err = remove_home_dir(root.path(), name).await.unwrap_err();
            assert!(matches!(err, ProvisionError::UnsafePath(_)), "{name}");
        }
    }
}
