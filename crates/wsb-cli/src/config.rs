//! Bridge configuration.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults; a `.env` file is honored when present.

use std::path::PathBuf;

use wsb_directory::DirectoryConfig;

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Path to the `SQLite` binding database.
    pub db_path: String,

    /// Directory server URL.
    pub ldap_url: String,

    /// Service account bind DN.
    pub ldap_bind_dn: String,

    /// Service account bind password.
    pub ldap_bind_password: String,

    /// Directory base DN.
    pub ldap_base_dn: String,

    /// OU holding user entries.
    pub people_ou: String,

    /// OU holding group entries.
    pub groups_ou: String,

    /// Name of the directory group mirroring the sysadmin roster.
    pub sysadm_group: String,

    /// Path to the site account-creation script.
    pub adduser_script: PathBuf,

    /// Root under which user home directories live.
    pub home_root: PathBuf,
}

impl BridgeConfig {
    /// Loads configuration from environment variables.
    ///
    /// ## Errors
    ///
    /// Returns an error when a required variable is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let db_path =
            std::env::var("WSB_DB_PATH").unwrap_or_else(|_| "wsbridge.db".to_string());

        let ldap_url = std::env::var("WSB_LDAP_URL")
            .unwrap_or_else(|_| "ldap://localhost:389".to_string());

        let ldap_bind_dn = std::env::var("WSB_LDAP_BIND_DN").map_err(|_| {
            anyhow::anyhow!("WSB_LDAP_BIND_DN environment variable is required")
        })?;

        let ldap_bind_password = std::env::var("WSB_LDAP_BIND_PASSWORD").map_err(|_| {
            anyhow::anyhow!("WSB_LDAP_BIND_PASSWORD environment variable is required")
        })?;

        let ldap_base_dn = std::env::var("WSB_LDAP_BASE_DN").map_err(|_| {
            anyhow::anyhow!("WSB_LDAP_BASE_DN environment variable is required")
        })?;

        let people_ou =
            std::env::var("WSB_PEOPLE_OU").unwrap_or_else(|_| "people".to_string());

        let groups_ou =
            std::env::var("WSB_GROUPS_OU").unwrap_or_else(|_| "groups".to_string());

        let sysadm_group =
            std::env::var("WSB_SYSADM_GROUP").unwrap_or_else(|_| "sysadm".to_string());

        let adduser_script = std::env::var("WSB_ADDUSER_SCRIPT")
            .unwrap_or_else(|_| "/usr/local/sbin/wsb-adduser.sh".to_string())
            .into();

        let home_root = std::env::var("WSB_HOME_ROOT")
            .unwrap_or_else(|_| "/home".to_string())
            .into();

        Ok(Self {
            db_path,
            ldap_url,
            ldap_bind_dn,
            ldap_bind_password,
            ldap_base_dn,
            people_ou,
            groups_ou,
            sysadm_group,
            adduser_script,
            home_root,
        })
    }

    /// Builds the directory client configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error when the directory settings fail validation.
    pub fn directory_config(&self) -> anyhow::Result<DirectoryConfig> {
        let config = DirectoryConfig::builder()
            .url(&self.ldap_url)
            .bind_dn(&self.ldap_bind_dn)
            .bind_credential(&self.ldap_bind_password)
            .base_dn(&self.ldap_base_dn)
            .people_ou(&self.people_ou)
            .groups_ou(&self.groups_ou)
            .build()?;

        Ok(config)
    }
}
