//! Directory client configuration and DN construction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, DirectoryResult};

/// Deterministic DN construction for the two subtrees the bridge touches.
///
/// User entries are keyed by username under the people OU, group entries
/// by group name under the groups OU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnScheme {
    /// Directory base DN.
    pub base_dn: String,
    /// OU holding user entries.
    pub people_ou: String,
    /// OU holding group entries.
    pub groups_ou: String,
}

impl DnScheme {
    /// Creates a new DN scheme.
    #[must_use]
    pub fn new(
        base_dn: impl Into<String>,
        people_ou: impl Into<String>,
        groups_ou: impl Into<String>,
    ) -> Self {
        Self {
            base_dn: base_dn.into(),
            people_ou: people_ou.into(),
            groups_ou: groups_ou.into(),
        }
    }

    /// Returns the DN of the user entry for a username.
    #[must_use]
    pub fn user_dn(&self, username: &str) -> String {
        format!("uid={},ou={},{}", username, self.people_ou, self.base_dn)
    }

    /// Returns the DN of the group entry for a group name.
    #[must_use]
    pub fn group_dn(&self, group: &str) -> String {
        format!("cn={},ou={},{}", group, self.groups_ou, self.base_dn)
    }
}

/// Directory client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server URL (`ldap://` or `ldaps://`).
    pub url: String,

    /// Bind DN for the service account.
    pub bind_dn: String,

    /// Bind credential (password).
    #[serde(skip_serializing)]
    pub bind_credential: String,

    /// Base DN under which the people and groups OUs live.
    pub base_dn: String,

    /// OU holding user entries.
    pub people_ou: String,

    /// OU holding group entries.
    pub groups_ou: String,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl DirectoryConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> DirectoryConfigBuilder {
        DirectoryConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error when the URL scheme is not LDAP or required
    /// fields are empty.
    pub fn validate(&self) -> DirectoryResult<()> {
        let url = self.url.to_lowercase();
        if !url.starts_with("ldap://") && !url.starts_with("ldaps://") {
            return Err(DirectoryError::config(
                "url must use the ldap:// or ldaps:// scheme",
            ));
        }

        if self.bind_dn.is_empty() {
            return Err(DirectoryError::config("bind_dn cannot be empty"));
        }

        if self.base_dn.is_empty() {
            return Err(DirectoryError::config("base_dn cannot be empty"));
        }

        Ok(())
    }

    /// Returns the DN scheme derived from this configuration.
    #[must_use]
    pub fn dn_scheme(&self) -> DnScheme {
        DnScheme::new(&self.base_dn, &self.people_ou, &self.groups_ou)
    }
}

/// Builder for the directory configuration.
#[derive(Debug, Default)]
pub struct DirectoryConfigBuilder {
    url: Option<String>,
    bind_dn: Option<String>,
    bind_credential: Option<String>,
    base_dn: Option<String>,
    people_ou: String,
    groups_ou: String,
    connect_timeout: Duration,
}

impl DirectoryConfigBuilder {
    /// Creates a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            people_ou: "people".to_string(),
            groups_ou: "groups".to_string(),
            connect_timeout: Duration::from_secs(10),
            ..Default::default()
        }
    }

    /// Sets the server URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the bind DN.
    #[must_use]
    pub fn bind_dn(mut self, dn: impl Into<String>) -> Self {
        self.bind_dn = Some(dn.into());
        self
    }

    /// Sets the bind credential (password).
    #[must_use]
    pub fn bind_credential(mut self, credential: impl Into<String>) -> Self {
        self.bind_credential = Some(credential.into());
        self
    }

    /// Sets the base DN.
    #[must_use]
    pub fn base_dn(mut self, dn: impl Into<String>) -> Self {
        self.base_dn = Some(dn.into());
        self
    }

    /// Sets the people OU.
    #[must_use]
    pub fn people_ou(mut self, ou: impl Into<String>) -> Self {
        self.people_ou = ou.into();
        self
    }

    /// Sets the groups OU.
    #[must_use]
    pub fn groups_ou(mut self, ou: impl Into<String>) -> Self {
        self.groups_ou = ou.into();
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if required fields are missing or the URL scheme
    /// is not LDAP.
    pub fn build(self) -> DirectoryResult<DirectoryConfig> {
        let config = DirectoryConfig {
            url: self
                .url
                .ok_or_else(|| DirectoryError::config("url is required"))?,
            bind_dn: self
                .bind_dn
                .ok_or_else(|| DirectoryError::config("bind_dn is required"))?,
            bind_credential: self
                .bind_credential
                .ok_or_else(|| DirectoryError::config("bind_credential is required"))?,
            base_dn: self
                .base_dn
                .ok_or_else(|| DirectoryError::config("base_dn is required"))?,
            people_ou: self.people_ou,
            groups_ou: self.groups_ou,
            connect_timeout: self.connect_timeout,
        };

        config.validate()?;

        Ok(config)
    }
}
