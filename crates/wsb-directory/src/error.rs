//! Directory-specific error types.
//!
//! Error messages must not leak bind credentials.

use thiserror::Error;

/// Directory client errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Invalid configuration.
    #[error("directory configuration error: {0}")]
    Configuration(String),

    /// Connection failed.
    #[error("directory connection failed: {0}")]
    Connection(String),

    /// Bind (authentication) failed.
    #[error("directory bind failed: {0}")]
    Bind(String),

    /// Search operation failed.
    #[error("directory search failed: {0}")]
    Search(String),

    /// Modify operation failed.
    #[error("directory modify failed: {0}")]
    Modify(String),

    /// No entry exists at the given DN.
    #[error("no directory entry at '{dn}'")]
    NotFound {
        /// Distinguished name that was addressed.
        dn: String,
    },

    /// Protocol error from the directory server.
    #[error("directory protocol error: {0}")]
    Protocol(String),

    /// Underlying ldap3 error.
    #[error("LDAP error: {0}")]
    Ldap(#[from] ldap3::LdapError),
}

impl DirectoryError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(dn: impl Into<String>) -> Self {
        Self::NotFound { dn: dn.into() }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a connection-related error.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Bind(_))
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
