//! Record store error types.

use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No binding exists for the given external identity.
    #[error("no binding found for external id '{external_id}'")]
    NotFound {
        /// External identity that was looked up.
        external_id: String,
    },

    /// Unique-key conflict (external id or username already bound).
    #[error("duplicate binding: {field} '{value}' already exists")]
    Duplicate {
        /// Column that caused the conflict.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// A required field is empty or malformed.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Backend connection error.
    #[error("store connection error: {0}")]
    Connection(String),

    /// Backend query error.
    #[error("store query error: {0}")]
    Query(String),

    /// Internal store error.
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(external_id: impl Into<String>) -> Self {
        Self::NotFound {
            external_id: external_id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }

    /// Creates an invalid record error.
    #[must_use]
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;
