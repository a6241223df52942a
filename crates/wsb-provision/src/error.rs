//! Provisioning error types.

use thiserror::Error;
use wsb_directory::DirectoryError;

/// Errors from provisioning and key validation capabilities.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// An external command could not be launched or driven.
    #[error("failed to run {command}: {source}")]
    Io {
        /// Command that failed.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An external command exited with an unexpected status.
    #[error("{command} exited with status {code:?}")]
    ExitStatus {
        /// Command that failed.
        command: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
    },

    /// A path derived from user input escaped its root.
    #[error("refusing unsafe path component '{0}'")]
    UnsafePath(String),

    /// Directory operation during deprovisioning failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl ProvisionError {
    /// Creates an I/O error for a command.
    #[must_use]
    pub fn io(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            command: command.into(),
            source,
        }
    }

    /// Creates an exit status error for a command.
    #[must_use]
    pub fn exit(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::ExitStatus {
            command: command.into(),
            code,
        }
    }
}

/// Result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
