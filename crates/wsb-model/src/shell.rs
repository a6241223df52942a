//! Login shell allow-list.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A login shell permitted on the workstation.
///
/// The directory stores the absolute path (`/bin/<shell>`); users select
/// a shell by its short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginShell {
    /// Bourne shell.
    Sh,
    /// GNU Bash.
    Bash,
    /// Z shell.
    Zsh,
}

impl LoginShell {
    /// All permitted shells, in presentation order.
    pub const ALL: [Self; 3] = [Self::Sh, Self::Bash, Self::Zsh];

    /// Parses a shell from its short name.
    ///
    /// ## Errors
    ///
    /// Returns [`InvalidShell`] for anything outside the allow-list.
    pub fn parse(name: &str) -> Result<Self, InvalidShell> {
        match name {
            "sh" => Ok(Self::Sh),
            "bash" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            other => Err(InvalidShell(other.to_string())),
        }
    }

    /// Returns the short name of the shell.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sh => "sh",
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }

    /// Returns the absolute path stored in the directory entry.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Sh => "/bin/sh",
            Self::Bash => "/bin/bash",
            Self::Zsh => "/bin/zsh",
        }
    }
}

impl fmt::Display for LoginShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a shell name is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid login shell '{0}': must be one of sh, bash, zsh")]
pub struct InvalidShell(pub String);
