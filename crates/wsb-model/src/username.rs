//! Unix username grammar.
//!
//! Usernames double as LDAP RDN values and OS account names, so the
//! accepted alphabet is deliberately narrow: a lowercase letter followed
//! by at most 31 characters from lowercase letters, digits, `_` and `-`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum username length, including the leading letter.
pub const MAX_USERNAME_LEN: usize = 32;

/// A validated unix username.
///
/// The only way to obtain one is [`Username::parse`], so holding a
/// `Username` is proof the grammar was checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parses a username, enforcing the account-name grammar.
    ///
    /// ## Errors
    ///
    /// Returns [`InvalidUsername`] when the input is empty, too long,
    /// does not start with a lowercase letter, or contains a character
    /// outside `[a-z0-9_-]`.
    pub fn parse(input: impl Into<String>) -> Result<Self, InvalidUsername> {
        let input = input.into();

        let mut chars = input.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase());
        let valid_tail = chars.all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
        });

        if !valid_head || !valid_tail || input.len() > MAX_USERNAME_LEN {
            return Err(InvalidUsername(input));
        }

        Ok(Self(input))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = InvalidUsername;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

/// Error returned when a username fails the account-name grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid username '{0}': must start with a lowercase letter followed by \
     at most 31 characters from lowercase letters, digits, '_' and '-'"
)]
pub struct InvalidUsername(pub String);
