//! Directory attribute names used by the bridge.

/// Multi-valued SSH public key attribute on user entries.
pub const SSH_PUBLIC_KEY_ATTR: &str = "sshPublicKey";

/// Single-valued login shell attribute on user entries.
pub const LOGIN_SHELL_ATTR: &str = "loginShell";

/// Multi-valued member attribute on posix group entries.
pub const MEMBER_UID_ATTR: &str = "memberUid";
