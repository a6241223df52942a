//! # wsb-provision
//!
//! Boundary capabilities for the workstation account bridge: OS account
//! provisioning, SSH key format validation, and best-effort home
//! directory cleanup.
//!
//! The synchronization core only sees the [`Provisioner`] and
//! [`KeyValidator`] traits; the implementations here delegate to the
//! external tools that actually own those concerns (`getent`, the site
//! provisioning script, `ssh-keygen`).

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod home;
pub mod keys;
pub mod provisioner;
pub mod script;

pub use error::{ProvisionError, ProvisionResult};
pub use home::remove_home_dir;
pub use keys::{KeyValidator, SshKeygenValidator};
pub use provisioner::Provisioner;
pub use script::ScriptProvisioner;
