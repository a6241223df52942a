//! # wsb-core
//!
//! The account state synchronization core of the workstation bridge.
//!
//! Given a requested mutation (bind, unbind, key addition, shell change)
//! the [`SyncService`] validates input, checks cross-store invariants,
//! performs the mutation against the directory and the record store in a
//! defined order, and reconciles or reports partial failure. The
//! [`mirror::RoleMirror`] keeps the sysadmin directory group equal to
//! the roster recorded in the store.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod mirror;
pub mod service;

pub use error::{SyncError, Warning};
pub use mirror::RoleMirror;
pub use service::{
    AddKeyOutcome, BindOutcome, BindingStatus, CoreConfig, SyncService, UnbindOutcome,
};
