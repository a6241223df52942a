//! End-to-end tests driving the synchronization core against the real
//! `SQLite` store, with in-memory directory and provisioner fakes.

mod common;
mod lifecycle;
mod partial_failure;
mod role_mirror;
