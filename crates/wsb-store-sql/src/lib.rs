//! # wsb-store-sql
//!
//! `SQLite` implementation of the binding record store.
//!
//! Bindings live in a single `bindings` table with unique keys on both the
//! external id and the username, so the bijection between chat identity and
//! unix account is enforced by the database, not by callers.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

mod convert;

pub mod entities;
pub mod error;
pub mod pool;
pub mod schema;
pub mod store;

pub use pool::{create_memory_pool, create_pool, PoolConfig};
pub use schema::run_migrations;
pub use store::SqliteBindingStore;
