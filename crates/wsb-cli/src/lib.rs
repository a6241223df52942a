//! # wsb-cli
//!
//! Command surface for the workstation account bridge.
//!
//! Each subcommand maps 1:1 to a synchronization core operation; the
//! external identity is whatever id the invoking front-end supplies.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

/// Result type for CLI operations.
pub type CliResult<T> = anyhow::Result<T>;
