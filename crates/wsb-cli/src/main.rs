//! # wsb
//!
//! Command-line entry point for the workstation account bridge.

#![forbid(unsafe_code)]
#![deny(warnings)]

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wsb_cli::{cli::Cli, commands::run, config::BridgeConfig, output::error};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration
    let config = match BridgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        error(&e.to_string());
        std::process::exit(1);
    }
}
