//! CLI argument parsing.

use clap::{Parser, Subcommand};

/// Workstation account bridge - binds chat identities to unix accounts.
#[derive(Debug, Parser)]
#[command(name = "wsb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// External chat identity issuing the command.
    #[arg(short = 'i', long, env = "WSB_EXTERNAL_ID")]
    pub external_id: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bind this identity to a new workstation account.
    Bind {
        /// Desired unix username.
        username: String,

        /// Put the account on the sysadmin roster.
        #[arg(long)]
        sysadm: bool,
    },

    /// Unbind this identity and remove its account. This also removes
    /// the home directory.
    Unbind,

    /// Register an SSH public key for workstation login.
    #[command(name = "key-add")]
    KeyAdd {
        /// Public key text; quoting is optional, trailing words are
        /// joined.
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },

    /// Change the account's login shell (sh, bash or zsh).
    Chsh {
        /// Shell name.
        shell: String,
    },

    /// Show the binding status of this identity.
    Whoami,

    /// Check directory connectivity.
    Status,
}
