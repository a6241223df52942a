//! Command execution.

use std::sync::Arc;

use wsb_core::{BindingStatus, CoreConfig, SyncService};
use wsb_directory::{Directory, LdapDirectory};
use wsb_provision::{ScriptProvisioner, SshKeygenValidator};
use wsb_store_sql::{create_pool, run_migrations, PoolConfig, SqliteBindingStore};

use crate::cli::{Cli, Command};
use crate::config::BridgeConfig;
use crate::output::{info, success, warning};
use crate::CliResult;

/// Runs the parsed command against the configured backends.
///
/// ## Errors
///
/// Returns an error when wiring fails or the operation itself fails;
/// the caller is expected to print it and exit non-zero.
pub async fn run(cli: Cli, config: BridgeConfig) -> CliResult<()> {
    let directory = Arc::new(LdapDirectory::new(config.directory_config()?));

    // Connectivity probe needs no database or identity.
    if matches!(cli.command, Command::Status) {
        return run_status(&directory).await;
    }

    let external_id = cli
        .external_id
        .ok_or_else(|| anyhow::anyhow!("--external-id (or WSB_EXTERNAL_ID) is required"))?;

    let pool = create_pool(&PoolConfig::new(&config.db_path)).await?;
    run_migrations(&pool).await?;
    let store = Arc::new(SqliteBindingStore::new(pool));

    let dns = directory.config().dn_scheme();
    let provisioner = Arc::new(ScriptProvisioner::new(
        &config.adduser_script,
        Arc::clone(&directory) as Arc<dyn Directory>,
        dns.clone(),
    ));

    let service = SyncService::new(
        store,
        directory,
        provisioner,
        Arc::new(SshKeygenValidator::new()),
        CoreConfig::new(dns, &config.sysadm_group, &config.home_root),
    );

    match cli.command {
        Command::Bind { username, sysadm } => {
            run_bind(&service, &external_id, &username, sysadm).await
        }
        Command::Unbind => run_unbind(&service, &external_id).await,
        Command::KeyAdd { key } => run_key_add(&service, &external_id, &key.join(" ")).await,
        Command::Chsh { shell } => run_chsh(&service, &external_id, &shell).await,
        Command::Whoami => run_whoami(&service, &external_id).await,
        Command::Status => unreachable!("handled above"),
    }
}

async fn run_bind(
    service: &SyncService,
    external_id: &str,
    username: &str,
    sysadm: bool,
) -> CliResult<()> {
    let outcome = service.bind(external_id, username, sysadm).await?;

    success(&format!(
        "bound to username '{}'; register a key with 'wsb key-add <public-key>'",
        outcome.username
    ));
    if let Some(w) = outcome.warning {
        warning(&w.to_string());
    }

    Ok(())
}

async fn run_unbind(service: &SyncService, external_id: &str) -> CliResult<()> {
    let outcome = service.unbind(external_id).await?;

    success(&format!("unbound and removed username '{}'", outcome.username));
    for w in outcome.warnings {
        warning(&w.to_string());
    }

    Ok(())
}

async fn run_key_add(service: &SyncService, external_id: &str, key: &str) -> CliResult<()> {
    let outcome = service.add_key(external_id, key).await?;

    success(&format!(
        "registered ssh key #{} for '{}'",
        outcome.key_count, outcome.username
    ));

    Ok(())
}

async fn run_chsh(service: &SyncService, external_id: &str, shell: &str) -> CliResult<()> {
    let username = service.change_shell(external_id, shell).await?;

    success(&format!(
        "changed login shell for '{username}'; this can take a few minutes to apply"
    ));

    Ok(())
}

async fn run_whoami(service: &SyncService, external_id: &str) -> CliResult<()> {
    match service.whoami(external_id).await? {
        BindingStatus::Unbound => {
            info("not bound to a username yet; use 'wsb bind <username>'");
        }
        BindingStatus::Bound {
            username,
            key_count,
        } => {
            info(&format!(
                "bound to username '{username}' with {key_count} ssh public key(s)"
            ));
        }
    }

    Ok(())
}

async fn run_status(directory: &LdapDirectory) -> CliResult<()> {
    directory.test_connection().await?;
    success("directory connection ok");

    Ok(())
}
