//! Bind / key / shell / unbind lifecycle.

use wsb_core::{BindingStatus, SyncError};
use wsb_directory::schema::{LOGIN_SHELL_ATTR, SSH_PUBLIC_KEY_ATTR};
use wsb_model::Username;
use wsb_store::BindingStore;

use crate::common::harness;

const KEY: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIB alice@laptop";

#[tokio::test]
async fn bind_add_key_whoami_scenario() {
    let h = harness().await;

    h.service.bind("u1", "alice", false).await.unwrap();
    h.service.add_key("u1", KEY).await.unwrap();

    assert_eq!(
        h.service.whoami("u1").await.unwrap(),
        BindingStatus::Bound {
            username: Username::parse("alice").unwrap(),
            key_count: 1
        }
    );

    // The directory entry carries the pushed key list.
    let keys = h.directory.attr(&h.user_dn("alice"), SSH_PUBLIC_KEY_ATTR).unwrap();
    assert_eq!(keys, vec![KEY.to_string()]);
}

#[tokio::test]
async fn whoami_before_bind_is_unbound() {
    let h = harness().await;

    assert_eq!(h.service.whoami("u1").await.unwrap(), BindingStatus::Unbound);
}

#[tokio::test]
async fn username_grammar_is_enforced_end_to_end() {
    let h = harness().await;

    assert!(h.service.bind("u1", "root1", false).await.is_ok());

    let err = h.service.bind("u2", "Root", false).await.unwrap_err();
    assert!(err.is_validation_error());

    let long_name = "x".repeat(40);
    let err = h.service.bind("u2", &long_name, false).await.unwrap_err();
    assert!(err.is_validation_error());
}

#[tokio::test]
async fn double_bind_keeps_exactly_one_record() {
    let h = harness().await;

    h.service.bind("u1", "alice", false).await.unwrap();
    let err = h.service.bind("u1", "other", false).await.unwrap_err();

    assert!(matches!(err, SyncError::AlreadyBound { .. }));
    let binding = h.store.get("u1").await.unwrap().unwrap();
    assert_eq!(binding.username.as_str(), "alice");
    assert!(h.store.get("u2").await.unwrap().is_none());
}

#[tokio::test]
async fn bind_refuses_existing_system_account() {
    let h = harness().await;
    h.provisioner.reserve("backup");

    let err = h.service.bind("u1", "backup", false).await.unwrap_err();
    assert!(matches!(err, SyncError::NameTaken(_)));
}

#[tokio::test]
async fn unbind_then_bind_same_username_succeeds() {
    let h = harness().await;

    h.service.bind("u1", "alice", false).await.unwrap();
    h.service.add_key("u1", KEY).await.unwrap();
    h.service.unbind("u1").await.unwrap();

    assert!(!h.directory.has_entry(&h.user_dn("alice")));

    // Clean removal makes the name re-provisionable, fresh key list.
    h.service.bind("u2", "alice", false).await.unwrap();
    assert_eq!(
        h.service.whoami("u2").await.unwrap(),
        BindingStatus::Bound {
            username: Username::parse("alice").unwrap(),
            key_count: 0
        }
    );
}

#[tokio::test]
async fn unbind_removes_home_directory() {
    let h = harness().await;
    h.service.bind("u1", "alice", false).await.unwrap();

    let home = h.home_root.path().join("alice");
    std::fs::create_dir_all(home.join("work")).unwrap();

    let outcome = h.service.unbind("u1").await.unwrap();
    assert!(outcome.warnings.is_empty());
    assert!(!home.exists());
}

#[tokio::test]
async fn chsh_pushes_shell_to_directory_only() {
    let h = harness().await;
    h.service.bind("u1", "alice", false).await.unwrap();

    h.service.change_shell("u1", "zsh").await.unwrap();

    let shells = h.directory.attr(&h.user_dn("alice"), LOGIN_SHELL_ATTR).unwrap();
    assert_eq!(shells, vec!["/bin/zsh".to_string()]);

    let err = h.service.change_shell("u1", "tcsh").await.unwrap_err();
    assert!(matches!(err, SyncError::InvalidShell(_)));
}

#[tokio::test]
async fn duplicate_key_leaves_list_unchanged() {
    let h = harness().await;
    h.service.bind("u1", "alice", false).await.unwrap();
    h.service.add_key("u1", KEY).await.unwrap();

    let err = h.service.add_key("u1", KEY).await.unwrap_err();
    assert!(matches!(err, SyncError::DuplicateKey));

    let binding = h.store.get("u1").await.unwrap().unwrap();
    assert_eq!(binding.key_count(), 1);
}

#[tokio::test]
async fn multiline_key_paste_is_normalized_before_storage() {
    let h = harness().await;
    h.service.bind("u1", "alice", false).await.unwrap();

    let pasted = "ssh-ed25519 AAAAC3NzaC1lZDI1\n   NTE5AAAAIB alice@laptop  ";
    h.service.add_key("u1", pasted).await.unwrap();

    let binding = h.store.get("u1").await.unwrap().unwrap();
    assert_eq!(
        binding.ssh_keys,
        vec!["ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIB alice@laptop".to_string()]
    );
}
