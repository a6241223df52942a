//! Partial-failure consistency between the directory and the record
//! store.

use std::sync::atomic::Ordering;

use wsb_core::{SyncError, Warning};
use wsb_store::BindingStore;

use crate::common::harness;

const KEY: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIB alice@laptop";
const SECOND_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAAB alice@desktop";

#[tokio::test]
async fn provision_failure_writes_no_record() {
    let h = harness().await;
    h.provisioner.fail_create.store(true, Ordering::SeqCst);

    let err = h.service.bind("u1", "alice", false).await.unwrap_err();

    assert!(matches!(err, SyncError::ProvisionFailed(_)));
    assert!(err.is_dependency_failure());
    assert!(h.store.get("u1").await.unwrap().is_none());
}

#[tokio::test]
async fn directory_failure_during_add_key_leaves_store_unchanged() {
    let h = harness().await;
    h.service.bind("u1", "alice", false).await.unwrap();
    h.service.add_key("u1", KEY).await.unwrap();

    h.directory.fail_replace.store(true, Ordering::SeqCst);
    let err = h.service.add_key("u1", SECOND_KEY).await.unwrap_err();

    assert!(matches!(err, SyncError::DirectoryUpdateFailed(_)));
    let binding = h.store.get("u1").await.unwrap().unwrap();
    assert_eq!(binding.ssh_keys, vec![KEY.to_string()]);

    // The command is retriable once the directory is back.
    h.directory.fail_replace.store(false, Ordering::SeqCst);
    let outcome = h.service.add_key("u1", SECOND_KEY).await.unwrap();
    assert_eq!(outcome.key_count, 2);
}

#[tokio::test]
async fn deprovision_failure_keeps_binding_and_username_tracking() {
    let h = harness().await;
    h.service.bind("u1", "alice", false).await.unwrap();

    h.directory.fail_delete.store(true, Ordering::SeqCst);
    let err = h.service.unbind("u1").await.unwrap_err();
    assert!(matches!(err, SyncError::DeprovisionFailed(_)));

    // The record survives, so the username stays reserved for the entry
    // that still exists in the directory.
    assert!(h.store.get("u1").await.unwrap().is_some());
    let err = h.service.bind("u2", "alice", false).await.unwrap_err();
    assert!(matches!(err, SyncError::NameTaken(_)));

    h.directory.fail_delete.store(false, Ordering::SeqCst);
    h.service.unbind("u1").await.unwrap();
    assert!(h.store.get("u1").await.unwrap().is_none());
}

#[tokio::test]
async fn mirror_failure_after_sysadm_bind_is_a_warning() {
    let h = harness().await;
    h.directory.fail_replace.store(true, Ordering::SeqCst);

    let outcome = h.service.bind("u1", "alice", true).await.unwrap();

    assert!(matches!(outcome.warning, Some(Warning::RoleMirror(_))));
    // The bind itself committed.
    assert!(h.store.get("u1").await.unwrap().is_some());

    // A later recompute repairs the group.
    h.directory.fail_replace.store(false, Ordering::SeqCst);
    let count = h.service.recompute_sysadmins().await.unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        h.directory.attr(&h.group_dn(), "memberUid").unwrap(),
        vec!["alice".to_string()]
    );
}

#[tokio::test]
async fn mirror_failure_as_primary_operation_is_an_error() {
    let h = harness().await;
    h.directory.fail_replace.store(true, Ordering::SeqCst);

    let err = h.service.recompute_sysadmins().await.unwrap_err();
    assert!(matches!(err, SyncError::RoleMirrorFailed(_)));
}
