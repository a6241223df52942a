//! Sysadmin group mirroring.

use crate::common::harness;

#[tokio::test]
async fn membership_is_fully_replaced_not_merged() {
    let h = harness().await;

    // The group entry starts with a member the bridge never recorded.
    assert_eq!(
        h.directory.attr(&h.group_dn(), "memberUid").unwrap(),
        vec!["left-over-admin".to_string()]
    );

    h.service.bind("u1", "alice", true).await.unwrap();
    h.service.bind("u2", "bob", false).await.unwrap();
    h.service.bind("u3", "carol", true).await.unwrap();

    let mut members = h.directory.attr(&h.group_dn(), "memberUid").unwrap();
    members.sort();
    assert_eq!(members, vec!["alice".to_string(), "carol".to_string()]);
}

#[tokio::test]
async fn non_sysadm_bind_does_not_touch_the_group() {
    let h = harness().await;

    h.service.bind("u1", "alice", false).await.unwrap();

    assert_eq!(
        h.directory.attr(&h.group_dn(), "memberUid").unwrap(),
        vec!["left-over-admin".to_string()]
    );
}

#[tokio::test]
async fn unbinding_a_sysadmin_shrinks_the_group() {
    let h = harness().await;
    h.service.bind("u1", "alice", true).await.unwrap();
    h.service.bind("u2", "bob", true).await.unwrap();

    h.service.unbind("u2").await.unwrap();

    assert_eq!(
        h.directory.attr(&h.group_dn(), "memberUid").unwrap(),
        vec!["alice".to_string()]
    );
}

#[tokio::test]
async fn explicit_recompute_reports_member_count() {
    let h = harness().await;
    h.service.bind("u1", "alice", true).await.unwrap();
    h.service.bind("u2", "bob", true).await.unwrap();

    assert_eq!(h.service.recompute_sysadmins().await.unwrap(), 2);
}
