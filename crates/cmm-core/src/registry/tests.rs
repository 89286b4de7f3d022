//! Tests for the registry (use the in-memory helper from db).

use crate::registry::db::open_memory;
use crate::registry::MigrationStatus;

#[tokio::test]
async fn add_and_get_roundtrip() {
    let store = open_memory().await.unwrap();
    store.add_migration("20260110_update_links").await.unwrap();

    let record = store
        .get_migration("20260110_update_links")
        .await
        .unwrap()
        .expect("migration exists");
    assert_eq!(record.name, "20260110_update_links");
    assert_eq!(record.status, MigrationStatus::Todo);
    assert_eq!(record.execution_error, None);
    assert_eq!(record.suspended_context, None);
    assert!(record.created_at > 0);
    assert_eq!(record.created_at, record.updated_at);

    assert!(store.get_migration("nonexistent").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_names_are_rejected() {
    let store = open_memory().await.unwrap();
    store.add_migration("dup").await.unwrap();
    assert!(store.add_migration("dup").await.is_err());
}

#[tokio::test]
async fn status_transitions_roundtrip() {
    let store = open_memory().await.unwrap();
    store.add_migration("m1").await.unwrap();

    store.mark_started("m1").await.unwrap();
    let record = store.get_migration("m1").await.unwrap().unwrap();
    assert_eq!(record.status, MigrationStatus::Started);

    store
        .record_suspension("m1", Some(r#"{"step":3}"#))
        .await
        .unwrap();
    let record = store.get_migration("m1").await.unwrap().unwrap();
    assert_eq!(record.status, MigrationStatus::Suspended);
    assert_eq!(record.suspended_context.as_deref(), Some(r#"{"step":3}"#));

    store.record_failure("m1", "content type missing").await.unwrap();
    let record = store.get_migration("m1").await.unwrap().unwrap();
    assert_eq!(record.status, MigrationStatus::Failed);
    assert_eq!(record.execution_error.as_deref(), Some("content type missing"));
    // The suspension context survives a failure so the migration can still be
    // re-suspended and resumed by an operator.
    assert_eq!(record.suspended_context.as_deref(), Some(r#"{"step":3}"#));
}

#[tokio::test]
async fn mark_done_clears_context_and_error() {
    let store = open_memory().await.unwrap();
    store.add_migration("m1").await.unwrap();
    store.record_suspension("m1", Some("ctx")).await.unwrap();
    store.record_failure("m1", "boom").await.unwrap();

    store.mark_done("m1").await.unwrap();
    let record = store.get_migration("m1").await.unwrap().unwrap();
    assert_eq!(record.status, MigrationStatus::Done);
    assert_eq!(record.execution_error, None);
    assert_eq!(record.suspended_context, None);
}

#[tokio::test]
async fn migrations_by_status_filters_and_orders_by_name() {
    let store = open_memory().await.unwrap();
    for name in ["c_last", "a_first", "b_middle", "done_one"] {
        store.add_migration(name).await.unwrap();
    }
    for name in ["c_last", "a_first", "b_middle"] {
        store.record_suspension(name, None).await.unwrap();
    }
    store.mark_done("done_one").await.unwrap();

    let suspended = store
        .migrations_by_status(MigrationStatus::Suspended)
        .await
        .unwrap();
    let names: Vec<&str> = suspended.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["a_first", "b_middle", "c_last"]);

    let done = store
        .migrations_by_status(MigrationStatus::Done)
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].name, "done_one");
}

#[tokio::test]
async fn list_and_remove_migrations() {
    let store = open_memory().await.unwrap();
    assert!(store.list_migrations().await.unwrap().is_empty());

    store.add_migration("beta").await.unwrap();
    store.add_migration("alpha").await.unwrap();

    let all = store.list_migrations().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "alpha");
    assert_eq!(all[1].name, "beta");

    store.remove_migration("alpha").await.unwrap();
    let all = store.list_migrations().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "beta");
}

#[test]
fn status_string_roundtrip() {
    for status in [
        MigrationStatus::Todo,
        MigrationStatus::Started,
        MigrationStatus::Done,
        MigrationStatus::Suspended,
        MigrationStatus::Failed,
        MigrationStatus::Skipped,
    ] {
        assert_eq!(MigrationStatus::from_str(status.as_str()), status);
    }
    // Unknown strings map to Failed rather than panicking on a corrupt row.
    assert_eq!(MigrationStatus::from_str("garbage"), MigrationStatus::Failed);
}
