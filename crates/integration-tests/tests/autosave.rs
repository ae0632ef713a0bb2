//! Autosave behavior through a full editing session: debounce coalescing,
//! insert-vs-update on first save, failure reporting and retry.

use std::time::Duration;

use tokio::time;

use vitrine_core::types::TenantKey;
use vitrine_store::merge::ProfilePatch;
use vitrine_store::normalize;
use vitrine_store::sync::{SyncEvent, SyncOptions, SyncState};
use vitrine_store::{EditorSession, ShopPatch};

use vitrine_integration_tests::{FailKind, RecordingBackend};

async fn open(
    backend: RecordingBackend,
) -> (
    EditorSession,
    tokio::sync::mpsc::UnboundedReceiver<SyncEvent>,
) {
    EditorSession::open(backend, TenantKey::new("asha"), SyncOptions::default())
        .await
        .expect("open session")
}

fn rename(name: &str) -> ShopPatch {
    ShopPatch {
        profile: Some(ProfilePatch {
            shop_name: Some(name.to_string()),
            ..ProfilePatch::default()
        }),
        ..ShopPatch::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_save_inserts_then_updates() {
    let backend = RecordingBackend::new();
    let (mut session, mut events) = open(backend.clone()).await;

    session.apply(rename("one"));
    assert_eq!(events.recv().await.expect("event"), SyncEvent::Saved);
    assert_eq!((backend.inserts(), backend.updates()), (1, 0));

    session.apply(rename("two"));
    assert_eq!(events.recv().await.expect("event"), SyncEvent::Saved);
    assert_eq!((backend.inserts(), backend.updates()), (1, 1));
}

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_coalesce_into_one_write() {
    let backend = RecordingBackend::new();
    let (mut session, mut events) = open(backend.clone()).await;

    session.apply(rename("one"));
    time::advance(Duration::from_millis(50)).await;
    session.apply(rename("two"));
    time::advance(Duration::from_millis(50)).await;
    session.apply(rename("three"));

    assert_eq!(events.recv().await.expect("event"), SyncEvent::Saved);
    assert_eq!((backend.inserts(), backend.updates()), (1, 0));

    let written = normalize::normalize(&backend.document().expect("stored document"));
    assert_eq!(written.profile.shop_name, "three");
}

#[tokio::test(start_paused = true)]
async fn test_write_failure_is_reported_and_next_edit_retries() {
    let backend = RecordingBackend::new();
    backend.fail_next_write(FailKind::Io);
    let (mut session, mut events) = open(backend.clone()).await;

    session.apply(rename("one"));
    let event = events.recv().await.expect("event");
    assert!(matches!(event, SyncEvent::WriteFailed { .. }));
    assert_eq!(session.sync_state(), SyncState::WriteFailed);
    assert_eq!(backend.inserts(), 0);

    // Edits are never rolled back; the next one retries the insert.
    session.apply(rename("two"));
    assert_eq!(events.recv().await.expect("event"), SyncEvent::Saved);
    assert_eq!((backend.inserts(), backend.updates()), (1, 0));
    assert_eq!(session.sync_state(), SyncState::Idle);

    let written = normalize::normalize(&backend.document().expect("stored document"));
    assert_eq!(written.profile.shop_name, "two");
}

#[tokio::test(start_paused = true)]
async fn test_storage_full_is_reported_distinctly() {
    let backend = RecordingBackend::new();
    backend.fail_next_write(FailKind::Quota);
    let (mut session, mut events) = open(backend.clone()).await;

    session.apply(rename("one"));
    assert_eq!(events.recv().await.expect("event"), SyncEvent::StorageFull);
    assert_eq!(session.sync_state(), SyncState::WriteFailed);
}
