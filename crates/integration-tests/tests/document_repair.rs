//! End-to-end document repair: legacy and hand-edited documents are read
//! leniently, and one save rewrites them into the current canonical shape
//! without losing unknown reserved keys.

use chrono::Weekday;
use serde_json::{Value, json};

use vitrine_core::types::TenantKey;
use vitrine_store::sync::{SyncEvent, SyncOptions};
use vitrine_store::{EditorSession, RawShopDocument, ShopPatch};

use vitrine_integration_tests::RecordingBackend;

fn raw(value: Value) -> RawShopDocument {
    serde_json::from_value(value).expect("raw document")
}

/// A document accumulating most of the historical quirks at once.
fn legacy_document() -> RawShopDocument {
    raw(json!({
        "id": 42,
        "createdAt": 1_700_000_000_000_i64,
        "alias": "asha-tailors",
        "slogan": "Stitch in time",
        "shopName": "Asha Tailors",
        "featuredVideo": "https://old.example/v1",
        "hours": [
            {"day": "MONDAY", "open": "08:00", "close": "12:00"},
            {"day": "tuesday", "open": "10:00", "close": "14:00", "isClosed": true},
            {"day": "Noday", "open": "00:00", "close": "00:01"}
        ],
        "products": [
            {"name": "Saree", "price": 2500}
        ],
        "social": {
            "instagram": "https://instagram.com/asha",
            "_verified": true,
            "_futureFlag": {"rollout": 3},
            "_sections": "{not valid json"
        }
    }))
}

#[tokio::test(start_paused = true)]
async fn test_legacy_document_normalizes_on_open() {
    let backend = RecordingBackend::with_document(legacy_document());
    let (session, _events) = EditorSession::open(
        backend,
        TenantKey::new("asha"),
        SyncOptions::default(),
    )
    .await
    .expect("open session");

    let config = session.config();

    // Numeric ID coerced, epoch-millis timestamp parsed.
    assert_eq!(config.identity.id, "42");
    assert_eq!(config.identity.created_at.timestamp(), 1_700_000_000);

    // Legacy locations read one-way.
    assert_eq!(config.profile.tagline, "Stitch in time");
    assert_eq!(
        config.branding.featured_video.as_deref(),
        Some("https://old.example/v1")
    );

    // Hours repaired to a full Monday-first week, salvaging matches.
    assert_eq!(config.hours.iter().count(), 7);
    assert_eq!(config.hours.day(Weekday::Mon).open, "08:00");
    assert!(config.hours.day(Weekday::Tue).closed);
    assert_eq!(config.hours.day(Weekday::Wed).open, "09:00");

    // Missing record IDs assigned.
    assert!(!config.products[0].id.as_str().is_empty());
    assert_eq!(config.products[0].price, "2500");

    // Reserved keys unpacked; unknown ones kept; malformed visibility
    // falls back to everything visible.
    assert!(config.aux.verified);
    assert_eq!(config.aux.extras["_futureFlag"], json!({"rollout": 3}));
    assert_eq!(config.social.links["instagram"], "https://instagram.com/asha");
    assert!(config.visibility.is_visible("gallery"));
}

#[tokio::test(start_paused = true)]
async fn test_save_rewrites_canonical_shape_preserving_unknown_keys() {
    let backend = RecordingBackend::with_document(legacy_document());
    let (mut session, mut events) = EditorSession::open(
        backend.clone(),
        TenantKey::new("asha"),
        SyncOptions::default(),
    )
    .await
    .expect("open session");

    session.apply(ShopPatch::default());
    assert_eq!(events.recv().await.expect("event"), SyncEvent::Saved);

    let written = backend.document().expect("stored document");

    // Legacy locations are never written back.
    assert_eq!(written.slogan, Value::Null);
    assert_eq!(written.featured_video, Value::Null);
    assert_eq!(written.tagline, json!("Stitch in time"));

    let blob = written.social.as_object().expect("social blob");
    // The unknown reserved key survives verbatim.
    assert_eq!(blob["_futureFlag"], json!({"rollout": 3}));
    // The featured video now lives inside the blob.
    assert_eq!(blob["featuredVideo"], json!("https://old.example/v1"));
    // Hours written as a full seven-entry week.
    assert_eq!(written.hours.as_array().map(Vec::len), Some(7));
}

#[tokio::test(start_paused = true)]
async fn test_visibility_double_encoding_roundtrip() {
    let backend = RecordingBackend::new();
    let (mut session, mut events) = EditorSession::open(
        backend.clone(),
        TenantKey::new("asha"),
        SyncOptions::default(),
    )
    .await
    .expect("open session");

    session.apply(ShopPatch {
        visibility: Some([("gallery".to_string(), false)].into_iter().collect()),
        ..ShopPatch::default()
    });
    assert_eq!(events.recv().await.expect("event"), SyncEvent::Saved);

    // Stored as a JSON string inside the blob, not a nested object.
    let written = backend.document().expect("stored document");
    let blob = written.social.as_object().expect("social blob");
    let sections = blob["_sections"].as_str().expect("string-encoded sections");
    let parsed: Value = serde_json::from_str(sections).expect("inner json");
    assert_eq!(parsed, json!({"gallery": false}));

    // And it reads back.
    let (reopened, _events) = EditorSession::open(
        backend,
        TenantKey::new("asha"),
        SyncOptions::default(),
    )
    .await
    .expect("reopen session");
    assert!(!reopened.config().visibility.is_visible("gallery"));
    assert!(reopened.config().visibility.is_visible("products"));
}
