//! Namespace codec for the shared social blob.
//!
//! The storage schema has exactly one free-form JSON object available for
//! everything the relational columns do not cover, so social links, the
//! SEO/popup substructures and an open-ended set of auxiliary flags all
//! coexist inside it. Keys with a leading `_` are reserved for auxiliary
//! flags; every other key is an ordinary social-platform link or a lifted
//! substructure.
//!
//! The namespace is additive-only: reserved keys this build does not
//! recognize are carried verbatim in [`AuxFlags::extras`] and re-emitted by
//! [`encode`], so a document written by a newer build survives a round-trip
//! through this one. `decode(encode(x)) == x` for any `x` produced by
//! [`decode`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use vitrine_core::model::{
    AuxFlags, DeviceOrderRequest, FeedbackEntry, PopupSettings, SectionVisibility, SeoSettings,
    Social,
};

use crate::document::{as_text, bool_or, text_or};

/// Sentinel prefix distinguishing auxiliary flags from social links.
pub const RESERVED_PREFIX: char = '_';

const KEY_STATUS: &str = "_status";
const KEY_VERIFIED: &str = "_verified";
const KEY_PAID: &str = "_paid";
const KEY_TRIAL_EXTENDED: &str = "_trialExtended";
const KEY_DEVICE_ORDERS: &str = "_deviceOrders";
const KEY_FEEDBACK: &str = "_feedback";
/// Section-visibility map, stored double-encoded (a JSON string) because
/// the legacy consumer expected a string at this position.
const KEY_SECTIONS: &str = "_sections";

const KEY_SEO: &str = "seo";
const KEY_POPUP: &str = "popup";
const KEY_FEATURED_VIDEO: &str = "featuredVideo";

/// Whether a blob key can never be a social-platform link: the reserved
/// namespace plus the lifted substructure names. Links under such names
/// would shadow (or be shadowed by) their blob position, so the merge
/// engine strips them before they reach the model.
#[must_use]
pub fn is_reserved_link_key(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX) || matches!(key, KEY_SEO | KEY_POPUP | KEY_FEATURED_VIDEO)
}

/// Everything the blob decomposes into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBlob {
    pub social: Social,
    /// Featured video URL, if the blob carries one (its current location;
    /// the normalizer falls back to the legacy top-level field).
    pub featured_video: Option<String>,
    pub visibility: SectionVisibility,
    pub aux: AuxFlags,
}

/// Split a raw blob into social links, lifted substructures and auxiliary
/// flags.
///
/// Wrong-shape values fall back to defaults field by field; unrecognized
/// reserved keys are retained verbatim. Never fails.
#[must_use]
pub fn decode(blob: &Map<String, Value>) -> DecodedBlob {
    let mut decoded = DecodedBlob::default();

    for (key, value) in blob {
        if key.starts_with(RESERVED_PREFIX) {
            decode_reserved(key, value, &mut decoded);
        } else {
            decode_ordinary(key, value, &mut decoded);
        }
    }

    decoded
}

fn decode_reserved(key: &str, value: &Value, decoded: &mut DecodedBlob) {
    match key {
        KEY_STATUS => {
            decoded.aux.moderation = as_text(value)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default();
        }
        KEY_VERIFIED => decoded.aux.verified = value.as_bool().unwrap_or(false),
        KEY_PAID => decoded.aux.paid = value.as_bool().unwrap_or(false),
        KEY_TRIAL_EXTENDED => decoded.aux.trial_extended = value.as_bool().unwrap_or(false),
        KEY_DEVICE_ORDERS => decoded.aux.device_orders = lenient_records(value),
        KEY_FEEDBACK => decoded.aux.feedback = lenient_records(value),
        KEY_SECTIONS => decoded.visibility = decode_sections(value),
        _ => {
            // Future flag from a newer build; preserve it untouched.
            decoded.aux.extras.insert(key.to_string(), value.clone());
        }
    }
}

fn decode_ordinary(key: &str, value: &Value, decoded: &mut DecodedBlob) {
    match key {
        KEY_SEO => {
            if let Some(obj) = value.as_object() {
                decoded.social.seo = SeoSettings {
                    title: text_or(obj, &["title"], ""),
                    description: text_or(obj, &["description"], ""),
                    image: text_or(obj, &["image"], ""),
                };
            }
        }
        KEY_POPUP => {
            if let Some(obj) = value.as_object() {
                decoded.social.popup = PopupSettings {
                    enabled: bool_or(obj, &["enabled"], false),
                    image: text_or(obj, &["image"], ""),
                    text: text_or(obj, &["text"], ""),
                };
            }
        }
        KEY_FEATURED_VIDEO => {
            decoded.featured_video = as_text(value).filter(|s| !s.is_empty());
        }
        _ => {
            if let Some(url) = as_text(value) {
                decoded.social.links.insert(key.to_string(), url);
            } else {
                debug!(key, "dropping non-textual social link value");
            }
        }
    }
}

/// Parse the double-encoded visibility map.
///
/// Malformed JSON here is the single most likely corruption scenario
/// (hand-edited data, partial writes) and must never abort a load: it
/// degrades to the empty map, i.e. all sections visible.
fn decode_sections(value: &Value) -> SectionVisibility {
    match value {
        Value::String(encoded) => match serde_json::from_str::<BTreeMap<String, bool>>(encoded) {
            Ok(map) => map.into_iter().collect(),
            Err(error) => {
                warn!(%error, "malformed section-visibility JSON, defaulting to all visible");
                SectionVisibility::default()
            }
        },
        // One vintage briefly wrote the map directly; accept it on read.
        Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
        _ => SectionVisibility::default(),
    }
}

/// Decode an array of records element by element, skipping elements that do
/// not deserialize rather than discarding the whole list.
fn lenient_records<T: serde::de::DeserializeOwned>(value: &Value) -> Vec<T> {
    value.as_array().map_or_else(Vec::new, |items| {
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    })
}

/// Re-merge social links, lifted substructures and auxiliary flags into one
/// blob object for storage. Inverse of [`decode`].
#[must_use]
pub fn encode(
    social: &Social,
    featured_video: Option<&str>,
    visibility: &SectionVisibility,
    aux: &AuxFlags,
) -> Map<String, Value> {
    let mut blob = Map::new();

    for (platform, url) in &social.links {
        if is_reserved_link_key(platform) {
            warn!(platform, "skipping social link colliding with a reserved blob key");
            continue;
        }
        blob.insert(platform.clone(), Value::String(url.clone()));
    }

    if social.seo != SeoSettings::default() {
        if let Ok(seo) = serde_json::to_value(&social.seo) {
            blob.insert(KEY_SEO.to_string(), seo);
        }
    }
    if social.popup != PopupSettings::default() {
        if let Ok(popup) = serde_json::to_value(&social.popup) {
            blob.insert(KEY_POPUP.to_string(), popup);
        }
    }
    if let Some(url) = featured_video.filter(|s| !s.is_empty()) {
        blob.insert(KEY_FEATURED_VIDEO.to_string(), Value::String(url.to_string()));
    }

    if aux.moderation != vitrine_core::ModerationStatus::default() {
        blob.insert(
            KEY_STATUS.to_string(),
            Value::String(aux.moderation.to_string()),
        );
    }
    if aux.verified {
        blob.insert(KEY_VERIFIED.to_string(), Value::Bool(true));
    }
    if aux.paid {
        blob.insert(KEY_PAID.to_string(), Value::Bool(true));
    }
    if aux.trial_extended {
        blob.insert(KEY_TRIAL_EXTENDED.to_string(), Value::Bool(true));
    }
    if !aux.device_orders.is_empty() {
        if let Ok(orders) = serde_json::to_value(&aux.device_orders) {
            blob.insert(KEY_DEVICE_ORDERS.to_string(), orders);
        }
    }
    if !aux.feedback.is_empty() {
        if let Ok(feedback) = serde_json::to_value(&aux.feedback) {
            blob.insert(KEY_FEEDBACK.to_string(), feedback);
        }
    }
    if !visibility.is_empty() {
        if let Ok(encoded) = serde_json::to_string(visibility.overrides()) {
            blob.insert(KEY_SECTIONS.to_string(), Value::String(encoded));
        }
    }

    for (key, value) in &aux.extras {
        blob.insert(key.clone(), value.clone());
    }

    blob
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrine_core::ModerationStatus;

    fn blob(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_decode_splits_links_and_flags() {
        let decoded = decode(&blob(json!({
            "instagram": "https://instagram.com/asha",
            "facebook": "https://fb.com/asha",
            "_status": "suspended",
            "_verified": true,
            "_paid": false
        })));

        assert_eq!(decoded.social.links.len(), 2);
        assert_eq!(
            decoded.social.links.get("instagram").unwrap(),
            "https://instagram.com/asha"
        );
        assert_eq!(decoded.aux.moderation, ModerationStatus::Suspended);
        assert!(decoded.aux.verified);
        assert!(!decoded.aux.paid);
    }

    #[test]
    fn test_decode_lifts_seo_popup_and_video() {
        let decoded = decode(&blob(json!({
            "seo": {"title": "Asha Tailors", "description": "Bespoke", "image": "seo.png"},
            "popup": {"enabled": true, "image": "sale.png", "text": "Sale!"},
            "featuredVideo": "https://youtu.be/abc"
        })));

        assert_eq!(decoded.social.seo.title, "Asha Tailors");
        assert!(decoded.social.popup.enabled);
        assert_eq!(decoded.featured_video.as_deref(), Some("https://youtu.be/abc"));
        assert!(decoded.social.links.is_empty());
    }

    #[test]
    fn test_unknown_reserved_keys_round_trip() {
        let raw = blob(json!({
            "instagram": "https://instagram.com/asha",
            "_futureFlag": {"nested": [1, 2, 3]},
            "_anotherOne": "soon"
        }));

        let decoded = decode(&raw);
        assert_eq!(decoded.aux.extras.len(), 2);
        assert_eq!(decoded.aux.extras["_futureFlag"], json!({"nested": [1, 2, 3]}));

        let reencoded = encode(
            &decoded.social,
            decoded.featured_video.as_deref(),
            &decoded.visibility,
            &decoded.aux,
        );
        assert_eq!(reencoded, raw);
    }

    #[test]
    fn test_malformed_sections_string_degrades_to_all_visible() {
        let decoded = decode(&blob(json!({"_sections": "{not json"})));
        assert!(decoded.visibility.is_visible("products"));
        assert!(decoded.visibility.is_empty());
    }

    #[test]
    fn test_sections_double_encoding() {
        let mut visibility = SectionVisibility::default();
        visibility.set("gallery", false);

        let encoded = encode(&Social::default(), None, &visibility, &AuxFlags::default());
        // Stored as a JSON string, not an object.
        assert!(encoded["_sections"].is_string());

        let decoded = decode(&encoded);
        assert!(!decoded.visibility.is_visible("gallery"));
        assert!(decoded.visibility.is_visible("products"));
    }

    #[test]
    fn test_sections_object_vintage_accepted() {
        let decoded = decode(&blob(json!({"_sections": {"faqs": false}})));
        assert!(!decoded.visibility.is_visible("faqs"));
    }

    #[test]
    fn test_decode_encode_identity() {
        let raw = blob(json!({
            "instagram": "https://instagram.com/asha",
            "seo": {"title": "T", "description": "D", "image": "I"},
            "_status": "banned",
            "_verified": true,
            "_trialExtended": true,
            "_sections": "{\"products\":false}",
            "_mystery": [1, null, "x"]
        }));

        let first = decode(&raw);
        let reencoded = encode(
            &first.social,
            first.featured_video.as_deref(),
            &first.visibility,
            &first.aux,
        );
        let second = decode(&reencoded);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_shape_flags_fall_back() {
        let decoded = decode(&blob(json!({
            "_verified": "yes",
            "_status": 7,
            "_deviceOrders": "none"
        })));
        assert!(!decoded.aux.verified);
        assert_eq!(decoded.aux.moderation, ModerationStatus::Active);
        assert!(decoded.aux.device_orders.is_empty());
    }

    #[test]
    fn test_encode_skips_reserved_colliding_link() {
        let mut social = Social::default();
        social
            .links
            .insert("_sneaky".to_string(), "https://x.test".to_string());
        social
            .links
            .insert("seo".to_string(), "https://seo.example/profile".to_string());
        let encoded = encode(&social, None, &SectionVisibility::default(), &AuxFlags::default());
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_reserved_link_keys() {
        for key in ["_anything", "seo", "popup", "featuredVideo"] {
            assert!(is_reserved_link_key(key));
        }
        for key in ["instagram", "facebook", "x"] {
            assert!(!is_reserved_link_key(key));
        }
    }
}
