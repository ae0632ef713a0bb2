//! The raw stored document.
//!
//! `RawShopDocument` is the storage representation of a shop configuration:
//! a flat record of named fields where the collections and the shared social
//! blob are arbitrary JSON values. The same logical document has existed in
//! at least three historical shapes, so every field here is an untyped
//! [`Value`] and all interpretation happens in the normalizer, which
//! shape-checks each field before trusting it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw document of unknown vintage, as read from (and written to) storage.
///
/// Legacy-only fields (`slogan`, top-level `featuredVideo`) are read by the
/// normalizer's one-way aliasing and never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShopDocument {
    pub id: Value,
    pub created_at: Value,
    pub alias: Value,

    pub shop_name: Value,
    pub owner_name: Value,
    pub tagline: Value,
    /// Legacy name for `tagline`.
    pub slogan: Value,
    pub about: Value,

    pub logo: Value,
    pub banner: Value,
    pub banner_kind: Value,
    /// Legacy top-level location; now lives inside the social blob.
    pub featured_video: Value,

    pub phone: Value,
    pub whatsapp: Value,
    pub email: Value,
    pub address: Value,
    pub map_link: Value,
    pub alt_phone: Value,

    pub hours: Value,
    pub categories: Value,
    pub gallery: Value,
    pub products: Value,
    pub services: Value,
    pub testimonials: Value,
    pub faqs: Value,

    /// The shared free-form blob: social links, SEO/popup substructures and
    /// the reserved-key auxiliary namespace, all in one object.
    pub social: Value,

    pub inquiries: Value,
    pub appointments: Value,
    pub stats: Value,
}

// Shape-checked field readers shared by the normalizer and the codec. A
// value of the wrong run-time shape reads as absent, not as an error.

/// The value as an object, if it is one.
pub(crate) fn as_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// The value as an array, if it is one.
pub(crate) fn as_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

/// The value as owned text. Strings pass through; numbers are rendered,
/// because several vintages stored prices and phone numbers as JSON numbers.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present key with a textual value, or the default.
pub(crate) fn text_or(obj: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(as_text))
        .unwrap_or_else(|| default.to_string())
}

/// First present key with a boolean value, or the default.
pub(crate) fn bool_or(obj: &Map<String, Value>, keys: &[&str], default: bool) -> bool {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_bool))
        .unwrap_or(default)
}

/// First present key with an unsigned integer value, or the default.
pub(crate) fn u64_or(obj: &Map<String, Value>, keys: &[&str], default: u64) -> u64 {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_u64))
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_top_level_fields_are_ignored() {
        let doc: RawShopDocument = serde_json::from_value(json!({
            "shopName": "Asha Tailors",
            "someFieldFromTheFuture": {"x": 1}
        }))
        .unwrap();
        assert_eq!(doc.shop_name, json!("Asha Tailors"));
        assert_eq!(doc.products, Value::Null);
    }

    #[test]
    fn test_as_text_coerces_numbers() {
        assert_eq!(as_text(&json!("500")).unwrap(), "500");
        assert_eq!(as_text(&json!(500)).unwrap(), "500");
        assert!(as_text(&json!(["500"])).is_none());
        assert!(as_text(&Value::Null).is_none());
    }

    #[test]
    fn test_text_or_takes_first_present_key() {
        let obj = json!({"tagline": "new", "slogan": "old"});
        let obj = obj.as_object().unwrap();
        assert_eq!(text_or(obj, &["tagline", "slogan"], ""), "new");
        assert_eq!(text_or(obj, &["missing", "slogan"], ""), "old");
        assert_eq!(text_or(obj, &["missing"], "fallback"), "fallback");
    }

    #[test]
    fn test_bool_or_skips_wrong_shapes() {
        let obj = json!({"visible": "yes", "closed": true});
        let obj = obj.as_object().unwrap();
        // "yes" is not a boolean, so the default wins.
        assert!(bool_or(obj, &["visible"], true));
        assert!(bool_or(obj, &["closed"], false));
    }
}
