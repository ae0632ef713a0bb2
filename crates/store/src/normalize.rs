//! Document normalization and re-encoding.
//!
//! [`normalize`] is the one tolerant reader that collapses every historical
//! document shape into the canonical model: shape-checked field overrides on
//! top of [`ShopConfig::defaults`], the namespace codec for the social blob,
//! hours repair, one-way field aliasing and ID assignment. [`encode`] is the
//! inverse, always producing the current canonical shape.
//!
//! Normalization is idempotent: `normalize(&encode(&m)) == m` for any model
//! produced by `defaults()` or a sequence of valid merges.

use chrono::{DateTime, TimeZone, Utc, Weekday};
use serde_json::{Map, Value, json};

use vitrine_core::model::{
    Appointment, Category, FaqEntry, GalleryItem, Inquiry, Product, Service, ShopConfig, Stats,
    Testimonial,
};
use vitrine_core::types::hours::{DEFAULT_CLOSE, DEFAULT_OPEN};
use vitrine_core::types::{BannerKind, LeadStatus, RecordId, WeekHours};

use crate::codec;
use crate::document::{RawShopDocument, as_array, as_object, as_text, bool_or, text_or, u64_or};

/// Produce a canonical model from a raw document of unknown vintage.
///
/// A field of the wrong run-time shape keeps its default silently; only the
/// double-encoded visibility field warrants a warning (handled inside the
/// codec). Never fails.
#[must_use]
pub fn normalize(raw: &RawShopDocument) -> ShopConfig {
    let mut config = ShopConfig::defaults();

    if let Some(id) = as_text(&raw.id).filter(|s| !s.is_empty()) {
        config.identity.id = id;
    }
    if let Some(created_at) = parse_timestamp(&raw.created_at) {
        config.identity.created_at = created_at;
    }
    set_text(&mut config.identity.alias, &raw.alias);

    set_text(&mut config.profile.shop_name, &raw.shop_name);
    set_text(&mut config.profile.owner_name, &raw.owner_name);
    // `slogan` is the legacy location for the tagline; read-only fallback.
    match as_text(&raw.tagline) {
        Some(tagline) => config.profile.tagline = tagline,
        None => set_text(&mut config.profile.tagline, &raw.slogan),
    }
    set_text(&mut config.profile.about, &raw.about);

    set_text(&mut config.branding.logo, &raw.logo);
    set_text(&mut config.branding.banner, &raw.banner);
    if let Some(kind) = as_text(&raw.banner_kind) {
        config.branding.banner_kind = if kind.eq_ignore_ascii_case("video") {
            BannerKind::Video
        } else {
            BannerKind::Image
        };
    }

    set_text(&mut config.contact.phone, &raw.phone);
    set_text(&mut config.contact.whatsapp, &raw.whatsapp);
    set_text(&mut config.contact.email, &raw.email);
    set_text(&mut config.contact.address, &raw.address);
    set_text(&mut config.contact.map_link, &raw.map_link);
    set_text(&mut config.contact.alt_phone, &raw.alt_phone);

    config.hours = normalize_hours(&raw.hours);

    config.categories = normalize_list(&raw.categories, normalize_category);
    config.gallery = normalize_list(&raw.gallery, normalize_gallery_item);
    config.products = normalize_list(&raw.products, normalize_product);
    config.services = normalize_list(&raw.services, normalize_service);
    config.testimonials = normalize_list(&raw.testimonials, normalize_testimonial);
    config.faqs = normalize_list(&raw.faqs, normalize_faq);

    if let Some(blob) = as_object(&raw.social) {
        let decoded = codec::decode(blob);
        config.social = decoded.social;
        config.visibility = decoded.visibility;
        config.aux = decoded.aux;
        config.branding.featured_video = decoded.featured_video;
    }
    // The featured video used to live top-level; the blob location wins and
    // the old location is never written back.
    if config.branding.featured_video.is_none() {
        config.branding.featured_video =
            as_text(&raw.featured_video).filter(|s| !s.is_empty());
    }

    config.leads.inquiries = normalize_list(&raw.inquiries, normalize_inquiry);
    config.leads.appointments = normalize_list(&raw.appointments, normalize_appointment);

    if let Some(stats) = as_object(&raw.stats) {
        config.stats = Stats {
            visits: u64_or(stats, &["visits", "views"], 0),
            clicks: u64_or(stats, &["clicks"], 0),
        };
    }

    config
}

/// Re-encode a canonical model into the current raw-document shape.
#[must_use]
pub fn encode(config: &ShopConfig) -> RawShopDocument {
    RawShopDocument {
        id: Value::String(config.identity.id.clone()),
        created_at: json!(config.identity.created_at),
        alias: Value::String(config.identity.alias.clone()),

        shop_name: Value::String(config.profile.shop_name.clone()),
        owner_name: Value::String(config.profile.owner_name.clone()),
        tagline: Value::String(config.profile.tagline.clone()),
        // Legacy locations are never written.
        slogan: Value::Null,
        about: Value::String(config.profile.about.clone()),

        logo: Value::String(config.branding.logo.clone()),
        banner: Value::String(config.branding.banner.clone()),
        banner_kind: json!(config.branding.banner_kind),
        featured_video: Value::Null,

        phone: Value::String(config.contact.phone.clone()),
        whatsapp: Value::String(config.contact.whatsapp.clone()),
        email: Value::String(config.contact.email.clone()),
        address: Value::String(config.contact.address.clone()),
        map_link: Value::String(config.contact.map_link.clone()),
        alt_phone: Value::String(config.contact.alt_phone.clone()),

        hours: json!(config.hours),
        categories: json!(config.categories),
        gallery: json!(config.gallery),
        products: json!(config.products),
        services: json!(config.services),
        testimonials: json!(config.testimonials),
        faqs: json!(config.faqs),

        social: Value::Object(codec::encode(
            &config.social,
            config.branding.featured_video.as_deref(),
            &config.visibility,
            &config.aux,
        )),

        inquiries: json!(config.leads.inquiries),
        appointments: json!(config.leads.appointments),
        stats: json!(config.stats),
    }
}

fn set_text(target: &mut String, value: &Value) {
    if let Some(text) = as_text(value) {
        *target = text;
    }
}

/// Accept both RFC 3339 strings and the epoch-millisecond numbers one
/// vintage wrote.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(_) => serde_json::from_value(value.clone()).ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

/// Rebuild the week from defaults, salvaging open/close/closed from raw
/// entries whose day name matches case-insensitively. Repairs wrong counts,
/// duplicate days and renamed/missing days without discarding usable data.
fn normalize_hours(value: &Value) -> WeekHours {
    let mut week = WeekHours::default();
    let Some(entries) = as_array(value) else {
        return week;
    };

    let mut seen = [false; 7];
    for entry in entries {
        let Some(obj) = as_object(entry) else {
            continue;
        };
        let Some(day) = obj
            .get("day")
            .and_then(as_text)
            .and_then(|name| name.parse::<Weekday>().ok())
        else {
            continue;
        };
        let index = day.num_days_from_monday() as usize;
        if std::mem::replace(&mut seen[index], true) {
            // Duplicate day name: first entry wins.
            continue;
        }
        let slot = week.day_mut(day);
        slot.open = text_or(obj, &["open"], DEFAULT_OPEN);
        slot.close = text_or(obj, &["close"], DEFAULT_CLOSE);
        slot.closed = bool_or(obj, &["closed", "isClosed"], false);
    }

    week
}

/// Shape-checked list override: an array maps element-wise (objects only),
/// anything else keeps the empty default.
fn normalize_list<T>(value: &Value, normalize_one: fn(&Map<String, Value>) -> T) -> Vec<T> {
    as_array(value).map_or_else(Vec::new, |items| {
        items
            .iter()
            .filter_map(|item| as_object(item).map(normalize_one))
            .collect()
    })
}

fn record_id(obj: &Map<String, Value>) -> RecordId {
    obj.get("id")
        .and_then(RecordId::coerce)
        .unwrap_or_else(RecordId::generate)
}

fn lead_status(obj: &Map<String, Value>) -> LeadStatus {
    obj.get("status")
        .and_then(as_text)
        .and_then(|s| serde_json::from_value(Value::String(s)).ok())
        .unwrap_or_default()
}

fn rating(obj: &Map<String, Value>) -> Option<u8> {
    obj.get("rating")
        .and_then(Value::as_u64)
        .and_then(|n| u8::try_from(n).ok())
}

fn normalize_category(obj: &Map<String, Value>) -> Category {
    Category {
        id: record_id(obj),
        name: text_or(obj, &["name"], ""),
        image: text_or(obj, &["image"], ""),
    }
}

fn normalize_gallery_item(obj: &Map<String, Value>) -> GalleryItem {
    GalleryItem {
        id: record_id(obj),
        image: text_or(obj, &["image", "url"], ""),
        caption: text_or(obj, &["caption"], ""),
    }
}

fn normalize_product(obj: &Map<String, Value>) -> Product {
    Product {
        id: record_id(obj),
        name: text_or(obj, &["name"], ""),
        description: text_or(obj, &["description"], ""),
        price: text_or(obj, &["price"], ""),
        image: text_or(obj, &["image"], ""),
        category: text_or(obj, &["category"], ""),
        visible: bool_or(obj, &["visible"], true),
    }
}

fn normalize_service(obj: &Map<String, Value>) -> Service {
    Service {
        id: record_id(obj),
        name: text_or(obj, &["name"], ""),
        description: text_or(obj, &["description"], ""),
        price: text_or(obj, &["price"], ""),
        image: text_or(obj, &["image"], ""),
        visible: bool_or(obj, &["visible"], true),
    }
}

fn normalize_testimonial(obj: &Map<String, Value>) -> Testimonial {
    Testimonial {
        id: record_id(obj),
        author: text_or(obj, &["author", "name"], ""),
        quote: text_or(obj, &["quote", "text"], ""),
        rating: rating(obj),
        visible: bool_or(obj, &["visible"], true),
    }
}

fn normalize_faq(obj: &Map<String, Value>) -> FaqEntry {
    FaqEntry {
        id: record_id(obj),
        question: text_or(obj, &["question"], ""),
        answer: text_or(obj, &["answer"], ""),
        visible: bool_or(obj, &["visible"], true),
    }
}

fn normalize_inquiry(obj: &Map<String, Value>) -> Inquiry {
    Inquiry {
        id: record_id(obj),
        name: text_or(obj, &["name"], ""),
        phone: text_or(obj, &["phone"], ""),
        message: text_or(obj, &["message"], ""),
        status: lead_status(obj),
        created_at: obj
            .get("createdAt")
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
    }
}

fn normalize_appointment(obj: &Map<String, Value>) -> Appointment {
    Appointment {
        id: record_id(obj),
        name: text_or(obj, &["name"], ""),
        phone: text_or(obj, &["phone"], ""),
        service: text_or(obj, &["service"], ""),
        scheduled_for: obj.get("scheduledFor").and_then(parse_timestamp),
        status: lead_status(obj),
        created_at: obj
            .get("createdAt")
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
    }
}
