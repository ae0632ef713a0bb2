//! The canonical shop configuration model.
//!
//! `ShopConfig` is the single, fully-defaulted, fixed-shape in-memory
//! representation of one tenant's storefront configuration. Every other
//! component reads and writes this shape; nothing outside the store crate's
//! normalizer ever sees the raw document shape.
//!
//! # Invariants
//!
//! - Every list-valued field is an empty `Vec` by default, never absent, so
//!   consumers never null-check.
//! - Hours always hold exactly 7 entries, one per weekday.
//! - Section-visibility lookups for unknown keys return `true`.
//! - [`ShopConfig::defaults`] is the only way to construct a complete model
//!   from nothing; partial models do not exist.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::types::{BannerKind, LeadStatus, ModerationStatus, RecordId, WeekHours};

fn default_true() -> bool {
    true
}

/// Stable identity of a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable document ID.
    pub id: String,
    /// Creation timestamp; the trial clock starts here.
    pub created_at: DateTime<Utc>,
    /// URL alias (slug), unique per tenant.
    pub alias: String,
}

/// Free-text profile fields shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub shop_name: String,
    pub owner_name: String,
    pub tagline: String,
    pub about: String,
}

/// Logo/banner references. Asset references are opaque strings produced by
/// the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branding {
    pub logo: String,
    pub banner: String,
    pub banner_kind: BannerKind,
    /// Featured video URL. Moved into the social blob across document
    /// versions; the normalizer reads the legacy top-level location too.
    pub featured_video: Option<String>,
}

/// Contact details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub address: String,
    pub map_link: String,
    pub alt_phone: String,
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub image: String,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            name: String::new(),
            image: String::new(),
        }
    }
}

/// Gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryItem {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub image: String,
    pub caption: String,
}

impl Default for GalleryItem {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            image: String::new(),
            caption: String::new(),
        }
    }
}

/// Catalog product.
///
/// Price is a free-text display string ("₹500 onwards"), not a decimal;
/// sellers enter arbitrary text here and documents have carried numbers,
/// strings and empty values over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image: String::new(),
            category: String::new(),
            visible: true,
        }
    }
}

/// Offered service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image: String::new(),
            visible: true,
        }
    }
}

/// Customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub author: String,
    pub quote: String,
    pub rating: Option<u8>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            author: String::new(),
            quote: String::new(),
            rating: None,
            visible: true,
        }
    }
}

/// FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqEntry {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub question: String,
    pub answer: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for FaqEntry {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            question: String::new(),
            answer: String::new(),
            visible: true,
        }
    }
}

/// SEO metadata nested under the social group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoSettings {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Promotional popup nested under the social group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupSettings {
    pub enabled: bool,
    pub image: String,
    pub text: String,
}

/// Social links plus the SEO and popup substructures that share the same
/// stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Social {
    /// Platform name -> URL.
    pub links: BTreeMap<String, String>,
    pub seo: SeoSettings,
    pub popup: PopupSettings,
}

/// Per-section visibility overrides.
///
/// Only explicit overrides are stored; any section not present is visible.
/// Older documents predate now-visible sections, so the open default is
/// load-bearing, not cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionVisibility(BTreeMap<String, bool>);

impl SectionVisibility {
    /// Whether a section is visible. Unknown sections are visible.
    #[must_use]
    pub fn is_visible(&self, section: &str) -> bool {
        self.0.get(section).copied().unwrap_or(true)
    }

    /// Set an explicit visibility override.
    pub fn set(&mut self, section: impl Into<String>, visible: bool) {
        self.0.insert(section.into(), visible);
    }

    /// The stored overrides, by section name.
    #[must_use]
    pub const fn overrides(&self) -> &BTreeMap<String, bool> {
        &self.0
    }

    /// True when no overrides are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for SectionVisibility {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A pending device-order request (sellers can request a physical NFC/QR
/// display device through the editor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceOrderRequest {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub device: String,
    pub quantity: u32,
    pub note: String,
    pub requested_at: Option<DateTime<Utc>>,
}

impl Default for DeviceOrderRequest {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            device: String::new(),
            quantity: 1,
            note: String::new(),
            requested_at: None,
        }
    }
}

/// A queued feedback item from the seller to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackEntry {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub message: String,
    pub rating: Option<u8>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for FeedbackEntry {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            message: String::new(),
            rating: None,
            created_at: None,
        }
    }
}

/// Auxiliary flags smuggled through the shared social blob under reserved
/// keys, because the relational schema has no columns for them.
///
/// The namespace is additive-only: `extras` carries reserved keys this
/// version does not recognize, verbatim, so a future flag survives a
/// load -> merge -> save round-trip through an older build.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuxFlags {
    pub moderation: ModerationStatus,
    pub verified: bool,
    pub paid: bool,
    pub trial_extended: bool,
    pub device_orders: Vec<DeviceOrderRequest>,
    pub feedback: Vec<FeedbackEntry>,
    /// Unrecognized reserved keys, preserved unchanged (key includes the
    /// reserved prefix).
    pub extras: BTreeMap<String, Value>,
}

/// A buyer inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inquiry {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub status: LeadStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Default for Inquiry {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            name: String::new(),
            phone: String::new(),
            message: String::new(),
            status: LeadStatus::New,
            created_at: Utc::now(),
        }
    }
}

/// A buyer appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appointment {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub status: LeadStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Default for Appointment {
    fn default() -> Self {
        Self {
            id: RecordId::generate(),
            name: String::new(),
            phone: String::new(),
            service: String::new(),
            scheduled_for: None,
            status: LeadStatus::New,
            created_at: Utc::now(),
        }
    }
}

/// Buyer leads: append-only from the buyer side, status-mutable from the
/// seller side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leads {
    pub inquiries: Vec<Inquiry>,
    pub appointments: Vec<Appointment>,
}

/// Storefront visit/click counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub visits: u64,
    pub clicks: u64,
}

/// The canonical model: one complete shop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    pub identity: Identity,
    pub profile: Profile,
    pub branding: Branding,
    pub contact: Contact,
    pub hours: WeekHours,
    pub categories: Vec<Category>,
    pub gallery: Vec<GalleryItem>,
    pub products: Vec<Product>,
    pub services: Vec<Service>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<FaqEntry>,
    pub social: Social,
    pub visibility: SectionVisibility,
    pub aux: AuxFlags,
    pub leads: Leads,
    pub stats: Stats,
}

impl ShopConfig {
    /// Build a complete, internally consistent configuration with every
    /// group populated: empty collections, 7 default day entries, empty
    /// visibility map (true on lookup), a fresh identity stamped now.
    ///
    /// This is the only constructor of a complete model; it doubles as the
    /// normalizer's baseline and the reset target for "restore defaults".
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            identity: Identity {
                id: Uuid::new_v4().to_string(),
                created_at: Utc::now(),
                alias: String::new(),
            },
            profile: Profile::default(),
            branding: Branding::default(),
            contact: Contact::default(),
            hours: WeekHours::default(),
            categories: Vec::new(),
            gallery: Vec::new(),
            products: Vec::new(),
            services: Vec::new(),
            testimonials: Vec::new(),
            faqs: Vec::new(),
            social: Social::default(),
            visibility: SectionVisibility::default(),
            aux: AuxFlags::default(),
            leads: Leads::default(),
            stats: Stats::default(),
        }
    }
}
