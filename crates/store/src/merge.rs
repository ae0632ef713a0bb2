//! Partial-update merge engine.
//!
//! A [`ShopPatch`] names only the changed leaves; [`apply`] produces a new
//! canonical model with everything untouched carried over structurally.
//! Merging is shallow per top-level group and deep within a group: setting
//! `contact.email` does not disturb `contact.phone`, and patching one SEO
//! field does not disturb the popup record even though both live under the
//! social group. List-valued fields (and the social-links map) replace
//! wholesale; element-wise reconciliation is the caller's job.
//!
//! Patches for non-overlapping key paths compose associatively, which is
//! what makes rapid keystroke-driven updates safe to apply in any grouping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use vitrine_core::model::{
    Appointment, Category, FaqEntry, GalleryItem, Inquiry, Product, Service, ShopConfig, Stats,
    Testimonial,
};
use vitrine_core::types::{BannerKind, ModerationStatus, WeekHours};

use crate::codec;

/// Sparse update to a shop configuration.
///
/// `None` means "leave this group alone". Identity and the unknown-extras
/// bucket are not patchable: identity is fixed at creation and extras only
/// flow through the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopPatch {
    pub alias: Option<String>,
    pub profile: Option<ProfilePatch>,
    pub branding: Option<BrandingPatch>,
    pub contact: Option<ContactPatch>,
    pub hours: Option<WeekHours>,
    pub categories: Option<Vec<Category>>,
    pub gallery: Option<Vec<GalleryItem>>,
    pub products: Option<Vec<Product>>,
    pub services: Option<Vec<Service>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub faqs: Option<Vec<FaqEntry>>,
    pub social: Option<SocialPatch>,
    /// Per-section overrides, merged by key into the existing map.
    pub visibility: Option<BTreeMap<String, bool>>,
    pub aux: Option<AuxPatch>,
    pub leads: Option<LeadsPatch>,
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub shop_name: Option<String>,
    pub owner_name: Option<String>,
    pub tagline: Option<String>,
    pub about: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingPatch {
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub banner_kind: Option<BannerKind>,
    /// `Some(url)` sets, `Some("")` clears.
    pub featured_video: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub map_link: Option<String>,
    pub alt_phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialPatch {
    /// Whole-map replacement, like the list-valued fields. Platform names
    /// colliding with reserved blob keys are stripped on apply.
    pub links: Option<BTreeMap<String, String>>,
    pub seo: Option<SeoPatch>,
    pub popup: Option<PopupPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupPatch {
    pub enabled: Option<bool>,
    pub image: Option<String>,
    pub text: Option<String>,
}

/// Admin-actor flags. Writable through the same update path as seller
/// fields; the unknown-extras bucket is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuxPatch {
    pub moderation: Option<ModerationStatus>,
    pub verified: Option<bool>,
    pub paid: Option<bool>,
    pub trial_extended: Option<bool>,
    pub device_orders: Option<Vec<vitrine_core::model::DeviceOrderRequest>>,
    pub feedback: Option<Vec<vitrine_core::model::FeedbackEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadsPatch {
    pub inquiries: Option<Vec<Inquiry>>,
    pub appointments: Option<Vec<Appointment>>,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Apply one partial update, returning the new canonical model.
///
/// Structural copy-and-override: auxiliary flags and unknown extras carried
/// by the normalizer survive every merge, whatever the patch touches.
#[must_use]
pub fn apply(config: &ShopConfig, patch: ShopPatch) -> ShopConfig {
    let mut next = config.clone();

    set(&mut next.identity.alias, patch.alias);

    if let Some(profile) = patch.profile {
        set(&mut next.profile.shop_name, profile.shop_name);
        set(&mut next.profile.owner_name, profile.owner_name);
        set(&mut next.profile.tagline, profile.tagline);
        set(&mut next.profile.about, profile.about);
    }

    if let Some(branding) = patch.branding {
        set(&mut next.branding.logo, branding.logo);
        set(&mut next.branding.banner, branding.banner);
        set(&mut next.branding.banner_kind, branding.banner_kind);
        if let Some(url) = branding.featured_video {
            next.branding.featured_video = Some(url).filter(|s| !s.is_empty());
        }
    }

    if let Some(contact) = patch.contact {
        set(&mut next.contact.phone, contact.phone);
        set(&mut next.contact.whatsapp, contact.whatsapp);
        set(&mut next.contact.email, contact.email);
        set(&mut next.contact.address, contact.address);
        set(&mut next.contact.map_link, contact.map_link);
        set(&mut next.contact.alt_phone, contact.alt_phone);
    }

    set(&mut next.hours, patch.hours);
    set(&mut next.categories, patch.categories);
    set(&mut next.gallery, patch.gallery);
    set(&mut next.products, patch.products);
    set(&mut next.services, patch.services);
    set(&mut next.testimonials, patch.testimonials);
    set(&mut next.faqs, patch.faqs);

    if let Some(social) = patch.social {
        // Platform names colliding with reserved blob keys would not
        // survive a save; strip them here so the model only ever holds
        // storable links.
        if let Some(links) = social.links {
            next.social.links = links
                .into_iter()
                .filter(|(platform, _)| {
                    let allowed = !codec::is_reserved_link_key(platform);
                    if !allowed {
                        warn!(platform, "dropping social link with a reserved platform name");
                    }
                    allowed
                })
                .collect();
        }
        if let Some(seo) = social.seo {
            set(&mut next.social.seo.title, seo.title);
            set(&mut next.social.seo.description, seo.description);
            set(&mut next.social.seo.image, seo.image);
        }
        if let Some(popup) = social.popup {
            set(&mut next.social.popup.enabled, popup.enabled);
            set(&mut next.social.popup.image, popup.image);
            set(&mut next.social.popup.text, popup.text);
        }
    }

    if let Some(visibility) = patch.visibility {
        for (section, visible) in visibility {
            next.visibility.set(section, visible);
        }
    }

    if let Some(aux) = patch.aux {
        set(&mut next.aux.moderation, aux.moderation);
        set(&mut next.aux.verified, aux.verified);
        set(&mut next.aux.paid, aux.paid);
        set(&mut next.aux.trial_extended, aux.trial_extended);
        set(&mut next.aux.device_orders, aux.device_orders);
        set(&mut next.aux.feedback, aux.feedback);
    }

    if let Some(leads) = patch.leads {
        set(&mut next.leads.inquiries, leads.inquiries);
        set(&mut next.leads.appointments, leads.appointments);
    }

    set(&mut next.stats, patch.stats);

    next
}

/// Parse a patch from its JSON form (the shape form fields submit).
///
/// # Errors
///
/// Returns the underlying `serde_json` error if the value does not match
/// the patch shape.
pub fn patch_from_value(value: Value) -> Result<ShopPatch, serde_json::Error> {
    serde_json::from_value(value)
}
