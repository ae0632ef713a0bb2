//! Core type definitions.
//!
//! - [`id`] - Newtype wrappers for tenant keys and record IDs
//! - [`hours`] - Business-hours types (7 fixed day entries)
//! - [`status`] - Status enums shared across the model

pub mod hours;
pub mod id;
pub mod status;

pub use hours::{DayHours, WeekHours};
pub use id::{RecordId, TenantKey};
pub use status::{BannerKind, LeadStatus, ModerationStatus, ParseModerationStatusError};
