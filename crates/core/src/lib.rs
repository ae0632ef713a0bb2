//! Vitrine Core - Shared types library.
//!
//! This crate provides the canonical shop configuration model used across
//! all Vitrine components:
//! - `store` - Persistence and reconciliation layer
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, status enums, business-hours types
//! - [`model`] - The canonical `ShopConfig` and its `defaults()` factory
//! - [`derived`] - Pure computations over the model (open/closed status,
//!   billing state, click-through rate)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod derived;
pub mod model;
pub mod types;

pub use model::*;
pub use types::*;
