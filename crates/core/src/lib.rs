//! Optica Core - Shared types library.
//!
//! This crate provides common types used across all Optica components:
//! - `storefront` - The client/session layer (catalog, cart, checkout, tracking)
//! - `cli` - The terminal front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
