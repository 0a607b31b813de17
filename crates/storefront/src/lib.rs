//! Optica storefront session library.
//!
//! The client-side layer of an eyewear storefront: a typed REST client,
//! a cached catalog provider, a server-synchronized cart store, order
//! placement with a shape-tolerant response mapper, and an order tracking
//! reader. Presentation layers (the `optica` CLI, a future UI) drive this
//! crate through one [`session::Storefront`] object per application session.
//!
//! # Architecture
//!
//! - [`api`] - the single HTTP seam; wire DTOs and wire-to-domain conversions
//! - [`catalog`] - cached product/lens reads and filter derivation
//! - [`cart`] - the live cart, synchronized with the remote cart resource
//! - [`checkout`] - order placement and the client-side quote
//! - [`tracking`] - order lookup and status-history interpretation
//! - [`snapshot`] - the local JSON fallback cache for cart and last order
//!
//! The backend is the source of truth while reachable; snapshots are stale
//! fallbacks only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod models;
pub mod session;
pub mod snapshot;
pub mod tracking;
