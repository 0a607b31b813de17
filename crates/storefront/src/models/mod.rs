//! Domain models for the storefront session layer.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! shapes in [`crate::api::types`]. Everything here is canonical: heterogeneous
//! backend responses are normalized into these shapes at the API boundary and
//! never leak further.

pub mod cart;
pub mod catalog;
pub mod order;

pub use cart::{Cart, CartLine, LensSelection, LineRequest};
pub use catalog::{FilterOptions, Lens, Product, ProductFilter};
pub use order::{Address, Order, OrderItem, PaymentDetails, ShippingMethod, StatusEntry};
