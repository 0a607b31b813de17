//! Wire-to-domain conversion functions.
//!
//! Everything heterogeneous about the backend is absorbed here; business
//! logic only ever sees the canonical shapes in [`crate::models`].

mod cart;
pub mod orders;
mod products;

pub use cart::convert_cart;
pub use orders::order_from_value;
pub use products::{convert_lens, convert_product};
