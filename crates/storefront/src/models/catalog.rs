//! Catalog domain types: products, lenses, and filter values.

use optica_core::{LensId, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An eyewear frame.
///
/// Immutable once fetched; the whole catalog is replaced on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    /// Current catalog price. Cart lines capture their own price snapshot
    /// at the time of addition and never re-derive from this.
    pub price: Price,
    /// Frame shape (e.g., round, aviator, wayfarer).
    pub shape: String,
    /// Frame material (e.g., acetate, titanium).
    pub material: String,
    pub color: String,
    /// Frame size descriptor (e.g., "Medium", "52-18-140").
    pub size: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Units in stock; 0 when the backend omits it.
    pub in_stock: u32,
}

/// A lens option applied to a frame.
///
/// Fetched independently of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    pub id: LensId,
    /// Lens kind (wire field `type`): single-vision, bifocal, progressive,
    /// zero-power.
    pub kind: String,
    pub material: String,
    pub price: Price,
    /// Supported prescription range descriptor (e.g., "-6.00 to +4.00").
    pub prescription_range: String,
    pub coating: Option<String>,
}

/// Distinct filter values for the product listing UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub shapes: Vec<String>,
    pub colors: Vec<String>,
}

impl FilterOptions {
    /// Whether no dimension has any values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.shapes.is_empty() && self.colors.is_empty()
    }
}

/// Criteria for narrowing the product list.
///
/// All fields are optional; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub brand: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Whether a product satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.brand.as_ref().is_some_and(|b| *b != product.brand) {
            return false;
        }
        if self.shape.as_ref().is_some_and(|s| *s != product.shape) {
            return false;
        }
        if self.color.as_ref().is_some_and(|c| *c != product.color) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price.amount < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price.amount > max) {
            return false;
        }
        true
    }
}
