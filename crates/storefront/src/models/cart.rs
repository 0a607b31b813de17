//! Cart domain types and total computation.
//!
//! The cart is owned exclusively by [`crate::cart::CartStore`]; these types
//! are the value shapes it manages and persists to the snapshot store.

use optica_core::{CartItemId, CurrencyCode, LensId, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The lens attached to a cart line, with its own captured price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensSelection {
    pub id: LensId,
    pub kind: String,
    pub price: Price,
}

/// One product(+lens) selection with a quantity.
///
/// `unit_price` is the price captured at the time of addition - it is NOT
/// re-derived from the current catalog price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Server-issued line id, used for update/delete calls.
    pub id: CartItemId,
    pub product_id: ProductId,
    /// Product name captured at addition.
    pub name: String,
    pub image_url: Option<String>,
    pub lens: Option<LensSelection>,
    /// Always >= 1; a quantity that would drop below one is a deletion.
    pub quantity: u32,
    pub unit_price: Price,
}

impl CartLine {
    /// Captured lens price, zero when the line has no lens.
    #[must_use]
    pub fn lens_price(&self) -> Decimal {
        self.lens.as_ref().map_or(Decimal::ZERO, |l| l.price.amount)
    }

    /// `(unit_price + lens_price) * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let amount =
            (self.unit_price.amount + self.lens_price()) * Decimal::from(self.quantity);
        Price::new(amount, self.unit_price.currency_code)
    }

    /// Line identity: the `(product_id, lens_id)` pair. A line with no lens
    /// is distinct from the same frame with any lens.
    #[must_use]
    pub fn identity(&self) -> (ProductId, Option<LensId>) {
        (self.product_id, self.lens.as_ref().map(|l| l.id))
    }
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Recomputed on every call: `sum of (unit_price + lens_price) * quantity`
    /// over all lines. Never cached.
    #[must_use]
    pub fn total(&self) -> Price {
        let amount = self.lines.iter().map(|l| l.subtotal().amount).sum();
        let currency_code = self
            .lines
            .first()
            .map_or(CurrencyCode::INR, |l| l.unit_price.currency_code);
        Price::new(amount, currency_code)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line matching a `(product_id, lens_id)` identity.
    #[must_use]
    pub fn find_line(
        &self,
        product_id: ProductId,
        lens_id: Option<LensId>,
    ) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|l| l.identity() == (product_id, lens_id))
    }
}

/// What a caller asks the cart store to add.
#[derive(Debug, Clone, Copy)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub lens_id: Option<LensId>,
    pub quantity: u32,
}
