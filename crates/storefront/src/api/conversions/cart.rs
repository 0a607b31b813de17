//! Cart conversion functions.

use optica_core::{CartItemId, LensId, Price, ProductId};
use rust_decimal::Decimal;

use crate::api::types::{CartItemWire, CartWire};
use crate::models::{Cart, CartLine, LensSelection};

pub fn convert_cart(wire: CartWire) -> Cart {
    Cart {
        lines: wire.items.into_iter().map(convert_line).collect(),
    }
}

fn convert_line(item: CartItemWire) -> CartLine {
    let lens = item.lens_id.map(|lens_id| LensSelection {
        id: LensId::new(lens_id),
        kind: item.lens_type.unwrap_or_default(),
        price: Price::inr(item.lens_price.unwrap_or(Decimal::ZERO)),
    });

    CartLine {
        id: CartItemId::new(item.id),
        product_id: ProductId::new(item.product_id),
        name: item.name,
        image_url: item.image_url,
        lens,
        quantity: item.quantity.max(1),
        unit_price: Price::inr(item.price),
    }
}
