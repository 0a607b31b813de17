//! Product and lens conversion functions.

use optica_core::{LensId, Price, ProductId};

use crate::api::types::{LensWire, ProductWire};
use crate::models::{Lens, Product};

pub fn convert_product(wire: ProductWire) -> Product {
    Product {
        id: ProductId::new(wire.id),
        name: wire.name,
        brand: wire.brand,
        price: Price::inr(wire.price),
        shape: wire.shape,
        material: wire.material,
        color: wire.color,
        size: wire.size,
        description: wire.description,
        image_url: wire.image_url,
        in_stock: convert_stock(&wire.in_stock),
    }
}

pub fn convert_lens(wire: LensWire) -> Lens {
    Lens {
        id: LensId::new(wire.id),
        kind: wire.kind,
        material: wire.material,
        price: Price::inr(wire.price),
        prescription_range: wire.prescription_range,
        coating: wire.coating,
    }
}

/// The stock field was a boolean before it became a unit count; accept both.
fn convert_stock(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::Number(n) => {
            n.as_u64().map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
        }
        serde_json::Value::Bool(true) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_stock_number_bool_and_junk() {
        assert_eq!(convert_stock(&json!(12)), 12);
        assert_eq!(convert_stock(&json!(true)), 1);
        assert_eq!(convert_stock(&json!(false)), 0);
        assert_eq!(convert_stock(&json!(null)), 0);
        assert_eq!(convert_stock(&json!("plenty")), 0);
        assert_eq!(convert_stock(&json!(-3)), 0);
    }

    #[test]
    fn test_convert_lens_maps_wire_type_to_kind() {
        let wire: LensWire = serde_json::from_value(json!({
            "id": 2,
            "type": "single-vision",
            "material": "polycarbonate",
            "price": 999,
            "prescriptionRange": "-6.00 to +4.00"
        }))
        .expect("deserialize");

        let lens = convert_lens(wire);
        assert_eq!(lens.id, LensId::new(2));
        assert_eq!(lens.kind, "single-vision");
        assert_eq!(lens.price.amount, rust_decimal::Decimal::from(999));
        assert!(lens.coating.is_none());
    }
}
