//! Wire DTOs for the backend REST API.
//!
//! These types are deliberately lenient: `#[serde(default)]` on everything
//! the backend has been observed to omit, and `#[serde(alias)]` for the
//! historical field spellings. Conversion into the canonical domain models
//! happens in [`super::conversions`]; nothing downstream sees these shapes.
//!
//! Order responses are NOT modeled here - their shapes diverge too much for
//! typed DTOs and go through the total mapper in
//! [`super::conversions::orders`] instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog
// =============================================================================

/// A product as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWire {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub shape: String,
    /// Older responses used `frameMaterial`.
    #[serde(default, alias = "frameMaterial")]
    pub material: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, alias = "frameSize")]
    pub size: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Older responses used `image`.
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    /// Historically a boolean, now a unit count.
    #[serde(default)]
    pub in_stock: serde_json::Value,
}

/// A lens as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensWire {
    pub id: i32,
    /// `type` on the wire.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub prescription_range: String,
    #[serde(default)]
    pub coating: Option<String>,
}

// =============================================================================
// Cart
// =============================================================================

/// The remote cart resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartWire {
    #[serde(default)]
    pub items: Vec<CartItemWire>,
}

/// One remote cart line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemWire {
    pub id: i32,
    pub product_id: i32,
    #[serde(default)]
    pub name: String,
    /// The captured unit price snapshot; spelled three ways across backend
    /// versions.
    #[serde(default, alias = "unitPrice", alias = "priceAtAddition")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub lens_id: Option<i32>,
    #[serde(default)]
    pub lens_type: Option<String>,
    #[serde(default)]
    pub lens_price: Option<Decimal>,
}

const fn default_quantity() -> u32 {
    1
}

/// Body of `POST /cart/items`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: i32,
    /// `null` when the frame is ordered without a lens.
    pub lens_id: Option<i32>,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_product_wire_tolerates_aliases_and_omissions() {
        let wire: ProductWire = serde_json::from_value(json!({
            "id": 3,
            "name": "Aviator Classic",
            "brand": "RayBan",
            "price": "2499.00",
            "frameMaterial": "metal",
            "image": "assets/aviator.jpg",
            "inStock": 12
        }))
        .expect("lenient deserialize");

        assert_eq!(wire.id, 3);
        assert_eq!(wire.material, "metal");
        assert_eq!(wire.image_url.as_deref(), Some("assets/aviator.jpg"));
        assert_eq!(wire.price, dec!(2499));
        // Fields the backend omitted default
        assert!(wire.shape.is_empty());
        assert!(wire.size.is_none());
    }

    #[test]
    fn test_cart_item_wire_accepts_all_price_spellings() {
        for key in ["price", "unitPrice", "priceAtAddition"] {
            let wire: CartItemWire = serde_json::from_value(json!({
                "id": 1,
                "productId": 2,
                key: 100
            }))
            .expect("deserialize");
            assert_eq!(wire.price, dec!(100), "field {key}");
            assert_eq!(wire.quantity, 1, "quantity defaults to 1");
        }
    }

    #[test]
    fn test_add_item_request_serializes_null_lens() {
        let body = AddItemRequest {
            product_id: 1,
            lens_id: None,
            quantity: 2,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value, json!({"productId": 1, "lensId": null, "quantity": 2}));
    }
}
