//! Order conversion from loosely-typed API payloads.
//!
//! Order responses vary across API versions: prices arrive as numbers or
//! strings, payment is a bare method string or a nested object, and the
//! shipping address may be an object, a JSON-encoded string, or a plain
//! comma-separated string. This mapper accepts all of them and never fails;
//! unrecognized or missing fields fall back to defaults.

use chrono::{DateTime, Utc};
use optica_core::{OrderId, OrderStatus, PaymentStatus, Price};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::{Address, Order, OrderItem, PaymentDetails, ShippingMethod, StatusEntry};

// ============================================================================
// Entry point
// ============================================================================

/// Build an [`Order`] from a raw JSON payload.
///
/// Total over all inputs: every field has a defined default, so any JSON
/// value (including non-objects) maps to some order.
#[must_use]
pub fn order_from_value(value: &Value) -> Order {
    let id = OrderId::new(int_field(value, &["id"]).unwrap_or(0));

    let order_number = str_field(value, &["orderNumber", "order_number"])
        .or_else(|| match value.get("orderId") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default();

    let status = str_field(value, &["status"])
        .and_then(|s| s.parse::<OrderStatus>().ok())
        .unwrap_or_default();

    let total = price_field(value, &["total", "totalAmount", "totalPrice"]);

    Order {
        id,
        order_number,
        customer_name: str_field(value, &["customerName", "customer_name"]).unwrap_or_default(),
        order_date: datetime_field(value, &["orderDate", "order_date", "createdAt"]),
        estimated_delivery: ["estimatedDelivery", "estimated_delivery", "deliveryDate"]
            .iter()
            .filter_map(|key| value.get(key))
            .find_map(datetime_value),
        status,
        payment: convert_payment(value, total),
        items: convert_items(value.get("items")),
        status_history: convert_status_history(
            value
                .get("statusHistory")
                .or_else(|| value.get("status_history")),
        ),
        shipping_address: convert_address(
            value
                .get("shippingAddress")
                .or_else(|| value.get("shipping_address"))
                .or_else(|| value.get("address")),
        ),
        shipping_method: convert_shipping_method(
            value
                .get("shippingMethod")
                .or_else(|| value.get("shipping_method")),
        ),
        discount: price_field(value, &["discount"]),
        subtotal: price_field(value, &["subtotal", "subTotal"]),
        shipping_fee: price_field(value, &["shippingFee", "shipping_fee", "shippingCost"]),
        tax: price_field(value, &["tax"]),
        total,
    }
}

// ============================================================================
// Field extraction helpers
// ============================================================================

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(|v| v.as_str())
        .map(ToOwned::to_owned)
}

fn int_field(value: &Value, keys: &[&str]) -> Option<i32> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(|v| v.as_i64())
        .and_then(|n| i32::try_from(n).ok())
}

/// Parse a decimal amount from a JSON number or numeric string.
fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn price_field(value: &Value, keys: &[&str]) -> Price {
    let amount = keys
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(decimal_from_value)
        .unwrap_or(Decimal::ZERO);
    Price::inr(amount)
}

/// Parse a timestamp from an RFC 3339 string or epoch milliseconds.
///
/// Missing or unparseable values map to the Unix epoch rather than "now",
/// keeping the mapper deterministic.
fn datetime_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn datetime_field(value: &Value, keys: &[&str]) -> DateTime<Utc> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(datetime_value)
        .unwrap_or(DateTime::UNIX_EPOCH)
}

// ============================================================================
// Payment
// ============================================================================

fn convert_payment(value: &Value, order_total: Price) -> PaymentDetails {
    match value.get("payment") {
        // Legacy payloads carry only a bare method string.
        Some(Value::String(method)) => PaymentDetails {
            method: method.parse().unwrap_or_default(),
            status: PaymentStatus::Pending,
            amount: order_total,
            transaction_id: None,
        },
        Some(payment @ Value::Object(_)) => PaymentDetails {
            method: str_field(payment, &["method", "paymentMethod"])
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            status: str_field(payment, &["status", "paymentStatus"])
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            amount: price_field(payment, &["amount", "totalAmount"]),
            transaction_id: str_field(payment, &["transactionId", "transaction_id"]),
        },
        // No payment block at all: fall back to the flat top-level fields.
        _ => PaymentDetails {
            method: str_field(value, &["paymentMethod", "payment_method"])
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            status: str_field(value, &["paymentStatus", "payment_status"])
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            amount: order_total,
            transaction_id: str_field(value, &["transactionId", "transaction_id"]),
        },
    }
}

// ============================================================================
// Items
// ============================================================================

fn convert_items(items: Option<&Value>) -> Vec<OrderItem> {
    let Some(Value::Array(entries)) = items else {
        return Vec::new();
    };
    entries.iter().map(convert_item).collect()
}

fn convert_item(value: &Value) -> OrderItem {
    let unit_price = price_field(value, &["unitPrice", "unit_price", "price", "priceAtAddition"]);
    let lens_price = price_field(value, &["lensPrice", "lens_price"]);
    let quantity = int_field(value, &["quantity"])
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&q| q > 0)
        .unwrap_or(1);

    // Prefer the subtotal the API computed; derive it only when absent.
    let subtotal = value
        .get("subtotal")
        .and_then(decimal_from_value)
        .map_or_else(
            || {
                Price::inr(
                    (unit_price.amount + lens_price.amount) * Decimal::from(quantity),
                )
            },
            Price::inr,
        );

    OrderItem {
        name: str_field(value, &["name", "productName", "product_name"]).unwrap_or_default(),
        quantity,
        unit_price,
        lens_price,
        subtotal,
        image_url: str_field(value, &["imageUrl", "image_url", "image"]),
    }
}

// ============================================================================
// Status history
// ============================================================================

fn convert_status_history(history: Option<&Value>) -> Vec<StatusEntry> {
    let Some(Value::Array(entries)) = history else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| StatusEntry {
            status: str_field(entry, &["status"])
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            timestamp: datetime_field(entry, &["date", "timestamp"]),
            location: str_field(entry, &["location"]),
            description: str_field(entry, &["description", "note"]),
        })
        .collect()
}

// ============================================================================
// Shipping
// ============================================================================

fn convert_address(address: Option<&Value>) -> Address {
    match address {
        Some(Value::Object(_)) => address.map(address_from_object).unwrap_or_default(),
        Some(Value::String(raw)) => address_from_string(raw),
        _ => Address::default(),
    }
}

fn address_from_object(value: &Value) -> Address {
    Address {
        name: str_field(value, &["name", "fullName", "full_name"]).unwrap_or_default(),
        street: str_field(value, &["street", "addressLine1", "line1"]).unwrap_or_default(),
        city: str_field(value, &["city"]).unwrap_or_default(),
        state: str_field(value, &["state"]).unwrap_or_default(),
        pincode: str_field(value, &["pincode", "zipCode", "zip"]).unwrap_or_default(),
        phone: str_field(value, &["phone", "phoneNumber"]).unwrap_or_default(),
    }
}

/// Decode a string-typed address: first as embedded JSON, then as a
/// comma-separated `name, street, city, state, pincode, phone` list.
fn address_from_string(raw: &str) -> Address {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if value.is_object() {
            return address_from_object(&value);
        }
    }

    let mut parts = raw.split(',').map(str::trim);
    let mut next = || parts.next().unwrap_or_default().to_owned();
    Address {
        name: next(),
        street: next(),
        city: next(),
        state: next(),
        pincode: next(),
        phone: next(),
    }
}

fn convert_shipping_method(value: Option<&Value>) -> Option<ShippingMethod> {
    let value = value?;
    if !value.is_object() {
        return None;
    }
    Some(ShippingMethod {
        name: str_field(value, &["name"]).unwrap_or_default(),
        price: price_field(value, &["price", "cost"]),
        estimated_days: int_field(value, &["estimatedDays", "estimated_days"])
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
    })
}
