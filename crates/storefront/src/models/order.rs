//! Order domain types and status-history derivations.
//!
//! An [`Order`] is created once at checkout and treated as read-only truth
//! afterwards; the backend only appends status-history entries. The
//! derivation methods here interpret that history for progress rendering.

use chrono::{DateTime, Utc};
use optica_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price};
use serde::{Deserialize, Serialize};

/// A shipping address in canonical form.
///
/// The backend may deliver this as an object, a JSON-encoded string, or a
/// bare comma-separated string; the order mapper normalizes all three into
/// this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

/// One point-in-time record of a status transition.
///
/// History order is NOT guaranteed to follow timestamps; always sort before
/// interpreting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Payment details attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: Price,
    pub transaction_id: Option<String>,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            method: PaymentMethod::default(),
            status: PaymentStatus::default(),
            amount: Price::zero(),
            transaction_id: None,
        }
    }
}

/// An ordered line item, capturing prices at order time.
///
/// Independent of any later catalog price change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub lens_price: Price,
    /// Provided by the backend when present, otherwise
    /// `(unit_price + lens_price) * quantity`.
    pub subtotal: Price,
    pub image_url: Option<String>,
}

/// The shipping option chosen for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub name: String,
    pub price: Price,
    pub estimated_days: u32,
}

/// A placed order, normalized from whatever shape the backend returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Internal numeric id; 0 when the backend omits it.
    pub id: OrderId,
    /// Human-facing order number (e.g., `ORD-7F3KQ2`). Tracking lookups key
    /// on this, not on `id`.
    pub order_number: String,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    /// The order's own status field; [`Order::current_status`] prefers the
    /// latest history entry over this.
    pub status: OrderStatus,
    pub payment: PaymentDetails,
    pub items: Vec<OrderItem>,
    pub status_history: Vec<StatusEntry>,
    pub shipping_address: Address,
    pub shipping_method: Option<ShippingMethod>,
    pub discount: Price,
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub tax: Price,
    pub total: Price,
}

impl Order {
    /// The history entry with the maximum timestamp.
    ///
    /// This is an explicit comparison, NOT the last array element - the
    /// history is not guaranteed insertion-ordered. On equal timestamps the
    /// earliest-listed entry wins.
    #[must_use]
    pub fn latest_status(&self) -> Option<&StatusEntry> {
        self.status_history
            .iter()
            .fold(None, |best: Option<&StatusEntry>, entry| match best {
                Some(b) if entry.timestamp <= b.timestamp => Some(b),
                _ => Some(entry),
            })
    }

    /// The latest history entry's status, falling back to the order's own
    /// status field when the history is empty.
    #[must_use]
    pub fn current_status(&self) -> OrderStatus {
        self.latest_status().map_or(self.status, |e| e.status)
    }

    /// Whether the order has reached a named status.
    ///
    /// `cancelled`/`returned` sit outside the linear progression: they are
    /// reached only when they ARE the current status, never by forward
    /// comparison.
    #[must_use]
    pub fn is_status_reached(&self, status: OrderStatus) -> bool {
        let current = self.current_status();
        if status == current {
            return true;
        }
        match (status.progress_index(), current.progress_index()) {
            (Some(target), Some(reached)) => reached >= target,
            _ => false,
        }
    }

    /// Whether the order has moved strictly beyond a named status.
    ///
    /// Nothing is ever past `cancelled` or `returned`.
    #[must_use]
    pub fn is_status_past(&self, status: OrderStatus) -> bool {
        match (
            status.progress_index(),
            self.current_status().progress_index(),
        ) {
            (Some(target), Some(reached)) => reached > target,
            _ => false,
        }
    }
}
