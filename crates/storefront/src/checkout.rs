//! Order placement.
//!
//! Turns the current cart into an order request, quotes the charges, and
//! posts the order. On success the cart is cleared and the order is
//! snapshotted so tracking can fall back to it offline.

use optica_core::{PaymentMethod, PaymentStatus, Price, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::api::{ApiClient, ApiError};
use crate::cart::CartStore;
use crate::models::{Address, CartLine, Order};
use crate::snapshot::SnapshotStore;

/// Errors from order placement.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Orders cannot be placed from an empty cart.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// The order request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ============================================================================
// Quote
// ============================================================================

/// Flat shipping fee charged per order, in rupees.
const SHIPPING_FEE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// GST rate applied to the item subtotal (5%).
const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Charges for an order before it is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderQuote {
    /// Sum of line subtotals.
    pub subtotal: Price,
    /// Flat shipping fee.
    pub shipping_fee: Price,
    /// Tax on the subtotal.
    pub tax: Price,
    /// Subtotal plus shipping plus tax.
    pub total: Price,
}

impl OrderQuote {
    /// Quote the given cart lines.
    #[must_use]
    pub fn for_lines(lines: &[CartLine]) -> Self {
        let subtotal: Decimal = lines.iter().map(|line| line.subtotal().amount).sum();
        let shipping_fee = if lines.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_FEE
        };
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal: Price::inr(subtotal),
            shipping_fee: Price::inr(shipping_fee),
            tax: Price::inr(tax),
            total: Price::inr(subtotal + shipping_fee + tax),
        }
    }
}

// ============================================================================
// Wire request
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderRequest {
    user_id: i32,
    items: Vec<OrderItemRequest>,
    shipping_address: Address,
    payment: PaymentRequest,
    subtotal: Decimal,
    shipping_fee: Decimal,
    tax: Decimal,
    total_amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderItemRequest {
    product_id: i32,
    name: String,
    quantity: u32,
    unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    lens_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lens_type: Option<String>,
    lens_price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequest {
    method: PaymentMethod,
    status: PaymentStatus,
    amount: Decimal,
}

fn item_request(line: &CartLine) -> OrderItemRequest {
    OrderItemRequest {
        product_id: line.product_id.as_i32(),
        name: line.name.clone(),
        quantity: line.quantity,
        unit_price: line.unit_price.amount,
        lens_id: line.lens.as_ref().map(|lens| lens.id.as_i32()),
        lens_type: line.lens.as_ref().map(|lens| lens.kind.clone()),
        lens_price: line.lens_price(),
    }
}

// ============================================================================
// Checkout
// ============================================================================

/// Places orders from the current cart.
#[derive(Clone)]
pub struct Checkout {
    api: ApiClient,
    cart: CartStore,
    snapshots: SnapshotStore,
    user_id: UserId,
}

impl Checkout {
    /// Create a checkout over the given cart.
    #[must_use]
    pub fn new(api: ApiClient, cart: CartStore, snapshots: SnapshotStore, user_id: UserId) -> Self {
        Self {
            api,
            cart,
            snapshots,
            user_id,
        }
    }

    /// Quote the charges for the current cart.
    #[must_use]
    pub fn quote(&self) -> OrderQuote {
        OrderQuote::for_lines(&self.cart.lines())
    }

    /// Place an order for the current cart contents.
    ///
    /// Fails with [`CheckoutError::EmptyCart`] before any request is sent
    /// when the cart has no lines. On success the cart is cleared and the
    /// order is snapshotted; failures of those follow-ups are logged but do
    /// not fail the placement.
    #[instrument(skip(self, address))]
    pub async fn place_order(
        &self,
        address: Address,
        method: PaymentMethod,
    ) -> Result<Order, CheckoutError> {
        let lines = self.cart.lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let quote = OrderQuote::for_lines(&lines);
        // Cash on delivery is collected later; anything else is captured now.
        let payment_status = if method == PaymentMethod::Cod {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Completed
        };

        let request = OrderRequest {
            user_id: self.user_id.as_i32(),
            items: lines.iter().map(item_request).collect(),
            shipping_address: address,
            payment: PaymentRequest {
                method,
                status: payment_status,
                amount: quote.total.amount,
            },
            subtotal: quote.subtotal.amount,
            shipping_fee: quote.shipping_fee.amount,
            tax: quote.tax.amount,
            total_amount: quote.total.amount,
        };

        let order = self.api.place_order(&request).await?;

        if let Err(e) = self.cart.clear().await {
            warn!(error = %e, "failed to clear cart after order placement");
        }
        if let Err(e) = self.snapshots.store_last_order(&order) {
            warn!(error = %e, "failed to snapshot placed order");
        }

        Ok(order)
    }
}
