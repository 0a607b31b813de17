//! Client-side cart store.
//!
//! The server owns the cart; this store keeps a local copy that callers can
//! read synchronously, and funnels every mutation through the API. After a
//! successful mutation the cart is reloaded from the server so the local
//! copy never drifts, then snapshotted to disk for the next session.

use std::sync::{Arc, RwLock};

use optica_core::{CartItemId, Price};
use tracing::{instrument, warn};

use crate::api::{AddItemRequest, ApiClient, ApiError};
use crate::models::{Cart, CartLine, LineRequest};
use crate::snapshot::SnapshotStore;

/// Errors from cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Quantity must be at least 1 when adding.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The server rejected or never received the mutation.
    #[error("{message}")]
    Remote {
        /// Human-readable summary kept for display after the error is consumed.
        message: String,
        /// The underlying API failure.
        #[source]
        source: ApiError,
    },
}

struct CartStoreInner {
    api: ApiClient,
    snapshots: SnapshotStore,
    cart: RwLock<Cart>,
    /// Message from the last failed mutation, cleared on the next success.
    error: RwLock<Option<String>>,
    /// Serializes mutations so concurrent adds cannot interleave their
    /// read-modify-write against the server.
    gate: tokio::sync::Mutex<()>,
}

/// Shared handle to the user's cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

impl CartStore {
    /// Open the cart store, seeding the local copy from the last snapshot.
    ///
    /// The snapshot may be stale; call [`CartStore::refresh`] once the
    /// server is reachable to reconcile.
    #[must_use]
    pub fn open(api: ApiClient, snapshots: SnapshotStore) -> Self {
        let seed = snapshots.load_cart().unwrap_or_default();
        Self {
            inner: Arc::new(CartStoreInner {
                api,
                snapshots,
                cart: RwLock::new(seed),
                error: RwLock::new(None),
                gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current local copy of the cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.inner
            .cart
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Current cart lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.cart().lines
    }

    /// Cart total: sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart().total()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart().count()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart().is_empty()
    }

    /// Message from the last failed mutation, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.inner.error.read().ok().and_then(|e| e.clone())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a product (with an optional lens) to the cart.
    ///
    /// Adding a `(product, lens)` pair already in the cart increments the
    /// existing line's quantity instead of creating a duplicate line.
    #[instrument(skip(self))]
    pub async fn add(&self, request: LineRequest) -> Result<(), CartError> {
        if request.quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let _guard = self.inner.gate.lock().await;

        let existing = self
            .cart()
            .find_line(request.product_id, request.lens_id)
            .map(|line| (line.id, line.quantity));

        let result = match existing {
            Some((line_id, quantity)) => {
                self.inner
                    .api
                    .update_cart_item(line_id, quantity + request.quantity)
                    .await
            }
            None => {
                self.inner
                    .api
                    .add_cart_item(&AddItemRequest {
                        product_id: request.product_id.as_i32(),
                        lens_id: request.lens_id.map(|id| id.as_i32()),
                        quantity: request.quantity,
                    })
                    .await
            }
        };

        self.finish_mutation("add to cart", result).await
    }

    /// Set a line's quantity. A quantity below 1 removes the line.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        line_id: CartItemId,
        quantity: u32,
    ) -> Result<(), CartError> {
        let _guard = self.inner.gate.lock().await;

        let result = if quantity < 1 {
            self.inner.api.remove_cart_item(line_id).await
        } else {
            self.inner.api.update_cart_item(line_id, quantity).await
        };

        self.finish_mutation("update quantity", result).await
    }

    /// Remove a line from the cart.
    #[instrument(skip(self))]
    pub async fn remove(&self, line_id: CartItemId) -> Result<(), CartError> {
        let _guard = self.inner.gate.lock().await;
        let result = self.inner.api.remove_cart_item(line_id).await;
        self.finish_mutation("remove from cart", result).await
    }

    /// Remove every line from the cart.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        let _guard = self.inner.gate.lock().await;
        let result = self.inner.api.clear_cart().await;
        self.finish_mutation("clear cart", result).await
    }

    /// Reload the cart from the server, replacing the local copy.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), CartError> {
        let _guard = self.inner.gate.lock().await;
        self.resync("refresh cart").await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// After a mutation, either resync from the server or record the
    /// failure. On failure the local copy is left untouched.
    async fn finish_mutation(
        &self,
        action: &str,
        result: Result<(), ApiError>,
    ) -> Result<(), CartError> {
        match result {
            Ok(()) => self.resync(action).await,
            Err(source) => Err(self.record_failure(action, source)),
        }
    }

    async fn resync(&self, action: &str) -> Result<(), CartError> {
        match self.inner.api.get_cart().await {
            Ok(cart) => {
                if let Ok(mut local) = self.inner.cart.write() {
                    *local = cart.clone();
                }
                if let Ok(mut error) = self.inner.error.write() {
                    *error = None;
                }
                if let Err(e) = self.inner.snapshots.store_cart(&cart) {
                    warn!(error = %e, "failed to snapshot cart");
                }
                Ok(())
            }
            Err(source) => Err(self.record_failure(action, source)),
        }
    }

    fn record_failure(&self, action: &str, source: ApiError) -> CartError {
        let message = format!("failed to {action}: {source}");
        warn!(error = %source, "{action} failed");
        if let Ok(mut error) = self.inner.error.write() {
            *error = Some(message.clone());
        }
        CartError::Remote { message, source }
    }
}
