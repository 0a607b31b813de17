//! Order tracking reader.
//!
//! Looks orders up by order number, falling back to the snapshot of the
//! last placed order when the server is unreachable. A definitive 404 never
//! falls back: "the order does not exist" and "we cannot reach the server"
//! must stay distinguishable.

use optica_core::{OrderStatus, UserId};
use tracing::{instrument, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::Order;
use crate::snapshot::SnapshotStore;

/// Errors from order tracking.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    /// No order exists with the given order number.
    #[error("no order found with number {0}")]
    OrderNotFound(String),

    /// The tracking service could not be reached.
    #[error("unable to reach the order service")]
    Api(#[source] ApiError),
}

/// Reads order state for tracking displays.
#[derive(Clone)]
pub struct OrderTracker {
    api: ApiClient,
    snapshots: SnapshotStore,
}

impl OrderTracker {
    /// Create a tracker over `api` with `snapshots` as the offline fallback.
    #[must_use]
    pub fn new(api: ApiClient, snapshots: SnapshotStore) -> Self {
        Self { api, snapshots }
    }

    /// Look up an order by order number.
    ///
    /// The number is trimmed and uppercased before the lookup. When the
    /// server cannot be reached and the snapshotted last order matches the
    /// requested number, that (possibly stale) order is returned instead.
    #[instrument(skip(self))]
    pub async fn find_order(&self, order_number: &str) -> Result<Order, TrackingError> {
        let order_number = order_number.trim().to_uppercase();

        match self.api.get_order(&order_number).await {
            Ok(order) => {
                if let Err(e) = self.snapshots.store_last_order(&order) {
                    warn!(error = %e, "failed to snapshot tracked order");
                }
                Ok(order)
            }
            Err(ApiError::NotFound(_)) => Err(TrackingError::OrderNotFound(order_number)),
            Err(source) => self
                .snapshot_fallback(&order_number)
                .ok_or(TrackingError::Api(source)),
        }
    }

    /// All orders for `user_id`, newest first by order date.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, TrackingError> {
        let mut orders = self
            .api
            .orders_for_user(user_id)
            .await
            .map_err(TrackingError::Api)?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    /// Update an order's status and return the refreshed order.
    ///
    /// When the updated order is the snapshotted last order, the snapshot
    /// is refreshed too.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_number: &str,
        status: OrderStatus,
    ) -> Result<Order, TrackingError> {
        let order_number = order_number.trim().to_uppercase();

        let order = match self.api.update_order_status(&order_number, status).await {
            Ok(order) => order,
            Err(ApiError::NotFound(_)) => {
                return Err(TrackingError::OrderNotFound(order_number));
            }
            Err(source) => return Err(TrackingError::Api(source)),
        };

        let matches_snapshot = self
            .snapshots
            .load_last_order()
            .is_some_and(|last| last.order_number.eq_ignore_ascii_case(&order_number));
        if matches_snapshot {
            if let Err(e) = self.snapshots.store_last_order(&order) {
                warn!(error = %e, "failed to refresh order snapshot");
            }
        }

        Ok(order)
    }

    /// The snapshotted last order, if it matches the requested number.
    fn snapshot_fallback(&self, order_number: &str) -> Option<Order> {
        let last = self.snapshots.load_last_order()?;
        if last.order_number.eq_ignore_ascii_case(order_number) {
            warn!(
                order_number,
                "order service unreachable, serving possibly stale snapshot"
            );
            Some(last)
        } else {
            None
        }
    }
}
