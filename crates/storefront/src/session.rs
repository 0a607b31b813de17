//! Storefront session: wires the client components together.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::cart::CartStore;
use crate::catalog::CatalogProvider;
use crate::checkout::Checkout;
use crate::config::StorefrontConfig;
use crate::snapshot::SnapshotStore;
use crate::tracking::OrderTracker;

struct StorefrontInner {
    config: StorefrontConfig,
    catalog: CatalogProvider,
    cart: CartStore,
    checkout: Checkout,
    tracker: OrderTracker,
}

/// A fully wired storefront client session.
///
/// Cheap to clone; all clones share the same components.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

impl Storefront {
    /// Build a session from configuration.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(
            config.api_base_url.as_str(),
            config.user_id,
            config.http_timeout,
        )?;
        let snapshots = SnapshotStore::new(config.snapshot_dir.clone());

        let catalog = CatalogProvider::new(api.clone(), config.catalog_cache_capacity);
        let cart = CartStore::open(api.clone(), snapshots.clone());
        let checkout = Checkout::new(api.clone(), cart.clone(), snapshots.clone(), config.user_id);
        let tracker = OrderTracker::new(api, snapshots);

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                cart,
                checkout,
                tracker,
            }),
        })
    }

    /// The catalog provider.
    #[must_use]
    pub fn catalog(&self) -> &CatalogProvider {
        &self.inner.catalog
    }

    /// The cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// The checkout component.
    #[must_use]
    pub fn checkout(&self) -> &Checkout {
        &self.inner.checkout
    }

    /// The order tracker.
    #[must_use]
    pub fn tracker(&self) -> &OrderTracker {
        &self.inner.tracker
    }

    /// The configuration this session was built from.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }
}
