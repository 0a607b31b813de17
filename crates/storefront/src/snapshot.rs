//! Local fallback snapshots for the cart and the last-known order.
//!
//! Two JSON slots under a configured directory: `cart.json` and
//! `last_order.json`. Snapshots are caches, never sources of truth while the
//! network is reachable. A missing or unreadable file loads as `None` with a
//! warning; corrupt snapshots are discarded, never fatal.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::models::{Cart, Order};

const CART_SLOT: &str = "cart.json";
const LAST_ORDER_SLOT: &str = "last_order.json";

/// Errors that can occur when persisting snapshots.
///
/// Loads never error; only writes do.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The durable client-side key-value slots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: Arc<SnapshotStoreInner>,
}

#[derive(Debug)]
struct SnapshotStoreInner {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(SnapshotStoreInner { dir: dir.into() }),
        }
    }

    /// Load the last-persisted cart, if any.
    #[must_use]
    pub fn load_cart(&self) -> Option<Cart> {
        self.read_slot(CART_SLOT)
    }

    /// Persist the cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn store_cart(&self, cart: &Cart) -> Result<(), SnapshotError> {
        self.write_slot(CART_SLOT, cart)
    }

    /// Remove the cart snapshot, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn clear_cart(&self) -> Result<(), SnapshotError> {
        let path = self.slot_path(CART_SLOT);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Load the last-known order, if any.
    #[must_use]
    pub fn load_last_order(&self) -> Option<Order> {
        self.read_slot(LAST_ORDER_SLOT)
    }

    /// Persist the last-known order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn store_last_order(&self, order: &Order) -> Result<(), SnapshotError> {
        self.write_slot(LAST_ORDER_SLOT, order)
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.inner.dir.join(slot)
    }

    fn read_slot<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read snapshot");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding corrupt snapshot");
                None
            }
        }
    }

    fn write_slot<T: Serialize>(&self, slot: &str, value: &T) -> Result<(), SnapshotError> {
        std::fs::create_dir_all(&self.inner.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.slot_path(slot), json)?;
        Ok(())
    }

    #[cfg(test)]
    fn dir(&self) -> &std::path::Path {
        &self.inner.dir
    }
}
