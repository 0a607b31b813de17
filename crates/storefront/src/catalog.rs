//! Cached catalog provider.
//!
//! Wraps the API client with an in-memory cache so repeated product and
//! lens lookups do not hit the network. Cached entries live until
//! [`CatalogProvider::refresh`] invalidates them.

use std::sync::{Arc, RwLock};

use moka::future::Cache;
use optica_core::{LensId, ProductId};
use tracing::{instrument, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{FilterOptions, Lens, Product, ProductFilter};

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ============================================================================
// Cache value
// ============================================================================

/// Values stored in the catalog cache, keyed by string.
///
/// Keys: `products`, `product:{id}`, `lenses`, `lens:{id}`.
#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Lens(Box<Lens>),
    Lenses(Vec<Lens>),
}

// ============================================================================
// Provider
// ============================================================================

struct CatalogInner {
    api: ApiClient,
    cache: Cache<String, CacheValue>,
    /// Last fetch failure, surfaced to callers that render a banner.
    error: RwLock<Option<String>>,
}

/// Read-through cached view of the product and lens catalog.
#[derive(Clone)]
pub struct CatalogProvider {
    inner: Arc<CatalogInner>,
}

impl CatalogProvider {
    /// Create a provider over `api` with room for `cache_capacity` entries.
    #[must_use]
    pub fn new(api: ApiClient, cache_capacity: u64) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                api,
                cache: Cache::builder().max_capacity(cache_capacity).build(),
                error: RwLock::new(None),
            }),
        }
    }

    /// Last fetch error, if the most recent catalog call failed.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.inner.error.read().ok().and_then(|e| e.clone())
    }

    fn record_result<T>(&self, result: Result<T, ApiError>) -> Result<T, CatalogError> {
        if let Ok(mut slot) = self.inner.error.write() {
            *slot = result.as_ref().err().map(ToString::to_string);
        }
        result.map_err(CatalogError::from)
    }

    /// All products, from cache when possible.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get("products").await {
            return Ok(products);
        }

        let products = self.record_result(self.inner.api.list_products().await)?;
        self.inner
            .cache
            .insert("products".to_owned(), CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// One product by id, from cache when possible. `None` when unknown.
    ///
    /// Consults the per-id key first, then the cached full list, and only
    /// then the network.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            return Ok(Some(*product));
        }
        if let Some(CacheValue::Products(products)) = self.inner.cache.get("products").await {
            if let Some(product) = products.into_iter().find(|p| p.id == id) {
                self.inner
                    .cache
                    .insert(key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                return Ok(Some(product));
            }
        }

        let product = self.record_result(self.inner.api.get_product(id).await)?;
        if let Some(product) = &product {
            self.inner
                .cache
                .insert(key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }
        Ok(product)
    }

    /// All lens options, from cache when possible.
    #[instrument(skip(self))]
    pub async fn lenses(&self) -> Result<Vec<Lens>, CatalogError> {
        if let Some(CacheValue::Lenses(lenses)) = self.inner.cache.get("lenses").await {
            return Ok(lenses);
        }

        let lenses = self.record_result(self.inner.api.list_lenses().await)?;
        self.inner
            .cache
            .insert("lenses".to_owned(), CacheValue::Lenses(lenses.clone()))
            .await;
        Ok(lenses)
    }

    /// One lens option by id, from cache when possible. `None` when unknown.
    #[instrument(skip(self))]
    pub async fn lens(&self, id: LensId) -> Result<Option<Lens>, CatalogError> {
        let key = format!("lens:{id}");
        if let Some(CacheValue::Lens(lens)) = self.inner.cache.get(&key).await {
            return Ok(Some(*lens));
        }

        let lens = self.record_result(self.inner.api.get_lens(id).await)?;
        if let Some(lens) = &lens {
            self.inner
                .cache
                .insert(key, CacheValue::Lens(Box::new(lens.clone())))
                .await;
        }
        Ok(lens)
    }

    /// Drop every cached entry so the next read refetches.
    pub async fn refresh(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    // ========================================================================
    // Search and filtering
    // ========================================================================

    /// Products whose name or brand contains `query`, case-insensitively.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.trim().to_lowercase();
        let products = self.products().await?;
        if needle.is_empty() {
            return Ok(products);
        }
        Ok(products
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.brand.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Products matching every criterion in `filter`.
    #[instrument(skip(self, filter))]
    pub async fn filter(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        let products = self.products().await?;
        Ok(products.into_iter().filter(|p| filter.matches(p)).collect())
    }

    /// Filter options as reported by the server.
    ///
    /// Each list degrades to empty on failure; a partially reachable
    /// filter API should not take down the whole facet bar.
    #[instrument(skip(self))]
    pub async fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            brands: string_facet(self.inner.api.filter_brands().await, "brands"),
            shapes: string_facet(self.inner.api.filter_shapes().await, "shapes"),
            colors: string_facet(self.inner.api.filter_colors().await, "colors"),
        }
    }

    /// Filter options derived from the product list itself.
    ///
    /// Used when the server's filter endpoints are unavailable; values are
    /// sorted and deduplicated.
    #[instrument(skip(self))]
    pub async fn derived_filter_options(&self) -> Result<FilterOptions, CatalogError> {
        let products = self.products().await?;
        Ok(FilterOptions {
            brands: distinct(products.iter().map(|p| p.brand.clone())),
            shapes: distinct(products.iter().map(|p| p.shape.clone())),
            colors: distinct(products.iter().map(|p| p.color.clone())),
        })
    }
}

fn string_facet(result: Result<Vec<String>, ApiError>, facet: &str) -> Vec<String> {
    match result {
        Ok(values) => values,
        Err(e) => {
            warn!(facet, error = %e, "filter facet unavailable, using empty list");
            Vec::new()
        }
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut values: Vec<String> = values.filter(|v| !v.is_empty()).collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_sorts_and_dedupes() {
        let values = vec![
            "Titan".to_owned(),
            "Lenskart".to_owned(),
            "Titan".to_owned(),
            String::new(),
        ];
        assert_eq!(distinct(values.into_iter()), vec!["Lenskart", "Titan"]);
    }
}
