//! HTTP client for the eyewear storefront REST API.
//!
//! Thin wrapper around [`reqwest`] that owns the base URL and the acting
//! user, attaches the `X-User-Id` header to every request, and converts
//! wire payloads into domain models.

use std::sync::Arc;
use std::time::Duration;

use optica_core::{CartItemId, LensId, OrderStatus, ProductId, UserId};
use serde_json::Value;
use tracing::{error, instrument};

use crate::models::{Cart, Lens, Order, Product};

pub mod conversions;
pub mod types;

use conversions::{convert_cart, convert_lens, convert_product, order_from_value};
use types::{CartWire, LensWire, ProductWire};

pub use types::AddItemRequest;

// ============================================================================
// Errors
// ============================================================================

/// Errors from the storefront API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The server answered 404 for the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("API returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },
}

// ============================================================================
// Client
// ============================================================================

struct ApiClientInner {
    client: reqwest::Client,
    /// Base URL with no trailing slash.
    base: String,
    user_id: UserId,
}

/// Client for the storefront REST API.
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Create a client for the API at `base_url`, acting as `user_id`.
    pub fn new(base_url: &str, user_id: UserId, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base: base_url.trim_end_matches('/').to_owned(),
                user_id,
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, self.url(path))
            .header("X-User-Id", self.inner.user_id.as_i32())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send a request, mapping 404 to [`ApiError::NotFound`] and other
    /// failures to [`ApiError::Status`].
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(resource.to_owned()));
        }
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect();
            error!(status = status.as_u16(), body = %body, "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Send a request and parse the JSON body.
    async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<Value, ApiError> {
        let response = self.send(request, resource).await?;
        Ok(response.json().await?)
    }

    /// Send a mutation whose response body carries nothing we need.
    ///
    /// Some backend versions answer cart mutations with the updated cart,
    /// others with an empty body; the follow-up cart reload is the source
    /// of truth either way, so the body is discarded unparsed.
    async fn send_unit(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<(), ApiError> {
        self.send(request, resource).await?;
        Ok(())
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Fetch all products.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let value = self
            .send_json(self.request(reqwest::Method::GET, "/products"), "products")
            .await?;
        let wires: Vec<ProductWire> = serde_json::from_value(value)?;
        Ok(wires.into_iter().map(convert_product).collect())
    }

    /// Fetch one product. Returns `None` when the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        let path = format!("/products/{id}");
        match self
            .send_json(self.request(reqwest::Method::GET, &path), "product")
            .await
        {
            Ok(value) => {
                let wire: ProductWire = serde_json::from_value(value)?;
                Ok(Some(convert_product(wire)))
            }
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch all lens options.
    #[instrument(skip(self))]
    pub async fn list_lenses(&self) -> Result<Vec<Lens>, ApiError> {
        let value = self
            .send_json(self.request(reqwest::Method::GET, "/lenses"), "lenses")
            .await?;
        let wires: Vec<LensWire> = serde_json::from_value(value)?;
        Ok(wires.into_iter().map(convert_lens).collect())
    }

    /// Fetch one lens option. Returns `None` when it does not exist.
    #[instrument(skip(self))]
    pub async fn get_lens(&self, id: LensId) -> Result<Option<Lens>, ApiError> {
        let path = format!("/lenses/{id}");
        match self
            .send_json(self.request(reqwest::Method::GET, &path), "lens")
            .await
        {
            Ok(value) => {
                let wire: LensWire = serde_json::from_value(value)?;
                Ok(Some(convert_lens(wire)))
            }
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch the distinct brand names the catalog can filter on.
    #[instrument(skip(self))]
    pub async fn filter_brands(&self) -> Result<Vec<String>, ApiError> {
        self.string_list("/products/filters/brands", "brands").await
    }

    /// Fetch the distinct frame shapes the catalog can filter on.
    #[instrument(skip(self))]
    pub async fn filter_shapes(&self) -> Result<Vec<String>, ApiError> {
        self.string_list("/products/filters/shapes", "shapes").await
    }

    /// Fetch the distinct colors the catalog can filter on.
    #[instrument(skip(self))]
    pub async fn filter_colors(&self) -> Result<Vec<String>, ApiError> {
        self.string_list("/products/filters/colors", "colors").await
    }

    async fn string_list(&self, path: &str, resource: &str) -> Result<Vec<String>, ApiError> {
        let value = self
            .send_json(self.request(reqwest::Method::GET, path), resource)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Fetch the acting user's cart.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Cart, ApiError> {
        let value = self
            .send_json(self.request(reqwest::Method::GET, "/cart"), "cart")
            .await?;
        let wire: CartWire = serde_json::from_value(value)?;
        Ok(convert_cart(wire))
    }

    /// Add an item to the cart.
    #[instrument(skip(self, request))]
    pub async fn add_cart_item(&self, request: &AddItemRequest) -> Result<(), ApiError> {
        self.send_unit(
            self.request(reqwest::Method::POST, "/cart/items")
                .json(request),
            "cart",
        )
        .await
    }

    /// Set the exact quantity of a cart line.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        line_id: CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let path = format!("/cart/items/{line_id}?quantity={quantity}");
        self.send_unit(self.request(reqwest::Method::PUT, &path), "cart item")
            .await
    }

    /// Remove a cart line.
    #[instrument(skip(self))]
    pub async fn remove_cart_item(&self, line_id: CartItemId) -> Result<(), ApiError> {
        let path = format!("/cart/items/{line_id}");
        self.send_unit(self.request(reqwest::Method::DELETE, &path), "cart item")
            .await
    }

    /// Remove every line from the cart.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.send_unit(self.request(reqwest::Method::DELETE, "/cart"), "cart")
            .await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Place an order and return the server's view of it.
    pub async fn place_order<T: serde::Serialize + Sync>(
        &self,
        request: &T,
    ) -> Result<Order, ApiError> {
        let value = self
            .send_json(
                self.request(reqwest::Method::POST, "/orders").json(request),
                "order",
            )
            .await?;
        Ok(order_from_value(&value))
    }

    /// Fetch an order by its order number.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_number: &str) -> Result<Order, ApiError> {
        let path = format!("/orders/{}", urlencoding::encode(order_number));
        let value = self
            .send_json(self.request(reqwest::Method::GET, &path), "order")
            .await?;
        Ok(order_from_value(&value))
    }

    /// Fetch all orders belonging to a user.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        let path = format!("/orders/user/{user_id}");
        let value = self
            .send_json(self.request(reqwest::Method::GET, &path), "orders")
            .await?;
        let entries = match value {
            Value::Array(entries) => entries,
            _ => Vec::new(),
        };
        Ok(entries.iter().map(order_from_value).collect())
    }

    /// Update an order's status and return the refreshed order.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_number: &str,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let path = format!("/orders/{}/status", urlencoding::encode(order_number));
        let value = self
            .send_json(
                self.request(reqwest::Method::PATCH, &path)
                    .json(&serde_json::json!({ "status": status })),
                "order",
            )
            .await?;
        Ok(order_from_value(&value))
    }
}
