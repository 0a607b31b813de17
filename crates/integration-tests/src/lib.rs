//! Integration tests for the Optica storefront client.
//!
//! Every test runs against a [`wiremock`] mock of the storefront REST API
//! plus a temporary snapshot directory, so the suite needs no network and
//! no running backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p optica-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use optica_core::UserId;
use optica_storefront::config::StorefrontConfig;
use optica_storefront::session::Storefront;
use serde_json::json;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A storefront session wired to a mock API server.
pub struct TestStorefront {
    /// The mock API server; add expectations with [`wiremock::Mock`].
    pub server: MockServer,
    /// The session under test.
    pub session: Storefront,
    /// Snapshot directory, removed on drop.
    pub snapshot_dir: TempDir,
}

impl TestStorefront {
    /// Start a mock server and build a session against it.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let snapshot_dir = TempDir::new().expect("Failed to create snapshot dir");

        let config = StorefrontConfig {
            api_base_url: Url::parse(&server.uri()).expect("Failed to parse mock server URI"),
            user_id: UserId::new(1),
            snapshot_dir: snapshot_dir.path().to_path_buf(),
            http_timeout: Duration::from_secs(5),
            catalog_cache_capacity: 100,
        };
        let session = Storefront::new(config).expect("Failed to build storefront session");

        Self {
            server,
            session,
            snapshot_dir,
        }
    }

    /// Rebuild the session against the same server and snapshot directory,
    /// simulating an application restart.
    pub fn restart(&mut self) {
        let config = StorefrontConfig {
            api_base_url: Url::parse(&self.server.uri()).expect("Failed to parse mock server URI"),
            user_id: UserId::new(1),
            snapshot_dir: self.snapshot_dir.path().to_path_buf(),
            http_timeout: Duration::from_secs(5),
            catalog_cache_capacity: 100,
        };
        self.session = Storefront::new(config).expect("Failed to rebuild storefront session");
    }

    /// Mount a `GET /cart` expectation answering with the given items.
    pub async fn mock_cart(&self, items: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "userId": 1,
                "items": items,
            })))
            .mount(&self.server)
            .await;
    }
}

/// A cart item payload in the shape the API returns.
#[must_use]
pub fn cart_item(
    id: i32,
    product_id: i32,
    price: i64,
    quantity: u32,
    lens_id: Option<i32>,
) -> serde_json::Value {
    let mut item = json!({
        "id": id,
        "productId": product_id,
        "name": format!("Product {product_id}"),
        "price": price,
        "quantity": quantity,
    });
    if let Some(lens_id) = lens_id {
        item["lensId"] = json!(lens_id);
        item["lensType"] = json!("single-vision");
        item["lensPrice"] = json!(500);
    }
    item
}
