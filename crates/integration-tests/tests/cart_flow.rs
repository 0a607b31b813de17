//! Integration tests for the cart store.
//!
//! Exercises the mutate/reload/snapshot cycle against a mock API server.

use optica_core::{CartItemId, LensId, ProductId};
use optica_integration_tests::{TestStorefront, cart_item};
use optica_storefront::cart::CartError;
use optica_storefront::models::LineRequest;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn add_request(product_id: i32, lens_id: Option<i32>, quantity: u32) -> LineRequest {
    LineRequest {
        product_id: ProductId::new(product_id),
        lens_id: lens_id.map(LensId::new),
        quantity,
    }
}

// ============================================================================
// Adding items
// ============================================================================

#[tokio::test]
async fn test_add_posts_item_and_reloads_cart() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.mock_cart(json!([cart_item(1, 10, 1499, 1, None)])).await;

    ctx.session
        .cart()
        .add(add_request(10, None, 1))
        .await
        .expect("add should succeed");

    let cart = ctx.session.cart();
    assert_eq!(cart.count(), 1);
    assert_eq!(cart.total().amount, dec!(1499));
    assert!(cart.error_message().is_none());
}

#[tokio::test]
async fn test_adding_same_product_and_lens_increments_quantity() {
    let ctx = TestStorefront::start().await;

    // The cart already holds 2 of (product 10, lens 3) as line 7.
    ctx.mock_cart(json!([cart_item(7, 10, 1499, 2, Some(3))]))
        .await;
    Mock::given(method("PUT"))
        .and(path("/cart/items/7"))
        .and(query_param("quantity", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let cart = ctx.session.cart();
    cart.refresh().await.expect("refresh should succeed");

    // Adding 1 more must update line 7 to quantity 3, not create a new line.
    cart.add(add_request(10, Some(3), 1))
        .await
        .expect("add should succeed");

    let requests = ctx.server.received_requests().await.expect("recording on");
    assert!(
        !requests.iter().any(|r| r.method.as_str() == "POST"),
        "re-adding an existing line must not POST a duplicate"
    );
}

#[tokio::test]
async fn test_same_product_with_different_lens_is_a_new_line() {
    let ctx = TestStorefront::start().await;

    ctx.mock_cart(json!([cart_item(7, 10, 1499, 1, Some(3))]))
        .await;
    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let cart = ctx.session.cart();
    cart.refresh().await.expect("refresh should succeed");

    // Same frame, no lens this time: distinct line identity.
    cart.add(add_request(10, None, 1))
        .await
        .expect("add should succeed");
}

#[tokio::test]
async fn test_add_with_zero_quantity_is_rejected_locally() {
    let ctx = TestStorefront::start().await;

    let result = ctx.session.cart().add(add_request(10, None, 0)).await;
    assert!(matches!(result, Err(CartError::InvalidQuantity)));

    let requests = ctx.server.received_requests().await.expect("recording on");
    assert!(requests.is_empty(), "invalid quantity must not hit the API");
}

// ============================================================================
// Quantity updates and removal
// ============================================================================

#[tokio::test]
async fn test_update_quantity_sets_exact_value() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("PUT"))
        .and(path("/cart/items/7"))
        .and(query_param("quantity", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.mock_cart(json!([cart_item(7, 10, 1499, 5, None)])).await;

    ctx.session
        .cart()
        .update_quantity(CartItemId::new(7), 5)
        .await
        .expect("update should succeed");

    assert_eq!(ctx.session.cart().count(), 5);
}

#[tokio::test]
async fn test_update_quantity_to_zero_removes_the_line() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cart/items/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.mock_cart(json!([])).await;

    ctx.session
        .cart()
        .update_quantity(CartItemId::new(7), 0)
        .await
        .expect("update should succeed");

    assert!(ctx.session.cart().is_empty());
}

#[tokio::test]
async fn test_clear_empties_the_cart() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.mock_cart(json!([])).await;

    ctx.session.cart().clear().await.expect("clear should succeed");
    assert!(ctx.session.cart().is_empty());
}

#[tokio::test]
async fn test_mutation_with_empty_response_body_still_succeeds() {
    let ctx = TestStorefront::start().await;

    // Some backend versions answer mutations with 204 and no body; the
    // cart reload afterwards is what matters.
    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.mock_cart(json!([cart_item(1, 10, 1499, 1, None)])).await;

    ctx.session
        .cart()
        .add(add_request(10, None, 1))
        .await
        .expect("empty mutation body must not be treated as failure");

    assert_eq!(ctx.session.cart().count(), 1);
    assert!(ctx.session.cart().error_message().is_none());
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_failed_mutation_keeps_local_cart_and_records_error() {
    let ctx = TestStorefront::start().await;

    ctx.mock_cart(json!([cart_item(7, 10, 1499, 2, None)])).await;
    let cart = ctx.session.cart();
    cart.refresh().await.expect("refresh should succeed");

    Mock::given(method("PUT"))
        .and(path("/cart/items/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&ctx.server)
        .await;

    let result = cart.update_quantity(CartItemId::new(7), 9).await;
    assert!(matches!(result, Err(CartError::Remote { .. })));

    // Local copy untouched, failure surfaced for display.
    assert_eq!(cart.count(), 2);
    assert!(cart.error_message().is_some());
}

#[tokio::test]
async fn test_next_successful_mutation_clears_the_error() {
    let ctx = TestStorefront::start().await;

    ctx.mock_cart(json!([])).await;
    let cart = ctx.session.cart();

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;

    let result = cart.add(add_request(10, None, 1)).await;
    assert!(result.is_err());
    assert!(cart.error_message().is_some());

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .mount(&ctx.server)
        .await;

    cart.add(add_request(10, None, 1))
        .await
        .expect("retry should succeed");
    assert!(cart.error_message().is_none());
}

// ============================================================================
// Snapshots
// ============================================================================

#[tokio::test]
async fn test_cart_is_restored_from_snapshot_on_restart() {
    let mut ctx = TestStorefront::start().await;

    ctx.mock_cart(json!([cart_item(7, 10, 1499, 2, Some(3))]))
        .await;
    ctx.session
        .cart()
        .refresh()
        .await
        .expect("refresh should succeed");

    // New session, same snapshot dir, no network traffic needed.
    ctx.restart();
    ctx.server.reset().await;

    let cart = ctx.session.cart();
    assert_eq!(cart.count(), 2);
    // unit 1499 + lens 500, times 2
    assert_eq!(cart.total().amount, dec!(3998));

    let requests = ctx.server.received_requests().await.expect("recording on");
    assert!(requests.is_empty(), "snapshot restore must not hit the API");
}
