//! Integration tests for the order tracker.
//!
//! The key behavior under test is the snapshot fallback: a transport
//! failure may serve the snapshotted last order, but a definitive 404
//! never does.

use optica_core::OrderStatus;
use optica_integration_tests::TestStorefront;
use optica_storefront::tracking::TrackingError;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn order_body(number: &str, status: &str) -> serde_json::Value {
    json!({
        "id": 42,
        "orderNumber": number,
        "status": status,
        "orderDate": "2026-02-10T08:30:00Z",
        "total": 3160,
    })
}

// ============================================================================
// Lookup
// ============================================================================

#[tokio::test]
async fn test_find_order_normalizes_the_number() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/ORD-2026-042"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(order_body("ORD-2026-042", "shipped")),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let order = ctx
        .session
        .tracker()
        .find_order("  ord-2026-042  ")
        .await
        .expect("lookup should succeed");
    assert_eq!(order.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_unknown_order_is_not_found_not_a_transport_error() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/ORD-NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such order"))
        .mount(&ctx.server)
        .await;

    let result = ctx.session.tracker().find_order("ORD-NOPE").await;
    match result {
        Err(TrackingError::OrderNotFound(number)) => assert_eq!(number, "ORD-NOPE"),
        other => panic!("expected OrderNotFound, got {other:?}"),
    }
}

// ============================================================================
// Snapshot fallback
// ============================================================================

#[tokio::test]
async fn test_transport_failure_falls_back_to_matching_snapshot() {
    let ctx = TestStorefront::start().await;

    // First lookup succeeds and snapshots the order.
    Mock::given(method("GET"))
        .and(path("/orders/ORD-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ORD-7", "shipped")))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    ctx.session
        .tracker()
        .find_order("ORD-7")
        .await
        .expect("first lookup should succeed");

    // Server now degraded.
    Mock::given(method("GET"))
        .and(path("/orders/ORD-7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&ctx.server)
        .await;

    let order = ctx
        .session
        .tracker()
        .find_order("ord-7")
        .await
        .expect("fallback should serve the snapshot");
    assert_eq!(order.order_number, "ORD-7");
    assert_eq!(order.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_fallback_never_serves_a_different_order() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/ORD-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ORD-7", "shipped")))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    ctx.session
        .tracker()
        .find_order("ORD-7")
        .await
        .expect("first lookup should succeed");

    Mock::given(method("GET"))
        .and(path("/orders/ORD-8"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&ctx.server)
        .await;

    // The snapshot is for ORD-7; asking for ORD-8 must not serve it.
    let result = ctx.session.tracker().find_order("ORD-8").await;
    assert!(matches!(result, Err(TrackingError::Api(_))));
}

#[tokio::test]
async fn test_definitive_404_does_not_fall_back_to_snapshot() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/ORD-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ORD-7", "shipped")))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    ctx.session
        .tracker()
        .find_order("ORD-7")
        .await
        .expect("first lookup should succeed");

    // The order has since been purged server-side: 404 is authoritative.
    Mock::given(method("GET"))
        .and(path("/orders/ORD-7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&ctx.server)
        .await;

    let result = ctx.session.tracker().find_order("ORD-7").await;
    assert!(matches!(result, Err(TrackingError::OrderNotFound(_))));
}

// ============================================================================
// Listing and status updates
// ============================================================================

#[tokio::test]
async fn test_orders_for_user_sorts_newest_first() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"orderNumber": "ORD-OLD", "orderDate": "2026-01-01T00:00:00Z"},
            {"orderNumber": "ORD-NEW", "orderDate": "2026-02-01T00:00:00Z"},
        ])))
        .mount(&ctx.server)
        .await;

    let user_id = ctx.session.config().user_id;
    let orders = ctx
        .session
        .tracker()
        .orders_for_user(user_id)
        .await
        .expect("listing should succeed");
    assert_eq!(orders[0].order_number, "ORD-NEW");
    assert_eq!(orders[1].order_number, "ORD-OLD");
}

#[tokio::test]
async fn test_update_status_patches_and_returns_the_order() {
    let ctx = TestStorefront::start().await;

    Mock::given(method("PATCH"))
        .and(path("/orders/ORD-7/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ORD-7", "delivered")))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let order = ctx
        .session
        .tracker()
        .update_status("ord-7", OrderStatus::Delivered)
        .await
        .expect("update should succeed");
    assert_eq!(order.status, OrderStatus::Delivered);
}
