//! HTTP API integration tests
//!
//! Drive the full router in-process with `tower::ServiceExt::oneshot` against
//! the seeded demo catalog.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use venue_server::db::seed::seed_demo_catalog;
use venue_server::{CatalogStore, Config, Server, ServerState};

fn app() -> (Router, std::sync::Arc<CatalogStore>) {
    let store = std::sync::Arc::new(CatalogStore::new());
    seed_demo_catalog(&store);
    let state = ServerState::new(Config::default(), store.clone());
    (Server::build_router(state), store)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn item_id(store: &CatalogStore, name: &str) -> String {
    store
        .visible_item_details()
        .into_iter()
        .find(|d| d.item.name == name)
        .map(|d| d.item.id)
        .unwrap()
}

/// First Monday at least a week out, so today's bookings can't collide.
fn next_monday() -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday() != Weekday::Mon {
        date += Duration::days(1);
    }
    date
}

#[tokio::test]
async fn test_health() {
    let (router, _) = app();
    let (status, body) = get(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_items_listing_and_pagination() {
    let (router, _) = app();

    let (status, body) = get(&router, "/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);

    let (_, body) = get(&router, "/items?limit=2&page=2&sort=name&order=asc").await;
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "Room A");

    // limit is clamped to the configured maximum
    let (_, body) = get(&router, "/items?limit=9999").await;
    assert_eq!(body["limit"], Config::default().max_page_limit);

    // An absurd page number pages past the end instead of overflowing
    let (status, body) = get(&router, "/items?page=4294967295&limit=50").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_static_price_with_addons() {
    let (router, store) = app();
    let coffee = item_id(&store, "Coffee");

    let (status, body) = get(&router, &format!("/items/{}/price", coffee)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basePrice"], 200.0);
    assert_eq!(body["tax"], 36.0);
    assert_eq!(body["finalPrice"], 236.0);
    assert_eq!(body["pricingDetails"]["rule"], "STATIC");

    let shot_id = store
        .item_detail(&coffee)
        .unwrap()
        .addon_groups[0]
        .addons
        .iter()
        .find(|a| a.name == "Extra Shot")
        .map(|a| a.id.clone())
        .unwrap();

    let (_, body) = get(
        &router,
        &format!("/items/{}/price?addonIds={}", coffee, shot_id),
    )
    .await;
    // Tax covers the base price only; add-ons join after tax
    assert_eq!(body["addonTotal"], 50.0);
    assert_eq!(body["grandTotal"], 236.0);
    assert_eq!(body["finalPrice"], 286.0);
}

#[tokio::test]
async fn test_tiered_price_requires_usage() {
    let (router, store) = app();
    let room = item_id(&store, "Room A");

    let (status, body) = get(&router, &format!("/items/{}/price?usage=3", room)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basePrice"], 800.0);
    // Meeting rooms carry 12% tax
    assert_eq!(body["finalPrice"], 896.0);

    let (status, body) = get(&router, &format!("/items/{}/price", room)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0005");
    assert_eq!(body["message"], "Usage parameter required for tiered pricing");
}

#[tokio::test]
async fn test_dynamic_price_with_time_override() {
    let (router, store) = app();
    let combo = item_id(&store, "Breakfast Combo");
    let today = Utc::now().date_naive();

    let inside = format!("{}T09:00:00Z", today);
    let (status, body) =
        get(&router, &format!("/items/{}/price?at={}", combo, inside)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basePrice"], 199.0);

    let outside = format!("{}T13:00:00Z", today);
    let (status, body) =
        get(&router, &format!("/items/{}/price?at={}", combo, outside)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Item not available at this time");
}

#[tokio::test]
async fn test_unknown_item_price_is_404() {
    let (router, _) = app();
    let (status, body) = get(&router, "/items/no-such-item/price").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn test_search_filters() {
    let (router, _) = app();

    let (status, body) = get(&router, "/items/search?q=room").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Room A");
    // Tiered items surface their cheapest tier as the listed price
    assert_eq!(body["items"][0]["price"], 300.0);

    let (_, body) = get(&router, "/items/search?minPrice=250").await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_booking_flow() {
    let (router, store) = app();
    let room = item_id(&store, "Room A");
    let monday = next_monday();

    let (status, body) = get(
        &router,
        &format!("/booking/items/{}/availability?date={}", room, monday),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableSlots"].as_array().unwrap().len(), 1);

    let payload = serde_json::json!({
        "startTime": format!("{}T10:00:00Z", monday),
        "endTime": format!("{}T11:00:00Z", monday),
    });
    let request = Request::post(format!("/booking/items/{}/book", room))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Booking confirmed");
    assert_eq!(body["booking"]["itemId"], room.as_str());

    // Same slot again is a conflict
    let request = Request::post(format!("/booking/items/{}/book", room))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0004");

    // The booked window no longer shows as free
    let (_, body) = get(
        &router,
        &format!("/booking/items/{}/availability?date={}", room, monday),
    )
    .await;
    assert!(body["availableSlots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_outside_schedule() {
    let (router, store) = app();
    let room = item_id(&store, "Room A");
    let monday = next_monday();

    let payload = serde_json::json!({
        "startTime": format!("{}T08:00:00Z", monday),
        "endTime": format!("{}T09:00:00Z", monday),
    });
    let request = Request::post(format!("/booking/items/{}/book", room))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Requested time is outside availability");
}

#[tokio::test]
async fn test_booking_non_bookable_item() {
    let (router, store) = app();
    let coffee = item_id(&store, "Coffee");
    let monday = next_monday();

    let payload = serde_json::json!({
        "startTime": format!("{}T10:00:00Z", monday),
        "endTime": format!("{}T11:00:00Z", monday),
    });
    let request = Request::post(format!("/booking/items/{}/book", coffee))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn test_category_cascade_delete() {
    let (router, store) = app();
    let coffee = item_id(&store, "Coffee");
    let cafe_id = store.item_detail(&coffee).unwrap().category.id;

    let request = Request::patch(format!("/categories/delete/{}", cafe_id))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);

    // Items under the deleted category are gone from every read path
    let (status, _) = get(&router, &format!("/items/{}/price", coffee)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&router, "/items").await;
    assert_eq!(body["total"], 1);

    // The category record itself is still readable, just inactive
    let (status, body) = get(&router, &format!("/categories/{}", cafe_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);
}

#[tokio::test]
async fn test_subcategory_and_addon_listings() {
    let (router, _) = app();

    let (status, body) = get(&router, "/subcategory").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Beverages");

    let (status, body) = get(&router, "/addons").await;
    assert_eq!(status, StatusCode::OK);
    let addons = body.as_array().unwrap();
    assert_eq!(addons.len(), 2);
    assert!(addons.iter().all(|a| a["groupName"] == "Extras"));
}
