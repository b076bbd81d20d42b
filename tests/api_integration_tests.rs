//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use quick_lru::{api::create_router, cache::ManualClock, AppState, CacheBuilder, LruCache};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(max_size: usize) -> Router {
    create_router(AppState::new(LruCache::new(max_size).unwrap()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn keys_of(listing: &Value) -> Vec<String> {
    listing["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["key"].as_str().unwrap().to_string())
        .collect()
}

// == SET / GET ==

#[tokio::test]
async fn test_set_and_get_json_value() {
    let app = create_test_app(100);
    let search = json!({
        "destination": "Lisbon",
        "results": [{"hotel": "Avenida", "price": 180}]
    });

    let body = json!({ "value": search });
    let (status, json) = send(&app, "PUT", "/cache/hotels:lisbon", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("hotels:lisbon"));

    let (status, json) = send(&app, "GET", "/cache/hotels:lisbon", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "hotels:lisbon");
    assert_eq!(json["value"], search);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(100);

    let (status, json) = send(&app, "GET", "/cache/nonexistent_key", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_set_overwrite() {
    let app = create_test_app(100);

    send(&app, "PUT", "/cache/k", Some(json!({"value": 1}))).await;
    send(&app, "PUT", "/cache/k", Some(json!({"value": 2}))).await;

    let (_, json) = send(&app, "GET", "/cache/k", None).await;
    assert_eq!(json["value"], 2);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["total_entries"], 1);
    assert_eq!(stats["evictions"], 0);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(100);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/cache/k")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"not_value": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("value"));
}

#[tokio::test]
async fn test_malformed_requests_return_json_errors() {
    let app = create_test_app(100);

    let (status, json) = send(&app, "GET", "/cache?order=sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, json) = send(&app, "PUT", "/capacity", Some(json!({"max_size": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

// == LRU Behaviour ==

#[tokio::test]
async fn test_lru_eviction_via_api() {
    let app = create_test_app(2);

    send(&app, "PUT", "/cache/a", Some(json!({"value": 1}))).await;
    send(&app, "PUT", "/cache/b", Some(json!({"value": 2}))).await;
    send(&app, "PUT", "/cache/c", Some(json!({"value": 3}))).await;

    let (_, exists) = send(&app, "GET", "/cache/a/exists", None).await;
    assert_eq!(exists["exists"], false);

    // Refresh b, so c becomes the eviction candidate
    send(&app, "GET", "/cache/b", None).await;
    send(&app, "PUT", "/cache/d", Some(json!({"value": 4}))).await;

    let (_, listing) = send(&app, "GET", "/cache?order=ascending", None).await;
    assert_eq!(keys_of(&listing), vec!["b", "d"]);
    assert_eq!(listing["count"], 2);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["evictions"], 2);
}

#[tokio::test]
async fn test_peek_does_not_change_order() {
    let app = create_test_app(10);

    send(&app, "PUT", "/cache/a", Some(json!({"value": 1}))).await;
    send(&app, "PUT", "/cache/b", Some(json!({"value": 2}))).await;

    let (status, json) = send(&app, "GET", "/cache/a/peek", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], 1);

    let (_, listing) = send(&app, "GET", "/cache?order=descending", None).await;
    assert_eq!(keys_of(&listing), vec!["b", "a"]);
    assert_eq!(listing["order"], "descending");
}

// == DELETE / CLEAR / RESIZE ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app(100);

    send(&app, "PUT", "/cache/gone", Some(json!({"value": "x"}))).await;

    let (status, json) = send(&app, "DELETE", "/cache/gone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("deleted"));

    let (status, _) = send(&app, "DELETE", "/cache/gone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_endpoint() {
    let app = create_test_app(100);

    for key in ["a", "b", "c"] {
        let uri = format!("/cache/{}", key);
        send(&app, "PUT", &uri, Some(json!({ "value": key }))).await;
    }

    let (status, json) = send(&app, "DELETE", "/cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 3);

    let (_, listing) = send(&app, "GET", "/cache", None).await;
    assert_eq!(listing["count"], 0);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["removals"], 3);
}

#[tokio::test]
async fn test_resize_endpoint() {
    let app = create_test_app(5);

    for key in ["a", "b", "c", "d"] {
        let uri = format!("/cache/{}", key);
        send(&app, "PUT", &uri, Some(json!({ "value": key }))).await;
    }

    let (status, json) = send(&app, "PUT", "/capacity", Some(json!({"max_size": 2}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["max_size"], 2);
    assert_eq!(json["total_entries"], 2);

    let (_, listing) = send(&app, "GET", "/cache?order=ascending", None).await;
    assert_eq!(keys_of(&listing), vec!["c", "d"]);

    let (status, json) = send(&app, "PUT", "/capacity", Some(json!({"max_size": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == STATS / HEALTH ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(100);

    send(&app, "PUT", "/cache/k", Some(json!({"value": 1}))).await;
    send(&app, "GET", "/cache/k", None).await;
    send(&app, "GET", "/cache/missing", None).await;

    let (status, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["max_size"], 100);
    assert_eq!(stats["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(100);

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == TTL ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let clock = ManualClock::new();
    let cache = CacheBuilder::new(100).clock(clock.clone()).build().unwrap();
    let app = create_router(AppState::new(cache));

    let body = json!({"value": 99, "max_age_ms": 50});
    send(&app, "PUT", "/cache/quote", Some(body)).await;

    clock.advance(Duration::from_millis(20));
    let (status, json) = send(&app, "GET", "/cache/quote", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ttl_ms"], 30);

    clock.advance(Duration::from_millis(30));

    let (status, _) = send(&app, "GET", "/cache/quote", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["expirations"], 1);
}
