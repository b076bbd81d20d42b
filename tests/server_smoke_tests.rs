//! Smoke Tests Against a Running Server
//!
//! Binds the router to an ephemeral port and talks to it over real HTTP.

use std::net::SocketAddr;

use quick_lru::{api::create_router, AppState, LruCache};
use serde_json::{json, Value};

async fn spawn_server(max_size: usize) -> SocketAddr {
    let app = create_router(AppState::new(LruCache::new(max_size).unwrap()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_set_get_over_http() {
    let addr = spawn_server(10).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("http://{}/cache/route:lis-opo", addr))
        .json(&json!({ "value": {"fare": 42} }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = client
        .get(format!("http://{}/cache/route:lis-opo", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["value"]["fare"], 42);

    let stats: Value = client
        .get(format!("http://{}/stats", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["total_entries"], 1);
}

#[tokio::test]
async fn test_health_over_http() {
    let addr = spawn_server(10).await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_key_over_http() {
    let addr = spawn_server(10).await;

    let response = reqwest::get(format!("http://{}/cache/absent", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
