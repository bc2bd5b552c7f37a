//! Helpers shared by the handler tests: a router wired to the in-memory
//! store, and request/response plumbing around `oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use crate::config::Config;
use crate::models::ItemResponse;
use crate::routes;
use crate::state::AppState;
use crate::store::memory::InMemoryItemStore;
use crate::store::ItemStore;

pub fn test_config() -> Config {
    Config {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        mongodb_database: Some("items_api_test".to_string()),
        mongodb_collection: "items".to_string(),
        service_port: 3000,
        service_host: "0.0.0.0".to_string(),
    }
}

pub fn app_with_store(store: Arc<dyn ItemStore>) -> Router {
    routes::router(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

pub fn setup_test_app() -> Router {
    app_with_store(Arc::new(InMemoryItemStore::new()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse { status, body }
}

/// POST /items and return the created item
pub async fn create_item(app: &Router, name: &str, quantity: i64) -> ItemResponse {
    let response = send(
        app,
        "POST",
        routes::ITEMS,
        Some(serde_json::json!({ "name": name, "quantity": quantity })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "create failed: {}", response.text());
    response.json()
}

/// GET /items
pub async fn list_items(app: &Router) -> Vec<ItemResponse> {
    let response = send(app, "GET", routes::ITEMS, None).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()
}
