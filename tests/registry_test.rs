use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use restaurant_admin::config::rate_limit::RateLimitConfig;
use restaurant_admin::routes::create_routes;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let registry = Arc::new(restaurant_admin::default_registry().unwrap());
    create_routes(RateLimitConfig::disabled()).layer(Extension(registry))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let resp = app()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn lists_every_model_by_key() {
    let (status, body) = get("/api/v1/admin/models").await;
    assert_eq!(status, StatusCode::OK);

    let models: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["model"].as_str().unwrap())
        .collect();
    assert_eq!(
        models,
        vec![
            "article",
            "cuisine_type",
            "restaurant",
            "restaurant_category",
            "review",
            "social_channel",
            "tag"
        ]
    );
}

#[tokio::test]
async fn restaurant_rules_expose_labels_and_inlines() {
    let (status, body) = get("/api/v1/admin/models/restaurant").await;
    assert_eq!(status, StatusCode::OK);

    let restaurant = &body["data"];
    assert_eq!(restaurant["labels"]["phone"], "Phone (E.164)");
    assert_eq!(restaurant["autocomplete_fields"][0], "tags");
    assert_eq!(restaurant["list_per_page"], 100);
    let inlines: Vec<&str> = restaurant["inlines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["model"].as_str().unwrap())
        .collect();
    assert_eq!(inlines, vec!["restaurant_menu", "restaurant_image"]);
}

#[tokio::test]
async fn unknown_model_is_404() {
    let (status, body) = get("/api/v1/admin/models/user").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
}
