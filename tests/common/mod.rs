#![allow(dead_code)]

use axum::extract::Extension;
use reqwest::{Client, StatusCode};
use restaurant_admin::config::media::MediaConfig;
use restaurant_admin::config::rate_limit::RateLimitConfig;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Once};
use tokio::sync::OnceCell;

static INIT: Once = Once::new();
static MIGRATIONS: OnceCell<()> = OnceCell::const_new();

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    pub media: MediaConfig,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap_or(Value::Null))
    }

    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap_or(Value::Null))
    }

    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap_or(Value::Null))
    }

    pub async fn delete(&self, path: &str) -> StatusCode {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .unwrap()
            .status()
    }

    /// POST that must succeed; returns `data`.
    pub async fn create(&self, path: &str, body: Value) -> Value {
        let (status, body) = self.post(path, &body).await;
        assert_eq!(status, 200, "POST {} failed: {}", path, body);
        body["data"].clone()
    }

    pub async fn create_restaurant(&self, name: &str) -> i64 {
        let data = self
            .create(
                "/admin/restaurants",
                serde_json::json!({
                    "name": name,
                    "feature": "test",
                    "phone": "+8221234567",
                }),
            )
            .await;
        data["id"].as_i64().unwrap()
    }

    pub async fn create_review(&self, restaurant_id: i64, rating: i64) -> i64 {
        let data = self
            .create(
                "/admin/reviews",
                serde_json::json!({
                    "restaurant_id": restaurant_id,
                    "title": unique("review"),
                    "author": "tester",
                    "content": "Broth was deep and the noodles springy.",
                    "rating": rating,
                }),
            )
            .await;
        data["id"].as_i64().unwrap()
    }
}

/// A name no other test or earlier run has used. Short enough for the
/// 20-character name columns when `prefix` is at most 8 characters.
pub fn unique(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &id[..12])
}

/// Start the app on a random port, or `None` when no database is configured.
pub async fn spawn_app() -> Option<TestApp> {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
    });

    let Ok(database_url) =
        std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("TEST_DATABASE_URL/DATABASE_URL not set, skipping");
        return None;
    };

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    MIGRATIONS
        .get_or_init(|| async {
            restaurant_admin::migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
        })
        .await;

    let media = MediaConfig::new(
        std::env::temp_dir().join(format!("restaurant-admin-test-{}", std::process::id())),
        "/media",
    );
    let registry = Arc::new(restaurant_admin::default_registry().unwrap());

    let app = axum::Router::new()
        .merge(restaurant_admin::routes::create_routes(
            RateLimitConfig::disabled(),
        ))
        .nest_service(
            "/media",
            tower_http::services::ServeDir::new(media.root.clone()),
        )
        .layer(Extension(db.clone()))
        .layer(Extension(registry))
        .layer(Extension(media.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    Some(TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
        media,
    })
}

/// Changelist items from a list response.
pub fn items(body: &Value) -> Vec<Value> {
    body["data"]["items"].as_array().cloned().unwrap_or_default()
}

pub fn decimal(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.as_f64().unwrap(),
    }
}
