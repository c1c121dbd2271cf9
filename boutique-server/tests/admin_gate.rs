//! End-to-end router tests: the admin gate, public surface and checkout.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::{Request, StatusCode, header};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use boutique_server::api;
use boutique_server::core::{Config, ServerState};
use boutique_server::db::DbService;
use boutique_server::services::LocalBlobStore;

async fn migrated_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

async fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().to_string_lossy().into_owned(),
        http_port: 0,
        database_path: None,
        admin_user: "admin".into(),
        admin_password: "secret".into(),
        whatsapp_number: "916281287188".into(),
        store_name: "Lotus Aura".into(),
        request_timeout_ms: 30000,
        environment: "development".into(),
        log_level: "info".into(),
    };

    let state = ServerState {
        config: config.clone(),
        db: DbService {
            pool: migrated_pool().await,
        },
        blob: Arc::new(LocalBlobStore::new(config.images_dir())),
    };

    (dir, api::build_app(&state))
}

fn auth_header(user: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{user}:{password}")))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_authed(uri: &str, user: &str, password: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header(user, password))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str, authed: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if authed {
        builder = builder.header(header::AUTHORIZATION, auth_header("admin", "secret"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

const CREATE_BODY: &str = r#"{
    "name": "Banarasi Saree",
    "price": 4999,
    "category": "Sarees",
    "imageUrl": "/api/image/main.jpg",
    "imagePath": "main.jpg",
    "images": [
        {"imageUrl": "/api/image/a.jpg", "imagePath": "a.jpg"}
    ]
}"#;

#[tokio::test]
async fn admin_routes_challenge_without_credentials() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(get("/api/admin/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .expect("401 must invite basic auth");
    assert!(challenge.to_str().unwrap().starts_with("Basic"));
}

#[tokio::test]
async fn admin_routes_reject_wrong_credentials() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(get_authed("/api/admin/products", "admin", "wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_accept_the_configured_pair() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(get_authed("/api/admin/products", "admin", "secret"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_surface_needs_no_credentials() {
    let (_dir, app) = test_app().await;

    let listing = app.clone().oneshot(get("/api/products")).await.unwrap();
    assert_eq!(listing.status(), StatusCode::OK);

    let health = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_and_malformed_product_ids() {
    let (_dir, app) = test_app().await;

    let missing = app.clone().oneshot(get("/api/products/999")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = app.oneshot(get("/api/products/abc")).await.unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_then_browse_then_checkout() {
    let (_dir, app) = test_app().await;

    // Create requires the gate
    let denied = app
        .clone()
        .oneshot(post_json("/api/admin/products", CREATE_BODY, false))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let created = app
        .clone()
        .oneshot(post_json("/api/admin/products", CREATE_BODY, true))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let body = axum::body::to_bytes(created.into_body(), usize::MAX)
        .await
        .unwrap();
    let product: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = product["id"].as_i64().unwrap();
    assert_eq!(product["name"], "Banarasi Saree");

    // Public detail returns gallery and related strip
    let detail = app
        .clone()
        .oneshot(get(&format!("/api/products/{id}")))
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    let body = axum::body::to_bytes(detail.into_body(), usize::MAX)
        .await
        .unwrap();
    let detail: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(detail["images"].as_array().unwrap().len(), 1);
    assert!(detail["related"].as_array().unwrap().is_empty());

    // Checkout hands the cart off to WhatsApp
    let checkout_body = format!(r#"{{"items": [{{"productId": {id}, "quantity": 2}}]}}"#);
    let checkout = app
        .oneshot(post_json("/api/checkout", &checkout_body, false))
        .await
        .unwrap();
    assert_eq!(checkout.status(), StatusCode::OK);
    let body = axum::body::to_bytes(checkout.into_body(), usize::MAX)
        .await
        .unwrap();
    let checkout: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(checkout["total"], 9998);
    assert!(
        checkout["url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/916281287188?text=")
    );
}

#[tokio::test]
async fn validation_errors_are_bad_requests() {
    let (_dir, app) = test_app().await;

    let blank_name = CREATE_BODY.replace("Banarasi Saree", "   ");
    let response = app
        .clone()
        .oneshot(post_json("/api/admin/products", &blank_name, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_page = app.oneshot(get("/api/products?page=two")).await.unwrap();
    assert_eq!(bad_page.status(), StatusCode::BAD_REQUEST);
}
