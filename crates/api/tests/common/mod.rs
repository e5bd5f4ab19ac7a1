//! Shared helpers for the HTTP-level integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use switchdeck_api::auth::jwt::JwtConfig;
use switchdeck_api::auth::password::hash_password;
use switchdeck_api::config::ServerConfig;
use switchdeck_api::router::build_app_router;
use switchdeck_api::state::AppState;
use switchdeck_core::market::MarketConfig;
use switchdeck_core::roles::ROLE_ADMIN;
use switchdeck_db::models::user::CreateUser;
use switchdeck_db::repositories::UserRepo;
use switchdeck_worker::{FetchError, PageFetcher};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Serves canned pages by URL; anything else is a 404.
#[derive(Default)]
pub struct StubFetcher {
    pub pages: HashMap<String, String>,
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or(FetchError::HttpStatus(404))
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        catalog_refresh_interval_secs: 0,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 60,
        },
        market: MarketConfig::default(),
    }
}

/// Build the full application router, using the given database pool and an
/// empty stub fetcher.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_fetcher(pool, StubFetcher::default())
}

pub fn build_test_app_with_fetcher(pool: PgPool, fetcher: StubFetcher) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        fetcher: Arc::new(fetcher),
    };
    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register through the API and return the access token.
pub async fn register(pool: &PgPool, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["access_token"].as_str().unwrap().to_string()
}

/// Insert an admin directly and log them in; returns the access token.
pub async fn admin_token(pool: &PgPool, username: &str) -> String {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: ROLE_ADMIN.to_string(),
    };
    UserRepo::create_with_profile(pool, &input, 1).await.unwrap();

    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"].as_str().unwrap().to_string()
}

/// Create a game as admin and return its JSON.
pub async fn create_game(pool: &PgPool, admin: &str, name: &str) -> serde_json::Value {
    let body = serde_json::json!({ "name": name, "description": "" });
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/games", body, admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Create a listing for the token's profile and return its id.
pub async fn create_listing(pool: &PgPool, token: &str, game_id: i64) -> i64 {
    let body = serde_json::json!({ "game_id": game_id });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/lots", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
