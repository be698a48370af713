//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are driven through `tower::ServiceExt::oneshot` directly
//! against the router, so tests exercise the exact middleware stack
//! production uses without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use knotbook_core::rate_limit::InMemoryRateLimitStore;
use sqlx::PgPool;
use tower::ServiceExt;

use knotbook_api::config::{AppEnv, ServerConfig};
use knotbook_api::router::build_app_router;
use knotbook_api::state::AppState;

/// Token accepted by the maintenance endpoint in tests.
pub const TEST_CLEANUP_SECRET: &str = "test-cleanup-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: AppEnv::Development,
        cleanup_secret: Some(TEST_CLEANUP_SECRET.to_string()),
        rsvp_rate_limit_max: 100,
        rsvp_rate_limit_window_secs: 900,
        wish_rate_limit_max: 3,
        wish_rate_limit_window_secs: 3600,
    }
}

/// Build the full application router with the default test config.
///
/// Clone the returned router between requests of one test so the
/// in-memory RSVP limiter state is shared, mirroring a running server.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the application router with a custom config (e.g. a tiny
/// rate-limit capacity).
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rsvp_limiter: Arc::new(InMemoryRateLimitStore::new()),
    };
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
    .expect("request should not fail")
}

/// Send a GET request with extra headers.
pub async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).expect("valid request"))
        .await
        .expect("request should not fail")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_json_with_headers(app, uri, body, &[]).await
}

/// Send a POST request with a JSON body and extra headers.
pub async fn post_json_with_headers(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(
        builder
            .body(Body::from(body.to_string()))
            .expect("valid request"),
    )
    .await
    .expect("request should not fail")
}

/// Send a POST request with no body.
pub async fn post_empty_with_headers(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).expect("valid request"))
        .await
        .expect("request should not fail")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a project row, returning its id.
pub async fn seed_project(pool: &PgPool, slug: &str, published: bool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO projects (name, slug, published) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Avery & Jordan")
    .bind(slug)
    .bind(published)
    .fetch_one(pool)
    .await
    .expect("seed project")
}

/// Insert an RSVP settings row for a project.
pub async fn seed_rsvp_settings(
    pool: &PgPool,
    project_id: i64,
    enabled: bool,
    deadline: Option<DateTime<Utc>>,
) {
    sqlx::query(
        "INSERT INTO rsvp_settings (project_id, enabled, deadline, confirmation_message) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(project_id)
    .bind(enabled)
    .bind(deadline)
    .bind("See you on the dance floor!")
    .execute(pool)
    .await
    .expect("seed rsvp settings");
}

/// Insert a wish settings row for a project.
pub async fn seed_wish_settings(
    pool: &PgPool,
    project_id: i64,
    enabled: bool,
    max_message_length: i32,
    require_email: bool,
) {
    sqlx::query(
        "INSERT INTO wish_settings (project_id, enabled, max_message_length, require_email) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(project_id)
    .bind(enabled)
    .bind(max_message_length)
    .bind(require_email)
    .execute(pool)
    .await
    .expect("seed wish settings");
}

/// A published project with both features enabled, using defaults.
pub async fn seed_open_project(pool: &PgPool, slug: &str) -> i64 {
    let project_id = seed_project(pool, slug, true).await;
    seed_rsvp_settings(pool, project_id, true, None).await;
    seed_wish_settings(pool, project_id, true, 500, false).await;
    project_id
}
