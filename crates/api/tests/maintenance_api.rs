//! Integration tests for the rate-limit cleanup endpoint.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_empty_with_headers, TEST_CLEANUP_SECRET};
use sqlx::PgPool;

const CLEANUP_URI: &str = "/api/v1/maintenance/rate-limits/cleanup";

/// Insert a counter row with an explicit age and count.
async fn seed_counter(pool: &PgPool, project_id: i64, addr: &str, count: i32, age_hours: i64) {
    let then = Utc::now() - Duration::hours(age_hours);
    sqlx::query(
        "INSERT INTO wish_rate_limits \
             (project_id, client_addr, submission_count, window_started_at, last_submission_at) \
         VALUES ($1, $2, $3, $4, $4)",
    )
    .bind(project_id)
    .bind(addr)
    .bind(count)
    .bind(then)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty_with_headers(app, CLEANUP_URI, &[]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty_with_headers(
        app,
        CLEANUP_URI,
        &[("authorization", "Bearer wrong-token")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unconfigured_secret_refuses_everyone(pool: PgPool) {
    let mut config = common::test_config();
    config.cleanup_secret = None;
    let app = common::build_test_app_with_config(pool, config);
    let response = post_empty_with_headers(
        app,
        CLEANUP_URI,
        &[("authorization", "Bearer test-cleanup-secret")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Deletion policy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn purges_idle_low_count_and_ancient_rows(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;

    // Idle for a day with low traffic: purged.
    seed_counter(&pool, project_id, "203.0.113.1", 2, 25).await;
    // Idle for a day but busy: kept until the hard cutoff.
    seed_counter(&pool, project_id, "203.0.113.2", 50, 25).await;
    // Idle past the hard cutoff: purged regardless of count.
    seed_counter(&pool, project_id, "203.0.113.3", 50, 24 * 8).await;
    // Fresh: kept.
    seed_counter(&pool, project_id, "203.0.113.4", 2, 1).await;

    let app = common::build_test_app(pool.clone());
    let auth = format!("Bearer {TEST_CLEANUP_SECRET}");
    let response =
        post_empty_with_headers(app, CLEANUP_URI, &[("authorization", auth.as_str())]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"], 2);

    let remaining: Vec<(String,)> =
        sqlx::query_as("SELECT client_addr FROM wish_rate_limits ORDER BY client_addr")
            .fetch_all(&pool)
            .await
            .unwrap();
    let addrs: Vec<&str> = remaining.iter().map(|(a,)| a.as_str()).collect();
    assert_eq!(addrs, vec!["203.0.113.2", "203.0.113.4"]);
}
