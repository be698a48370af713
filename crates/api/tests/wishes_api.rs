//! HTTP-level integration tests for the guest wishes pipeline.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_with_headers, post_json, post_json_with_headers};
use serde_json::json;
use sqlx::PgPool;

fn heartfelt_wish(name: &str) -> serde_json::Value {
    json!({
        "guestName": name,
        "message": "So happy for you both, wishing you a lifetime of joy!",
    })
}

// ---------------------------------------------------------------------------
// Happy path and moderation routing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn clean_wish_is_approved(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/wishes"),
        heartfelt_wish("Aunt May"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["status"], "approved");
    assert_eq!(json["spamScore"], 0);
    assert_eq!(json["remaining"], 2, "capacity 3, one submission used");
    assert_eq!(json["wish"]["guestName"], "Aunt May");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn spammy_wish_is_routed_to_pending_not_rejected(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/wishes"),
        json!({
            "guestName": "A Friend",
            "message": "FREE MONEY CLICK HERE http://spam.biz",
        }),
    )
    .await;

    // Spam detection is advisory: the wish is stored, just not public.
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert!(json["spamScore"].as_u64().unwrap() > 5);

    let (status, spam_score): (String, i32) =
        sqlx::query_as("SELECT status, spam_score FROM guest_wishes WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "pending");
    assert!(spam_score > 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn board_lists_only_approved_wishes(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/projects/{project_id}/wishes");

    let ok = post_json(app.clone(), &uri, heartfelt_wish("Aunt May")).await;
    assert_eq!(ok.status(), StatusCode::CREATED);

    let spam = post_json(
        app.clone(),
        &uri,
        json!({
            "guestName": "A Friend",
            "message": "FREE MONEY CLICK HERE http://spam.biz",
        }),
    )
    .await;
    assert_eq!(spam.status(), StatusCode::CREATED);

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let wishes = json.as_array().unwrap();
    assert_eq!(wishes.len(), 1);
    assert_eq!(wishes[0]["guestName"], "Aunt May");
    assert_eq!(wishes[0]["status"], "approved");
}

// ---------------------------------------------------------------------------
// Validation and per-project config
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_fields_return_400_with_all_errors(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/wishes"),
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2, "name and message are both reported");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn message_over_project_max_returns_400(pool: PgPool) {
    let project_id = common::seed_project(&pool, "short-wishes", true).await;
    common::seed_wish_settings(&pool, project_id, true, 20, false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/wishes"),
        json!({
            "guestName": "Aunt May",
            "message": "This message is longer than twenty characters.",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"][0],
        "Message must be at most 20 characters"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_required_by_project_config(pool: PgPool) {
    let project_id = common::seed_project(&pool, "email-required", true).await;
    common::seed_wish_settings(&pool, project_id, true, 500, true).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/projects/{project_id}/wishes");

    let missing = post_json(app.clone(), &uri, heartfelt_wish("Aunt May")).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let json = body_json(missing).await;
    assert_eq!(json["errors"][0], "Email is required for this project");

    let mut with_email = heartfelt_wish("Aunt May");
    with_email["guestEmail"] = json!("may@example.com");
    let ok = post_json(app, &uri, with_email).await;
    assert_eq!(ok.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn disabled_wishes_return_403(pool: PgPool) {
    let project_id = common::seed_project(&pool, "no-wishes", true).await;
    common::seed_wish_settings(&pool, project_id, false, 500, false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/wishes"),
        heartfelt_wish("Aunt May"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects/999999/wishes",
        heartfelt_wish("Aunt May"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Persisted rate limiting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fourth_wish_in_window_returns_429(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/projects/{project_id}/wishes");
    let addr = [("x-forwarded-for", "203.0.113.9")];

    for i in 0..3 {
        let response = post_json_with_headers(
            app.clone(),
            &uri,
            heartfelt_wish(&format!("Guest {i}")),
            &addr,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "wish {i}");
    }

    let response =
        post_json_with_headers(app.clone(), &uri, heartfelt_wish("Guest 4"), &addr).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["error"], "RATE_LIMITED");
    assert!(json["resetTime"].is_string());

    // A different address is unaffected.
    let other = post_json_with_headers(
        app,
        &uri,
        heartfelt_wish("Guest 5"),
        &[("x-forwarded-for", "203.0.113.10")],
    )
    .await;
    assert_eq!(other.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rate_limit_status_does_not_consume(pool: PgPool) {
    let project_id = common::seed_open_project(&pool, "avery-jordan").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/projects/{project_id}/wishes/rate-limit");
    let addr = [("x-forwarded-for", "203.0.113.9")];

    // Fresh key: full quota, twice in a row.
    for _ in 0..2 {
        let response = get_with_headers(app.clone(), &uri, &addr).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["allowed"], true);
        assert_eq!(json["remaining"], 3);
    }

    // One submission consumes one slot.
    let submit = post_json_with_headers(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/wishes"),
        heartfelt_wish("Aunt May"),
        &addr,
    )
    .await;
    assert_eq!(submit.status(), StatusCode::CREATED);

    let response = get_with_headers(app, &uri, &addr).await;
    let json = body_json(response).await;
    assert_eq!(json["allowed"], true);
    assert_eq!(json["remaining"], 2);
}
