//! Handlers for the guest wishes board.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use knotbook_core::rate_limit::{RateLimitDecision, RateLimitKey, RateLimitStore};
use knotbook_core::spam::score_wish;
use knotbook_core::types::DbId;
use knotbook_core::validation::{check_wish_settings, validate_wish, FieldLimits};
use knotbook_db::models::wish::{GuestWish, NewGuestWish, WISH_STATUS_APPROVED, WISH_STATUS_PENDING};
use knotbook_db::repositories::WishRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::ClientAddr;
use crate::gate;
use crate::rate_limit::PgRateLimitStore;
use crate::response::WishAccepted;
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/wishes
///
/// Stage order mirrors the RSVP pipeline: rate limit, structural
/// validation, permission gate, config-driven validation, spam scoring,
/// insert. The spam verdict is advisory: a flagged wish is stored as
/// `pending` for moderation instead of `approved`, never rejected.
pub async fn submit(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    client: ClientAddr,
    body: String,
) -> AppResult<(StatusCode, Json<WishAccepted>)> {
    let now = Utc::now();
    let policy = state.config.wish_policy();
    let key = RateLimitKey {
        project_id,
        client_addr: client.0.clone(),
    };
    // The persisted limiter fails OPEN: an unreachable counter store is
    // logged and the submission proceeds as if it opened a fresh window.
    let store = PgRateLimitStore::new(state.pool.clone());
    let decision = match store.increment(&key, policy.window, now).await {
        Ok(count) => policy.decide(count),
        Err(e) => {
            tracing::warn!(error = %e, project_id, "Wish rate-limit check failed; allowing submission");
            policy.fresh(now)
        }
    };
    if !decision.allowed {
        return Err(AppError::RateLimited {
            message: "Too many wishes from this address. Please try again later.".to_string(),
            reset_time: decision.reset_time,
        });
    }

    // Anything that is not a JSON object fails validation wholesale.
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let wish = validate_wish(&payload, &FieldLimits::default()).map_err(AppError::Validation)?;

    let settings = gate::check_wishes_open(&state.pool, project_id).await?;

    let config_errors = check_wish_settings(
        &wish,
        settings.max_message_length.max(0) as usize,
        settings.require_email,
    );
    if !config_errors.is_empty() {
        return Err(AppError::Validation(config_errors));
    }

    let verdict = score_wish(&wish.guest_name, &wish.message);
    let status = if verdict.is_spam {
        tracing::info!(
            project_id,
            spam_score = verdict.spam_score,
            reasons = ?verdict.reasons,
            "Wish flagged for moderation"
        );
        WISH_STATUS_PENDING
    } else {
        WISH_STATUS_APPROVED
    };

    let stored = WishRepo::insert(
        &state.pool,
        &NewGuestWish {
            project_id,
            guest_name: wish.guest_name,
            guest_email: wish.guest_email,
            message: wish.message,
            status: status.to_string(),
            spam_score: verdict.spam_score as i32,
            client_addr: client.0,
        },
    )
    .await?;

    let message = if verdict.is_spam {
        "Thank you! Your wish is awaiting review.".to_string()
    } else {
        "Thank you for your wishes!".to_string()
    };
    Ok((
        StatusCode::CREATED,
        Json(WishAccepted {
            success: true,
            status: stored.status.clone(),
            message,
            spam_score: stored.spam_score,
            remaining: decision.remaining,
            wish: stored,
        }),
    ))
}

/// GET /api/v1/projects/{project_id}/wishes
///
/// The public board: approved wishes only, newest first.
pub async fn list_approved(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<GuestWish>>> {
    gate::check_wishes_open(&state.pool, project_id).await?;
    let wishes = WishRepo::list_approved(&state.pool, project_id).await?;
    Ok(Json(wishes))
}

/// GET /api/v1/projects/{project_id}/wishes/rate-limit
///
/// Non-consuming quota check so the site can show guests how many wishes
/// they have left. Fails open like the submit path.
pub async fn rate_limit_status(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    client: ClientAddr,
) -> AppResult<Json<RateLimitDecision>> {
    let now = Utc::now();
    let policy = state.config.wish_policy();
    let key = RateLimitKey {
        project_id,
        client_addr: client.0,
    };
    let store = PgRateLimitStore::new(state.pool.clone());
    let status = match store.peek(&key, policy.window, now).await {
        Ok(Some(count)) => {
            let decision = policy.decide(count);
            // `decide` judges an attempt already recorded; for a peek,
            // "allowed" means a further submission would still fit.
            RateLimitDecision {
                allowed: decision.remaining > 0,
                ..decision
            }
        }
        Ok(None) => policy.fresh(now),
        Err(e) => {
            tracing::warn!(error = %e, project_id, "Wish rate-limit peek failed; reporting full quota");
            policy.fresh(now)
        }
    };
    Ok(Json(status))
}
