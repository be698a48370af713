//! Handlers for guest RSVP submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use knotbook_core::error::CoreError;
use knotbook_core::rate_limit::{RateLimitKey, RateLimitStore};
use knotbook_core::types::DbId;
use knotbook_core::validation::{validate_rsvp, FieldLimits};
use knotbook_db::models::rsvp::{NewRsvpResponse, RsvpSettings};
use knotbook_db::repositories::RsvpRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::ClientAddr;
use crate::gate;
use crate::response::{RsvpAccepted, RsvpReceipt};
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/rsvps
///
/// Stage order: rate limit, validation, permission gate, duplicate check,
/// insert. Every attempt consumes a rate-limit slot, including attempts a
/// later stage rejects; throttled clients never reach the database-backed
/// checks.
pub async fn submit(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    client: ClientAddr,
    body: String,
) -> AppResult<(StatusCode, Json<RsvpAccepted>)> {
    let now = Utc::now();
    let policy = state.config.rsvp_policy();
    let key = RateLimitKey {
        project_id,
        client_addr: client.0.clone(),
    };
    let count = state.rsvp_limiter.increment(&key, policy.window, now).await?;
    let decision = policy.decide(count);
    if !decision.allowed {
        return Err(AppError::RateLimited {
            message: "Too many RSVP attempts from this address. Please try again later."
                .to_string(),
            reset_time: decision.reset_time,
        });
    }

    // Anything that is not a JSON object fails validation wholesale, with
    // the same envelope as field errors.
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let submission =
        validate_rsvp(&payload, &FieldLimits::default()).map_err(AppError::Validation)?;

    let settings = gate::check_rsvp_open(&state.pool, project_id).await?;

    // Duplicate detection fails open: a transient read error must not
    // block a legitimate guest. Email first, then exact name.
    if let Some(email) = submission.guest_email.as_deref() {
        match RsvpRepo::exists_by_email(&state.pool, project_id, email).await {
            Ok(true) => {
                return Err(AppError::Core(CoreError::Conflict(
                    "An RSVP with this email address has already been submitted".to_string(),
                )))
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, project_id, "Duplicate email check failed; allowing submission");
            }
        }
    }
    match RsvpRepo::exists_by_name(&state.pool, project_id, &submission.guest_name).await {
        Ok(true) => {
            return Err(AppError::Core(CoreError::Conflict(
                "An RSVP for this guest name has already been submitted".to_string(),
            )))
        }
        Ok(false) => {}
        Err(e) => {
            tracing::warn!(error = %e, project_id, "Duplicate name check failed; allowing submission");
        }
    }

    let input = NewRsvpResponse {
        project_id,
        guest_name: submission.guest_name,
        guest_email: submission.guest_email,
        guest_phone: submission.guest_phone,
        attendance_status: submission.attendance_status.as_str().to_string(),
        guest_count: submission.guest_count,
        dietary_restrictions: submission.dietary_restrictions,
        dance_song: submission.dance_song,
        advice: submission.advice,
        favorite_memory: submission.favorite_memory,
        client_addr: client.0,
    };
    let stored = RsvpRepo::insert(&state.pool, &input).await?;

    tracing::info!(project_id, rsvp_id = stored.id, "RSVP stored");

    let message = settings
        .confirmation_message
        .unwrap_or_else(|| "Thank you for your RSVP!".to_string());
    Ok((
        StatusCode::CREATED,
        Json(RsvpAccepted {
            success: true,
            message,
            data: RsvpReceipt {
                id: stored.id,
                guest_name: stored.guest_name,
                attendance_status: stored.attendance_status,
                submitted_at: stored.submitted_at,
            },
        }),
    ))
}

/// GET /api/v1/projects/{project_id}/rsvps/config
///
/// Public form configuration: which optional questions to render, the
/// deadline, the confirmation text. Denied with the same gate as
/// submissions so the site can render the closed state from the error
/// message.
pub async fn get_config(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<RsvpSettings>> {
    let settings = gate::check_rsvp_open(&state.pool, project_id).await?;
    Ok(Json(settings))
}
