//! Operator maintenance endpoints.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use knotbook_core::error::CoreError;

use crate::background::rate_limit_retention::purge_stale_rate_limits;
use crate::error::{AppError, AppResult};
use crate::response::CleanupSummary;
use crate::state::AppState;

/// POST /api/v1/maintenance/rate-limits/cleanup
///
/// Purges stale wish rate-limit counters on demand (external cron). The
/// caller must present `Authorization: Bearer <CLEANUP_SECRET>`; when no
/// secret is configured the endpoint refuses everyone.
pub async fn cleanup_rate_limits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<CleanupSummary>> {
    let Some(secret) = state.config.cleanup_secret.as_deref() else {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cleanup is not configured".to_string(),
        )));
    };

    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if token != Some(secret) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or missing cleanup token".to_string(),
        )));
    }

    let deleted = purge_stale_rate_limits(&state.pool).await?;
    tracing::info!(deleted, "Rate-limit cleanup invoked via API");

    Ok(Json(CleanupSummary {
        success: true,
        deleted,
    }))
}
