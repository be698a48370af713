//! Repository for the persisted `wish_rate_limits` counters.

use chrono::{DateTime, Utc};
use knotbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::rate_limit::WishRateLimit;

const COLUMNS: &str =
    "project_id, client_addr, submission_count, window_started_at, last_submission_at";

/// Atomic fixed-window counter operations.
pub struct RateLimitRepo;

impl RateLimitRepo {
    /// Record an attempt in a single round-trip.
    ///
    /// `expired_before` is `now - window`: a row whose window started at or
    /// before it gets a fresh window (count 1 starting at `now`), otherwise
    /// the count increments and the window start is preserved. The upsert
    /// keeps concurrent attempts for the same key serialized by the row
    /// lock, so counts never race.
    pub async fn increment(
        pool: &PgPool,
        project_id: DbId,
        client_addr: &str,
        now: DateTime<Utc>,
        expired_before: DateTime<Utc>,
    ) -> Result<WishRateLimit, sqlx::Error> {
        let query = format!(
            "INSERT INTO wish_rate_limits \
                 (project_id, client_addr, submission_count, window_started_at, last_submission_at) \
             VALUES ($1, $2, 1, $3, $3) \
             ON CONFLICT (project_id, client_addr) DO UPDATE SET \
                 submission_count = CASE \
                     WHEN wish_rate_limits.window_started_at <= $4 THEN 1 \
                     ELSE wish_rate_limits.submission_count + 1 \
                 END, \
                 window_started_at = CASE \
                     WHEN wish_rate_limits.window_started_at <= $4 THEN $3 \
                     ELSE wish_rate_limits.window_started_at \
                 END, \
                 last_submission_at = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WishRateLimit>(&query)
            .bind(project_id)
            .bind(client_addr)
            .bind(now)
            .bind(expired_before)
            .fetch_one(pool)
            .await
    }

    /// Read a counter without consuming an attempt.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        client_addr: &str,
    ) -> Result<Option<WishRateLimit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wish_rate_limits \
             WHERE project_id = $1 AND client_addr = $2"
        );
        sqlx::query_as::<_, WishRateLimit>(&query)
            .bind(project_id)
            .bind(client_addr)
            .fetch_optional(pool)
            .await
    }

    /// Purge stale counters. Rows idle since `idle_cutoff` are removed when
    /// their count never exceeded `low_count_max`; rows idle since
    /// `hard_cutoff` are removed unconditionally. Returns the number of
    /// deleted rows.
    pub async fn delete_stale(
        pool: &PgPool,
        idle_cutoff: DateTime<Utc>,
        low_count_max: i32,
        hard_cutoff: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM wish_rate_limits \
             WHERE (last_submission_at < $1 AND submission_count <= $2) \
                OR last_submission_at < $3",
        )
        .bind(idle_cutoff)
        .bind(low_count_max)
        .bind(hard_cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
