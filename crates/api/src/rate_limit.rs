//! Persisted [`RateLimitStore`] backed by the `wish_rate_limits` table.
//!
//! Used by the wishes pipeline so counters survive restarts and are shared
//! across instances; the RSVP pipeline keeps the in-memory store from
//! `knotbook_core`. The wishes handler calls this directly in-process —
//! there is no network hop to a sibling endpoint.

use async_trait::async_trait;
use chrono::Duration;
use knotbook_core::error::CoreError;
use knotbook_core::rate_limit::{RateLimitKey, RateLimitStore, WindowCount};
use knotbook_core::types::Timestamp;
use knotbook_db::repositories::RateLimitRepo;
use knotbook_db::DbPool;

/// Fixed-window counters persisted in Postgres.
#[derive(Clone)]
pub struct PgRateLimitStore {
    pool: DbPool,
}

impl PgRateLimitStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateLimitStore for PgRateLimitStore {
    async fn increment(
        &self,
        key: &RateLimitKey,
        window: Duration,
        now: Timestamp,
    ) -> Result<WindowCount, CoreError> {
        let expired_before = now - window;
        let row = RateLimitRepo::increment(
            &self.pool,
            key.project_id,
            &key.client_addr,
            now,
            expired_before,
        )
        .await
        .map_err(|e| CoreError::Internal(format!("rate-limit store: {e}")))?;
        Ok(WindowCount {
            count: row.submission_count.max(1) as u32,
            window_start: row.window_started_at,
        })
    }

    async fn peek(
        &self,
        key: &RateLimitKey,
        window: Duration,
        now: Timestamp,
    ) -> Result<Option<WindowCount>, CoreError> {
        let row = RateLimitRepo::find(&self.pool, key.project_id, &key.client_addr)
            .await
            .map_err(|e| CoreError::Internal(format!("rate-limit store: {e}")))?;
        Ok(row
            .filter(|r| now - r.window_started_at < window)
            .map(|r| WindowCount {
                count: r.submission_count.max(1) as u32,
                window_start: r.window_started_at,
            }))
    }
}
