//! Periodic cleanup of stale wish rate-limit counters.
//!
//! Spawns a background loop that prunes `wish_rate_limits` rows on a fixed
//! interval using `tokio::time::interval`. The same purge is reachable via
//! the authenticated maintenance endpoint for external schedulers.

use std::time::Duration;

use chrono::Utc;
use knotbook_db::repositories::RateLimitRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Idle counters older than this are purged when their count stayed low.
const IDLE_RETENTION_HOURS: i64 = 24;

/// Counts at or below this are considered low traffic.
const LOW_COUNT_MAX: i32 = 5;

/// Counters idle this long are purged regardless of count.
const HARD_RETENTION_DAYS: i64 = 7;

/// How often the cleanup loop runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// One purge pass. Shared by the interval loop and the maintenance
/// endpoint; returns the number of deleted rows.
pub async fn purge_stale_rate_limits(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    RateLimitRepo::delete_stale(
        pool,
        now - chrono::Duration::hours(IDLE_RETENTION_HOURS),
        LOW_COUNT_MAX,
        now - chrono::Duration::days(HARD_RETENTION_DAYS),
    )
    .await
}

/// Run the retention loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        idle_retention_hours = IDLE_RETENTION_HOURS,
        hard_retention_days = HARD_RETENTION_DAYS,
        "Rate-limit retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate-limit retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match purge_stale_rate_limits(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Rate-limit retention: purged stale counters");
                        } else {
                            tracing::debug!("Rate-limit retention: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rate-limit retention: cleanup failed");
                    }
                }
            }
        }
    }
}
