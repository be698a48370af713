//! Persisted rate-limit counter model.

use knotbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A fixed-window counter row from `wish_rate_limits`, keyed by
/// (project, client address).
#[derive(Debug, Clone, FromRow)]
pub struct WishRateLimit {
    pub project_id: DbId,
    pub client_addr: String,
    pub submission_count: i32,
    pub window_started_at: Timestamp,
    pub last_submission_at: Timestamp,
}
