use std::sync::Arc;

use knotbook_core::rate_limit::InMemoryRateLimitStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: knotbook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Process-local RSVP rate-limit counters. State is per instance and
    /// lost on restart; the wishes pipeline uses the persisted store.
    pub rsvp_limiter: Arc<InMemoryRateLimitStore>,
}
