//! Route definitions for operator maintenance, mounted at `/maintenance`.

use axum::routing::post;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/rate-limits/cleanup", post(maintenance::cleanup_rate_limits))
}
