//! Route definitions for the wishes board, mounted at
//! `/projects/{project_id}/wishes`.

use axum::routing::get;
use axum::Router;

use crate::handlers::wishes;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wishes::list_approved).post(wishes::submit))
        .route("/rate-limit", get(wishes::rate_limit_status))
}
