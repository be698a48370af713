//! Route definitions for the RSVP pipeline, mounted at
//! `/projects/{project_id}/rsvps`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rsvp;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(rsvp::submit))
        .route("/config", get(rsvp::get_config))
}
