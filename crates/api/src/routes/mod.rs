pub mod health;
pub mod maintenance;
pub mod rsvp;
pub mod wishes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// POST /projects/{project_id}/rsvps              submit an RSVP
/// GET  /projects/{project_id}/rsvps/config       public RSVP form config
///
/// POST /projects/{project_id}/wishes             submit a wish
/// GET  /projects/{project_id}/wishes             approved wishes (board)
/// GET  /projects/{project_id}/wishes/rate-limit  non-consuming quota check
///
/// POST /maintenance/rate-limits/cleanup          purge stale counters
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects/{project_id}/rsvps", rsvp::router())
        .nest("/projects/{project_id}/wishes", wishes::router())
        .nest("/maintenance", maintenance::router())
}
