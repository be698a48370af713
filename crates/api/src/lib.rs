//! Knotbook guest-submission API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! background tasks) so integration tests and the binary entrypoint can
//! both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod handlers;
pub mod rate_limit;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
