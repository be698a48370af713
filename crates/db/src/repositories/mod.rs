//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod project_repo;
pub mod rate_limit_repo;
pub mod rsvp_repo;
pub mod wish_repo;

pub use project_repo::ProjectRepo;
pub use rate_limit_repo::RateLimitRepo;
pub use rsvp_repo::RsvpRepo;
pub use wish_repo::WishRepo;
