//! Row models and DTOs, one submodule per table group.

pub mod project;
pub mod rate_limit;
pub mod rsvp;
pub mod wish;
