//! Alternative-route requests for a reported delay.

pub mod advisor;
pub mod prompt;

pub use advisor::RouteAdvisor;
pub use prompt::{Coordinate, advisory_prompt};
