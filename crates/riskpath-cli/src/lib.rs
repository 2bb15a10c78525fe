//! Riskpath CLI - terminal front end for the route planner.
//!
//! The `riskpath` binary generates terrain, searches routes between two
//! endpoints and plays the selected route back as a timed mission.

pub mod config;
pub mod loops;
pub mod render;
pub mod scenario;

pub use config::Config;
pub use scenario::{complete_endpoints, pick_endpoints};
