//! Shared utilities
//!
//! Angle wrapping and the simulation-wide constants.

pub mod angle;
pub mod constants;

pub use angle::normalize_angle;
