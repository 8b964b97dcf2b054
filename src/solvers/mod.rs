//! Time-stepping solvers
//!
//! Provides the solver seam used by the simulation driver and its one
//! implementation:
//! - Central-difference position Verlet with a Taylor bootstrap step

mod base;
mod verlet;

pub use base::*;
pub use verlet::{bootstrap_previous, Verlet};
