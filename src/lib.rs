//! Double pendulum - fixed-step simulation of a planar double pendulum
//!
//! Integrates the coupled equations of motion of two rigid links with a
//! central-difference position Verlet scheme and samples the trajectory
//! (joint angles and bob positions) for plotting.
//!
//! # Architecture
//!
//! - [`SimulationConfig`]: parameters and initial state, read from a `KEY=value` file
//! - [`dynamics`]: acceleration model, forward kinematics, energy
//! - [`solvers`]: the [`Solver`](solvers::Solver) seam and the [`Verlet`](solvers::Verlet) solver
//! - [`Simulator`]: the driver; yields [`SampleRecord`]s lazily
//! - [`output`]: the whitespace-separated text files consumed by plotting tools
//!
//! The state is a handful of scalars owned by the solver; memory use does
//! not depend on the length of the run.
//!
//! # Example
//!
//! ```rust
//! use double_pendulum::prelude::*;
//!
//! let config = SimulationConfig {
//!     theta1: 0.1,
//!     theta2: 0.0,
//!     dt: 0.001,
//!     total_time: 5.0,
//!     ..Default::default()
//! };
//!
//! for record in Simulator::new(&config, SimulationOptions::default())?.run() {
//!     let record = record?;
//!     assert!(record.theta1.abs() < std::f64::consts::PI);
//! }
//! # Ok::<(), Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod output;
pub mod simulation;
pub mod solvers;
pub mod utils;

pub use config::{ConfigError, SimulationConfig};
pub use error::Error;
pub use simulation::{SampleRecord, Samples, SimulationOptions, Simulator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, SimulationConfig};
    pub use crate::dynamics::{total_energy, AccelerationModel, Kinematics};
    pub use crate::error::Error;
    pub use crate::output::{derive_angle_path, OutputError, TrajectoryWriter};
    pub use crate::simulation::{SampleRecord, Samples, SimulationOptions, Simulator};
    pub use crate::solvers::*;
    pub use crate::utils::normalize_angle;
}
