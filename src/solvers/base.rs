//! Base solver traits and types

use nalgebra::Vector2;
use thiserror::Error;

/// Solver-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("step() called before bootstrap()")]
    NotBootstrapped,

    #[error("bootstrap() called on a solver that is already running")]
    AlreadyBootstrapped,
}

/// Lifecycle of a two-step solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only the initial state is known
    Uninitialized,
    /// The previous-step angles have been synthesized
    Bootstrapped,
    /// At least one step has been taken
    Stepping,
}

/// Complete state of the pendulum integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorState {
    /// Current angles, wrapped to (-π, π]
    pub theta: Vector2<f64>,
    /// Angles one step back, not wrapped
    pub theta_prev: Vector2<f64>,
    /// Current angular velocities
    pub omega: Vector2<f64>,
}

/// Core solver trait for the pendulum
///
/// A solver owns its state exclusively. It starts [`Phase::Uninitialized`],
/// must be bootstrapped exactly once, then advances one fixed step per
/// call to [`step`](Solver::step).
pub trait Solver {
    /// Get current state
    fn state(&self) -> &IntegratorState;

    /// Current lifecycle phase
    fn phase(&self) -> Phase;

    /// Fixed timestep
    fn dt(&self) -> f64;

    /// Prepare the recursion from the initial state
    fn bootstrap(&mut self) -> Result<(), SolverError>;

    /// Advance the state by one timestep
    fn step(&mut self) -> Result<(), SolverError>;

    /// Reset solver to initial state
    fn reset(&mut self);

    /// Order of the method
    fn order(&self) -> usize;
}
