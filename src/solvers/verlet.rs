//! Central-difference position Verlet solver

use nalgebra::Vector2;

use super::{IntegratorState, Phase, Solver, SolverError};
use crate::config::SimulationConfig;
use crate::dynamics::AccelerationModel;
use crate::utils::normalize_angle;

/// Previous-step angles for starting the Verlet recursion
///
/// Backward second-order Taylor expansion from the initial state:
///
/// ```text
/// θ_prev = θ0 − ω0·dt + ½·α0·dt²
/// ```
///
/// `alpha0` must be evaluated at the initial state. With this choice the
/// central-difference velocity of the first step reproduces `ω0` to
/// second order.
pub fn bootstrap_previous(
    theta0: &Vector2<f64>,
    omega0: &Vector2<f64>,
    alpha0: &Vector2<f64>,
    dt: f64,
) -> Vector2<f64> {
    theta0 - omega0 * dt + alpha0 * (0.5 * dt * dt)
}

/// Position Verlet integrator for the double pendulum
///
/// Two-step recursion on the angles, with the angular velocities
/// recovered by central differences:
///
/// ```text
/// θ_{n+1} = 2·θ_n − θ_{n−1} + α(θ_n, ω_n)·dt²
/// ω_n     = (θ_{n+1} − θ_{n−1}) / (2·dt)
/// ```
///
/// # Characteristics
/// - Order: 2
/// - Explicit, fixed timestep, one acceleration evaluation per step
/// - Time-symmetric in the positions
///
/// # Note
/// The velocity is taken from the un-wrapped angles before the new angles
/// are wrapped to (-π, π]. When a wrap happens, the previous angles are
/// shifted by the same multiple of 2π, so `θ_prev` is never wrapped itself
/// but always lies on the same branch as `θ`. Crossing the ±π seam
/// therefore never shows up as a velocity spike. Initial angles are
/// wrapped on construction.
#[derive(Debug, Clone)]
pub struct Verlet {
    model: AccelerationModel,
    dt: f64,
    state: IntegratorState,
    initial: IntegratorState,
    phase: Phase,
}

impl Verlet {
    /// Create a solver for the initial conditions and parameters of `config`
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_model(config, AccelerationModel::new(config))
    }

    /// Create a solver using a custom acceleration model
    pub fn with_model(config: &SimulationConfig, model: AccelerationModel) -> Self {
        let theta = Vector2::new(normalize_angle(config.theta1), normalize_angle(config.theta2));
        let initial = IntegratorState {
            theta,
            theta_prev: theta,
            omega: Vector2::new(config.omega1, config.omega2),
        };

        Self {
            model,
            dt: config.dt,
            state: initial,
            initial,
            phase: Phase::Uninitialized,
        }
    }

    /// Acceleration model driving the solver
    pub fn model(&self) -> &AccelerationModel {
        &self.model
    }

    fn acceleration(&self) -> Vector2<f64> {
        self.model.acceleration(&self.state.theta, &self.state.omega)
    }
}

impl Solver for Verlet {
    fn state(&self) -> &IntegratorState {
        &self.state
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn bootstrap(&mut self) -> Result<(), SolverError> {
        if self.phase != Phase::Uninitialized {
            return Err(SolverError::AlreadyBootstrapped);
        }

        let alpha0 = self.acceleration();
        self.state.theta_prev =
            bootstrap_previous(&self.state.theta, &self.state.omega, &alpha0, self.dt);
        self.phase = Phase::Bootstrapped;
        Ok(())
    }

    fn step(&mut self) -> Result<(), SolverError> {
        if self.phase == Phase::Uninitialized {
            return Err(SolverError::NotBootstrapped);
        }

        let dt = self.dt;
        let alpha = self.acceleration();
        let IntegratorState {
            theta, theta_prev, ..
        } = self.state;

        let theta_new = 2.0 * theta - theta_prev + alpha * (dt * dt);
        let wrapped = theta_new.map(normalize_angle);

        self.state.omega = (theta_new - theta_prev) / (2.0 * dt);
        // Previous angles follow the wrapped ones onto the same branch
        self.state.theta_prev = theta + (wrapped - theta_new);
        self.state.theta = wrapped;
        self.phase = Phase::Stepping;
        Ok(())
    }

    fn reset(&mut self) {
        self.state = self.initial;
        self.phase = Phase::Uninitialized;
    }

    fn order(&self) -> usize {
        2
    }
}
