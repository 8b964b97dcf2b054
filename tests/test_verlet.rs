//! Verlet solver evaluation tests
//!
//! Checks the solver against limits with known behavior:
//! - hanging rest position is an exact equilibrium
//! - small oscillations stay small
//! - a very light lower bob leaves the upper link a simple pendulum,
//!   θ1(t) ≈ θ0·cos(√(g/L1)·t)
//! - mirrored initial conditions give mirrored motion
//! - chaotic motion stays finite, wrapped and reproducible

use approx::assert_relative_eq;
use double_pendulum::prelude::*;
use nalgebra::Vector2;
use std::f64::consts::PI;

fn run_steps(config: &SimulationConfig, steps: usize) -> Verlet {
    let mut solver = Verlet::new(config);
    solver.bootstrap().unwrap();
    for _ in 0..steps {
        solver.step().unwrap();
    }
    solver
}

#[test]
fn test_rest_is_equilibrium() {
    let config = SimulationConfig {
        theta1: 0.0,
        theta2: 0.0,
        ..Default::default()
    };
    let solver = run_steps(&config, 1000);

    assert_eq!(solver.state().theta, Vector2::zeros());
    assert_eq!(solver.state().omega, Vector2::zeros());
}

#[test]
fn test_small_angles_stay_bounded() {
    let config = SimulationConfig {
        theta1: 0.1,
        theta2: 0.0,
        omega1: 0.0,
        omega2: 0.0,
        dt: 0.001,
        total_time: 5.0,
        ..Default::default()
    };

    let mut solver = Verlet::new(&config);
    solver.bootstrap().unwrap();
    for _ in 0..config.steps() {
        solver.step().unwrap();
        let theta = solver.state().theta;
        assert!(theta[0].abs() < 0.5, "theta1 = {}", theta[0]);
        assert!(theta[1].abs() < 0.5, "theta2 = {}", theta[1]);
    }
}

#[test]
fn test_light_lower_bob_is_simple_pendulum() {
    let theta0 = 0.1;
    let config = SimulationConfig {
        m2: 1e-6,
        theta1: theta0,
        theta2: theta0,
        dt: 0.001,
        total_time: 2.0,
        ..Default::default()
    };
    let natural = (config.g / config.l1).sqrt();

    let mut solver = Verlet::new(&config);
    solver.bootstrap().unwrap();
    for n in 1..=config.steps() {
        solver.step().unwrap();
        if n % 250 == 0 {
            let t = n as f64 * config.dt;
            let expected = theta0 * (natural * t).cos();
            assert_relative_eq!(solver.state().theta[0], expected, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_mirrored_start_gives_mirrored_motion() {
    let config = SimulationConfig {
        theta1: 0.4,
        theta2: -0.2,
        omega1: 0.3,
        omega2: 0.0,
        ..Default::default()
    };
    let mirrored = SimulationConfig {
        theta1: -0.4,
        theta2: 0.2,
        omega1: -0.3,
        ..config
    };

    let a = run_steps(&config, 800);
    let b = run_steps(&mirrored, 800);

    for i in 0..2 {
        assert_relative_eq!(a.state().theta[i], -b.state().theta[i], epsilon = 1e-12);
        assert_relative_eq!(a.state().omega[i], -b.state().omega[i], epsilon = 1e-12);
    }
}

#[test]
fn test_chaotic_run_stays_finite_and_wrapped() {
    let config = SimulationConfig {
        theta1: 3.0,
        theta2: -3.0,
        omega1: 4.0,
        omega2: -6.0,
        ..Default::default()
    };

    let mut solver = Verlet::new(&config);
    solver.bootstrap().unwrap();
    for _ in 0..config.steps() {
        solver.step().unwrap();
        let state = solver.state();
        assert!(state.theta.iter().all(|t| t.is_finite() && *t > -PI && *t <= PI));
        assert!(state.omega.iter().all(|w| w.is_finite()));
    }
}

#[test]
fn test_deterministic() {
    let config = SimulationConfig::default();
    let a = run_steps(&config, 1500);
    let b = run_steps(&config, 1500);

    assert_eq!(a.state(), b.state());
}

#[test]
fn test_reset_reproduces_run() {
    let config = SimulationConfig::default();
    let mut solver = run_steps(&config, 700);
    let first = *solver.state();

    solver.reset();
    solver.bootstrap().unwrap();
    for _ in 0..700 {
        solver.step().unwrap();
    }
    assert_eq!(*solver.state(), first);
}

#[test]
fn test_custom_model_limits_are_used() {
    let config = SimulationConfig::default();
    let model = AccelerationModel::new(&config).with_limits(1e-10, 0.5);
    let mut solver = Verlet::with_model(&config, model);
    solver.bootstrap().unwrap();

    let before = *solver.state();
    solver.step().unwrap();
    let after = solver.state();

    // |Δθ − (θ − θ_prev)| = |α|·dt² ≤ 0.5·dt²
    let accel_term = (after.theta - before.theta) - (before.theta - before.theta_prev);
    let bound = 0.5 * config.dt * config.dt + 1e-12;
    assert!(accel_term.iter().all(|a| a.abs() <= bound));
}

#[test]
fn test_solver_metadata() {
    let config = SimulationConfig::default();
    let solver = Verlet::new(&config);
    assert_eq!(solver.order(), 2);
    assert_eq!(solver.dt(), config.dt);
    assert_eq!(solver.phase(), Phase::Uninitialized);
}
