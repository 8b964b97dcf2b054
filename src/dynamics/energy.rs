//! Mechanical energy of the double pendulum

use nalgebra::Vector2;

use crate::config::SimulationConfig;

/// Total mechanical energy `T + V` for point-mass bobs on massless links
///
/// The potential is zero at the pivot height, so the hanging rest
/// position has energy `−(M1+M2)·G·L1 − M2·G·L2`.
pub fn total_energy(config: &SimulationConfig, theta: &Vector2<f64>, omega: &Vector2<f64>) -> f64 {
    let SimulationConfig { l1, l2, m1, m2, g, .. } = *config;
    let (w1, w2) = (omega[0], omega[1]);

    let kinetic = 0.5 * (m1 + m2) * l1 * l1 * w1 * w1
        + 0.5 * m2 * l2 * l2 * w2 * w2
        + m2 * l1 * l2 * w1 * w2 * (theta[0] - theta[1]).cos();
    let potential = -(m1 + m2) * g * l1 * theta[0].cos() - m2 * g * l2 * theta[1].cos();

    kinetic + potential
}
