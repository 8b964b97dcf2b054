//! Angular accelerations of the double pendulum

use nalgebra::Vector2;

use crate::config::SimulationConfig;
use crate::utils::constants::{ACCELERATION_LIMIT, DENOMINATOR_FLOOR};

/// Closed-form acceleration model of the coupled double pendulum
///
/// Angles are measured from the downward vertical. With `Δ = θ2 − θ1`:
///
/// ```text
/// d1 = (M1+M2)·L1 − M2·L1·cos²Δ
/// d2 = (L2/L1)·d1
/// α1 = [−M2·L1·ω1²·sinΔ·cosΔ + M2·G·sinθ2·cosΔ + M2·L2·ω2²·sinΔ − (M1+M2)·G·sinθ1] / d1
/// α2 = [−M2·L2·ω2²·sinΔ·cosΔ + (M1+M2)·G·sinθ1·cosΔ + (M1+M2)·L1·ω1²·sinΔ − (M1+M2)·G·sinθ2] / d2
/// ```
///
/// # Note
/// The signs of the two ω1² terms are opposite to the textbook Lagrangian
/// form. The expressions are kept exactly as written above; re-derive them
/// against a trusted reference before changing either sign.
///
/// # Numerical safety
/// Denominators smaller in magnitude than `denominator_floor` are replaced
/// by the floor, keeping their sign, and both accelerations are clamped to
/// `±acceleration_limit`. The result is always bounded for finite input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationModel {
    l1: f64,
    l2: f64,
    m1: f64,
    m2: f64,
    g: f64,
    denominator_floor: f64,
    acceleration_limit: f64,
}

impl AccelerationModel {
    /// Create the model for the parameters of `config` with the default limits
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            l1: config.l1,
            l2: config.l2,
            m1: config.m1,
            m2: config.m2,
            g: config.g,
            denominator_floor: DENOMINATOR_FLOOR,
            acceleration_limit: ACCELERATION_LIMIT,
        }
    }

    /// Replace the denominator floor and the acceleration bound
    pub fn with_limits(mut self, denominator_floor: f64, acceleration_limit: f64) -> Self {
        self.denominator_floor = denominator_floor;
        self.acceleration_limit = acceleration_limit;
        self
    }

    pub fn denominator_floor(&self) -> f64 {
        self.denominator_floor
    }

    pub fn acceleration_limit(&self) -> f64 {
        self.acceleration_limit
    }

    /// Angular accelerations `[α1, α2]` at angles `theta` and angular
    /// velocities `omega`
    pub fn acceleration(&self, theta: &Vector2<f64>, omega: &Vector2<f64>) -> Vector2<f64> {
        let (l1, l2, m1, m2, g) = (self.l1, self.l2, self.m1, self.m2, self.g);
        let (theta1, theta2) = (theta[0], theta[1]);
        let (w1_sq, w2_sq) = (omega[0] * omega[0], omega[1] * omega[1]);
        let m = m1 + m2;

        let (sin_delta, cos_delta) = (theta2 - theta1).sin_cos();

        let denom1 = m * l1 - m2 * l1 * cos_delta * cos_delta;
        let denom2 = (l2 / l1) * denom1;
        let denom1 = clamp_denominator(denom1, self.denominator_floor);
        let denom2 = clamp_denominator(denom2, self.denominator_floor);

        let alpha1 = (-m2 * l1 * w1_sq * sin_delta * cos_delta
            + m2 * g * theta2.sin() * cos_delta
            + m2 * l2 * w2_sq * sin_delta
            - m * g * theta1.sin())
            / denom1;

        let alpha2 = (-m2 * l2 * w2_sq * sin_delta * cos_delta
            + m * g * theta1.sin() * cos_delta
            + m * l1 * w1_sq * sin_delta
            - m * g * theta2.sin())
            / denom2;

        let limit = self.acceleration_limit;
        Vector2::new(alpha1.clamp(-limit, limit), alpha2.clamp(-limit, limit))
    }
}

/// Raise `|value|` to at least `floor`, keeping the sign
fn clamp_denominator(value: f64, floor: f64) -> f64 {
    if value.abs() < floor {
        floor.copysign(value)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_model() -> AccelerationModel {
        AccelerationModel::new(&SimulationConfig::default())
    }

    #[test]
    fn test_rest_has_no_acceleration() {
        let alpha = unit_model().acceleration(&Vector2::zeros(), &Vector2::zeros());
        assert_eq!(alpha, Vector2::zeros());
    }

    #[test]
    fn test_aligned_links_static() {
        // Both links at the same angle, at rest: delta = 0, d1 = M1*L1
        // α1 = (M2*G*sinθ − (M1+M2)*G*sinθ) / (M1*L1) = −G*sinθ/L1
        // α2 = ((M1+M2)*G*sinθ − (M1+M2)*G*sinθ) / d2 = 0
        let model = unit_model();
        let theta = Vector2::new(0.3, 0.3);
        let alpha = model.acceleration(&theta, &Vector2::zeros());

        assert_relative_eq!(alpha[0], -9.81 * 0.3_f64.sin(), epsilon = 1e-12);
        assert_relative_eq!(alpha[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_restoring_direction() {
        let model = unit_model();
        let alpha = model.acceleration(&Vector2::new(0.2, 0.0), &Vector2::zeros());
        assert!(alpha[0] < 0.0);

        let alpha = model.acceleration(&Vector2::new(-0.2, 0.0), &Vector2::zeros());
        assert!(alpha[0] > 0.0);
    }

    #[test]
    fn test_near_singular_denominator_is_bounded() {
        // M1 = 0 makes d1 = M2*L1*sin²Δ, which vanishes as Δ → 0
        let config = SimulationConfig {
            m1: 0.0,
            ..Default::default()
        };
        let model = AccelerationModel::new(&config);
        let theta = Vector2::new(1.0, 1.0 + 1e-6);
        let alpha = model.acceleration(&theta, &Vector2::new(0.5, -0.5));

        for a in alpha.iter() {
            assert!(a.is_finite());
            assert!(a.abs() <= ACCELERATION_LIMIT);
        }
        // Unclamped α1 would be on the order of 5e4
        assert_eq!(alpha[0], ACCELERATION_LIMIT);
    }

    #[test]
    fn test_exactly_singular_denominator_is_finite() {
        let config = SimulationConfig {
            m1: 0.0,
            ..Default::default()
        };
        let model = AccelerationModel::new(&config);
        let alpha = model.acceleration(&Vector2::new(0.7, 0.7), &Vector2::new(3.0, 1.0));
        assert!(alpha.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn test_acceleration_limit() {
        let model = unit_model();
        let alpha = model.acceleration(&Vector2::new(0.0, 1.0), &Vector2::new(1.0e4, 1.0e4));
        assert!(alpha.iter().all(|a| a.abs() == ACCELERATION_LIMIT));
    }

    #[test]
    fn test_custom_limits() {
        let model = unit_model().with_limits(1e-6, 5.0);
        assert_eq!(model.denominator_floor(), 1e-6);
        assert_eq!(model.acceleration_limit(), 5.0);

        let alpha = model.acceleration(&Vector2::new(1.5, 1.0), &Vector2::zeros());
        assert!(alpha.iter().all(|a| a.abs() <= 5.0));
    }

    #[test]
    fn test_clamp_denominator_keeps_sign() {
        assert_eq!(clamp_denominator(1e-12, 1e-10), 1e-10);
        assert_eq!(clamp_denominator(-1e-12, 1e-10), -1e-10);
        assert_eq!(clamp_denominator(0.0, 1e-10), 1e-10);
        assert_eq!(clamp_denominator(2.0, 1e-10), 2.0);
        assert_eq!(clamp_denominator(-2.0, 1e-10), -2.0);
    }
}
