//! Forward kinematics of the two rigid links

use nalgebra::{Point2, Vector2};

use crate::config::SimulationConfig;

/// Maps joint angles to Cartesian bob positions
///
/// The first pivot is the origin and angles are measured from the
/// downward vertical, so the hanging rest position `θ = 0` puts the
/// first bob at `(0, −L1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    l1: f64,
    l2: f64,
}

impl Kinematics {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            l1: config.l1,
            l2: config.l2,
        }
    }

    /// Position of the first bob
    #[inline]
    pub fn position1(&self, theta1: f64) -> Point2<f64> {
        let (sin, cos) = theta1.sin_cos();
        Point2::new(self.l1 * sin, -self.l1 * cos)
    }

    /// Position of the second bob
    #[inline]
    pub fn position2(&self, theta1: f64, theta2: f64) -> Point2<f64> {
        let (sin, cos) = theta2.sin_cos();
        self.position1(theta1) + Vector2::new(self.l2 * sin, -self.l2 * cos)
    }
}
