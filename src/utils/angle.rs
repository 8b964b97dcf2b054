//! Angle wrapping

use std::f64::consts::{PI, TAU};

/// Wrap an angle into the half-open interval (-π, π]
///
/// Angles already inside the interval are returned untouched, so the
/// function is exactly idempotent. Far-out angles are first reduced with
/// an exact `fmod`, which bounds the correction loop to a single pass.
/// Non-finite input is passed through.
///
/// # Example
///
/// ```
/// use double_pendulum::utils::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert_eq!(normalize_angle(-PI), PI);
/// assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }

    let mut wrapped = angle % TAU;
    while wrapped > PI {
        wrapped -= TAU;
    }
    while wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}
