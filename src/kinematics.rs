//! Kinematic helper functions.
//!
//! Pure vector math used by the locomotion controller. All helpers act on
//! the horizontal components of a velocity and leave the vertical component
//! untouched, so they can be tested in isolation from grounding and gravity.

use glam::Vec3;

use crate::constants::FRICTION_STOP_EPSILON;
use crate::vector_math::{horizontal, with_horizontal};

/// Accelerates `velocity` toward `target_speed` along `wish_direction`.
///
/// Only the component already aligned with `wish_direction` is considered:
/// if it falls short of `target_speed`, up to `accel * dt` is added along the
/// wish direction, never more than the deficit. The helper never slows the
/// actor down. `wish_direction` is expected to be unit length and horizontal.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotion::kinematics::accelerate_toward;
/// let v = accelerate_toward(Vec3::ZERO, Vec3::X, 7.5, 38.0, 0.01);
/// assert!((v.x - 0.38).abs() < 1e-6);
/// let capped = accelerate_toward(Vec3::new(7.4, 0.0, 0.0), Vec3::X, 7.5, 38.0, 0.1);
/// assert!((capped.x - 7.5).abs() < 1e-6);
/// ```
#[must_use]
pub fn accelerate_toward(
    velocity: Vec3,
    wish_direction: Vec3,
    target_speed: f32,
    accel: f32,
    dt: f32,
) -> Vec3 {
    let current = velocity.dot(wish_direction);
    let deficit = target_speed - current;
    if deficit <= 0.0 {
        return velocity;
    }
    let gain = (accel * dt).min(deficit);
    velocity + wish_direction * gain
}

/// Reduces horizontal speed by `rate * dt`, preserving direction.
///
/// Speeds that would fall below a tiny epsilon snap to zero so no residual
/// drift survives.
#[must_use]
pub fn apply_friction(velocity: Vec3, rate: f32, dt: f32) -> Vec3 {
    decay_horizontal(velocity, rate * dt, FRICTION_STOP_EPSILON)
}

/// Brakes horizontal motion at `decel`, hard-stopping below `stop_epsilon`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotion::kinematics::apply_braking;
/// let slowed = apply_braking(Vec3::new(4.0, -1.0, 0.0), 20.0, 0.1, 0.06);
/// assert!((slowed.x - 2.0).abs() < 1e-6);
/// assert_eq!(slowed.y, -1.0);
/// let stopped = apply_braking(Vec3::new(0.05, 0.0, 0.0), 20.0, 0.0, 0.06);
/// assert_eq!(stopped, Vec3::ZERO);
/// ```
#[must_use]
pub fn apply_braking(velocity: Vec3, decel: f32, dt: f32, stop_epsilon: f32) -> Vec3 {
    decay_horizontal(velocity, decel * dt, stop_epsilon)
}

fn decay_horizontal(velocity: Vec3, drop: f32, stop_epsilon: f32) -> Vec3 {
    let planar = horizontal(velocity);
    let speed = planar.length();
    let reduced = (speed - drop).max(0.0);
    if reduced < stop_epsilon || speed <= 0.0 {
        return with_horizontal(velocity, glam::Vec2::ZERO);
    }
    with_horizontal(velocity, planar * (reduced / speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_math::horizontal_length;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::from_rest(Vec3::ZERO, 0.016, 38.0 * 0.016)]
    #[case::near_cap(Vec3::new(7.0, 0.0, 0.0), 0.1, 7.5)]
    #[case::at_cap(Vec3::new(7.5, 0.0, 0.0), 0.1, 7.5)]
    #[case::over_cap(Vec3::new(9.0, 0.0, 0.0), 0.1, 9.0)]
    fn accelerate_never_overshoots(#[case] start: Vec3, #[case] dt: f32, #[case] expected: f32) {
        let result = accelerate_toward(start, Vec3::X, 7.5, 38.0, dt);
        assert_relative_eq!(result.x, expected, epsilon = 1e-5);
    }

    #[test]
    fn accelerate_only_adds_along_wish() {
        let start = Vec3::new(0.0, -3.0, 5.0);
        let result = accelerate_toward(start, Vec3::X, 7.5, 38.0, 0.1);
        assert_relative_eq!(result.z, 5.0);
        assert_relative_eq!(result.y, -3.0);
        assert_relative_eq!(result.x, 3.8, epsilon = 1e-5);
    }

    #[test]
    fn accelerate_reverses_opposing_velocity() {
        let result = accelerate_toward(Vec3::new(-2.0, 0.0, 0.0), Vec3::X, 7.5, 38.0, 0.01);
        assert!(result.x > -2.0);
    }

    #[test]
    fn friction_scales_direction_proportionally() {
        let result = apply_friction(Vec3::new(3.0, 1.0, 4.0), 10.0, 0.1);
        assert_relative_eq!(horizontal_length(result), 4.0, epsilon = 1e-5);
        assert_relative_eq!(result.x / result.z, 0.75, epsilon = 1e-5);
        assert_relative_eq!(result.y, 1.0);
    }

    #[test]
    fn friction_snaps_residual_drift() {
        let result = apply_friction(Vec3::new(0.0005, 0.0, 0.0), 0.0, 0.1);
        assert_eq!(result, Vec3::ZERO);
    }

    #[rstest]
    #[case::large_step(Vec3::new(1.0, 0.0, 0.0), 1.0)]
    #[case::below_epsilon(Vec3::new(0.0, 0.0, 0.05), 0.0)]
    fn braking_hard_stops(#[case] start: Vec3, #[case] dt: f32) {
        let result = apply_braking(start, 20.0, dt, 0.06);
        assert_eq!(horizontal_length(result), 0.0);
    }
}
