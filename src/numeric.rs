//! Numeric helpers used across the project.
//!
//! These utilities guard the few divisions and angle conversions the
//! controller performs so that degenerate inputs such as `dt = 0` yield
//! finite results instead of NaNs.

use std::f32::consts::{PI, TAU};

/// Divide `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero, negative zero or non-finite.
///
/// # Examples
/// ```
/// use locomotion::numeric::safe_ratio;
/// assert_eq!(safe_ratio(3.0, 0.0, 0.0), 0.0);
/// assert!((safe_ratio(3.0, 2.0, 0.0) - 1.5).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn safe_ratio(numerator: f32, denominator: f32, fallback: f32) -> f32 {
    if denominator == 0.0 || !denominator.is_finite() {
        return fallback;
    }
    numerator / denominator
}

/// Cosine of the maximum walkable slope, expressed in degrees.
///
/// Surfaces whose normal has a vertical component at or above this value are
/// walkable.
#[must_use]
pub fn slope_limit_cosine(max_slope_degrees: f32) -> f32 {
    max_slope_degrees.to_radians().cos()
}

/// Wrap an angle into the half-open range `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, 0.0)]
    #[case::half_turn(PI, PI)]
    #[case::negative_half_turn(-PI, PI)]
    #[case::overshoot(PI + 0.5, -PI + 0.5)]
    #[case::two_turns(2.0 * TAU + 0.25, 0.25)]
    fn wrap_angle_cases(#[case] angle: f32, #[case] expected: f32) {
        assert_relative_eq!(wrap_angle(angle), expected, epsilon = 1e-5);
    }

    #[test]
    fn slope_limit_of_zero_degrees_is_flat_only() {
        assert_relative_eq!(slope_limit_cosine(0.0), 1.0);
    }

    #[test]
    fn safe_ratio_rejects_non_finite_denominator() {
        assert_eq!(safe_ratio(1.0, f32::INFINITY, -1.0), -1.0);
    }
}
