//! Horizontal-plane vector helpers.
//! The world is Y-up; the actor moves on the XZ plane.
use glam::{Vec2, Vec3};

use crate::constants::DIRECTION_EPSILON;

/// Drops the vertical component of `vector`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotion::vector_math::flatten;
/// assert_eq!(flatten(Vec3::new(1.0, 5.0, -2.0)), Vec3::new(1.0, 0.0, -2.0));
/// ```
#[must_use]
pub const fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Returns the horizontal components of `vector` as `(x, z)`.
#[must_use]
pub const fn horizontal(vector: Vec3) -> Vec2 {
    Vec2::new(vector.x, vector.z)
}

/// Horizontal speed of a velocity vector.
#[must_use]
pub fn horizontal_length(vector: Vec3) -> f32 {
    horizontal(vector).length()
}

/// Replaces the horizontal components of `vector`, keeping its vertical one.
#[must_use]
pub const fn with_horizontal(vector: Vec3, planar: Vec2) -> Vec3 {
    Vec3::new(planar.x, vector.y, planar.y)
}

/// Normalises `vector`, or returns `None` when it is non-finite or shorter
/// than [`DIRECTION_EPSILON`].
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotion::vector_math::safe_normalize;
/// assert_eq!(safe_normalize(Vec3::new(0.0, 0.0, 4.0)), Some(Vec3::Z));
/// assert_eq!(safe_normalize(Vec3::new(1e-9, 0.0, 0.0)), None);
/// assert_eq!(safe_normalize(Vec3::new(f32::NAN, 0.0, 0.0)), None);
/// ```
#[must_use]
pub fn safe_normalize(vector: Vec3) -> Option<Vec3> {
    if !vector.is_finite() {
        return None;
    }
    let length = vector.length();
    (length > DIRECTION_EPSILON).then(|| vector / length)
}

/// Flattens `vector` onto the horizontal plane and normalises it, falling
/// back to [`Vec3::ZERO`] when the horizontal projection is degenerate.
#[must_use]
pub fn planar_direction(vector: Vec3) -> Vec3 {
    safe_normalize(flatten(vector)).unwrap_or(Vec3::ZERO)
}
