//! Footprint collision against static level geometry.
//!
//! Colliders are axis-aligned rectangles on the XZ plane with infinite
//! vertical extent. The actor's footprint is a circle of the capsule radius.
//! Each collider is resolved once per frame in slice order; this is not a
//! relaxation solver, so overlapping colliders may take several frames to
//! settle fully.

use glam::{Vec2, Vec3};
use log::trace;

use crate::vector_math::{horizontal, with_horizontal};

/// A wall or pillar footprint: `min` and `max` corners on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    /// Minimum `(x, z)` corner.
    pub min: Vec2,
    /// Maximum `(x, z)` corner.
    pub max: Vec2,
}

impl StaticCollider {
    /// Creates a collider from two opposite corners in any order.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use locomotion::StaticCollider;
    /// let collider = StaticCollider::new(5.0, 5.0, 0.0, 0.0);
    /// assert_eq!(collider.min, Vec2::ZERO);
    /// assert_eq!(collider.max, Vec2::splat(5.0));
    /// ```
    #[must_use]
    pub fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min: Vec2::new(min_x.min(max_x), min_z.min(max_z)),
            max: Vec2::new(min_x.max(max_x), min_z.max(max_z)),
        }
    }

    /// Nearest point of the rectangle to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Whether `point` lies inside or on the boundary of the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Distance from `point` to the rectangle; zero when inside.
    #[must_use]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point.distance(self.closest_point(point))
    }
}

/// Pushes a circular footprint of `radius` at `position` out of `collider`.
///
/// Returns `true` when a correction was applied. The inward component of
/// `velocity` along the separating axis is removed; an outward component is
/// left alone.
pub fn resolve_collider(
    collider: &StaticCollider,
    radius: f32,
    position: &mut Vec3,
    velocity: &mut Vec3,
) -> bool {
    let centre = horizontal(*position);
    let planar_velocity = horizontal(*velocity);

    let (corrected, axis) = if collider.contains(centre) {
        push_out_of_interior(collider, radius, centre)
    } else {
        let offset = centre - collider.closest_point(centre);
        let distance = offset.length();
        if distance >= radius {
            return false;
        }
        let axis = offset / distance;
        (centre + axis * (radius - distance), axis)
    };

    let inward = planar_velocity.dot(axis);
    let resolved_velocity = if inward < 0.0 {
        planar_velocity - axis * inward
    } else {
        planar_velocity
    };

    *position = with_horizontal(*position, corrected);
    *velocity = with_horizontal(*velocity, resolved_velocity);
    true
}

/// Resolves a centre that has tunnelled into the rectangle along the axis of
/// least penetration.
fn push_out_of_interior(collider: &StaticCollider, radius: f32, centre: Vec2) -> (Vec2, Vec2) {
    let exits = [
        (centre.x - collider.min.x, Vec2::NEG_X),
        (collider.max.x - centre.x, Vec2::X),
        (centre.y - collider.min.y, Vec2::NEG_Y),
        (collider.max.y - centre.y, Vec2::Y),
    ];
    let (depth, axis) = exits
        .into_iter()
        .fold((f32::INFINITY, Vec2::X), |best, exit| {
            if exit.0 < best.0 {
                exit
            } else {
                best
            }
        });
    (centre + axis * (depth + radius), axis)
}

/// Resolves the footprint against every collider once, in slice order.
///
/// Returns the number of colliders that applied a correction.
pub fn resolve_all(
    colliders: &[StaticCollider],
    radius: f32,
    position: &mut Vec3,
    velocity: &mut Vec3,
) -> usize {
    let mut corrections = 0;
    for collider in colliders {
        if resolve_collider(collider, radius, position, velocity) {
            corrections += 1;
            trace!("footprint pushed out of {collider:?} to {position:?}");
        }
    }
    corrections
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const RADIUS: f32 = 0.35;

    fn unit_box() -> StaticCollider {
        StaticCollider::new(0.0, 0.0, 1.0, 1.0)
    }

    #[rstest]
    #[case::left(Vec3::new(-0.2, 1.0, 0.5), Vec3::new(2.0, 0.0, 0.0), Vec2::NEG_X)]
    #[case::far_side(Vec3::new(1.1, 1.0, 0.5), Vec3::new(-3.0, 0.0, 1.0), Vec2::X)]
    #[case::below(Vec3::new(0.5, 1.0, -0.1), Vec3::new(0.0, 0.0, 4.0), Vec2::NEG_Y)]
    fn pushes_out_along_face_normal(
        #[case] start: Vec3,
        #[case] start_velocity: Vec3,
        #[case] axis: Vec2,
    ) {
        let mut position = start;
        let mut velocity = start_velocity;
        assert!(resolve_collider(&unit_box(), RADIUS, &mut position, &mut velocity));
        assert_relative_eq!(unit_box().distance_to(horizontal(position)), RADIUS, epsilon = 1e-5);
        assert!(horizontal(velocity).dot(axis) >= 0.0);
        assert_relative_eq!(position.y, start.y);
    }

    #[test]
    fn corner_contact_pushes_diagonally() {
        let mut position = Vec3::new(1.1, 0.0, 1.1);
        let mut velocity = Vec3::new(-1.0, 0.0, -1.0);
        assert!(resolve_collider(&unit_box(), RADIUS, &mut position, &mut velocity));
        assert_relative_eq!(position.x, position.z, epsilon = 1e-6);
        assert_relative_eq!(unit_box().distance_to(horizontal(position)), RADIUS, epsilon = 1e-5);
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(velocity.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn outward_velocity_is_kept() {
        let mut position = Vec3::new(-0.1, 0.0, 0.5);
        let mut velocity = Vec3::new(-2.0, 0.0, 0.0);
        resolve_collider(&unit_box(), RADIUS, &mut position, &mut velocity);
        assert_eq!(velocity, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn tunnelled_centre_exits_nearest_edge() {
        let wall = StaticCollider::new(0.0, 0.0, 4.0, 1.0);
        let mut position = Vec3::new(2.0, 0.0, 0.8);
        let mut velocity = Vec3::new(1.0, 0.0, -5.0);
        assert!(resolve_collider(&wall, RADIUS, &mut position, &mut velocity));
        assert_relative_eq!(position.z, 1.0 + RADIUS, epsilon = 1e-6);
        assert_relative_eq!(position.x, 2.0);
        assert_relative_eq!(velocity.z, 0.0);
        assert_relative_eq!(velocity.x, 1.0);
    }

    #[test]
    fn distant_collider_changes_nothing() {
        let mut position = Vec3::new(5.0, 2.0, 5.0);
        let mut velocity = Vec3::new(-1.0, 0.5, -1.0);
        let corrections = resolve_all(&[unit_box()], RADIUS, &mut position, &mut velocity);
        assert_eq!(corrections, 0);
        assert_eq!(position, Vec3::new(5.0, 2.0, 5.0));
        assert_eq!(velocity, Vec3::new(-1.0, 0.5, -1.0));
    }

    #[test]
    fn resolves_each_collider_in_order() {
        let colliders = [
            StaticCollider::new(-1.0, -1.0, 0.0, 1.0),
            StaticCollider::new(2.0, -1.0, 3.0, 1.0),
        ];
        let mut position = Vec3::new(0.2, 0.0, 0.0);
        let mut velocity = Vec3::ZERO;
        assert_eq!(resolve_all(&colliders, RADIUS, &mut position, &mut velocity), 1);
        assert_relative_eq!(position.x, RADIUS, epsilon = 1e-6);
    }
}
