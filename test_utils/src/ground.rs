//! Ground shapes used by step-up and slope tests.

use glam::Vec3;
use locomotion::GroundQuery;

/// Flat floor with a raised plateau for every `x >= edge_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ledge {
    /// Floor height before the edge.
    pub floor: f32,
    /// Plateau height after the edge.
    pub plateau: f32,
    /// X coordinate where the plateau begins.
    pub edge_x: f32,
}

impl Ledge {
    /// Create a ledge of `rise` metres above a floor at zero.
    ///
    /// # Examples
    /// ```
    /// use locomotion::GroundQuery;
    /// use test_utils::ground::Ledge;
    /// let ledge = Ledge::rising(0.3, 1.0);
    /// assert_eq!(ledge.height_at(0.0, 0.0), 0.0);
    /// assert_eq!(ledge.height_at(1.5, 0.0), 0.3);
    /// ```
    #[must_use]
    pub const fn rising(rise: f32, edge_x: f32) -> Self {
        Self {
            floor: 0.0,
            plateau: rise,
            edge_x,
        }
    }
}

impl GroundQuery for Ledge {
    fn height_at(&self, x: f32, _z: f32) -> f32 {
        if x >= self.edge_x {
            self.plateau
        } else {
            self.floor
        }
    }

    fn normal_at(&self, _x: f32, _z: f32) -> Vec3 {
        Vec3::Y
    }
}
