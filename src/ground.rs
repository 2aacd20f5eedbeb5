//! Ground queries consumed by the locomotion controller.
//!
//! A [`GroundQuery`] answers two questions about the terrain below a
//! horizontal position: its height and its surface normal. Implementations
//! must be pure; the controller samples them more than once per tick (the
//! grounding check and the step-up probe).

use glam::Vec3;

use crate::vector_math::safe_normalize;

/// Terrain height and orientation sampled at a horizontal position.
pub trait GroundQuery {
    /// Height of the ground surface at `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Unit surface normal at `(x, z)`.
    fn normal_at(&self, x: f32, z: f32) -> Vec3;
}

impl<G: GroundQuery + ?Sized> GroundQuery for &G {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        (**self).height_at(x, z)
    }

    fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        (**self).normal_at(x, z)
    }
}

impl<G: GroundQuery + ?Sized> GroundQuery for Box<G> {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        (**self).height_at(x, z)
    }

    fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        (**self).normal_at(x, z)
    }
}

/// An infinite horizontal plane; the default ground when none is supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    /// Height of the plane.
    pub height: f32,
}

impl FlatGround {
    /// Creates a flat plane at `height`.
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Default for FlatGround {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_GROUND_HEIGHT)
    }
}

impl GroundQuery for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn normal_at(&self, _x: f32, _z: f32) -> Vec3 {
        Vec3::Y
    }
}

/// An infinite inclined plane `y = origin_height + grad_x * x + grad_z * z`.
///
/// Useful for ramps and for exercising slope limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopedPlane {
    /// Height of the plane at the world origin.
    pub origin_height: f32,
    /// Rise per metre along X.
    pub grad_x: f32,
    /// Rise per metre along Z.
    pub grad_z: f32,
}

impl SlopedPlane {
    /// Creates a plane through `(0, origin_height, 0)` with the given
    /// gradients.
    #[must_use]
    pub const fn new(origin_height: f32, grad_x: f32, grad_z: f32) -> Self {
        Self {
            origin_height,
            grad_x,
            grad_z,
        }
    }

    /// Inclination of the plane in degrees.
    #[must_use]
    pub fn incline_degrees(&self) -> f32 {
        self.normal_at(0.0, 0.0).y.clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl GroundQuery for SlopedPlane {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.origin_height + self.grad_x * x + self.grad_z * z
    }

    fn normal_at(&self, _x: f32, _z: f32) -> Vec3 {
        safe_normalize(Vec3::new(-self.grad_x, 1.0, -self.grad_z)).unwrap_or(Vec3::Y)
    }
}

/// Whether a surface with `normal` can be stood on given the slope limit
/// cosine `min_normal_y`.
#[must_use]
pub fn is_walkable(normal: Vec3, min_normal_y: f32) -> bool {
    normal.y >= min_normal_y
}
