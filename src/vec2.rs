//! 2D vector algebra built on top of [`cgmath`]'s `Vector2`/`Point2`.
//!
//! The solver only needs a handful of operations beyond what `cgmath` already
//! provides for free (add/sub/scale/dot/length/normalize): rotating a bare
//! vector by an angle, taking its perpendicular, and a couple of the
//! triple-product identities GJK and EPA lean on. Those live here as a small
//! extension trait and a pair of free functions, so call sites read
//! `v.rotated(angle)` rather than reaching for a full `Basis2`/`Rotation2`
//! transform to rotate a single vector.

use cgmath::prelude::*;
use cgmath::{Point2, Vector2};

use crate::Real;

/// A 2D vector: a displacement, velocity-like quantity, or force.
pub type Vec2 = Vector2<Real>;

/// A 2D point: a body's center, a vertex, a contact location.
pub type Point = Point2<Real>;

/// Operations the solver needs on top of `cgmath::Vector2`.
pub trait Vec2Ext {
    /// Rotate counter-clockwise by `angle` radians.
    fn rotated(self, angle: Real) -> Self;

    /// The vector rotated a quarter turn counter-clockwise.
    fn perp(self) -> Self;

    /// Normalize, or return the zero vector if too short to have a direction.
    fn normalize_or_zero(self) -> Self;
}

impl Vec2Ext for Vec2 {
    fn rotated(self, angle: Real) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn perp(self) -> Self {
        Vec2::new(-self.y, self.x)
    }

    fn normalize_or_zero(self) -> Self {
        let len2 = self.magnitude2();
        if len2 <= Real::EPSILON * Real::EPSILON {
            Vec2::zero()
        } else {
            self / len2.sqrt()
        }
    }
}

/// 2D cross product. Returns the scalar z-component of the 3D cross product
/// of `a` and `b` extended with a zero z-component.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> Real {
    a.x * b.y - a.y * b.x
}

/// `(a x b) x c`, expanded via the vector triple product identity
/// `b(a.c) - a(b.c)`. GJK's simplex search directions and EPA's edge normals
/// are both built from this.
#[inline]
pub fn triple_product(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let ac = a.dot(c);
    let bc = b.dot(c);
    Vec2::new(b.x * ac - a.x * bc, b.y * ac - a.y * bc)
}
