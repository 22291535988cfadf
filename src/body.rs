//! The body model: a Verlet particle carrying one of three convex shapes.
//!
//! Every body stores its current and previous position (the Verlet pair), an
//! accumulated acceleration that is consumed and zeroed each integration step,
//! and two independent flags: `anchored` (never moved by integration or
//! collision response) and `gravity_affected` (receives the solver's global
//! acceleration). A body can be anchored yet still spin in place if it is a
//! polygon with a non-zero motor speed.
//!
//! World-space vertices are never integrated directly. Each shape keeps its
//! vertices as offsets relative to the body's position (`points_rel`), fixed
//! at construction, and `sync_points` rebuilds the world-space `points` from
//! `position` (and, for polygons, `rotation`) on every change. Deriving
//! vertices from a rest pose this way is what keeps a polygon's edge lengths
//! from drifting after thousands of steps, instead of integrating each vertex
//! independently.

use cgmath::InnerSpace;

use crate::vec2::{Point, Vec2, Vec2Ext};
use crate::Real;

/// The three convex primitives the solver understands.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A disk: a single support radius around the body's position.
    Disk {
        /// Radius in world units.
        radius: Real,
    },
    /// A line segment. Resolved with closed-form geometry against disks;
    /// never resolved against another segment.
    Segment {
        /// Current world-space endpoints, kept in sync with `position`.
        points: [Point; 2],
        /// Endpoint offsets relative to `position`, fixed at construction.
        points_rel: [Vec2; 2],
    },
    /// A convex polygon, vertices wound counter-clockwise.
    Polygon {
        /// Current world-space vertices, kept in sync with `position` and `rotation`.
        points: Vec<Point>,
        /// Vertex offsets relative to `position` in the body's rest frame.
        points_rel: Vec<Vec2>,
        /// Current orientation in radians, wrapped into `(-2*PI, 2*PI)`.
        rotation: Real,
        /// Radians added to `rotation` every integration step.
        motor: Real,
    },
}

impl Shape {
    /// A coarse bounding radius around the body's position, used by the
    /// broad-phase. Exact for disks, conservative (the farthest vertex) for
    /// segments and polygons.
    pub fn bounding_radius(&self) -> Real {
        match self {
            Shape::Disk { radius } => *radius,
            Shape::Segment { points_rel, .. } => points_rel
                .iter()
                .map(|p| p.magnitude())
                .fold(0.0, Real::max),
            Shape::Polygon { points_rel, .. } => points_rel
                .iter()
                .map(|p| p.magnitude())
                .fold(0.0, Real::max),
        }
    }
}

/// A single rigid body: a shape plus the Verlet position pair and the two
/// independent simulation flags.
#[derive(Debug, Clone)]
pub struct Body {
    /// Current position (center for disks and polygons, first endpoint's
    /// frame origin for segments).
    pub position: Point,
    /// Position one step ago; the gap between the two encodes velocity.
    pub last_position: Point,
    /// Acceleration accumulated this step, consumed and zeroed by `integrate`.
    pub acceleration: Vec2,
    /// If true, never moved by integration or collision correction.
    pub anchored: bool,
    /// If true, the solver's global acceleration is applied to this body
    /// every step. Independent of `anchored`: an anchored body that is also
    /// gravity-affected simply never visibly moves, since corrections to an
    /// anchored body are no-ops.
    pub gravity_affected: bool,
    /// The convex shape and its cached world-space geometry.
    pub shape: Shape,
}

impl Body {
    /// A disk of the given `radius` centered at `position`.
    pub fn disk(position: Point, radius: Real, anchored: bool) -> Self {
        Body {
            position,
            last_position: position,
            acceleration: Vec2::zero(),
            anchored,
            gravity_affected: !anchored,
            shape: Shape::Disk { radius },
        }
    }

    /// A line segment between `a` and `b`. `position` is pinned to `a`;
    /// `points_rel` stores both endpoints relative to it so the segment can
    /// translate rigidly without distorting its length.
    pub fn segment(a: Point, b: Point, anchored: bool) -> Self {
        let position = a;
        let points_rel = [Vec2::zero(), b - a];
        Body {
            position,
            last_position: position,
            acceleration: Vec2::zero(),
            anchored,
            gravity_affected: !anchored,
            shape: Shape::Segment {
                points: [a, b],
                points_rel,
            },
        }
    }

    /// A convex polygon with vertices given in world space, wound
    /// counter-clockwise. `points_rel` is derived once here and never
    /// recomputed from `points` again.
    pub fn polygon(position: Point, vertices: &[Point], anchored: bool) -> Self {
        assert!(vertices.len() >= 3, "a polygon needs at least 3 vertices");
        let points_rel: Vec<Vec2> = vertices.iter().map(|v| v - position).collect();
        Body {
            position,
            last_position: position,
            acceleration: Vec2::zero(),
            anchored,
            gravity_affected: !anchored,
            shape: Shape::Polygon {
                points: vertices.to_vec(),
                points_rel,
                rotation: 0.0,
                motor: 0.0,
            },
        }
    }

    /// A regular polygon with `sides` vertices inscribed in a circle of
    /// `radius` around `position`, first vertex pointing along +x.
    pub fn regular_polygon(position: Point, radius: Real, sides: usize, anchored: bool) -> Self {
        assert!(sides >= 3, "a polygon needs at least 3 sides");
        let vertices: Vec<Point> = (0..sides)
            .map(|i| {
                let angle = (i as Real) * std::f64::consts::TAU as Real / sides as Real;
                position + Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Body::polygon(position, &vertices, anchored)
    }

    /// Set the polygon's constant spin rate, in radians per step. No-op for
    /// disks and segments.
    pub fn set_motor(&mut self, radians_per_step: Real) {
        if let Shape::Polygon { motor, .. } = &mut self.shape {
            *motor = radians_per_step;
        }
    }

    /// Recompute world-space vertices from `position` (and `rotation`, for
    /// polygons). Called after anything moves `position` or rotates a
    /// polygon: integration and every collision resolver.
    pub fn sync_points(&mut self) {
        let position = self.position;
        match &mut self.shape {
            Shape::Disk { .. } => {}
            Shape::Segment { points, points_rel } => {
                points[0] = position + points_rel[0];
                points[1] = position + points_rel[1];
            }
            Shape::Polygon {
                points,
                points_rel,
                rotation,
                ..
            } => {
                for (p, rel) in points.iter_mut().zip(points_rel.iter()) {
                    *p = position + rel.rotated(*rotation);
                }
            }
        }
    }

    /// Teleport the body to `position`, clearing velocity (by collapsing the
    /// Verlet pair) and any accumulated acceleration. Used to recover bodies
    /// that have been ejected to non-finite or absurd positions.
    pub fn reset_to(&mut self, position: Point) {
        self.position = position;
        self.last_position = position;
        self.acceleration = Vec2::zero();
        self.sync_points();
    }

    /// Current velocity estimate, derived from the Verlet position pair and
    /// the last integration timestep. Read-only: Verlet integration never
    /// stores velocity directly.
    pub fn velocity(&self, dt: Real) -> Vec2 {
        if dt <= 0.0 {
            return Vec2::zero();
        }
        (self.position - self.last_position) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn disk_defaults_gravity_affected_unless_anchored() {
        let free = Body::disk(Point::new(0.0, 0.0), 1.0, false);
        assert!(free.gravity_affected);
        let anchored = Body::disk(Point::new(0.0, 0.0), 1.0, true);
        assert!(!anchored.gravity_affected);
    }

    #[test]
    fn segment_points_rel_preserve_length_after_translation() {
        let mut body = Body::segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0), false);
        body.position += Vec2::new(5.0, 3.0);
        body.sync_points();
        let (p0, p1) = match body.shape {
            Shape::Segment { points, .. } => (points[0], points[1]),
            _ => unreachable!(),
        };
        assert_relative_eq!((p1 - p0).magnitude(), 10.0, epsilon = 1e-5);
        assert_relative_eq!(p0, Point::new(5.0, 3.0));
    }

    #[test]
    fn polygon_rotation_preserves_vertex_distance_from_center() {
        let mut body = Body::regular_polygon(Point::new(0.0, 0.0), 5.0, 4, false);
        if let Shape::Polygon { rotation, .. } = &mut body.shape {
            *rotation = 1.2345;
        }
        body.sync_points();
        if let Shape::Polygon { points, .. } = &body.shape {
            for p in points {
                assert_relative_eq!((p - body.position).magnitude(), 5.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn regular_polygon_rejects_fewer_than_three_sides() {
        let result = std::panic::catch_unwind(|| {
            Body::regular_polygon(Point::new(0.0, 0.0), 1.0, 2, false)
        });
        assert!(result.is_err());
    }

    #[test]
    fn reset_to_clears_implicit_velocity() {
        let mut body = Body::disk(Point::new(0.0, 0.0), 1.0, false);
        body.position = Point::new(5.0, 5.0);
        body.reset_to(Point::new(0.0, 0.0));
        assert_relative_eq!(body.velocity(1.0 / 60.0), Vec2::zero());
    }
}
