//! Support functions: for a shape and a direction, the farthest point on the
//! shape's boundary along that direction. GJK and EPA never touch shape
//! geometry directly, only through this one primitive.

use cgmath::InnerSpace;

use crate::body::{Body, Shape};
use crate::vec2::{Point, Vec2, Vec2Ext};

impl Body {
    /// The farthest point of this body's shape in world space along `direction`.
    ///
    /// For a disk this is a closed form: the center plus the radius along the
    /// (normalized) direction. For segments and polygons it is a linear scan
    /// over the cached world-space vertices. Vertex counts here are always
    /// small (segments have two, polygons are hand-authored or regular), so
    /// the scan is not worth replacing with a hill-climb over an adjacency
    /// structure.
    pub fn support(&self, direction: Vec2) -> Point {
        match &self.shape {
            Shape::Disk { radius } => self.position + direction.normalize_or_zero() * *radius,
            Shape::Segment { points, .. } => max_dot(points, direction),
            Shape::Polygon { points, .. } => max_dot(points, direction),
        }
    }
}

fn max_dot(points: &[Point], direction: Vec2) -> Point {
    let mut best = points[0];
    let mut best_dot = best.to_vec().dot(direction);
    for &p in &points[1..] {
        let d = p.to_vec().dot(direction);
        if d > best_dot {
            best = p;
            best_dot = d;
        }
    }
    best
}
