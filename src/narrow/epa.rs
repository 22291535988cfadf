//! EPA: expand a GJK-terminal simplex into a polytope whose closest edge to
//! the origin converges on the true penetration depth and direction.

use cgmath::prelude::*;

use super::gjk::SupportPoint;
use super::simplex::{closest_edge, Edge};
use crate::body::Body;
use crate::vec2::{Point, Vec2};
use crate::Real;

/// Penetration vector recovered by EPA: `normal` points from `b` into `a`,
/// `depth` is the overlap distance along it.
#[derive(Debug, Clone, Copy)]
pub struct Penetration {
    /// Unit vector pointing from `b` toward `a`.
    pub normal: Vec2,
    /// Overlap distance along `normal`.
    pub depth: Real,
    /// A point on the contact region, interpolated along the winning edge.
    pub point: Point,
}

fn plain(simplex: &[SupportPoint]) -> Vec<Vec2> {
    simplex.iter().map(|s| s.v).collect()
}

fn support(a: &Body, b: &Body, direction: Vec2) -> SupportPoint {
    let sup_a = a.support(direction);
    let sup_b = b.support(-direction);
    SupportPoint {
        v: sup_a - sup_b,
        sup_a,
        sup_b,
    }
}

/// Expand `simplex` (GJK's terminal triangle) until the closest edge's
/// distance estimate stabilizes within `epsilon`, or `max_iters` is reached.
pub fn epa(
    simplex: &mut Vec<SupportPoint>,
    a: &Body,
    b: &Body,
    epsilon: Real,
    max_iters: u32,
) -> Option<Penetration> {
    closest_edge(&plain(simplex))?;

    for _ in 0..max_iters {
        let edge = closest_edge(&plain(simplex)).expect("simplex never shrinks below 3 points");
        let p = support(a, b, edge.normal);
        let projected = p.v.dot(edge.normal);
        if (projected - edge.distance).abs() <= epsilon {
            return Some(finish(simplex, &edge, epsilon));
        }
        simplex.insert(edge.index, p);
    }

    let edge = closest_edge(&plain(simplex)).expect("simplex never shrinks below 3 points");
    Some(finish(simplex, &edge, epsilon))
}

fn finish(simplex: &[SupportPoint], edge: &Edge, epsilon: Real) -> Penetration {
    Penetration {
        normal: edge.normal,
        depth: edge.distance + epsilon,
        point: contact_point(simplex, edge),
    }
}

/// Interpolate a contact point along the winning edge's `sup_a` endpoints,
/// using the origin's projection onto the edge as the interpolation
/// parameter. Mirrors the closest-point-on-segment computation used by the
/// disk resolvers, here on the support-point pair that produced the edge.
fn contact_point(simplex: &[SupportPoint], edge: &Edge) -> Point {
    let b = &simplex[edge.index];
    let a = if edge.index == 0 {
        &simplex[simplex.len() - 1]
    } else {
        &simplex[edge.index - 1]
    };
    let oa = -a.v;
    let ab = b.v - a.v;
    let len2 = ab.magnitude2();
    if len2 <= Real::EPSILON {
        return a.sup_a;
    }
    let t = oa.dot(ab) / len2;
    if t < 0.0 {
        a.sup_a
    } else if t < 1.0 {
        b.sup_a
    } else {
        a.sup_a + (b.sup_a - a.sup_a) * t
    }
}
