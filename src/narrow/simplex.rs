//! The 2D GJK simplex: growing a point, then a line, then a triangle, and
//! deciding at each step whether the origin is enclosed.

use cgmath::prelude::*;

use crate::vec2::{triple_product, Vec2, Vec2Ext};
use crate::Real;

/// The closest edge of a triangle simplex to the origin, with its outward
/// unit normal and distance. Used by EPA to pick where to expand next.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Outward unit normal of this edge.
    pub normal: Vec2,
    /// Distance from the origin to the edge along `normal`.
    pub distance: Real,
    /// Index of the edge's second vertex (`simplex[index]`); the new support
    /// point is inserted at this index to keep winding consistent.
    pub index: usize,
}

/// Evolve `simplex` (the Minkowski-difference points collected so far, most
/// recently added at the back) toward the origin.
///
/// Returns `true` once `simplex` is a triangle enclosing the origin: the
/// shapes intersect. Otherwise narrows the simplex to the closest
/// line/vertex and updates `d` to the next search direction, and the caller
/// adds one more support point along `d`.
pub fn check_origin(simplex: &mut Vec<Vec2>, d: &mut Vec2) -> bool {
    match simplex.len() {
        3 => {
            let a = simplex[2];
            let ao = -a;
            let b = simplex[1];
            let c = simplex[0];
            let ab = b - a;
            let ac = c - a;
            let ab_perp = triple_product(ac, ab, ab);
            if ab_perp.dot(ao) > 0.0 {
                simplex.remove(0);
                *d = ab_perp;
            } else {
                let ac_perp = triple_product(ab, ac, ac);
                if ac_perp.dot(ao) > 0.0 {
                    simplex.remove(1);
                    *d = ac_perp;
                } else {
                    return true;
                }
            }
            false
        }
        2 => {
            let a = simplex[1];
            let ao = -a;
            let b = simplex[0];
            let ab = b - a;
            *d = triple_product(ab, ao, ab);
            false
        }
        _ => false,
    }
}

/// The closest edge of a 3-point simplex to the origin, or `None` if the
/// simplex is not yet a triangle. Assumes `simplex` is wound so that
/// `vec2::cross` of consecutive edges is consistently signed, which is an
/// invariant GJK's own winding maintains.
pub fn closest_edge(simplex: &[Vec2]) -> Option<Edge> {
    if simplex.len() < 3 {
        return None;
    }
    let mut best: Option<Edge> = None;
    for i in 0..simplex.len() {
        let j = if i + 1 == simplex.len() { 0 } else { i + 1 };
        let a = simplex[i];
        let b = simplex[j];
        let e = b - a;
        let n = triple_product(e, a, e).normalize_or_zero();
        let distance = n.dot(a);
        if best.map_or(true, |f| distance < f.distance) {
            best = Some(Edge {
                normal: n,
                distance,
                index: j,
            });
        }
    }
    best
}
