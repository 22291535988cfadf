//! GJK: boolean convex-convex intersection test over the Minkowski
//! difference of two bodies' support functions.

use cgmath::prelude::*;

use crate::body::Body;
use crate::vec2::{triple_product, Point, Vec2};
use crate::Real;

/// Bound on GJK iterations. In 2D, a correct implementation converges in a
/// handful of iterations; this is a safety net against a support function
/// bug or a pathological degenerate shape, not a tuning knob.
pub const MAX_ITERATIONS: u32 = 32;

/// One vertex of the evolving simplex: its Minkowski-difference position
/// `v = support(A, d) - support(B, -d)`, plus the two world-space support
/// points that produced it. EPA needs the latter to locate the eventual
/// contact point; GJK itself only ever looks at `v`.
#[derive(Debug, Clone, Copy)]
pub struct SupportPoint {
    /// Position of this vertex in the Minkowski difference `A - B`.
    pub v: Vec2,
    /// The support point taken from `A` that produced this vertex.
    pub sup_a: Point,
    /// The support point taken from `B` that produced this vertex.
    pub sup_b: Point,
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

/// Test whether `a` and `b` intersect. On a hit, returns the terminal
/// simplex (always exactly 3 points) so EPA can expand it into a
/// penetration vector without recomputing any support queries.
pub fn gjk(a: &Body, b: &Body) -> Option<Vec<SupportPoint>> {
    let mut d = b.position - a.position;
    if d.magnitude2() <= Real::EPSILON {
        d = Vec2::new(1.0, 0.0);
    }

    let first = support(a, b, d);
    if first.v.dot(d) <= 0.0 {
        return None;
    }
    let mut simplex = vec![first];
    d = -simplex[0].v;

    for _ in 0..MAX_ITERATIONS {
        let next = support(a, b, d);
        if next.v.dot(d) <= 0.0 {
            return None;
        }
        simplex.push(next);

        if evolve_simplex(&mut simplex, &mut d) {
            return Some(simplex);
        }
    }
    None
}

/// Same case analysis as [`simplex::check_origin`](super::simplex::check_origin),
/// applied directly to the `SupportPoint` simplex so the support-point
/// bookkeeping (`sup_a`/`sup_b`) is dropped along with its vertex rather than
/// reconciled afterwards against a parallel plain-`Vec2` simplex.
fn evolve_simplex(simplex: &mut Vec<SupportPoint>, d: &mut Vec2) -> bool {
    match simplex.len() {
        3 => {
            let a = simplex[2].v;
            let ao = -a;
            let b = simplex[1].v;
            let c = simplex[0].v;
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
            let a = simplex[1].v;
            let ao = -a;
            let b = simplex[0].v;
            let ab = b - a;
            *d = triple_product(ab, ao, ab);
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::vec2::Point;

    #[test]
    fn overlapping_disks_intersect() {
        let a = Body::disk(Point::new(0.0, 0.0), 5.0, false);
        let b = Body::disk(Point::new(3.0, 0.0), 5.0, false);
        assert!(gjk(&a, &b).is_some());
    }

    #[test]
    fn distant_disks_do_not_intersect() {
        let a = Body::disk(Point::new(0.0, 0.0), 5.0, false);
        let b = Body::disk(Point::new(100.0, 0.0), 5.0, false);
        assert!(gjk(&a, &b).is_none());
    }

    #[test]
    fn overlapping_squares_intersect() {
        let a = Body::polygon(
            Point::new(0.0, 0.0),
            &[
                Point::new(-1.0, -1.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 1.0),
                Point::new(-1.0, 1.0),
            ],
            false,
        );
        let b = Body::polygon(
            Point::new(1.5, 0.0),
            &[
                Point::new(0.5, -1.0),
                Point::new(2.5, -1.0),
                Point::new(2.5, 1.0),
                Point::new(0.5, 1.0),
            ],
            false,
        );
        assert!(gjk(&a, &b).is_some());
    }

    #[test]
    fn touching_squares_edge_on_do_not_register_as_intersecting() {
        let a = Body::polygon(
            Point::new(0.0, 0.0),
            &[
                Point::new(-1.0, -1.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 1.0),
                Point::new(-1.0, 1.0),
            ],
            false,
        );
        let b = Body::polygon(
            Point::new(5.0, 0.0),
            &[
                Point::new(4.0, -1.0),
                Point::new(6.0, -1.0),
                Point::new(6.0, 1.0),
                Point::new(4.0, 1.0),
            ],
            false,
        );
        assert!(gjk(&a, &b).is_none());
    }

    #[test]
    fn disk_and_polygon_can_intersect() {
        let disk = Body::disk(Point::new(0.0, 0.0), 2.0, false);
        let square = Body::polygon(
            Point::new(1.5, 0.0),
            &[
                Point::new(0.5, -1.0),
                Point::new(2.5, -1.0),
                Point::new(2.5, 1.0),
                Point::new(0.5, 1.0),
            ],
            false,
        );
        assert!(gjk(&disk, &square).is_some());
    }
}
