//! Bounding-circle broad-phase: a flat O(N^2) reject pass with no spatial
//! index. Candidate pairs are generated as ordered pairs `(i, j)` with `i !=
//! j`, visiting both `(i, j)` and `(j, i)` for every unordered pair of
//! bodies. This mirrors the double nested loop the constant-acceleration
//! reference solver this crate grew out of used; each direction is resolved
//! independently by the narrow-phase dispatcher, and the two resolutions
//! of a pair are each other's mirror image, so the redundancy is harmless
//! and deliberately kept rather than special-cased away.

use cgmath::InnerSpace;

use crate::body::Body;

/// Returns true if the bounding circles of `a` and `b` overlap (or touch).
/// Exact for two disks; conservative otherwise, since segments and polygons
/// use the farthest-vertex bound from their rest frame.
pub fn bounding_circles_overlap(a: &Body, b: &Body) -> bool {
    let sum = a.shape.bounding_radius() + b.shape.bounding_radius();
    (b.position - a.position).magnitude2() <= sum * sum
}
