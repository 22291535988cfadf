//! Segment-disk resolution: three ordered closed-form checks against a
//! disk's center, cheaper than routing a 2-vertex shape through GJK.
//!
//! In order: the first endpoint, the second endpoint, then the closest
//! point on the segment's interior (the line's foot of perpendicular,
//! accepted only if it actually falls between the two endpoints). The first
//! check to find an overlap wins and resolves the pair; the others are
//! skipped.

use cgmath::prelude::*;

use crate::body::{Body, Shape};
use crate::Real;

/// Segment/disk interior-foot acceptance tolerance: the foot of the
/// perpendicular from the disk center is treated as "on the segment" when
/// the sum of its distances to the two endpoints is within this much of the
/// segment's own length.
const INTERIOR_TOLERANCE: Real = 0.1;

/// Resolve one segment-disk pair. `segment` must hold a `Shape::Segment`,
/// `disk` a `Shape::Disk`; callers are responsible for the (possibly
/// swapped) dispatch.
pub fn resolve(segment: &mut Body, disk: &mut Body) {
    let (p0, p1) = match &segment.shape {
        Shape::Segment { points, .. } => (points[0], points[1]),
        _ => unreachable!("segment_disk::resolve called with a non-segment first argument"),
    };
    let (center, radius) = match &disk.shape {
        Shape::Disk { radius } => (disk.position, *radius),
        _ => unreachable!("segment_disk::resolve called with a non-disk second argument"),
    };

    if push_if_overlapping(segment, disk, p0 - center, radius) {
        return;
    }
    if push_if_overlapping(segment, disk, p1 - center, radius) {
        return;
    }

    let edge = p1 - p0;
    let edge_len2 = edge.magnitude2();
    if edge_len2 <= Real::EPSILON {
        return;
    }
    let t = (center - p0).dot(edge) / edge_len2;
    let foot = p0 + edge * t;

    let edge_len = edge_len2.sqrt();
    let df0 = (foot - p0).magnitude();
    let df1 = (foot - p1).magnitude();
    if (df0 + df1 - edge_len).abs() > INTERIOR_TOLERANCE {
        return;
    }

    push_if_overlapping(segment, disk, foot - center, radius);
}

fn push_if_overlapping(
    segment: &mut Body,
    disk: &mut Body,
    axis: cgmath::Vector2<Real>,
    radius: Real,
) -> bool {
    let distance = axis.magnitude();
    if distance >= radius {
        return false;
    }
    let overlap = radius - distance;
    let normal = if distance > Real::EPSILON {
        axis / distance
    } else {
        cgmath::Vector2::new(0.0, 0.0)
    };
    let correction = normal * (0.5 * overlap);
    if !segment.anchored {
        segment.position += correction;
        segment.sync_points();
    }
    if !disk.anchored {
        disk.position -= correction;
        disk.sync_points();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2::Point;
    use approx::assert_relative_eq;

    #[test]
    fn disk_far_from_segment_is_untouched() {
        let mut segment = Body::segment(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), true);
        let mut disk = Body::disk(Point::new(0.0, 100.0), 1.0, false);
        resolve(&mut segment, &mut disk);
        assert_relative_eq!(disk.position, Point::new(0.0, 100.0));
    }

    #[test]
    fn disk_resting_on_segment_interior_is_pushed_up() {
        let mut segment = Body::segment(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), true);
        let mut disk = Body::disk(Point::new(0.0, 1.0), 2.0, false);
        resolve(&mut segment, &mut disk);
        assert!(disk.position.y >= 1.0);
        assert_relative_eq!(segment.position, Point::new(-10.0, 0.0));
    }

    #[test]
    fn disk_near_endpoint_is_pushed_away_from_the_endpoint() {
        let mut segment = Body::segment(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), true);
        let mut disk = Body::disk(Point::new(10.5, 0.0), 2.0, false);
        resolve(&mut segment, &mut disk);
        assert!(disk.position.x > 10.5);
    }

    #[test]
    fn disk_above_far_endpoint_does_not_collide() {
        let mut segment = Body::segment(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), true);
        let mut disk = Body::disk(Point::new(10.0, 3.0), 1.0, false);
        resolve(&mut segment, &mut disk);
        assert_relative_eq!(disk.position, Point::new(10.0, 3.0));
    }

    #[test]
    fn degenerate_zero_length_segment_does_not_panic() {
        let mut segment = Body::segment(Point::new(0.0, 0.0), Point::new(0.0, 0.0), true);
        let mut disk = Body::disk(Point::new(0.5, 0.0), 2.0, false);
        resolve(&mut segment, &mut disk);
    }
}
