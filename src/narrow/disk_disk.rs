//! Closed-form disk-disk resolution: two circles overlap exactly when the
//! distance between their centers is less than the sum of their radii, and
//! the correction axis is simply that center-to-center direction.

use cgmath::prelude::*;

use crate::body::{Body, Shape};
use crate::Real;

/// Push `a` and `b` apart along their center line until their disks no
/// longer overlap, splitting the correction evenly between the two unless
/// one side is anchored.
pub fn resolve(a: &mut Body, b: &mut Body) {
    let (radius_a, radius_b) = match (&a.shape, &b.shape) {
        (Shape::Disk { radius: ra }, Shape::Disk { radius: rb }) => (*ra, *rb),
        _ => unreachable!("disk_disk::resolve called with a non-disk body"),
    };

    let axis = a.position - b.position;
    let distance = axis.magnitude();
    let overlap = radius_a + radius_b - distance;
    if overlap <= 0.0 {
        return;
    }

    let normal = if distance > Real::EPSILON {
        axis / distance
    } else {
        cgmath::Vector2::new(0.0, 0.0)
    };

    let correction = normal * (0.5 * overlap);
    if !a.anchored {
        a.position += correction;
        a.sync_points();
    }
    if !b.anchored {
        b.position -= correction;
        b.sync_points();
    }
}
