//! Position-based Verlet integration.

use cgmath::Zero;

use crate::body::{Body, Shape};
use crate::vec2::Vec2;
use crate::Real;

use std::f64::consts::PI;

const TWO_PI: Real = (2.0 * PI) as Real;

/// Advance one body by one sub-step of `dt`.
///
/// ### Parameters:
///
/// - `body`: the body to advance, mutated in place
/// - `dt`: sub-step duration in seconds
///
/// Anchored bodies never move: `last_position` and `position` stay equal.
/// Every body, anchored or not, still has its accumulated acceleration
/// cleared and its polygon rotation advanced by `motor`, so a spinning
/// anchored polygon keeps turning in place.
pub fn integrate(body: &mut Body, dt: Real) {
    if !body.anchored {
        let displacement = body.position - body.last_position;
        body.last_position = body.position;
        body.position += displacement + body.acceleration * dt * dt;
    }
    body.acceleration = Vec2::zero();

    if let Shape::Polygon { rotation, motor, .. } = &mut body.shape {
        *rotation = wrap_angle(*rotation + *motor);
    }

    body.sync_points();
}

/// Wrap `angle` into `(-2*PI, 2*PI)` by adding or subtracting a single lap.
/// Sufficient as long as `motor` never advances a body by more than a full
/// turn within one sub-step, which holds for any sane spin rate.
fn wrap_angle(mut angle: Real) -> Real {
    if angle >= TWO_PI {
        angle -= TWO_PI;
    } else if angle <= -TWO_PI {
        angle += TWO_PI;
    }
    angle
}
