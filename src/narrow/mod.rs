//! Narrow-phase dispatch: each candidate pair is resolved by the cheapest
//! method its shapes allow, chosen by a single match on the pair's shape
//! kinds rather than a runtime type check.
//!
//! | A | B | resolver |
//! |---|---|----------|
//! | Disk | Disk | closed form, [`disk_disk`] |
//! | Segment | Disk | closed form, [`segment_disk`] |
//! | Segment | Segment | none; see below |
//! | anything involving Polygon | | [`gjk`] + [`epa`] |
//!
//! Segment-segment pairs are intentionally left unresolved. A particle-based
//! solver with only positional correction has no good closed form for two
//! infinitely thin, massless segments crossing, and routing them through
//! GJK/EPA would need a degenerate-simplex fallback which is easy to get
//! subtly wrong; we simply never dispatch the pair.

pub mod disk_disk;
pub mod epa;
pub mod gjk;
pub mod segment_disk;
pub mod simplex;

use crate::body::{Body, Shape};
use crate::config::SolverConfig;

/// Resolve one candidate pair in place, dispatching on shape kind.
pub fn resolve_pair(a: &mut Body, b: &mut Body, config: &SolverConfig) {
    match (&a.shape, &b.shape) {
        (Shape::Disk { .. }, Shape::Disk { .. }) => disk_disk::resolve(a, b),
        (Shape::Segment { .. }, Shape::Disk { .. }) => segment_disk::resolve(a, b),
        (Shape::Disk { .. }, Shape::Segment { .. }) => segment_disk::resolve(b, a),
        (Shape::Segment { .. }, Shape::Segment { .. }) => {}
        _ => resolve_via_gjk_epa(a, b, config),
    }
}

fn resolve_via_gjk_epa(a: &mut Body, b: &mut Body, config: &SolverConfig) {
    let mut simplex = match gjk::gjk(a, b) {
        Some(simplex) => simplex,
        None => return,
    };
    let penetration = match epa::epa(
        &mut simplex,
        a,
        b,
        config.epa_epsilon,
        config.epa_max_iters,
    ) {
        Some(p) => p,
        None => return,
    };

    let correction = penetration.normal * (penetration.depth * config.polygon_correction_scale * 0.5);
    if !a.anchored {
        a.position += correction;
        a.sync_points();
    }
    if !b.anchored {
        b.position -= correction;
        b.sync_points();
    }
}
