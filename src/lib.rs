//! A real-time 2D rigid-body physics core.
//!
//! The crate integrates a heterogeneous population of shapes (disks, segments and
//! convex polygons) under a constant global acceleration, detects pairwise contacts
//! with a flat bounding-circle broad-phase, and resolves them by positional
//! correction: closed-form for disk-disk and segment-disk pairs, and GJK followed by
//! EPA for anything involving a polygon.
//!
//! This is deliberately *not* an impulse/velocity solver: there is no friction, no
//! restitution, and no continuous collision detection. Position-based Verlet
//! integration carries the implicit velocity, and every collision response nudges
//! positions directly. Running more, smaller sub-steps per frame is how this
//! approach gets stiffer, rather than tuning impulse iterations.
//!
//! ```
//! use verlet2d::{Solver, SolverConfig, Body};
//! use verlet2d::vec2::Point;
//!
//! let mut solver = Solver::new(SolverConfig::default()).unwrap();
//! let floor = solver.add_body(Body::disk(Point::new(0.0, 100.0), 40.0, true));
//! let ball = solver.add_body(Body::disk(Point::new(0.0, 0.0), 10.0, false));
//! solver.step(1.0 / 60.0).unwrap();
//! assert!(solver.body(ball).is_some());
//! assert!(solver.body(floor).is_some());
//! ```

pub mod body;
pub mod broadphase;
pub mod config;
pub mod error;
pub mod integrate;
pub mod narrow;
pub mod perf;
pub mod solver;
pub mod support;
pub mod vec2;

/// Scalar type used throughout the crate. `f32` by default; enable the `double`
/// feature for `f64` precision.
#[cfg(not(feature = "double"))]
pub type Real = f32;

/// Scalar type used throughout the crate, `f64` precision, enabled via the
/// `double` feature.
#[cfg(feature = "double")]
pub type Real = f64;

pub use body::{Body, Shape};
pub use config::SolverConfig;
pub use error::SolverError;
pub use solver::{BodyId, BodyView, Solver};
