//! The orchestrator: owns every body, drives sub-stepped integration, and
//! dispatches the broad/narrow-phase pass each step.

use std::time::Instant;

use cgmath::prelude::*;
use tracing::{debug, trace, trace_span};

use crate::body::{Body, Shape};
use crate::broadphase;
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::integrate;
use crate::narrow;
use crate::perf::Performance;
use crate::vec2::Point;
use crate::Real;

/// Opaque handle to a body registered with a [`Solver`]. Never reused across
/// the lifetime of a solver, so a stale `BodyId` from a removed body is
/// guaranteed to miss rather than alias a newer body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(u64);

/// A read-only snapshot of one body's simulated geometry, as returned by
/// [`Solver::iter_bodies`].
#[derive(Debug, Clone)]
pub enum BodyView<'a> {
    /// A disk.
    Disk {
        /// This body's id.
        id: BodyId,
        /// World-space center.
        position: Point,
        /// Radius.
        radius: Real,
    },
    /// A segment.
    Segment {
        /// This body's id.
        id: BodyId,
        /// World-space endpoints.
        points: [Point; 2],
    },
    /// A polygon.
    Polygon {
        /// This body's id.
        id: BodyId,
        /// World-space center.
        position: Point,
        /// Current orientation, in radians.
        rotation: Real,
        /// World-space vertices, wound counter-clockwise.
        vertices: &'a [Point],
    },
}

/// Owns every body and steps the simulation.
#[derive(Debug)]
pub struct Solver {
    bodies: Vec<(BodyId, Body)>,
    next_id: u64,
    config: SolverConfig,
    perf: Performance,
}

impl Solver {
    /// A solver with no bodies, configured by `config`.
    ///
    /// Rejects an invalid `config` (see [`SolverConfig::is_valid`]) up front,
    /// the same way [`Solver::step`] rejects a non-positive timestep, rather
    /// than letting a zero `substeps` silently turn every call into a no-op.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        if !config.is_valid() {
            return Err(SolverError::InvalidConfig(format!("{config:?}")));
        }
        debug!(?config, "creating solver");
        Ok(Solver {
            bodies: Vec::new(),
            next_id: 0,
            config,
            perf: Performance::default(),
        })
    }

    /// Register `body` and return a handle to it.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push((id, body));
        id
    }

    /// Remove a body, returning it if it was present.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|(existing, _)| *existing == id)?;
        Some(self.bodies.remove(index).1)
    }

    /// Borrow a body by id.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|(existing, _)| *existing == id).map(|(_, b)| b)
    }

    /// Mutably borrow a body by id.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|(existing, _)| *existing == id).map(|(_, b)| b)
    }

    /// Set whether `id` receives the solver's global acceleration, independent
    /// of its anchored state.
    pub fn set_gravity_affected(&mut self, id: BodyId, affected: bool) -> Result<(), SolverError> {
        let body = self.body_mut(id).ok_or(SolverError::UnknownBody(id))?;
        body.gravity_affected = affected;
        Ok(())
    }

    /// Iterate read-only views of every registered body, in insertion order.
    pub fn iter_bodies(&self) -> impl Iterator<Item = BodyView<'_>> {
        self.bodies.iter().map(|(id, body)| match &body.shape {
            Shape::Disk { radius } => BodyView::Disk {
                id: *id,
                position: body.position,
                radius: *radius,
            },
            Shape::Segment { points, .. } => BodyView::Segment { id: *id, points: *points },
            Shape::Polygon { points, rotation, .. } => BodyView::Polygon {
                id: *id,
                position: body.position,
                rotation: *rotation,
                vertices: points,
            },
        })
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True if no bodies are registered.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Named performance ring buffers for the three step phases.
    pub fn performance(&self) -> &Performance {
        &self.perf
    }

    /// Advance the simulation by `dt` seconds, split into
    /// [`SolverConfig::substeps`] equal sub-steps.
    pub fn step(&mut self, dt: Real) -> Result<(), SolverError> {
        if dt <= 0.0 {
            return Err(SolverError::NonPositiveTimestep(dt as f64));
        }
        let _span = trace_span!("solver_step", dt = dt as f64).entered();

        let sub_dt = dt / self.config.substeps as Real;
        for _ in 0..self.config.substeps {
            self.apply_gravity();

            let broad_start = Instant::now();
            let pairs = self.candidate_pairs();
            self.perf
                .broad_phase
                .push(broad_start.elapsed().as_secs_f64() * 1000.0);

            let narrow_start = Instant::now();
            for (i, j) in pairs {
                let (a, b) = self.body_pair_mut(i, j);
                narrow::resolve_pair(a, b, &self.config);
            }
            self.perf
                .narrow_phase
                .push(narrow_start.elapsed().as_secs_f64() * 1000.0);

            let integrate_start = Instant::now();
            for (_, body) in self.bodies.iter_mut() {
                integrate::integrate(body, sub_dt);
            }
            self.perf
                .integrate
                .push(integrate_start.elapsed().as_secs_f64() * 1000.0);
        }

        trace!(bodies = self.bodies.len(), "step complete");
        Ok(())
    }

    /// Ordered candidate pairs `(i, j)` whose bounding circles overlap,
    /// indexing into `self.bodies`. Visits both directions of every
    /// unordered pair; see [`narrow`] for why.
    fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.bodies.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if broadphase::bounding_circles_overlap(&self.bodies[i].1, &self.bodies[j].1) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn apply_gravity(&mut self) {
        let gravity = self.config.gravity;
        for (_, body) in self.bodies.iter_mut() {
            if body.gravity_affected && !body.anchored {
                body.acceleration += gravity;
            }
        }
    }

    fn body_pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &mut Body) {
        assert_ne!(i, j, "body_pair_mut requires distinct indices");
        if i < j {
            let (left, right) = self.bodies.split_at_mut(j);
            (&mut left[i].1, &mut right[0].1)
        } else {
            let (left, right) = self.bodies.split_at_mut(i);
            (&mut right[0].1, &mut left[j].1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2::Point;
    use approx::assert_relative_eq;

    #[test]
    fn step_rejects_non_positive_timestep() {
        let mut solver = Solver::new(SolverConfig::default()).unwrap();
        assert_eq!(solver.step(0.0), Err(SolverError::NonPositiveTimestep(0.0)));
        assert_eq!(solver.step(-1.0), Err(SolverError::NonPositiveTimestep(-1.0)));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SolverConfig {
            substeps: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(Solver::new(config), Err(SolverError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_body_id_is_reported() {
        let mut solver = Solver::new(SolverConfig::default()).unwrap();
        let ghost = {
            let mut throwaway = Solver::new(SolverConfig::default()).unwrap();
            throwaway.add_body(Body::disk(Point::new(0.0, 0.0), 1.0, false))
        };
        assert_eq!(
            solver.set_gravity_affected(ghost, false),
            Err(SolverError::UnknownBody(ghost))
        );
    }

    #[test]
    fn falling_disk_lands_on_anchored_floor_disk() {
        let mut solver = Solver::new(SolverConfig::default()).unwrap();
        let floor = solver.add_body(Body::disk(Point::new(0.0, 100.0), 40.0, true));
        let ball = solver.add_body(Body::disk(Point::new(0.0, 0.0), 10.0, false));
        for _ in 0..600 {
            solver.step(1.0 / 60.0).unwrap();
        }
        let ball_body = solver.body(ball).unwrap();
        let floor_body = solver.body(floor).unwrap();
        let separation = (ball_body.position - floor_body.position).magnitude();
        assert!(separation >= 49.0, "separation was {separation}");
        assert_relative_eq!(floor_body.position, Point::new(0.0, 100.0));
    }

    #[test]
    fn two_disks_colliding_head_on_separate() {
        let mut solver = Solver::new(SolverConfig {
            gravity: crate::vec2::Vec2::new(0.0, 0.0),
            ..SolverConfig::default()
        })
        .unwrap();
        let left = solver.add_body(Body::disk(Point::new(-6.0, 0.0), 5.0, false));
        let right = solver.add_body(Body::disk(Point::new(6.0, 0.0), 5.0, false));
        for _ in 0..30 {
            solver.step(1.0 / 60.0).unwrap();
        }
        let separation = (solver.body(left).unwrap().position - solver.body(right).unwrap().position)
            .magnitude();
        assert!(separation >= 9.9, "separation was {separation}");
    }

    #[test]
    fn anchored_spinning_polygon_stays_bounded() {
        let mut solver = Solver::new(SolverConfig::default()).unwrap();
        let id = solver.add_body(Body::regular_polygon(Point::new(0.0, 0.0), 5.0, 6, true));
        solver.body_mut(id).unwrap().set_motor(0.05);
        for _ in 0..600 {
            solver.step(1.0 / 60.0).unwrap();
        }
        let body = solver.body(id).unwrap();
        assert_relative_eq!(body.position, Point::new(0.0, 0.0));
        if let Shape::Polygon { rotation, .. } = body.shape {
            assert!(rotation < 2.0 * std::f32::consts::PI as Real);
            assert!(rotation > -2.0 * std::f32::consts::PI as Real);
        }
    }
}
