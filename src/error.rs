//! Error surface. Every error here is caller misuse, recoverable by the
//! caller without restarting the solver: an unknown id, or a non-positive
//! timestep. Geometric edge cases (degenerate segments, EPA non-convergence)
//! are not errors; the relevant resolver falls back to a safe no-op instead,
//! see the module docs on `narrow`.

use thiserror::Error;

use crate::solver::BodyId;

/// Errors returned by [`Solver`](crate::Solver) methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// A [`BodyId`] that does not (or no longer) refer to a body in this solver.
    #[error("no body registered with id {0:?}")]
    UnknownBody(BodyId),

    /// [`Solver::step`](crate::Solver::step) was called with `dt <= 0`.
    #[error("step() requires a positive timestep, got {0}")]
    NonPositiveTimestep(f64),

    /// [`Solver::new`](crate::Solver::new) was given a [`SolverConfig`](crate::SolverConfig)
    /// that failed [`SolverConfig::is_valid`](crate::SolverConfig::is_valid).
    #[error("invalid solver config: {0}")]
    InvalidConfig(String),
}
