//! Solver configuration: the handful of tunables that do not belong on a
//! per-body basis.

use crate::vec2::Vec2;
use crate::Real;

/// Tunables for a [`Solver`](crate::Solver).
///
/// `Default` gives a reasonable starting point for a screen-space simulation
/// (gravity pointing down the positive y axis, 8 sub-steps per `step` call).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Number of Verlet sub-steps each [`Solver::step`](crate::Solver::step)
    /// call is split into. More sub-steps trade CPU time for stiffer
    /// constraints, since there is no impulse iteration to tune instead.
    pub substeps: u32,
    /// Constant acceleration applied to every body with `gravity_affected`
    /// set, each sub-step.
    pub gravity: Vec2,
    /// EPA convergence tolerance: the penetration estimate is accepted once
    /// consecutive iterations agree within this distance.
    pub epa_epsilon: Real,
    /// Hard cap on EPA iterations before returning the best estimate found.
    pub epa_max_iters: u32,
    /// Fraction of the GJK/EPA penetration vector applied per sub-step to
    /// separate two polygon-involving bodies. Less than 1.0 so that stacked
    /// polygons settle rather than overshoot and oscillate.
    pub polygon_correction_scale: Real,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            substeps: 8,
            gravity: Vec2::new(0.0, 1000.0),
            epa_epsilon: 0.001,
            epa_max_iters: 32,
            polygon_correction_scale: 0.05,
        }
    }
}

impl SolverConfig {
    /// True if every field is within a usable range: at least one sub-step,
    /// a positive EPA tolerance, at least one EPA iteration, and a
    /// correction scale in `(0.0, 1.0]`.
    pub fn is_valid(&self) -> bool {
        self.substeps >= 1
            && self.epa_epsilon > 0.0
            && self.epa_max_iters >= 1
            && self.polygon_correction_scale > 0.0
            && self.polygon_correction_scale <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SolverConfig::default().is_valid());
    }

    #[test]
    fn zero_substeps_is_invalid() {
        let mut config = SolverConfig::default();
        config.substeps = 0;
        assert!(!config.is_valid());
    }

    #[test]
    fn correction_scale_above_one_is_invalid() {
        let mut config = SolverConfig::default();
        config.polygon_correction_scale = 1.5;
        assert!(!config.is_valid());
    }
}
