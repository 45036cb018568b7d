//! Linear programming for kernel feasibility.
//!
//! Purpose
//! - `problem`: assemble `minimize c·x subject to A x <= b` from half-spaces.
//! - `seidel`: the raw three-variable LP primitive (sentinel results).
//! - `solve`: the adapter that turns sentinels into [`LpOutcome`]. Nothing
//!   outside this module looks at `±inf` objective values.

mod problem;
mod seidel;

pub use problem::LpProblem;

use nalgebra::Vector3;

/// Solver configuration (tolerances and the shuffle seed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LpCfg {
    /// Feasibility slack per unit of problem scale (rows are unit-normalized).
    pub eps_feas: f64,
    /// Radius of the artificial bounding box per unit of problem scale.
    pub box_scale: f64,
    /// Seed of the constraint shuffle; fixed seeds give reproducible points.
    pub seed: u64,
}

impl Default for LpCfg {
    fn default() -> Self {
        Self {
            eps_feas: 1e-9,
            box_scale: 1e6,
            seed: 0x5eed_1a7e,
        }
    }
}

/// Classified LP result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LpOutcome {
    /// Feasible with a finite optimum at `x`.
    Optimal { x: Vector3<f64>, objective: f64 },
    /// No point satisfies all constraints.
    Infeasible,
    /// The objective decreases without bound over the feasible region.
    Unbounded,
}

impl LpOutcome {
    #[inline]
    pub fn point(&self) -> Option<Vector3<f64>> {
        match self {
            Self::Optimal { x, .. } => Some(*x),
            _ => None,
        }
    }
}

/// Solve `problem` and classify the primitive's sentinel objective.
pub fn solve(problem: &LpProblem, cfg: &LpCfg) -> LpOutcome {
    let (objective, x) = seidel::linprog(&problem.c, &problem.a, &problem.b, cfg);
    if objective == f64::INFINITY {
        LpOutcome::Infeasible
    } else if objective == f64::NEG_INFINITY {
        LpOutcome::Unbounded
    } else {
        LpOutcome::Optimal { x, objective }
    }
}
