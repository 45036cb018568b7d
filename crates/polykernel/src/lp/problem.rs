//! LP assembly: half-spaces → `minimize c·x subject to A x <= b`.

use nalgebra::{DMatrix, DVector, Vector3};

use crate::geom3::Hs3;

/// Single-use LP in three unknowns.
///
/// Invariants:
/// - `a` is `m × 3`, `b` has length `m`; row `i` comes from half-space `i`.
#[derive(Clone, Debug)]
pub struct LpProblem {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: Vector3<f64>,
}

impl LpProblem {
    /// One row per half-space: `n·x + d <= 0` becomes `n·x <= -d`.
    ///
    /// Objective is `+z`; any direction would do since only feasibility matters.
    pub fn from_halfspaces(hs: &[Hs3]) -> Self {
        let m = hs.len();
        let a = DMatrix::from_fn(m, 3, |i, j| hs[i].n[j]);
        let b = DVector::from_iterator(m, hs.iter().map(|h| -h.d));
        Self {
            a,
            b,
            c: Vector3::z(),
        }
    }

    /// Replace the objective direction.
    pub fn with_objective(mut self, c: Vector3<f64>) -> Self {
        self.c = c;
        self
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.a.nrows()
    }

    /// Largest violation `max_i (A_i·x - b_i) / |A_i|` (≤ 0 when feasible).
    pub fn max_violation(&self, x: &Vector3<f64>) -> f64 {
        (0..self.num_constraints())
            .map(|i| {
                let row = Vector3::new(self.a[(i, 0)], self.a[(i, 1)], self.a[(i, 2)]);
                let len = row.norm();
                if len == 0.0 {
                    -self.b[i]
                } else {
                    (row.dot(x) - self.b[i]) / len
                }
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
