//! Seidel's randomized incremental LP for a handful of unknowns.
//!
//! Solves `minimize c·x subject to A x <= b` in expected `O(d! m)` time.
//! Rows are visited in a seeded random order; whenever the running optimum
//! violates row `i`, the optimum of rows `0..i` restricted to row `i`'s
//! hyperplane is found by eliminating one unknown and recursing.
//!
//! Boundedness: every level carries an implicit box `|x_j| <= R`, so each
//! subproblem has a finite optimum. Eliminated unknowns keep their box as two
//! explicit rows. If the final optimum touches the box, the problem is solved
//! again with `2R`; a strictly better objective means the LP is unbounded.

use nalgebra::{DMatrix, DVector, Vector3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::LpCfg;

/// Projected coefficient norm below which a row is treated as `0 <= b`.
const COEF_EPS: f64 = 1e-12;
/// Relative objective gain (per unit of box radius) that signals unboundedness.
const UNBOUNDED_GAIN: f64 = 1e-6;

/// Constraint `a·x <= b` with unit-length `a`.
#[derive(Clone, Debug)]
struct Row {
    a: Vec<f64>,
    b: f64,
}

impl Row {
    /// Normalize; `None` for a (numerically) zero coefficient vector.
    fn unit(a: Vec<f64>, b: f64) -> Option<Self> {
        let len = a.iter().map(|v| v * v).sum::<f64>().sqrt();
        if !len.is_finite() || len <= COEF_EPS {
            return None;
        }
        Some(Self {
            a: a.into_iter().map(|v| v / len).collect(),
            b: b / len,
        })
    }

    #[inline]
    fn violated_by(&self, x: &[f64], eps: f64) -> bool {
        dot(&self.a, x) > self.b + eps
    }
}

/// Raw LP primitive with the sentinel convention of the classic `linprog`:
/// `+inf` when infeasible, `-inf` when unbounded, otherwise the optimal value.
///
/// The returned point is only meaningful for a finite objective.
pub(crate) fn linprog(
    c: &Vector3<f64>,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    cfg: &LpCfg,
) -> (f64, Vector3<f64>) {
    debug_assert_eq!(a.ncols(), 3, "constraint matrix must have three columns");
    debug_assert_eq!(a.nrows(), b.len(), "one bound per constraint row");

    let mut rows = Vec::with_capacity(a.nrows());
    for i in 0..a.nrows() {
        let coeffs = vec![a[(i, 0)], a[(i, 1)], a[(i, 2)]];
        match Row::unit(coeffs, b[i]) {
            Some(row) => rows.push(row),
            // 0·x <= b[i] with b[i] < 0 can never hold
            None if b[i] < 0.0 => return (f64::INFINITY, Vector3::zeros()),
            None => {}
        }
    }

    let scale = rows.iter().map(|r| r.b.abs()).fold(1.0, f64::max);
    let eps = cfg.eps_feas * scale;
    let bound = cfg.box_scale * scale;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    rows.shuffle(&mut rng);

    let cv = [c.x, c.y, c.z];
    let Some(x) = solve_rows(&rows, &cv, bound, eps) else {
        return (f64::INFINITY, Vector3::zeros());
    };
    let obj = dot(&cv, &x);

    if x.iter().any(|v| v.abs() >= bound * (1.0 - 1e-9)) {
        if let Some(x2) = solve_rows(&rows, &cv, 2.0 * bound, eps) {
            let obj2 = dot(&cv, &x2);
            if obj2 < obj - UNBOUNDED_GAIN * bound * c.norm() {
                return (f64::NEG_INFINITY, to_vec3(&x2));
            }
        }
    }
    (obj, to_vec3(&x))
}

fn solve_rows(rows: &[Row], c: &[f64], bound: f64, eps: f64) -> Option<Vec<f64>> {
    if c.len() == 1 {
        return solve_1d(rows, c[0], bound, eps);
    }
    let mut x: Vec<f64> = c.iter().map(|&cj| box_corner(cj, bound)).collect();
    for (i, h) in rows.iter().enumerate() {
        if !h.violated_by(&x, eps) {
            continue;
        }
        // new optimum lies on h's hyperplane
        let plane = Elimination::on(h);
        let (sub_rows, sub_c) = plane.project(&rows[..i], c, bound, eps)?;
        let y = solve_rows(&sub_rows, &sub_c, bound, eps)?;
        x = plane.lift(&y);
    }
    Some(x)
}

fn solve_1d(rows: &[Row], c: f64, bound: f64, eps: f64) -> Option<Vec<f64>> {
    let mut lo = -bound;
    let mut hi = bound;
    for r in rows {
        let a = r.a[0];
        if a > 0.0 {
            hi = hi.min(r.b / a);
        } else {
            lo = lo.max(r.b / a);
        }
    }
    if lo > hi + eps {
        return None;
    }
    if lo > hi {
        let mid = 0.5 * (lo + hi);
        lo = mid;
        hi = mid;
    }
    let x = if c > 0.0 {
        lo
    } else if c < 0.0 {
        hi
    } else {
        0.0_f64.clamp(lo, hi)
    };
    Some(vec![x])
}

/// Box vertex minimizing `cj * xj`; zero when the coordinate is free.
#[inline]
fn box_corner(cj: f64, bound: f64) -> f64 {
    if cj > 0.0 {
        -bound
    } else if cj < 0.0 {
        bound
    } else {
        0.0
    }
}

/// Substitution `x_k = base - Σ_{j≠k} ratio_j x_j` from a row's hyperplane.
struct Elimination {
    k: usize,
    ratio: Vec<f64>,
    base: f64,
}

impl Elimination {
    /// Pivot on the largest coefficient (at least `1/√d` for a unit row).
    fn on(h: &Row) -> Self {
        let k = (0..h.a.len())
            .max_by(|&i, &j| h.a[i].abs().total_cmp(&h.a[j].abs()))
            .unwrap_or(0);
        let piv = h.a[k];
        let ratio = h.a.iter().map(|v| v / piv).collect();
        Self {
            k,
            ratio,
            base: h.b / piv,
        }
    }

    #[inline]
    fn drop_k(&self, v: &[f64]) -> Vec<f64> {
        v.iter()
            .enumerate()
            .filter(|&(j, _)| j != self.k)
            .map(|(_, &x)| x)
            .collect()
    }

    /// Rows and objective of the `(d-1)`-dimensional problem on the hyperplane.
    ///
    /// `None` when a row becomes `0 <= b` with `b < -eps`: the hyperplane misses
    /// the feasible region of `prefix`.
    fn project(
        &self,
        prefix: &[Row],
        c: &[f64],
        bound: f64,
        eps: f64,
    ) -> Option<(Vec<Row>, Vec<f64>)> {
        let ratio = self.drop_k(&self.ratio);
        let mut out = Vec::with_capacity(prefix.len() + 2);
        let mut push = |a: Vec<f64>, b: f64| -> Option<()> {
            match Row::unit(a, b) {
                Some(row) => out.push(row),
                None if b < -eps => return None,
                None => {}
            }
            Some(())
        };
        // box of the eliminated unknown: -bound <= x_k <= bound
        push(ratio.iter().map(|r| -r).collect(), bound - self.base)?;
        push(ratio.clone(), bound + self.base)?;
        for r in prefix {
            let ak = r.a[self.k];
            let a: Vec<f64> = self
                .drop_k(&r.a)
                .iter()
                .zip(&ratio)
                .map(|(aj, rj)| aj - ak * rj)
                .collect();
            push(a, r.b - ak * self.base)?;
        }
        let ck = c[self.k];
        let sub_c: Vec<f64> = self
            .drop_k(c)
            .iter()
            .zip(&ratio)
            .map(|(cj, rj)| cj - ck * rj)
            .collect();
        Some((out, sub_c))
    }

    fn lift(&self, y: &[f64]) -> Vec<f64> {
        let mut x = Vec::with_capacity(y.len() + 1);
        x.extend_from_slice(&y[..self.k]);
        x.push(0.0);
        x.extend_from_slice(&y[self.k..]);
        let rest: f64 = x
            .iter()
            .zip(&self.ratio)
            .enumerate()
            .filter(|&(j, _)| j != self.k)
            .map(|(_, (xj, rj))| xj * rj)
            .sum();
        x[self.k] = self.base - rest;
        x
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn to_vec3(x: &[f64]) -> Vector3<f64> {
    Vector3::new(x[0], x[1], x[2])
}
