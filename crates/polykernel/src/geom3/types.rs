//! Closed half-space in R^3.

use nalgebra::Vector3;

use super::cfg::{DEGENERATE_EPS, FEAS_EPS};

/// Closed half-space `n · x + d <= 0`, i.e. `A x + B y + C z + D <= 0`.
///
/// Invariants:
/// - `n` is not normalized; `d` is any finite real.
/// - Membership uses `<= FEAS_EPS * |n|` (slack measured as a distance).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs3 {
    pub n: Vector3<f64>,
    pub d: f64,
}

impl Hs3 {
    #[inline]
    pub fn new(n: Vector3<f64>, d: f64) -> Self {
        Self { n, d }
    }

    /// Plane through `p0, p1, p2` with normal `(p1 - p0) × (p2 - p0)`.
    ///
    /// `None` when the corners are (numerically) collinear or coincide.
    #[inline]
    pub fn from_points(p0: Vector3<f64>, p1: Vector3<f64>, p2: Vector3<f64>) -> Option<Self> {
        Self::from_points_eps(p0, p1, p2, DEGENERATE_EPS)
    }

    /// As [`Hs3::from_points`], rejecting `|n| <= eps * |p1 - p0| * |p2 - p0|`.
    pub fn from_points_eps(
        p0: Vector3<f64>,
        p1: Vector3<f64>,
        p2: Vector3<f64>,
        eps: f64,
    ) -> Option<Self> {
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let n = e1.cross(&e2);
        let scale = e1.norm() * e2.norm();
        let len = n.norm();
        if !len.is_finite() || len == 0.0 || len <= eps * scale {
            return None;
        }
        Some(Self { n, d: -n.dot(&p0) })
    }

    /// Coefficients `[A, B, C, D]`.
    #[inline]
    pub fn abcd(&self) -> [f64; 4] {
        [self.n.x, self.n.y, self.n.z, self.d]
    }

    /// `n·p + d`: negative inside, zero on the plane.
    #[inline]
    pub fn value(&self, p: Vector3<f64>) -> f64 {
        self.n.dot(&p) + self.d
    }

    #[inline]
    pub fn satisfies(&self, p: Vector3<f64>) -> bool {
        self.satisfies_eps(p, FEAS_EPS)
    }

    /// Membership with custom slack `eps`, measured as distance to the plane.
    #[inline]
    pub fn satisfies_eps(&self, p: Vector3<f64>, eps: f64) -> bool {
        self.value(p) <= eps * self.n.norm()
    }

    /// Same half-space with unit normal; `None` for a zero normal.
    pub fn normalized(&self) -> Option<Self> {
        let len = self.n.norm();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(Self {
            n: self.n / len,
            d: self.d / len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn plane_through_ccw_triangle_points_up() {
        let h = Hs3::from_points(
            vector![0.0, 0.0, 1.0],
            vector![1.0, 0.0, 1.0],
            vector![0.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(h.abcd(), [0.0, 0.0, 1.0, -1.0]);
        assert!(h.satisfies(vector![0.3, 0.3, 0.0]));
        assert!(!h.satisfies(vector![0.3, 0.3, 1.5]));
        assert!(h.value(vector![5.0, -2.0, 1.0]).abs() < 1e-12);
    }

    #[test]
    fn collinear_and_repeated_corners_are_rejected() {
        let a = vector![0.0, 0.0, 0.0];
        let b = vector![1.0, 1.0, 1.0];
        let c = vector![2.0, 2.0, 2.0];
        assert!(Hs3::from_points(a, b, c).is_none());
        assert!(Hs3::from_points(a, a, b).is_none());
        assert!(Hs3::from_points(a, a, a).is_none());
    }

    #[test]
    fn tiny_but_well_shaped_faces_survive() {
        let s = 1e-6;
        let h = Hs3::from_points(
            vector![0.0, 0.0, 0.0],
            vector![s, 0.0, 0.0],
            vector![0.0, s, 0.0],
        );
        assert!(h.is_some());
    }

    #[test]
    fn normalized_keeps_the_set() {
        let h = Hs3::new(vector![0.0, 3.0, 4.0], -10.0);
        let u = h.normalized().unwrap();
        assert!((u.n.norm() - 1.0).abs() < 1e-12);
        assert!((u.d + 2.0).abs() < 1e-12);
        assert!(Hs3::new(vector![0.0, 0.0, 0.0], 1.0).normalized().is_none());
    }
}
