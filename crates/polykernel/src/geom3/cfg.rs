//! Tolerance defaults for 3D geometry (internal).

/// Relative threshold for a zero-area face: `|n| <= DEGENERATE_EPS * |e1| * |e2|`.
pub(crate) const DEGENERATE_EPS: f64 = 1e-12;
/// Membership slack used by `Hs3::satisfies` and tests.
pub(crate) const FEAS_EPS: f64 = 1e-9;
/// Relative threshold for a zero signed volume (scaled by the bounding-box diagonal cubed).
pub(crate) const VOLUME_EPS: f64 = 1e-12;
