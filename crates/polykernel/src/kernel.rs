//! Kernel query: mesh file → half-spaces → LP → kernel point.
//!
//! Validation happens before any LP work, in this order: empty mesh,
//! degenerate faces, winding consistency, signed volume. A query either builds
//! the complete half-space set and solves it or stops with a [`KernelError`].
//!
//! Winding policy
//! - Faces must wind counter-clockwise seen from outside. With
//!   `check_winding` on (default), neighbours that disagree and globally
//!   inverted meshes are rejected instead of yielding a wrong kernel.
//! - Orientation is never repaired here.

use std::fmt;
use std::path::Path;

use nalgebra::Vector3;

use crate::geom3::{cfg as geom_cfg, extract_halfspaces, DegenerateFace};
use crate::lp::{solve, LpCfg, LpOutcome, LpProblem};
use crate::mesh::{check_winding, load, Mesh, MeshError, MeshView, TriId, WindingDefect};

/// Query configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelCfg {
    pub lp: LpCfg,
    /// Relative zero-area threshold for faces (see `Hs3::from_points`).
    pub eps_degenerate: f64,
    /// Zero-volume threshold relative to the bounding-box diagonal cubed.
    pub eps_volume: f64,
    /// Reject neighbours with clashing winding and inverted meshes.
    pub check_winding: bool,
}

impl Default for KernelCfg {
    fn default() -> Self {
        Self {
            lp: LpCfg::default(),
            eps_degenerate: geom_cfg::DEGENERATE_EPS,
            eps_volume: geom_cfg::VOLUME_EPS,
            check_winding: true,
        }
    }
}

/// Outcome of a successful query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KernelPoint {
    /// A point inside (or on) every face's half-space.
    Found(Vector3<f64>),
    /// The half-spaces have no common point: the kernel is empty.
    Infeasible,
    /// The LP is unbounded; for a closed mesh this means a broken surface.
    Unbounded,
}

impl KernelPoint {
    #[inline]
    pub fn point(&self) -> Option<Vector3<f64>> {
        match self {
            Self::Found(p) => Some(*p),
            _ => None,
        }
    }

    /// Short machine-friendly label: `found`, `infeasible` or `unbounded`.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
        }
    }
}

impl fmt::Display for KernelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(p) => write!(f, "Kernel point found: [{}, {}, {}]", p.x, p.y, p.z),
            Self::Infeasible => write!(f, "Kernel Point Infeasible"),
            Self::Unbounded => write!(f, "Mesh Unbounded"),
        }
    }
}

/// Reasons a query stops before solving.
#[derive(Debug)]
pub enum KernelError {
    /// Reading or parsing the mesh file failed.
    Load(MeshError),
    /// The mesh has no triangles.
    EmptyMesh,
    /// A triangle does not span a plane.
    DegenerateFace { triangle: TriId },
    /// The surface encloses no volume (e.g. a lone triangle or a flat sheet).
    ZeroVolume { volume: f64 },
    /// Faces consistently point inwards (negative signed volume).
    InvertedWinding { volume: f64 },
    /// Two neighbouring faces disagree on orientation.
    InconsistentWinding(WindingDefect),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "{e}"),
            Self::EmptyMesh => write!(f, "mesh has no triangles"),
            Self::DegenerateFace { triangle } => write!(
                f,
                "triangle {} is degenerate (collinear or repeated corners)",
                triangle.0
            ),
            Self::ZeroVolume { volume } => {
                write!(f, "mesh encloses no volume (signed volume {volume:e})")
            }
            Self::InvertedWinding { volume } => write!(
                f,
                "faces wind inwards (signed volume {volume}); reverse the face order"
            ),
            Self::InconsistentWinding(defect) => write!(f, "inconsistent winding: {defect}"),
        }
    }
}

impl std::error::Error for KernelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // transparent: `Load` displays as the inner error
            Self::Load(e) => std::error::Error::source(e),
            _ => None,
        }
    }
}

impl From<MeshError> for KernelError {
    fn from(e: MeshError) -> Self {
        Self::Load(e)
    }
}

impl From<DegenerateFace> for KernelError {
    fn from(e: DegenerateFace) -> Self {
        Self::DegenerateFace { triangle: e.triangle }
    }
}

impl From<WindingDefect> for KernelError {
    fn from(e: WindingDefect) -> Self {
        Self::InconsistentWinding(e)
    }
}

/// Kernel point of the mesh file at `path` with default settings.
pub fn kernel_point<P: AsRef<Path>>(path: P) -> Result<KernelPoint, KernelError> {
    kernel_point_with(path, &KernelCfg::default())
}

/// Kernel point of the mesh file at `path`.
pub fn kernel_point_with<P: AsRef<Path>>(
    path: P,
    cfg: &KernelCfg,
) -> Result<KernelPoint, KernelError> {
    let path = path.as_ref();
    let mesh = load(path)?;
    log_mesh(path, &mesh);
    kernel_point_of(&mesh, cfg)
}

/// Debug event with the mesh size; warning when the surface has open edges.
pub fn log_mesh(path: &Path, mesh: &Mesh) {
    let open_edges = mesh.boundary_edge_count();
    tracing::debug!(
        path = %path.display(),
        vertices = mesh.num_vertices(),
        triangles = mesh.num_triangles(),
        edges = mesh.num_edges(),
        "mesh loaded"
    );
    if open_edges > 0 {
        tracing::warn!(
            path = %path.display(),
            open_edges,
            "mesh is not closed; the kernel LP may be unbounded"
        );
    }
}

/// Kernel point of an in-memory mesh.
pub fn kernel_point_of<M: MeshView + ?Sized>(
    mesh: &M,
    cfg: &KernelCfg,
) -> Result<KernelPoint, KernelError> {
    if mesh.triangles().is_empty() {
        return Err(KernelError::EmptyMesh);
    }
    let halfspaces = extract_halfspaces(mesh, cfg.eps_degenerate)?;
    if cfg.check_winding {
        check_winding(mesh)?;
    }
    check_volume(mesh, cfg)?;

    let problem = LpProblem::from_halfspaces(&halfspaces);
    let outcome = solve(&problem, &cfg.lp);
    let result = match outcome {
        LpOutcome::Optimal { x, .. } => KernelPoint::Found(x),
        LpOutcome::Infeasible => KernelPoint::Infeasible,
        LpOutcome::Unbounded => KernelPoint::Unbounded,
    };
    tracing::debug!(
        constraints = problem.num_constraints(),
        status = result.status(),
        "kernel LP solved"
    );
    Ok(result)
}

fn check_volume<M: MeshView + ?Sized>(mesh: &M, cfg: &KernelCfg) -> Result<(), KernelError> {
    let volume = mesh.signed_volume();
    let diag = mesh.bounds().map_or(0.0, |(lo, hi)| (hi - lo).norm());
    if volume.abs() <= cfg.eps_volume * diag.powi(3) {
        return Err(KernelError::ZeroVolume { volume });
    }
    if cfg.check_winding && volume < 0.0 {
        return Err(KernelError::InvertedWinding { volume });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{parse_obj, parse_off};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    fn assert_inside(mesh: &Mesh, p: Vector3<f64>) {
        for h in extract_halfspaces(mesh, geom_cfg::DEGENERATE_EPS).unwrap() {
            assert!(h.satisfies_eps(p, 1e-9), "{p:?} violates {h:?}");
        }
    }

    #[test]
    fn cube_kernel_point_lies_in_the_cube() {
        let kp = kernel_point(fixture("cube.obj")).unwrap();
        let p = kp.point().expect("cube is convex");
        assert!(p.iter().all(|c| (-0.5 - 1e-9..=0.5 + 1e-9).contains(c)));
        // objective is +z: the point sits on the bottom face
        assert!((p.z + 0.5).abs() < 1e-9);
        assert_inside(&load(fixture("cube.obj")).unwrap(), p);
    }

    #[test]
    fn tetrahedron_is_feasible() {
        let mesh = load(fixture("tetra.off")).unwrap();
        let kp = kernel_point_of(&mesh, &KernelCfg::default()).unwrap();
        assert_inside(&mesh, kp.point().unwrap());
    }

    #[test]
    fn l_prism_kernel_is_the_inner_square() {
        let mesh = load(fixture("l_prism.off")).unwrap();
        let p = kernel_point_of(&mesh, &KernelCfg::default())
            .unwrap()
            .point()
            .unwrap();
        assert_inside(&mesh, p);
        assert!(p.x <= 1.0 + 1e-9 && p.y <= 1.0 + 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn disjoint_and_u_shaped_solids_have_empty_kernels() {
        assert_eq!(
            kernel_point(fixture("two_cubes.obj")).unwrap(),
            KernelPoint::Infeasible
        );
        assert_eq!(
            kernel_point(fixture("u_prism.obj")).unwrap(),
            KernelPoint::Infeasible
        );
    }

    #[test]
    fn open_box_is_unbounded() {
        assert_eq!(
            kernel_point(fixture("open_box.obj")).unwrap(),
            KernelPoint::Unbounded
        );
    }

    #[test]
    fn obj_and_off_forms_agree() {
        let a = kernel_point(fixture("cube.obj")).unwrap();
        let b = kernel_point(fixture("cube.off")).unwrap();
        assert_eq!(a, b);
        let eps = geom_cfg::DEGENERATE_EPS;
        let ha = extract_halfspaces(&load(fixture("cube.obj")).unwrap(), eps).unwrap();
        let hb = extract_halfspaces(&load(fixture("cube.off")).unwrap(), eps).unwrap();
        assert_eq!(ha, hb);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let first = kernel_point(fixture("l_prism.off")).unwrap();
        let second = kernel_point(fixture("l_prism.off")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_triangle_is_rejected_before_solving() {
        let err = kernel_point(fixture("triangle.obj")).unwrap_err();
        assert!(matches!(err, KernelError::ZeroVolume { .. }), "{err}");
    }

    #[test]
    fn flat_sheets_away_from_the_origin_are_rejected() {
        let lifted = parse_obj("v 0 0 1\nv 1 0 1\nv 0 1 1\nf 1 2 3\n").unwrap();
        let err = kernel_point_of(&lifted, &KernelCfg::default()).unwrap_err();
        assert!(matches!(err, KernelError::ZeroVolume { .. }), "{err}");

        // two triangles on the tilted plane x + y + z = 3
        let tilted = parse_obj(
            "v 3 0 0\nv 0 3 0\nv 0 0 3\nv 2 2 -1\nf 1 2 3\nf 1 4 2\n",
        )
        .unwrap();
        let lax = KernelCfg {
            check_winding: false,
            ..KernelCfg::default()
        };
        for cfg in [KernelCfg::default(), lax] {
            let err = kernel_point_of(&tilted, &cfg).unwrap_err();
            assert!(matches!(err, KernelError::ZeroVolume { .. }), "{err}");
        }
    }

    #[test]
    fn empty_and_degenerate_meshes_are_errors() {
        let empty = parse_obj("v 0 0 0\nv 1 0 0\n").unwrap();
        assert!(matches!(
            kernel_point_of(&empty, &KernelCfg::default()),
            Err(KernelError::EmptyMesh)
        ));
        let mut cube = parse_off(include_str!("../fixtures/cube.off")).unwrap();
        cube.add_vertex(2.0, 2.0, 2.0);
        cube.add_triangle([8, 8, 0]).unwrap();
        assert!(matches!(
            kernel_point_of(&cube, &KernelCfg::default()),
            Err(KernelError::DegenerateFace { triangle: TriId(12) })
        ));
    }

    #[test]
    fn inverted_and_inconsistent_winding_are_reported() {
        let text = include_str!("../fixtures/cube.off");
        let cube = parse_off(text).unwrap();
        let mut inverted = Mesh::new();
        for v in cube.vertices() {
            inverted.add_vertex(v.coords.x, v.coords.y, v.coords.z);
        }
        for t in cube.triangles() {
            let [a, b, c] = t.corners.map(|v| v.0);
            inverted.add_triangle([a, c, b]).unwrap();
        }
        let err = kernel_point_of(&inverted, &KernelCfg::default()).unwrap_err();
        assert!(matches!(err, KernelError::InvertedWinding { .. }), "{err}");

        // without the check the LP sees the complementary half-spaces
        let lax = KernelCfg {
            check_winding: false,
            ..KernelCfg::default()
        };
        assert_ne!(
            kernel_point_of(&inverted, &lax).unwrap().status(),
            "found"
        );

        let mut mixed = Mesh::new();
        for v in cube.vertices() {
            mixed.add_vertex(v.coords.x, v.coords.y, v.coords.z);
        }
        for (i, t) in cube.triangles().iter().enumerate() {
            let [a, b, c] = t.corners.map(|v| v.0);
            let corners = if i == 5 { [a, c, b] } else { [a, b, c] };
            mixed.add_triangle(corners).unwrap();
        }
        let err = kernel_point_of(&mixed, &KernelCfg::default()).unwrap_err();
        assert!(matches!(err, KernelError::InconsistentWinding(_)), "{err}");
    }

    #[test]
    fn load_failures_are_distinct_errors() {
        let err = kernel_point(fixture("missing.off")).unwrap_err();
        assert!(matches!(err, KernelError::Load(MeshError::Io { .. })));
        assert!(std::error::Error::source(&err).is_some());
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.off");
        std::fs::write(&bad, "OFF\n3 1 0\n0 0 0\n").unwrap();
        let err = kernel_point(&bad).unwrap_err();
        assert!(matches!(err, KernelError::Load(MeshError::Format { .. })));
        assert!(err.to_string().contains("line"), "{err}");
    }

    #[test]
    fn display_matches_report_lines() {
        assert_eq!(
            KernelPoint::Found(Vector3::new(1.0, -0.5, 2.25)).to_string(),
            "Kernel point found: [1, -0.5, 2.25]"
        );
        assert_eq!(KernelPoint::Infeasible.to_string(), "Kernel Point Infeasible");
        assert_eq!(KernelPoint::Unbounded.to_string(), "Mesh Unbounded");
    }

    fn moved_cube(scale: f64, shift: Vector3<f64>) -> Mesh {
        let cube = parse_off(include_str!("../fixtures/cube.off")).unwrap();
        let mut out = Mesh::with_capacity(cube.num_vertices(), cube.num_triangles());
        for v in cube.vertices() {
            let p = v.coords * scale + shift;
            out.add_vertex(p.x, p.y, p.z);
        }
        for t in cube.triangles() {
            out.add_triangle(t.corners.map(|v| v.0)).unwrap();
        }
        out
    }

    proptest! {
        #[test]
        fn moved_cube_keeps_a_kernel_point(
            scale in 0.1..10.0f64,
            shift in prop::array::uniform3(-50.0..50.0f64),
        ) {
            let shift = Vector3::from(shift);
            let mesh = moved_cube(scale, shift);
            let p = kernel_point_of(&mesh, &KernelCfg::default()).unwrap().point();
            prop_assert!(p.is_some());
            let p = p.unwrap();
            let tol = 1e-6 * (1.0 + scale + shift.amax());
            for h in extract_halfspaces(&mesh, geom_cfg::DEGENERATE_EPS).unwrap() {
                prop_assert!(h.satisfies_eps(p, tol), "{p:?} violates {h:?}");
            }
            prop_assert!((p.z - (shift.z - 0.5 * scale)).abs() <= tol);
        }

        #[test]
        fn seed_does_not_change_the_classification(seed in any::<u64>()) {
            let cfg = KernelCfg {
                lp: LpCfg { seed, ..LpCfg::default() },
                ..KernelCfg::default()
            };
            for (name, expected) in [
                ("l_prism.off", "found"),
                ("u_prism.obj", "infeasible"),
                ("open_box.obj", "unbounded"),
            ] {
                let mesh = load(fixture(name)).unwrap();
                prop_assert_eq!(kernel_point_of(&mesh, &cfg).unwrap().status(), expected);
            }
        }
    }
}
