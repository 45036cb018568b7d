//! Half-space extraction: one `Hs3` per triangle, same order as the mesh.

use std::fmt;

use super::types::Hs3;
use crate::mesh::{MeshView, TriId};

/// A triangle whose corners do not span a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegenerateFace {
    pub triangle: TriId,
}

impl fmt::Display for DegenerateFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "triangle {} is degenerate (collinear or repeated corners)",
            self.triangle.0
        )
    }
}

impl std::error::Error for DegenerateFace {}

/// Supporting half-spaces of all triangles; entry `i` belongs to triangle `i`.
///
/// Stops at the first triangle with `|n| <= eps * |e1| * |e2|`.
pub fn extract_halfspaces<M: MeshView + ?Sized>(
    mesh: &M,
    eps: f64,
) -> Result<Vec<Hs3>, DegenerateFace> {
    mesh.triangles()
        .iter()
        .map(|t| {
            let [p0, p1, p2] = mesh.corners(t);
            Hs3::from_points_eps(p0, p1, p2, eps).ok_or(DegenerateFace { triangle: t.id })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom3::cfg::DEGENERATE_EPS;
    use crate::mesh::{parse_obj, parse_off, Mesh, MeshView};
    use nalgebra::Vector3;
    use proptest::prelude::*;

    fn cube() -> Mesh {
        parse_off(include_str!("../../fixtures/cube.off")).unwrap()
    }

    #[test]
    fn cube_faces_give_axis_planes_at_half() {
        let hs = extract_halfspaces(&cube(), DEGENERATE_EPS).unwrap();
        assert_eq!(hs.len(), 12);
        for h in &hs {
            let u = h.normalized().unwrap();
            // exactly one axis component, magnitude one, offset -0.5
            let nonzero = u.n.iter().filter(|c| c.abs() > 1e-12).count();
            assert_eq!(nonzero, 1);
            assert!((u.n.amax() - 1.0).abs() < 1e-12);
            assert!((u.d + 0.5).abs() < 1e-12);
            assert!(h.satisfies(Vector3::zeros()));
        }
    }

    #[test]
    fn order_matches_triangles() {
        let m = cube();
        let hs = extract_halfspaces(&m, DEGENERATE_EPS).unwrap();
        for (t, h) in m.triangles().iter().zip(&hs) {
            for p in m.corners(t) {
                assert!(h.value(p).abs() < 1e-12);
            }
        }
        // first two faces are the bottom (-z) pair
        assert!(hs[0].n.z < 0.0 && hs[1].n.z < 0.0);
        assert!(hs[2].n.z > 0.0);
    }

    #[test]
    fn degenerate_face_is_reported_by_index() {
        let m = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 2 0 0\nf 1 2 3\nf 1 2 4\n").unwrap();
        let err = extract_halfspaces(&m, DEGENERATE_EPS).unwrap_err();
        assert_eq!(err.triangle, TriId(1));
    }

    #[test]
    fn empty_mesh_gives_no_halfspaces() {
        assert!(extract_halfspaces(&Mesh::new(), DEGENERATE_EPS).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn plane_contains_its_corners(
            p in prop::array::uniform3(-50.0..50.0f64),
            q in prop::array::uniform3(-50.0..50.0f64),
            r in prop::array::uniform3(-50.0..50.0f64),
        ) {
            let mut m = Mesh::new();
            m.add_vertex(p[0], p[1], p[2]);
            m.add_vertex(q[0], q[1], q[2]);
            m.add_vertex(r[0], r[1], r[2]);
            m.add_triangle([0, 1, 2]).unwrap();
            let (p, q, r) = (Vector3::from(p), Vector3::from(q), Vector3::from(r));
            // keep clearly non-degenerate triangles only
            prop_assume!((q - p).cross(&(r - p)).norm() > 1e-3 * (q - p).norm() * (r - p).norm());
            let h = extract_halfspaces(&m, DEGENERATE_EPS).unwrap()[0];
            let scale = h.n.norm() * 100.0;
            for c in m.corners(&m.triangles()[0]) {
                prop_assert!(h.value(c).abs() <= 1e-9 * scale);
            }
            // reversing the corners flips the half-space
            if let Some(flipped) = Hs3::from_points(r, q, p) {
                prop_assert!((flipped.n + h.n).norm() <= 1e-9 * h.n.norm());
            }
        }
    }
}
