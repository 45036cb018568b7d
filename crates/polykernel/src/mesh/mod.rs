//! Triangle meshes (arena + index storage) and their OBJ/OFF loaders.
//!
//! Purpose
//! - Hold vertices, triangles and derived edges of one mesh in insertion order.
//! - Expose the narrow read-only [`MeshView`] capability that the kernel query
//!   consumes; everything else on [`Mesh`] is bookkeeping for loaders and checks.
//!
//! Conventions
//! - Triangles reference vertices by index (`VertexId`), never by address.
//! - Winding is taken as given by the file: counter-clockwise seen from outside
//!   means the face normal points out of the solid. Loaders do not reorient;
//!   `orient::check_winding` reports disagreements between neighbours.
//! - Faces must be triangles. Polygons are rejected, not triangulated.

mod load;
mod obj;
mod off;
mod orient;
mod store;
mod types;

pub use load::{load, MeshError, MeshFormat};
pub use obj::parse_obj;
pub use off::parse_off;
pub use orient::{check_winding, WindingDefect};
pub use store::Mesh;
pub use types::{Edge, TriId, Triangle, Vertex, VertexId};

use nalgebra::Vector3;

/// Read-only access to the vertices and triangles of a mesh.
///
/// Invariant: every corner of every triangle indexes into `vertices()`.
pub trait MeshView {
    fn vertices(&self) -> &[Vertex];
    fn triangles(&self) -> &[Triangle];

    /// Corner coordinates of triangle `t`.
    #[inline]
    fn corners(&self, t: &Triangle) -> [Vector3<f64>; 3] {
        let vs = self.vertices();
        t.corners.map(|v| vs[v.0].coords)
    }

    /// Signed volume by the divergence theorem: sum of `(p0-o)·((p1-o)×(p2-o))/6`.
    ///
    /// `o` is the mean of all triangle corners, so a flat sheet (including a
    /// lone triangle) gives zero wherever it sits. Positive when faces wind
    /// counter-clockwise seen from outside; closed surfaces do not depend on `o`.
    fn signed_volume(&self) -> f64 {
        let tris = self.triangles();
        if tris.is_empty() {
            return 0.0;
        }
        let o = tris
            .iter()
            .flat_map(|t| self.corners(t))
            .sum::<Vector3<f64>>()
            / (3 * tris.len()) as f64;
        tris.iter()
            .map(|t| {
                let [p0, p1, p2] = self.corners(t).map(|p| p - o);
                p0.dot(&p1.cross(&p2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Axis-aligned bounding box `(min, max)`; `None` without vertices.
    fn bounds(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let mut it = self.vertices().iter().map(|v| v.coords);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p))))
    }
}
