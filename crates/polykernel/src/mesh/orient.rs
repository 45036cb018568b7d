//! Winding consistency between neighbouring triangles.
//!
//! Two triangles sharing an edge agree on orientation iff they traverse that
//! edge in opposite directions. A directed edge used twice is a disagreement.

use std::collections::HashMap;
use std::fmt;

use super::types::{TriId, VertexId};
use super::MeshView;

/// First pair of neighbours found with clashing winding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindingDefect {
    pub edge: (VertexId, VertexId),
    pub triangles: (TriId, TriId),
}

impl fmt::Display for WindingDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "triangles {} and {} both traverse edge {}→{}",
            self.triangles.0 .0, self.triangles.1 .0, self.edge.0 .0, self.edge.1 .0
        )
    }
}

/// Check that no directed edge is traversed by two triangles.
///
/// Says nothing about global orientation (a consistently inward mesh passes);
/// the kernel query uses the signed volume for that.
pub fn check_winding<M: MeshView + ?Sized>(mesh: &M) -> Result<(), WindingDefect> {
    let tris = mesh.triangles();
    let mut owner: HashMap<(VertexId, VertexId), TriId> = HashMap::with_capacity(tris.len() * 3);
    for t in tris {
        for e in t.directed_edges() {
            if e.0 == e.1 {
                continue;
            }
            if let Some(&prev) = owner.get(&e) {
                return Err(WindingDefect {
                    edge: e,
                    triangles: (prev, t.id),
                });
            }
            owner.insert(e, t.id);
        }
    }
    Ok(())
}
