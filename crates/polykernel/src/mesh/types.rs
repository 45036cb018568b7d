//! Mesh element types. Kept small and explicit; the store owns all of them.

use nalgebra::Vector3;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriId(pub usize);

/// Vertex: its position in the store plus coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub coords: Vector3<f64>,
}

/// Oriented face. Corner order fixes the outward normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub id: TriId,
    pub corners: [VertexId; 3],
}

impl Triangle {
    /// True if `a` is immediately followed by `b` in the cyclic corner order.
    #[inline]
    pub fn traverses(&self, a: VertexId, b: VertexId) -> bool {
        (0..3).any(|k| self.corners[k] == a && self.corners[(k + 1) % 3] == b)
    }

    /// Directed edges in corner order: (c0,c1), (c1,c2), (c2,c0).
    #[inline]
    pub fn directed_edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.corners;
        [(a, b), (b, c), (c, a)]
    }
}

/// Undirected edge with the triangles incident to it.
///
/// Invariants:
/// - `ends` is sorted (`ends[0] <= ends[1]`).
/// - `tris` lists incident triangles in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub ends: [VertexId; 2],
    pub tris: Vec<TriId>,
}

impl Edge {
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.tris.len() == 1
    }
}
