//! Mesh store: one contiguous vertex arena, triangles as index triples, and
//! undirected edges with their incident triangles.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use nalgebra::Vector3;

use super::types::{Edge, TriId, Triangle, Vertex, VertexId};
use super::MeshView;

/// Triangle mesh in arena form.
///
/// Invariants:
/// - Every triangle corner is a valid index into `verts`.
/// - `edge_of` maps each sorted vertex pair to its slot in `edges`.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    verts: Vec<Vertex>,
    tris: Vec<Triangle>,
    edges: Vec<Edge>,
    edge_of: HashMap<(VertexId, VertexId), usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sized store. Callers bound the counts by what they actually read.
    pub fn with_capacity(num_vertices: usize, num_triangles: usize) -> Self {
        let num_edges = num_triangles.saturating_mul(3) / 2;
        Self {
            verts: Vec::with_capacity(num_vertices),
            tris: Vec::with_capacity(num_triangles),
            edges: Vec::with_capacity(num_edges),
            edge_of: HashMap::with_capacity(num_edges),
        }
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexId {
        let id = VertexId(self.verts.len());
        self.verts.push(Vertex {
            id,
            coords: Vector3::new(x, y, z),
        });
        id
    }

    /// Append a triangle; `None` if any corner is out of range.
    pub fn add_triangle(&mut self, corners: [usize; 3]) -> Option<TriId> {
        if corners.iter().any(|&c| c >= self.verts.len()) {
            return None;
        }
        let id = TriId(self.tris.len());
        let tri = Triangle {
            id,
            corners: corners.map(VertexId),
        };
        for (a, b) in tri.directed_edges() {
            self.register_edge(a, b, id);
        }
        self.tris.push(tri);
        Some(id)
    }

    fn register_edge(&mut self, a: VertexId, b: VertexId, t: TriId) {
        let key = if a <= b { (a, b) } else { (b, a) };
        match self.edge_of.get(&key) {
            Some(&slot) => self.edges[slot].tris.push(t),
            None => {
                self.edge_of.insert(key, self.edges.len());
                self.edges.push(Edge {
                    ends: [key.0, key.1],
                    tris: vec![t],
                });
            }
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.verts.len()
    }
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.tris.len()
    }
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    #[inline]
    pub fn vertex(&self, i: usize) -> Option<&Vertex> {
        self.verts.get(i)
    }
    #[inline]
    pub fn triangle(&self, i: usize) -> Option<&Triangle> {
        self.tris.get(i)
    }
    #[inline]
    pub fn edge(&self, i: usize) -> Option<&Edge> {
        self.edges.get(i)
    }
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge between `a` and `b` (either order), if some triangle uses it.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.edge_of.get(&key).map(|&slot| &self.edges[slot])
    }

    /// Number of edges with a single incident triangle (holes in the surface).
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// OFF text with zero-based indices; `parse_off` reads it back unchanged.
    pub fn to_off_string(&self) -> String {
        let mut out = String::with_capacity(32 * (self.verts.len() + self.tris.len()));
        out.push_str("OFF\n");
        let _ = writeln!(out, "{} {} {}", self.verts.len(), self.tris.len(), self.edges.len());
        for v in &self.verts {
            let _ = writeln!(out, "{} {} {}", v.coords.x, v.coords.y, v.coords.z);
        }
        for t in &self.tris {
            let [a, b, c] = t.corners;
            let _ = writeln!(out, "3 {} {} {}", a.0, b.0, c.0);
        }
        out
    }

    pub fn write_off<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_off_string())
    }
}

impl MeshView for Mesh {
    #[inline]
    fn vertices(&self) -> &[Vertex] {
        &self.verts
    }
    #[inline]
    fn triangles(&self) -> &[Triangle] {
        &self.tris
    }
}
