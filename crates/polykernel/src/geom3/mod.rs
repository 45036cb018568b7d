//! 3D half-spaces from oriented triangles.
//!
//! Purpose
//! - Turn every face of a mesh into the closed half-space bounded by its
//!   supporting plane and containing the solid (`n·x + d <= 0`).
//!
//! Assumptions and conventions
//! - Normals are not normalized: `n = (p1 - p0) × (p2 - p0)`, so `|n|` is twice
//!   the face area. The LP solver rescales rows itself.
//! - Orientation comes from the triangle's corner order; nothing here flips it.
//! - Degenerate faces (collinear or repeated corners) are an error, never a
//!   zero row handed to the solver.

pub(crate) mod cfg;
mod extract;
mod types;

pub use extract::{extract_halfspaces, DegenerateFace};
pub use types::Hs3;
