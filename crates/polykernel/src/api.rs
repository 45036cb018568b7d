//! Curated internal API for the CLI and experiments (UNSTABLE).
//!
//! Important
//! - This is not a stable public API. Breaking changes are allowed.
//! - Prefer these re-exports for consistency across callers.

// Mesh store and loaders
pub use crate::mesh::{
    check_winding, load, parse_obj, parse_off, Edge, Mesh, MeshError, MeshFormat, MeshView,
    TriId, Triangle, Vertex, VertexId, WindingDefect,
};
// Half-spaces
pub use crate::geom3::{extract_halfspaces, DegenerateFace, Hs3};
// Linear programming
pub use crate::lp::{solve, LpCfg, LpOutcome, LpProblem};
// Kernel query
pub use crate::kernel::{
    kernel_point, kernel_point_of, kernel_point_with, log_mesh, KernelCfg, KernelError,
    KernelPoint,
};
