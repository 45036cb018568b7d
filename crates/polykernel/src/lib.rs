//! Kernel points of polyhedral meshes.
//!
//! A kernel point sees the whole boundary of a solid; equivalently it lies in
//! every face's inner half-space. The pipeline is strictly forward:
//! file → [`mesh::Mesh`] → [`geom3::extract_halfspaces`] → [`lp::LpProblem`]
//! → [`lp::solve`] → [`kernel::KernelPoint`].
//!
//! API Policy
//! - `api` is the curated surface for the CLI and experiments.
//! - Modules keep their own small types; the kernel query only needs the
//!   read-only [`mesh::MeshView`] capability.

pub mod api;
pub mod geom3;
pub mod kernel;
pub mod lp;
pub mod mesh;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector3 as Vec3;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::{extract_halfspaces, Hs3};
    pub use crate::kernel::{
        kernel_point, kernel_point_of, kernel_point_with, KernelCfg, KernelError, KernelPoint,
    };
    pub use crate::lp::{solve, LpCfg, LpOutcome, LpProblem};
    pub use crate::mesh::{load, Mesh, MeshError, MeshView};
    pub use nalgebra::Vector3 as Vec3;
}
