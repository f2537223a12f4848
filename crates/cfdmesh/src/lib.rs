//! Meta crate re-exporting the primary `cfdmesh` building blocks with
//! sensible defaults. Downstream users can depend on this crate and opt into
//! specific layers via feature flags while keeping access to the underlying
//! crates when deeper integration is required.

pub use cfdmesh_common as common;
pub use cfdmesh_common::{CfdError, Label};

#[cfg(feature = "geometry")]
pub use cfdmesh_geometry as geometry;

#[cfg(feature = "sparse")]
pub use cfdmesh_sparse as sparse;
#[cfg(feature = "sparse")]
pub use cfdmesh_sparse::{CooMatrix, CsrMatrix, MatrixStorage, SparseMatrix};

#[cfg(any(feature = "mesh", feature = "solver"))]
pub use cfdmesh_comm as comm;
#[cfg(any(feature = "mesh", feature = "solver"))]
pub use cfdmesh_comm::Communicator;

#[cfg(feature = "mesh")]
pub use cfdmesh_graph as graph;
#[cfg(feature = "mesh")]
pub use cfdmesh_graph::ConnectivityGraph;

#[cfg(feature = "mesh")]
pub use cfdmesh_mesh as mesh;
#[cfg(feature = "mesh")]
pub use cfdmesh_mesh::{ingest_mesh, Mesh, MeshSource};

#[cfg(feature = "solver")]
pub use cfdmesh_solver as solver;
#[cfg(feature = "solver")]
pub use cfdmesh_solver::{Algorithm, ConvergenceReason, ReferenceCgSolver, SolveReport, SolverBridge};

#[cfg(feature = "config")]
pub use cfdmesh_config as config;
#[cfg(feature = "config")]
pub use cfdmesh_config::{CommandLine, Config};
