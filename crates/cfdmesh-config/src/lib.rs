//! The run-configuration JSON surface and the command-line parser drivers
//! built on top of `cfdmesh` use to select between them. Neither file I/O
//! (HDF5 readers) nor the benchmark harness itself live here; this crate
//! only models the documents and command lines those drivers would read.

pub mod cli;
pub mod config;

pub use cli::CommandLine;
pub use config::{
    Config, DataDistribution, FileFormat, FileRef, LinearSolver, LinearSolverPetsc,
    RhsVectorConfig, SolVectorConfig, SolverAlgorithm, SparseMatrixConfig,
};
