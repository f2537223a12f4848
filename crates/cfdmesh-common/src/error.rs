//! The error taxonomy shared by every `cfdmesh-*` crate.
//!
//! Each subsystem owns a small `thiserror` enum (`ArrayError`, `GeometryError`,
//! `MatrixError`, `MeshError`, `SolverError`, `ConfigError`); [`CfdError`] is the
//! widened umbrella used at crate boundaries that can fail for more than one
//! reason. Narrow return types (`Result<T, MatrixError>`) are preferred inside a
//! subsystem; `CfdError` shows up once callers cross into orchestration code
//! (ingestion, the solver bridge) that can hit more than one subsystem's errors.

use thiserror::Error;

/// Errors from [`crate::array`]'s sorted-sequence kernels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArrayError {
    #[error("source and destination sizes differ: source has {source}, destination has {dest}")]
    SizeMismatch { source: usize, dest: usize },

    #[error("destination buffer of size {dest} is too small to hold {needed} elements")]
    UndersizedDestination { dest: usize, needed: usize },

    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("element not found")]
    NotFound,
}

/// Errors from `cfdmesh-geometry`'s Euclidean primitives and shapes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("cell has (vertices={vertices}, faces={faces}), which does not match {shape}")]
    PolyhedronMismatch {
        shape: &'static str,
        vertices: usize,
        faces: usize,
    },

    #[error("edge reconstruction found {found} distinct edges, expected {expected} for {shape}")]
    EdgeCountMismatch {
        shape: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("duplicate edge ({a}, {b}) encountered while reconstructing a polyhedron")]
    DuplicateEdge { a: usize, b: usize },

    #[error("the three points supplied do not define a plane (they are collinear)")]
    CollinearPoints,

    #[error("no locally-owned cell contains the queried point")]
    NoValidCell,

    #[error("orientation logic error: {0}")]
    OrientationLogic(String),
}

/// Errors from `cfdmesh-sparse`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("row index {row} is out of bounds for base {base} and {rows} rows")]
    RowOutOfBounds { row: i64, base: i64, rows: usize },

    #[error("column index {col} is out of bounds for base {base} and {cols} columns")]
    ColOutOfBounds { col: i64, base: i64, cols: usize },

    #[error("invalid row size {0}, must be >= 1")]
    InvalidRowSize(i64),

    #[error("invalid column size {0}, must be >= 1")]
    InvalidColSize(i64),

    #[error("row {0} has no stored non-zero entries")]
    EmptyRow(i64),
}

/// Errors from `cfdmesh-graph`'s connectivity-graph contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node with label {0} was added more than once")]
    DuplicateNode(i64),

    #[error("the graph has not been finalized yet")]
    NotFinalized,

    #[error("the graph is already finalized; structural adds are no longer permitted")]
    AlreadyFinalized,

    #[error("node with label {0} is not known to the graph")]
    UnknownNode(i64),
}

/// Errors from `cfdmesh-mesh`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("unknown {kind} label {label}")]
    UnknownLabel { kind: &'static str, label: i64 },

    #[error("{kind} label {label} was already added")]
    DuplicateLabel { kind: &'static str, label: i64 },

    #[error("the mesh is already finalized; structural adds are no longer permitted")]
    AlreadyFinalized,

    #[error("the connectivity graph has not been finalized yet")]
    GraphNotFinalized,

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors from `cfdmesh-solver`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("vector {0} has not been set up")]
    VectorNotSetup(&'static str),

    #[error("matrix A has not been set up")]
    MatrixNotSetup,

    #[error("row size has not been set for this solver instance")]
    UnsetRowSize,

    #[error("column size has not been set for this solver instance")]
    UnsetColSize,

    #[error("the non-zero structure supplied to setValuesMatrixA does not match the structure fixed at setup")]
    StructureMismatch,

    #[error("external solver backend failed: {0}")]
    Backend(String),
}

/// Errors from `cfdmesh-config`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration option {0} was not found")]
    OptionNotFound(String),

    #[error("configuration option {option} has an invalid value: {reason}")]
    InvalidValue { option: String, reason: String },

    #[error("required flag {0} was not supplied on the command line")]
    MissingFlag(String),

    #[error("flag {flag} has no positional argument at index {index}")]
    MissingArgument { flag: String, index: usize },

    #[error("argument '{value}' for flag {flag} could not be parsed as {expected}")]
    ArgumentConversion {
        flag: String,
        value: String,
        expected: &'static str,
    },
}

/// Umbrella error type for code that can fail across more than one subsystem
/// (mesh ingestion, the solver bridge, the CLI driver).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CfdError {
    #[error(transparent)]
    Array(#[from] ArrayError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
