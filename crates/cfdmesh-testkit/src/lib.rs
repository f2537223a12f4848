//! Fixtures shared by `cfdmesh` crates' tests and benchmarks: a structured
//! box-mesh source and a seeded random-array generator.

pub mod random;
pub mod structured_grid;

pub use random::SeededArrayGenerator;
pub use structured_grid::StructuredGridSource;
