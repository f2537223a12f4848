//! The unstructured mesh: entity tables owned exclusively by [`Mesh`],
//! built from a [`MeshSource`] by [`ingest_mesh`].

pub mod entities;
pub mod ingest;
pub mod mesh;
pub mod source;

pub use mesh::{FaceOtherSideLabel, Mesh};
pub use entities::{
    Boundary, Cell, Face, FaceOtherSide, MeshProperties, Region, RegionKind, Vertex,
};
pub use ingest::ingest_mesh;
pub use source::{BoundaryAttributes, CellAttributes, FaceAttributes, MeshSource, RegionAttributes};
