//! The entity tables the mesh core assembles: vertices, regions, cells,
//! boundaries and faces, plus a read-only snapshot of aggregate counts.

use cfdmesh_common::{Label, LocalId};
use cfdmesh_geometry::{Point3, Vector3};

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub label: Label,
    pub local_id: LocalId,
    pub position: Point3,
}

/// Region classification, mirroring the source's `{default,inlet,outlet,
/// symp,wall}` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Default,
    Inlet,
    Outlet,
    Symp,
    Wall,
}

#[derive(Debug, Clone)]
pub struct Region {
    pub label: Label,
    pub local_id: LocalId,
    pub kind: RegionKind,
    pub name: String,
    pub density: f64,
    pub turb_ke: f64,
    pub turb_diss: f64,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub label: Label,
    pub local_id: LocalId,
    pub center: Point3,
    pub volume: f64,
    pub is_locally_owned: bool,
    /// Faces of this cell stored on this rank (a ghost cell may lack faces
    /// that don't adjoin a locally-owned cell).
    pub faces: Vec<LocalId>,
    /// The cell's true geometric face count, known even for a ghost cell
    /// whose faces aren't all stored here. Populated by ingestion from the
    /// mesh source; falls back to `faces.len()` if never set.
    pub(crate) geometric_n_faces: Option<usize>,
    pub(crate) geometric_n_vertices: Option<usize>,
}

impl Cell {
    /// The true geometric number of faces (see [`Self::n_stored_faces`]).
    pub fn n_faces(&self) -> usize {
        self.geometric_n_faces.unwrap_or(self.faces.len())
    }

    /// Faces of this cell physically stored on this rank.
    pub fn n_stored_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn n_vertices(&self) -> Option<usize> {
        self.geometric_n_vertices
    }
}

/// The entity on the opposite side of a face from `cell1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOtherSide {
    Cell(LocalId),
    Boundary(LocalId),
}

#[derive(Debug, Clone)]
pub struct Face {
    pub label: Label,
    pub local_id: LocalId,
    pub cell1: LocalId,
    pub other_side: FaceOtherSide,
    /// Ordered so that `vertices[i]` is edge-adjacent to
    /// `vertices[(i + 1) % n]`.
    pub vertices: Vec<LocalId>,
    pub lambda: f64,
    pub normal: Vector3,
    pub center: Point3,
    pub area: f64,
    pub rlencos: f64,
    pub xpac: Point3,
    pub xnac: Point3,
}

impl Face {
    pub fn is_boundary(&self) -> bool {
        matches!(self.other_side, FaceOtherSide::Boundary(_))
    }
}

#[derive(Debug, Clone)]
pub struct Boundary {
    pub label: Label,
    pub local_id: LocalId,
    pub face: LocalId,
    pub vertices: Vec<LocalId>,
    pub region: LocalId,
    /// `None` when the source doesn't supply this (the structured-grid
    /// source reports it as missing; see DESIGN.md).
    pub distance: Option<f64>,
    pub y_plus: f64,
    pub u_plus: f64,
    pub shear: Vector3,
    pub q: f64,
    pub h: f64,
    pub t: f64,
}

/// A point-in-time snapshot of aggregate mesh counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshProperties {
    pub local_cells: usize,
    pub ghost_cells: usize,
    pub faces: usize,
    pub boundaries: usize,
    pub regions: usize,
    pub vertices: usize,
    pub max_faces_per_cell: usize,
    pub scale_factor: f64,
}
