//! The mesh source abstraction: the external collaborator ingestion pulls
//! from. Every query takes a slice of labels and returns one entry per
//! label, in the same order — never indices, per the source contract.

use cfdmesh_common::Label;
use cfdmesh_geometry::{Point3, Vector3};

use crate::entities::RegionKind;

#[derive(Debug, Clone, Copy)]
pub struct CellAttributes {
    pub center: Point3,
    pub volume: f64,
    pub n_faces: usize,
    pub n_vertices: usize,
}

#[derive(Debug, Clone)]
pub struct FaceAttributes {
    pub cell1: Label,
    pub cell2: Option<Label>,
    pub boundary: Option<Label>,
    pub vertices: Vec<Label>,
    pub lambda: f64,
    pub normal: Vector3,
    pub center: Point3,
    pub area: f64,
    pub rlencos: f64,
    pub xpac: Point3,
    pub xnac: Point3,
}

#[derive(Debug, Clone)]
pub struct BoundaryAttributes {
    pub face: Label,
    pub vertices: Vec<Label>,
    pub region: Label,
    /// `None` when the source has nothing to report (see DESIGN.md: the
    /// structured-grid source never supplies this).
    pub distance: Option<f64>,
    pub y_plus: f64,
    pub u_plus: f64,
    pub shear: Vector3,
    pub q: f64,
    pub h: f64,
    pub t: f64,
}

#[derive(Debug, Clone)]
pub struct RegionAttributes {
    pub kind: RegionKind,
    pub name: String,
    pub density: f64,
    pub turb_ke: f64,
    pub turb_diss: f64,
}

/// Everything ingestion needs from an external mesh description. Every
/// by-label query returns results positionally aligned with its input
/// slice, matching the source's own label-keyed contract (see the base
/// specification's external-interfaces section).
pub trait MeshSource {
    fn cell_count(&self) -> usize;
    fn face_count(&self) -> usize;
    fn boundary_count(&self) -> usize;
    fn region_count(&self) -> usize;
    fn vertex_count(&self) -> usize;

    /// Face-neighbour cell labels for each of `cell_labels`, used to seed
    /// the connectivity graph.
    fn cell_neighbour_labels(&self, cell_labels: &[Label]) -> Vec<Vec<Label>>;

    /// Face labels attached to each of `cell_labels` (a CSR-shaped query:
    /// one entry per input cell).
    fn cell_face_labels(&self, cell_labels: &[Label]) -> Vec<Vec<Label>>;

    fn cell_attributes(&self, cell_labels: &[Label]) -> Vec<CellAttributes>;

    fn face_is_boundary(&self, face_labels: &[Label]) -> Vec<bool>;
    fn face_attributes(&self, face_labels: &[Label]) -> Vec<FaceAttributes>;

    fn vertex_positions(&self, vertex_labels: &[Label]) -> Vec<Point3>;

    /// All region labels — typically few enough to read unconditionally.
    fn region_labels(&self) -> Vec<Label>;
    fn region_attributes(&self, region_labels: &[Label]) -> Vec<RegionAttributes>;

    fn boundary_face_labels(&self, boundary_labels: &[Label]) -> Vec<Label>;
    fn boundary_attributes(&self, boundary_labels: &[Label]) -> Vec<BoundaryAttributes>;
}
