//! The unstructured mesh core: entity tables, add operations, finalization,
//! polyhedron reconstruction and point location.

use std::collections::HashSet;

use cfdmesh_comm::Communicator;
use cfdmesh_common::{GeometryError, Label, LocalId, MeshError};
use cfdmesh_geometry::{
    find_polyhedron_type, Point3, Polyhedron, PolyhedronKind, QuadPyramid, Quadrilateral3D, Shape,
    Tetrahedron, Triangle3D, TriPrism, Vector3,
};
use cfdmesh_graph::{AdjacencyListGraph, ConnectivityGraph};
use rustc_hash::FxHashMap;

use crate::entities::{
    Boundary, Cell, Face, FaceOtherSide, MeshProperties, Region, RegionKind, Vertex,
};

/// The side opposite `cell1` for a face being added, expressed in terms of
/// the caller's labels (resolved to local ids by [`Mesh::add_face`]).
#[derive(Debug, Clone, Copy)]
pub enum FaceOtherSideLabel {
    Cell(Label),
    Boundary(Label),
}

pub struct Mesh {
    comm: Box<dyn Communicator>,
    graph: AdjacencyListGraph,
    finalized: bool,

    vertices: Vec<Vertex>,
    vertex_index: FxHashMap<Label, LocalId>,

    regions: Vec<Region>,
    region_index: FxHashMap<Label, LocalId>,

    cells: Vec<Cell>,
    cell_index: FxHashMap<Label, LocalId>,

    boundaries: Vec<Boundary>,
    boundary_index: FxHashMap<Label, LocalId>,

    faces: Vec<Face>,
    face_index: FxHashMap<Label, LocalId>,

    scale_factor: f64,
}

impl Mesh {
    pub fn new(comm: Box<dyn Communicator>) -> Self {
        Mesh {
            comm,
            graph: AdjacencyListGraph::new(),
            finalized: false,
            vertices: Vec::new(),
            vertex_index: FxHashMap::default(),
            regions: Vec::new(),
            region_index: FxHashMap::default(),
            cells: Vec::new(),
            cell_index: FxHashMap::default(),
            boundaries: Vec::new(),
            boundary_index: FxHashMap::default(),
            faces: Vec::new(),
            face_index: FxHashMap::default(),
            scale_factor: 1.0,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn communicator(&self) -> &dyn Communicator {
        self.comm.as_ref()
    }

    fn check_not_finalized(&self) -> Result<(), MeshError> {
        if self.finalized {
            return Err(MeshError::AlreadyFinalized);
        }
        Ok(())
    }

    // ---- accessors ----

    pub fn cell(&self, id: LocalId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    pub fn face(&self, id: LocalId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    pub fn vertex(&self, id: LocalId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn boundary(&self, id: LocalId) -> Option<&Boundary> {
        self.boundaries.get(id.index())
    }

    pub fn region(&self, id: LocalId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub fn cell_local_id(&self, label: Label) -> Result<LocalId, MeshError> {
        self.cell_index
            .get(&label)
            .copied()
            .ok_or(MeshError::UnknownLabel { kind: "cell", label: label.0 })
    }

    pub fn vertex_local_id(&self, label: Label) -> Result<LocalId, MeshError> {
        self.vertex_index
            .get(&label)
            .copied()
            .ok_or(MeshError::UnknownLabel { kind: "vertex", label: label.0 })
    }

    pub fn properties(&self) -> MeshProperties {
        MeshProperties {
            local_cells: self.cells.iter().filter(|c| c.is_locally_owned).count(),
            ghost_cells: self.cells.iter().filter(|c| !c.is_locally_owned).count(),
            faces: self.faces.len(),
            boundaries: self.boundaries.len(),
            regions: self.regions.len(),
            vertices: self.vertices.len(),
            max_faces_per_cell: self.cells.iter().map(Cell::n_faces).max().unwrap_or(0),
            scale_factor: self.scale_factor,
        }
    }

    pub fn set_scale_factor(&mut self, scale: f64) {
        self.scale_factor = scale;
    }

    // ---- building the mesh ----

    pub fn add_vertex(&mut self, label: Label, position: Point3) -> Result<LocalId, MeshError> {
        self.check_not_finalized()?;
        if self.vertex_index.contains_key(&label) {
            return Err(MeshError::DuplicateLabel { kind: "vertex", label: label.0 });
        }
        let id = LocalId(self.vertices.len());
        self.vertices.push(Vertex { label, local_id: id, position });
        self.vertex_index.insert(label, id);
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_region(
        &mut self,
        label: Label,
        kind: RegionKind,
        name: impl Into<String>,
        density: f64,
        turb_ke: f64,
        turb_diss: f64,
    ) -> Result<LocalId, MeshError> {
        self.check_not_finalized()?;
        if self.region_index.contains_key(&label) {
            return Err(MeshError::DuplicateLabel { kind: "region", label: label.0 });
        }
        let id = LocalId(self.regions.len());
        self.regions.push(Region {
            label,
            local_id: id,
            kind,
            name: name.into(),
            density,
            turb_ke,
            turb_diss,
        });
        self.region_index.insert(label, id);
        Ok(id)
    }

    pub fn add_cell(
        &mut self,
        label: Label,
        center: Point3,
        volume: f64,
        is_locally_owned: bool,
    ) -> Result<LocalId, MeshError> {
        self.check_not_finalized()?;
        if self.cell_index.contains_key(&label) {
            return Err(MeshError::DuplicateLabel { kind: "cell", label: label.0 });
        }
        let id = LocalId(self.cells.len());
        self.cells.push(Cell {
            label,
            local_id: id,
            center,
            volume,
            is_locally_owned,
            faces: Vec::new(),
            geometric_n_faces: None,
            geometric_n_vertices: None,
        });
        self.cell_index.insert(label, id);
        Ok(id)
    }

    /// Records the cell's true geometric face/vertex counts, independent of
    /// how many faces are physically stored on this rank. Ingestion calls
    /// this for every cell (local and ghost) using the source's reported
    /// counts.
    pub fn set_cell_geometry_counts(
        &mut self,
        id: LocalId,
        n_faces: usize,
        n_vertices: usize,
    ) -> Result<(), MeshError> {
        let cell = self
            .cells
            .get_mut(id.index())
            .ok_or(MeshError::UnknownLabel { kind: "cell", label: id.0 as i64 })?;
        cell.geometric_n_faces = Some(n_faces);
        cell.geometric_n_vertices = Some(n_vertices);
        Ok(())
    }

    pub fn add_boundary(
        &mut self,
        label: Label,
        region_label: Label,
        vertex_labels: &[Label],
        distance: Option<f64>,
    ) -> Result<LocalId, MeshError> {
        self.check_not_finalized()?;
        if self.boundary_index.contains_key(&label) {
            return Err(MeshError::DuplicateLabel { kind: "boundary", label: label.0 });
        }
        let region = self.region_local_id(region_label)?;
        let vertices = vertex_labels
            .iter()
            .map(|&l| self.vertex_local_id(l))
            .collect::<Result<Vec<_>, _>>()?;

        let id = LocalId(self.boundaries.len());
        self.boundaries.push(Boundary {
            label,
            local_id: id,
            // linked by add_face once the associated face is added.
            face: LocalId(usize::MAX),
            vertices,
            region,
            distance,
            y_plus: 0.0,
            u_plus: 0.0,
            shear: Vector3::ZERO,
            q: 0.0,
            h: 0.0,
            t: 0.0,
        });
        self.boundary_index.insert(label, id);
        Ok(id)
    }

    fn region_local_id(&self, label: Label) -> Result<LocalId, MeshError> {
        self.region_index
            .get(&label)
            .copied()
            .ok_or(MeshError::UnknownLabel { kind: "region", label: label.0 })
    }

    fn boundary_local_id(&self, label: Label) -> Result<LocalId, MeshError> {
        self.boundary_index
            .get(&label)
            .copied()
            .ok_or(MeshError::UnknownLabel { kind: "boundary", label: label.0 })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_face(
        &mut self,
        label: Label,
        cell1_label: Label,
        other_side: FaceOtherSideLabel,
        vertex_labels: &[Label],
        lambda: f64,
        normal: Vector3,
        center: Point3,
        xpac: Point3,
        xnac: Point3,
        rlencos: f64,
        area: f64,
    ) -> Result<LocalId, MeshError> {
        self.check_not_finalized()?;
        if self.face_index.contains_key(&label) {
            return Err(MeshError::DuplicateLabel { kind: "face", label: label.0 });
        }
        let cell1 = self.cell_local_id(cell1_label)?;
        let other_side = match other_side {
            FaceOtherSideLabel::Cell(l) => FaceOtherSide::Cell(self.cell_local_id(l)?),
            FaceOtherSideLabel::Boundary(l) => {
                FaceOtherSide::Boundary(self.boundary_local_id(l)?)
            }
        };
        let vertices = vertex_labels
            .iter()
            .map(|&l| self.vertex_local_id(l))
            .collect::<Result<Vec<_>, _>>()?;

        let id = LocalId(self.faces.len());
        self.faces.push(Face {
            label,
            local_id: id,
            cell1,
            other_side,
            vertices,
            lambda,
            normal,
            center,
            area,
            rlencos,
            xpac,
            xnac,
        });
        self.face_index.insert(label, id);

        self.cells[cell1.index()].faces.push(id);
        match other_side {
            FaceOtherSide::Cell(c2) => self.cells[c2.index()].faces.push(id),
            FaceOtherSide::Boundary(b) => self.boundaries[b.index()].face = id,
        }
        Ok(id)
    }

    /// Exposes the mesh's connectivity graph to ingestion, which populates
    /// it before `finalize` reorders cells from the graph's ghost
    /// discovery.
    pub fn graph_mut(&mut self) -> &mut AdjacencyListGraph {
        &mut self.graph
    }

    pub fn graph(&self) -> &AdjacencyListGraph {
        &self.graph
    }

    // ---- finalization ----

    /// Collective across the mesh's communicator: reorders cell local ids
    /// so owned cells precede ghosts, then freezes structural adds.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn finalize(&mut self) -> Result<(), MeshError> {
        self.check_not_finalized()?;
        if !self.graph.is_finalized() {
            return Err(MeshError::GraphNotFinalized);
        }
        self.comm.barrier();

        let n = self.cells.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| !self.cells[i].is_locally_owned);

        let mut new_of_old = vec![0usize; n];
        for (new_idx, &old_idx) in order.iter().enumerate() {
            new_of_old[old_idx] = new_idx;
        }

        let mut reordered: Vec<Cell> = order
            .iter()
            .map(|&old| {
                let mut cell = self.cells[old].clone();
                cell.local_id = LocalId(new_of_old[old]);
                cell
            })
            .collect();
        std::mem::swap(&mut self.cells, &mut reordered);

        for (&label, id) in self.cell_index.iter_mut() {
            *id = LocalId(new_of_old[id.index()]);
            debug_assert_eq!(self.cells[id.index()].label, label);
        }
        for face in self.faces.iter_mut() {
            face.cell1 = LocalId(new_of_old[face.cell1.index()]);
            if let FaceOtherSide::Cell(c2) = &mut face.other_side {
                *c2 = LocalId(new_of_old[c2.index()]);
            }
        }

        #[cfg(feature = "tracing")]
        {
            let owned = self.cells.iter().filter(|c| c.is_locally_owned).count();
            tracing::info!(locally_owned = owned, ghosts = n - owned, "mesh finalized");
        }

        self.finalized = true;
        Ok(())
    }

    // ---- polyhedron reconstruction ----

    fn face_vertex_positions(&self, face: &Face) -> Vec<Point3> {
        face.vertices
            .iter()
            .map(|&v| self.vertices[v.index()].position)
            .collect()
    }

    fn distinct_vertices(&self, faces: &[&Face]) -> Vec<LocalId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for f in faces {
            for &v in &f.vertices {
                if seen.insert(v) {
                    out.push(v);
                }
            }
        }
        out
    }

    fn check_edges(
        &self,
        faces: &[&Face],
        n_vertices: usize,
        shape: PolyhedronKind,
    ) -> Result<(), GeometryError> {
        let mut counts: FxHashMap<(LocalId, LocalId), u8> = FxHashMap::default();
        for f in faces {
            let n = f.vertices.len();
            for i in 0..n {
                let a = f.vertices[i];
                let b = f.vertices[(i + 1) % n];
                let key = if a.0 <= b.0 { (a, b) } else { (b, a) };
                let count = counts.entry(key).or_insert(0);
                *count += 1;
                if *count > 2 {
                    return Err(GeometryError::DuplicateEdge { a: a.0, b: b.0 });
                }
            }
        }
        let expected = n_vertices + faces.len() - 2;
        if counts.len() != expected {
            return Err(GeometryError::EdgeCountMismatch {
                shape: shape.name(),
                found: counts.len(),
                expected,
            });
        }
        Ok(())
    }

    /// Reconstructs the geometric polyhedron for `cell_id` from its stored
    /// faces. The cell must have every face it geometrically has stored
    /// locally (true of every locally-owned cell after `finalize`).
    pub fn build_polyhedron(&self, cell_id: LocalId) -> Result<Shape, MeshError> {
        let cell = self
            .cells
            .get(cell_id.index())
            .ok_or(MeshError::UnknownLabel { kind: "cell", label: cell_id.0 as i64 })?;

        let faces: Vec<&Face> = cell.faces.iter().map(|&id| &self.faces[id.index()]).collect();
        let n_faces = faces.len();
        let distinct = self.distinct_vertices(&faces);
        let n_vertices = distinct.len();

        let kind = find_polyhedron_type(n_vertices, n_faces);
        if kind == PolyhedronKind::Unknown {
            return Err(GeometryError::PolyhedronMismatch {
                shape: "unknown",
                vertices: n_vertices,
                faces: n_faces,
            }
            .into());
        }
        self.check_edges(&faces, n_vertices, kind)?;

        let shape = match kind {
            PolyhedronKind::Tetrahedron => self.build_tetrahedron(&faces, &distinct)?,
            PolyhedronKind::QuadPyramid => self.build_quad_pyramid(&faces, &distinct)?,
            PolyhedronKind::TriPrism => self.build_tri_prism(&faces)?,
            PolyhedronKind::Hexahedron => self.build_hexahedron(&faces)?,
            PolyhedronKind::Unknown => unreachable!(),
        };
        Ok(shape)
    }

    fn build_tetrahedron(
        &self,
        faces: &[&Face],
        distinct: &[LocalId],
    ) -> Result<Shape, GeometryError> {
        let base_face = faces[0];
        let base_pts = self.face_vertex_positions(base_face);
        let base_set: HashSet<LocalId> = base_face.vertices.iter().copied().collect();
        let apex_id = *distinct
            .iter()
            .find(|v| !base_set.contains(v))
            .ok_or(GeometryError::OrientationLogic(
                "tetrahedron has no apex vertex outside its base face".into(),
            ))?;
        let apex = self.vertices[apex_id.index()].position;
        let base = Triangle3D::new(base_pts[0], base_pts[1], base_pts[2]);
        Ok(Shape::Tetrahedron(Tetrahedron::new(apex, base)))
    }

    fn build_quad_pyramid(
        &self,
        faces: &[&Face],
        distinct: &[LocalId],
    ) -> Result<Shape, GeometryError> {
        let base_face = faces
            .iter()
            .find(|f| f.vertices.len() == 4)
            .ok_or(GeometryError::OrientationLogic(
                "quadrilateral pyramid has no quadrilateral base face".into(),
            ))?;
        let base_pts = self.face_vertex_positions(base_face);
        let base_set: HashSet<LocalId> = base_face.vertices.iter().copied().collect();
        let apex_id = *distinct
            .iter()
            .find(|v| !base_set.contains(v))
            .ok_or(GeometryError::OrientationLogic(
                "quadrilateral pyramid has no apex vertex outside its base face".into(),
            ))?;
        let apex = self.vertices[apex_id.index()].position;
        let base = Quadrilateral3D::from_array([base_pts[0], base_pts[1], base_pts[2], base_pts[3]]);
        Ok(Shape::QuadPyramid(QuadPyramid::new(apex, base)))
    }

    fn build_tri_prism(&self, faces: &[&Face]) -> Result<Shape, GeometryError> {
        let triangles: Vec<&Face> =
            faces.iter().copied().filter(|f| f.vertices.len() == 3).collect();
        let sides: Vec<&Face> =
            faces.iter().copied().filter(|f| f.vertices.len() == 4).collect();
        if triangles.len() != 2 || sides.len() != 3 {
            return Err(GeometryError::OrientationLogic(
                "triangular prism must have exactly two triangular faces and three quadrilateral faces"
                    .into(),
            ));
        }
        let bottom_face = triangles[0];
        let top_face = triangles[1];
        let bottom: [LocalId; 3] = [
            bottom_face.vertices[0],
            bottom_face.vertices[1],
            bottom_face.vertices[2],
        ];
        let top_candidates = &top_face.vertices;
        let top_set: HashSet<LocalId> = top_candidates.iter().copied().collect();

        let mut aligned_top = [bottom[0]; 3];
        for (i, &b) in bottom.iter().enumerate() {
            let mut candidates: Option<HashSet<LocalId>> = None;
            for f in sides.iter().filter(|f| f.vertices.contains(&b)) {
                let members: HashSet<LocalId> =
                    f.vertices.iter().copied().filter(|v| top_set.contains(v)).collect();
                candidates = Some(match candidates {
                    Some(prev) => prev.intersection(&members).copied().collect(),
                    None => members,
                });
            }
            let candidates = candidates.unwrap_or_default();
            aligned_top[i] = *candidates.iter().next().ok_or(GeometryError::OrientationLogic(
                "could not align triangular prism top face to its bottom face".into(),
            ))?;
        }

        let bottom_tri = Triangle3D::new(
            self.vertices[bottom[0].index()].position,
            self.vertices[bottom[1].index()].position,
            self.vertices[bottom[2].index()].position,
        );
        let top_tri = Triangle3D::new(
            self.vertices[aligned_top[0].index()].position,
            self.vertices[aligned_top[1].index()].position,
            self.vertices[aligned_top[2].index()].position,
        );
        Ok(Shape::TriPrism(TriPrism::new(top_tri, bottom_tri)))
    }

    fn build_hexahedron(&self, faces: &[&Face]) -> Result<Shape, GeometryError> {
        let quads: Vec<Quadrilateral3D> = faces
            .iter()
            .map(|f| {
                let pts = self.face_vertex_positions(f);
                Quadrilateral3D::from_array([pts[0], pts[1], pts[2], pts[3]])
            })
            .collect();
        let faces6: [Quadrilateral3D; 6] = quads
            .try_into()
            .map_err(|_| GeometryError::OrientationLogic("hexahedron requires six faces".into()))?;
        Ok(Shape::Hexahedron(cfdmesh_geometry::Hexahedron::from_faces(faces6)))
    }

    /// Scans locally-owned cells in local-id order for one containing
    /// `point`.
    pub fn find_cell_id(&self, point: Point3) -> Result<LocalId, MeshError> {
        for cell in self.cells.iter().filter(|c| c.is_locally_owned) {
            let shape = self.build_polyhedron(cell.local_id)?;
            if shape.is_point_inside(point) {
                return Ok(cell.local_id);
            }
        }
        Err(GeometryError::NoValidCell.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfdmesh_comm::SingleRankCommunicator;

    /// Assembles a single-cell unit-cube mesh with every face on the
    /// boundary, exercising `add_*`, `finalize` and `build_polyhedron`
    /// together without going through `ingest_mesh`.
    fn unit_cube_mesh() -> Mesh {
        let mut mesh = Mesh::new(Box::new(SingleRankCommunicator::new()));

        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        for (i, &p) in corners.iter().enumerate() {
            mesh.add_vertex(Label(i as i64), p).unwrap();
        }

        mesh.add_region(Label(0), RegionKind::Wall, "wall", 1.0, 0.0, 0.0).unwrap();

        mesh.add_cell(Label(0), Point3::new(0.5, 0.5, 0.5), 1.0, true).unwrap();
        mesh.graph_mut().add_node(Label(0)).unwrap();
        mesh.graph_mut().finalize().unwrap();

        let face_verts: [[i64; 4]; 6] = [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [3, 2, 6, 7],
            [0, 3, 7, 4],
            [1, 2, 6, 5],
        ];
        for (i, verts) in face_verts.iter().enumerate() {
            let labels: Vec<Label> = verts.iter().map(|&v| Label(v)).collect();
            mesh.add_boundary(Label(i as i64), Label(0), &labels, None).unwrap();
            mesh.add_face(
                Label(i as i64),
                Label(0),
                FaceOtherSideLabel::Boundary(Label(i as i64)),
                &labels,
                1.0,
                Vector3::ZERO,
                Point3::new(0.5, 0.5, 0.5),
                Point3::new(0.5, 0.5, 0.5),
                Point3::new(0.5, 0.5, 0.5),
                0.0,
                1.0,
            )
            .unwrap();
        }

        mesh.set_cell_geometry_counts(LocalId(0), 6, 8).unwrap();
        mesh.finalize().unwrap();
        mesh
    }

    #[test]
    fn unit_cube_reconstructs_as_hexahedron_with_unit_volume() {
        let mesh = unit_cube_mesh();
        let shape = mesh.build_polyhedron(LocalId(0)).unwrap();
        assert!(matches!(shape, Shape::Hexahedron(_)));
        assert!((shape.volume() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn find_cell_id_locates_point_inside_the_cube() {
        let mesh = unit_cube_mesh();
        let found = mesh.find_cell_id(Point3::new(0.5, 0.5, 0.5)).unwrap();
        assert_eq!(found, LocalId(0));
    }

    #[test]
    fn find_cell_id_rejects_point_outside_the_cube() {
        let mesh = unit_cube_mesh();
        let err = mesh.find_cell_id(Point3::new(5.0, 5.0, 5.0)).unwrap_err();
        assert!(matches!(err, MeshError::Geometry(GeometryError::NoValidCell)));
    }

    #[test]
    fn duplicate_cell_label_is_rejected() {
        let mut mesh = Mesh::new(Box::new(SingleRankCommunicator::new()));
        mesh.add_cell(Label(0), Point3::new(0.0, 0.0, 0.0), 1.0, true).unwrap();
        let err = mesh
            .add_cell(Label(0), Point3::new(1.0, 1.0, 1.0), 2.0, true)
            .unwrap_err();
        assert_eq!(err, MeshError::DuplicateLabel { kind: "cell", label: 0 });
    }

    #[test]
    fn add_after_finalize_is_rejected() {
        let mesh = unit_cube_mesh();
        let mut mesh = mesh;
        let err = mesh
            .add_vertex(Label(100), Point3::new(0.0, 0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, MeshError::AlreadyFinalized);
    }

    #[test]
    fn unknown_region_label_is_rejected() {
        let mut mesh = Mesh::new(Box::new(SingleRankCommunicator::new()));
        mesh.add_vertex(Label(0), Point3::new(0.0, 0.0, 0.0)).unwrap();
        let err = mesh.add_boundary(Label(0), Label(99), &[Label(0)], None).unwrap_err();
        assert_eq!(err, MeshError::UnknownLabel { kind: "region", label: 99 });
    }
}
