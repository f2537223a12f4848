//! A regular `nx * ny * nz` box mesh source, labelled the way the original
//! structured-grid generator did: cell labels are zero-based flattened
//! indices; face labels are partitioned into three ranges (YZ, then XZ,
//! then XY planes); vertex labels sit on the `(nx+1, ny+1, nz+1)` nodal
//! lattice; boundary labels reuse the face-plane partition but with the
//! face's own normal dimension collapsed to width two (only the two faces
//! of a plane touching the domain boundary are boundaries).

use cfdmesh_common::Label;
use cfdmesh_geometry::{Point3, Quadrilateral3D, Vector3};
use cfdmesh_mesh::source::{BoundaryAttributes, CellAttributes, FaceAttributes, MeshSource, RegionAttributes};
use cfdmesh_mesh::RegionKind;

fn calculate_label(x: i64, y: i64, z: i64, x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> i64 {
    let x_size = (x_max - x_min) + 1;
    let y_size = (y_max - y_min) + 1;
    (x - x_min) + (y - y_min) * x_size + (z) * (x_size * y_size)
}

fn calculate_x(label: i64, x_min: i64, x_max: i64) -> i64 {
    let x_size = (x_max - x_min) + 1;
    (label % x_size) + x_min
}

fn calculate_y(label: i64, x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> i64 {
    let x_size = (x_max - x_min) + 1;
    let y_size = (y_max - y_min) + 1;
    ((label / x_size) % y_size) + y_min
}

fn calculate_z(label: i64, x_min: i64, x_max: i64, y_min: i64, y_max: i64, z_min: i64, z_max: i64) -> i64 {
    let x_size = (x_max - x_min) + 1;
    let y_size = (y_max - y_min) + 1;
    let z_size = (z_max - z_min) + 1;
    ((label / (x_size * y_size)) % z_size) + z_min
}

pub struct StructuredGridSource {
    nx: i64,
    ny: i64,
    nz: i64,
    s_min: Point3,
    s_max: Point3,
    dsx: f64,
    dsy: f64,
    dsz: f64,
}

impl StructuredGridSource {
    pub fn new(nx: usize, ny: usize, nz: usize, s_min: Point3, s_max: Point3) -> Self {
        let (nx, ny, nz) = (nx as i64, ny as i64, nz as i64);
        StructuredGridSource {
            nx,
            ny,
            nz,
            s_min,
            s_max,
            dsx: (s_max.x - s_min.x) / nx as f64,
            dsy: (s_max.y - s_min.y) / ny as f64,
            dsz: (s_max.z - s_min.z) / nz as f64,
        }
    }

    /// Convenience constructor for a unit cube subdivided into `n` cells
    /// per side.
    pub fn unit_cube(n: usize) -> Self {
        Self::new(n, n, n, Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    fn n_face_yz(&self) -> i64 {
        self.ny * self.nz * (self.nx + 1)
    }

    fn n_face_xz(&self) -> i64 {
        self.nx * self.nz * (self.ny + 1)
    }

    fn n_bound_yz(&self) -> i64 {
        self.ny * self.nz * 2
    }

    fn n_bound_xz(&self) -> i64 {
        self.nx * self.nz * 2
    }

    fn cell_center(&self, label: i64) -> Point3 {
        let x = calculate_x(label, 0, self.nx - 1);
        let y = calculate_y(label, 0, self.nx - 1, 0, self.ny - 1);
        let z = calculate_z(label, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz - 1);
        Point3::new(
            self.s_min.x + (x as f64 + 0.5) * self.dsx,
            self.s_min.y + (y as f64 + 0.5) * self.dsy,
            self.s_min.z + (z as f64 + 0.5) * self.dsz,
        )
    }

    fn vertex_position(&self, label: i64) -> Point3 {
        let x = calculate_x(label, 0, self.nx);
        let y = calculate_y(label, 0, self.nx, 0, self.ny);
        let z = calculate_z(label, 0, self.nx, 0, self.ny, 0, self.nz);
        Point3::new(
            self.s_min.x + x as f64 * self.dsx,
            self.s_min.y + y as f64 * self.dsy,
            self.s_min.z + z as f64 * self.dsz,
        )
    }

    fn face_vertex_labels(&self, face_label: i64) -> [i64; 4] {
        let n_yz = self.n_face_yz();
        let n_xz = self.n_face_xz();
        if face_label < n_yz {
            let x = calculate_x(face_label, 0, self.nx);
            let y = calculate_y(face_label, 0, self.nx, 0, self.ny - 1);
            let z = calculate_z(face_label, 0, self.nx, 0, self.ny - 1, 0, self.nz - 1);
            [
                calculate_label(x, y, z, 0, self.nx, 0, self.ny),
                calculate_label(x, y + 1, z, 0, self.nx, 0, self.ny),
                calculate_label(x, y + 1, z + 1, 0, self.nx, 0, self.ny),
                calculate_label(x, y, z + 1, 0, self.nx, 0, self.ny),
            ]
        } else if face_label < n_yz + n_xz {
            let f = face_label - n_yz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny, 0, self.nz - 1);
            [
                calculate_label(x, y, z, 0, self.nx, 0, self.ny),
                calculate_label(x + 1, y, z, 0, self.nx, 0, self.ny),
                calculate_label(x + 1, y, z + 1, 0, self.nx, 0, self.ny),
                calculate_label(x, y, z + 1, 0, self.nx, 0, self.ny),
            ]
        } else {
            let f = face_label - n_yz - n_xz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny - 1);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz);
            [
                calculate_label(x, y, z, 0, self.nx, 0, self.ny),
                calculate_label(x + 1, y, z, 0, self.nx, 0, self.ny),
                calculate_label(x + 1, y + 1, z, 0, self.nx, 0, self.ny),
                calculate_label(x, y + 1, z, 0, self.nx, 0, self.ny),
            ]
        }
    }

    fn face_is_boundary_single(&self, face_label: i64) -> bool {
        let n_yz = self.n_face_yz();
        let n_xz = self.n_face_xz();
        if face_label < n_yz {
            let x = calculate_x(face_label, 0, self.nx);
            x == 0 || x == self.nx
        } else if face_label < n_yz + n_xz {
            let y = calculate_y(face_label - n_yz, 0, self.nx - 1, 0, self.ny);
            y == 0 || y == self.ny
        } else {
            let z = calculate_z(face_label - n_yz - n_xz, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz);
            z == 0 || z == self.nz
        }
    }

    fn face_cell1_single(&self, face_label: i64) -> i64 {
        let n_yz = self.n_face_yz();
        let n_xz = self.n_face_xz();
        if face_label < n_yz {
            let x = calculate_x(face_label, 0, self.nx);
            let y = calculate_y(face_label, 0, self.nx, 0, self.ny - 1);
            let z = calculate_z(face_label, 0, self.nx, 0, self.ny - 1, 0, self.nz - 1);
            let cx = if x == 0 { x } else { x - 1 };
            calculate_label(cx, y, z, 0, self.nx - 1, 0, self.ny - 1)
        } else if face_label < n_yz + n_xz {
            let f = face_label - n_yz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny, 0, self.nz - 1);
            let cy = if y == 0 { y } else { y - 1 };
            calculate_label(x, cy, z, 0, self.nx - 1, 0, self.ny - 1)
        } else {
            let f = face_label - n_yz - n_xz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny - 1);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz);
            let cz = if z == 0 { z } else { z - 1 };
            calculate_label(x, y, cz, 0, self.nx - 1, 0, self.ny - 1)
        }
    }

    fn face_cell2_single(&self, face_label: i64) -> Option<i64> {
        if self.face_is_boundary_single(face_label) {
            return None;
        }
        let n_yz = self.n_face_yz();
        let n_xz = self.n_face_xz();
        if face_label < n_yz {
            let x = calculate_x(face_label, 0, self.nx);
            let y = calculate_y(face_label, 0, self.nx, 0, self.ny - 1);
            let z = calculate_z(face_label, 0, self.nx, 0, self.ny - 1, 0, self.nz - 1);
            Some(calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny - 1))
        } else if face_label < n_yz + n_xz {
            let f = face_label - n_yz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny, 0, self.nz - 1);
            Some(calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny - 1))
        } else {
            let f = face_label - n_yz - n_xz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny - 1);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz);
            Some(calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny - 1))
        }
    }

    fn face_boundary_label(&self, face_label: i64) -> Option<i64> {
        if !self.face_is_boundary_single(face_label) {
            return None;
        }
        let n_yz = self.n_face_yz();
        let n_xz = self.n_face_xz();
        let n_bound_yz = self.n_bound_yz();
        let n_bound_xz = self.n_bound_xz();
        if face_label < n_yz {
            let x = calculate_x(face_label, 0, self.nx);
            let y = calculate_y(face_label, 0, self.nx, 0, self.ny - 1);
            let z = calculate_z(face_label, 0, self.nx, 0, self.ny - 1, 0, self.nz - 1);
            let side = if x == 0 { 0 } else { 1 };
            Some(calculate_label(side, y, z, 0, 1, 0, self.ny - 1))
        } else if face_label < n_yz + n_xz {
            let f = face_label - n_yz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny, 0, self.nz - 1);
            let side = if y == 0 { 0 } else { 1 };
            Some(n_bound_yz + calculate_label(x, side, z, 0, self.nx - 1, 0, 1))
        } else {
            let f = face_label - n_yz - n_xz;
            let x = calculate_x(f, 0, self.nx - 1);
            let y = calculate_y(f, 0, self.nx - 1, 0, self.ny - 1);
            let z = calculate_z(f, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz);
            let side = if z == 0 { 0 } else { 1 };
            Some(n_bound_yz + n_bound_xz + calculate_label(x, y, side, 0, self.nx - 1, 0, self.ny - 1))
        }
    }

    fn boundary_face_label(&self, boundary_label: i64) -> i64 {
        let n_yz = self.n_face_yz();
        let n_xz = self.n_face_xz();
        let n_bound_yz = self.n_bound_yz();
        let n_bound_xz = self.n_bound_xz();
        if boundary_label < n_bound_yz {
            let side = calculate_x(boundary_label, 0, 1);
            let y = calculate_y(boundary_label, 0, 1, 0, self.ny - 1);
            let z = calculate_z(boundary_label, 0, 1, 0, self.ny - 1, 0, self.nz - 1);
            let x = if side == 0 { 0 } else { self.nx };
            calculate_label(x, y, z, 0, self.nx, 0, self.ny - 1)
        } else if boundary_label < n_bound_yz + n_bound_xz {
            let b = boundary_label - n_bound_yz;
            let x = calculate_x(b, 0, self.nx - 1);
            let side = calculate_y(b, 0, self.nx - 1, 0, 1);
            let z = calculate_z(b, 0, self.nx - 1, 0, 1, 0, self.nz - 1);
            let y = if side == 0 { 0 } else { self.ny };
            n_yz + calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny)
        } else {
            let b = boundary_label - n_bound_yz - n_bound_xz;
            let x = calculate_x(b, 0, self.nx - 1);
            let y = calculate_y(b, 0, self.nx - 1, 0, self.ny - 1);
            let side = calculate_z(b, 0, self.nx - 1, 0, self.ny - 1, 0, 1);
            let z = if side == 0 { 0 } else { self.nz };
            n_yz + n_xz + calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny - 1)
        }
    }

    fn quad_for_face(&self, face_label: i64) -> Quadrilateral3D {
        let verts = self.face_vertex_labels(face_label);
        Quadrilateral3D::new(
            self.vertex_position(verts[0]),
            self.vertex_position(verts[1]),
            self.vertex_position(verts[2]),
            self.vertex_position(verts[3]),
        )
    }
}

impl MeshSource for StructuredGridSource {
    fn cell_count(&self) -> usize {
        (self.nx * self.ny * self.nz) as usize
    }

    fn face_count(&self) -> usize {
        (self.n_face_yz() + self.n_face_xz() + self.nx * self.ny * (self.nz + 1)) as usize
    }

    fn boundary_count(&self) -> usize {
        (self.n_bound_yz() + self.n_bound_xz() + self.nx * self.ny * 2) as usize
    }

    fn region_count(&self) -> usize {
        1
    }

    fn vertex_count(&self) -> usize {
        ((self.nx + 1) * (self.ny + 1) * (self.nz + 1)) as usize
    }

    fn cell_neighbour_labels(&self, cell_labels: &[Label]) -> Vec<Vec<Label>> {
        cell_labels
            .iter()
            .map(|&cell| {
                let x = calculate_x(cell.0, 0, self.nx - 1);
                let y = calculate_y(cell.0, 0, self.nx - 1, 0, self.ny - 1);
                let z = calculate_z(cell.0, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz - 1);
                let n_yz = self.n_face_yz();
                let n_xz = self.n_face_xz();
                let faces = [
                    calculate_label(x, y, z, 0, self.nx, 0, self.ny - 1),
                    calculate_label(x + 1, y, z, 0, self.nx, 0, self.ny - 1),
                    n_yz + calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny),
                    n_yz + calculate_label(x, y + 1, z, 0, self.nx - 1, 0, self.ny),
                    n_yz + n_xz + calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny - 1),
                    n_yz + n_xz + calculate_label(x, y, z + 1, 0, self.nx - 1, 0, self.ny - 1),
                ];
                faces
                    .into_iter()
                    .filter_map(|f| self.face_cell2_single(f).filter(|&c2| c2 != cell.0).or_else(|| {
                        let c1 = self.face_cell1_single(f);
                        (c1 != cell.0).then_some(c1)
                    }))
                    .map(Label)
                    .collect()
            })
            .collect()
    }

    fn cell_face_labels(&self, cell_labels: &[Label]) -> Vec<Vec<Label>> {
        cell_labels
            .iter()
            .map(|&cell| {
                let x = calculate_x(cell.0, 0, self.nx - 1);
                let y = calculate_y(cell.0, 0, self.nx - 1, 0, self.ny - 1);
                let z = calculate_z(cell.0, 0, self.nx - 1, 0, self.ny - 1, 0, self.nz - 1);
                let n_yz = self.n_face_yz();
                let n_xz = self.n_face_xz();
                vec![
                    Label(calculate_label(x, y, z, 0, self.nx, 0, self.ny - 1)),
                    Label(calculate_label(x + 1, y, z, 0, self.nx, 0, self.ny - 1)),
                    Label(n_yz + calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny)),
                    Label(n_yz + calculate_label(x, y + 1, z, 0, self.nx - 1, 0, self.ny)),
                    Label(n_yz + n_xz + calculate_label(x, y, z, 0, self.nx - 1, 0, self.ny - 1)),
                    Label(n_yz + n_xz + calculate_label(x, y, z + 1, 0, self.nx - 1, 0, self.ny - 1)),
                ]
            })
            .collect()
    }

    fn cell_attributes(&self, cell_labels: &[Label]) -> Vec<CellAttributes> {
        cell_labels
            .iter()
            .map(|&cell| CellAttributes {
                center: self.cell_center(cell.0),
                volume: self.dsx * self.dsy * self.dsz,
                n_faces: 6,
                n_vertices: 8,
            })
            .collect()
    }

    fn face_is_boundary(&self, face_labels: &[Label]) -> Vec<bool> {
        face_labels.iter().map(|&f| self.face_is_boundary_single(f.0)).collect()
    }

    fn face_attributes(&self, face_labels: &[Label]) -> Vec<FaceAttributes> {
        face_labels
            .iter()
            .map(|&face| {
                let quad = self.quad_for_face(face.0);
                let vertices = self.face_vertex_labels(face.0).map(Label).to_vec();
                let cell1 = Label(self.face_cell1_single(face.0));
                let cell2 = self.face_cell2_single(face.0).map(Label);
                let boundary = self.face_boundary_label(face.0).map(Label);
                let cell1_center = self.cell_center(cell1.0);
                let xnac = cell2.map(|c| self.cell_center(c.0)).unwrap_or(quad.centroid());
                FaceAttributes {
                    cell1,
                    cell2,
                    boundary,
                    vertices,
                    lambda: if boundary.is_some() { -1.0 } else { 0.5 },
                    normal: quad.normal(),
                    center: quad.centroid(),
                    area: quad.area(),
                    rlencos: 1.0,
                    xpac: cell1_center,
                    xnac,
                }
            })
            .collect()
    }

    fn vertex_positions(&self, vertex_labels: &[Label]) -> Vec<Point3> {
        vertex_labels.iter().map(|&v| self.vertex_position(v.0)).collect()
    }

    fn region_labels(&self) -> Vec<Label> {
        vec![Label(0)]
    }

    fn region_attributes(&self, region_labels: &[Label]) -> Vec<RegionAttributes> {
        region_labels
            .iter()
            .map(|_| RegionAttributes {
                kind: RegionKind::Default,
                name: "Default".to_string(),
                density: 0.0,
                turb_ke: 0.0,
                turb_diss: 0.0,
            })
            .collect()
    }

    fn boundary_face_labels(&self, boundary_labels: &[Label]) -> Vec<Label> {
        boundary_labels.iter().map(|&b| Label(self.boundary_face_label(b.0))).collect()
    }

    fn boundary_attributes(&self, boundary_labels: &[Label]) -> Vec<BoundaryAttributes> {
        boundary_labels
            .iter()
            .map(|&boundary| {
                let face = Label(self.boundary_face_label(boundary.0));
                let vertices = self.face_vertex_labels(face.0).map(Label).to_vec();
                BoundaryAttributes {
                    face,
                    vertices,
                    region: Label(0),
                    // The original structured-grid source reports this as
                    // missing (E_SOURCE_MISSING); callers supply it externally.
                    distance: None,
                    y_plus: 0.0,
                    u_plus: 0.0,
                    shear: Vector3::ZERO,
                    q: 0.0,
                    h: 0.0,
                    t: 0.0,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_cubed_grid_matches_documented_counts() {
        let source = StructuredGridSource::unit_cube(3);
        assert_eq!(source.cell_count(), 27);
        assert_eq!(source.vertex_count(), 64);
        assert_eq!(source.face_count(), 36 + 36 + 36);
        assert_eq!(source.boundary_count(), 54);
    }

    #[test]
    fn interior_face_resolves_both_neighbouring_cells() {
        let source = StructuredGridSource::unit_cube(3);
        // The face between cell 0 (0,0,0) and cell 1 (1,0,0) is the YZ face at x=1.
        let face = calculate_label(1, 0, 0, 0, 3, 0, 2);
        assert!(!source.face_is_boundary_single(face));
        assert_eq!(source.face_cell1_single(face), 0);
        assert_eq!(source.face_cell2_single(face), Some(1));
    }

    #[test]
    fn unit_cell_cube_cell_sits_at_the_center() {
        let source = StructuredGridSource::unit_cube(1);
        let center = source.cell_center(0);
        assert!((center.x - 0.5).abs() < 1e-12);
        assert!((center.y - 0.5).abs() < 1e-12);
        assert!((center.z - 0.5).abs() < 1e-12);
    }
}
