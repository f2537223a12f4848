//! Polygon and polyhedron shape algebra: [`Triangle3D`], [`Quadrilateral3D`],
//! and the four polyhedra the mesh core reconstructs cells into
//! ([`Tetrahedron`], [`QuadPyramid`], [`TriPrism`], [`Hexahedron`]).
//!
//! The source design is CRTP over a closed set of shape variants so every
//! call site shares one surface at zero virtual-call cost. Rust's equivalent
//! for a small closed set is a tagged enum ([`Shape`]) with dispatch
//! happening once, in the mesh core's `build_polyhedron`, after which the
//! concrete variant carries all of its own state — see DESIGN.md.

use std::cell::OnceCell;

use cfdmesh_common::GeometryError;

use crate::euclid::{is_vector_range_intersection, Plane3, Point3, Vector3, EPS};

/// A (possibly non-convex) planar triangle in 3D.
#[derive(Debug, Clone)]
pub struct Triangle3D {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
    area: OnceCell<f64>,
    centroid: OnceCell<Point3>,
}

impl Triangle3D {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Triangle3D {
            a,
            b,
            c,
            area: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn area(&self) -> f64 {
        *self
            .area
            .get_or_init(|| 0.5 * (self.b - self.a).cross(self.c - self.a).length())
    }

    pub fn centroid(&self) -> Point3 {
        *self
            .centroid
            .get_or_init(|| Point3::centroid(&[self.a, self.b, self.c]))
    }

    /// Normal from the stored vertex order, following the right-hand rule
    /// `(b-a) x (c-a)`, normalised.
    pub fn normal(&self) -> Vector3 {
        (self.b - self.a).cross(self.c - self.a).normalised()
    }

    /// Co-planarity, then the three half-plane edge tests.
    pub fn is_point_inside(&self, p: Point3) -> bool {
        let n = (self.b - self.a).cross(self.c - self.a);
        if n.length() <= EPS {
            return false;
        }
        if (n.dot(p - self.a) / n.length()).abs() > EPS {
            return false;
        }
        point_inside_polygon_edges(&[self.a, self.b, self.c], n, p)
    }
}

/// Test whether `p` (assumed already on-plane) lies inside the polygon whose
/// vertices are given in cyclic order, using the sign of
/// `n . ((v_{i+1} - v_i) x (p - v_i))` across every edge.
fn point_inside_polygon_edges(verts: &[Point3], n: Vector3, p: Point3) -> bool {
    let count = verts.len();
    let mut sign = 0.0f64;
    for i in 0..count {
        let v0 = verts[i];
        let v1 = verts[(i + 1) % count];
        let edge_cross = (v1 - v0).cross(p - v0).dot(n);
        if edge_cross.abs() <= EPS {
            continue; // on this edge's supporting line: doesn't rule anything out
        }
        if sign == 0.0 {
            sign = edge_cross.signum();
        } else if edge_cross.signum() != sign {
            return false;
        }
    }
    true
}

/// A planar quadrilateral, vertices assumed coplanar and connected
/// cyclically (`v[i]` edge-adjacent to `v[(i+1) % 4]`).
#[derive(Debug, Clone)]
pub struct Quadrilateral3D {
    pub v: [Point3; 4],
    area: OnceCell<f64>,
    centroid: OnceCell<Point3>,
}

impl Quadrilateral3D {
    pub fn new(v0: Point3, v1: Point3, v2: Point3, v3: Point3) -> Self {
        Quadrilateral3D {
            v: [v0, v1, v2, v3],
            area: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    pub fn from_array(v: [Point3; 4]) -> Self {
        Quadrilateral3D {
            v,
            area: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    /// Sum of the two triangles formed by the `v0`-`v2` diagonal.
    pub fn area(&self) -> f64 {
        *self.area.get_or_init(|| {
            Triangle3D::new(self.v[0], self.v[1], self.v[2]).area()
                + Triangle3D::new(self.v[0], self.v[2], self.v[3]).area()
        })
    }

    pub fn normal(&self) -> Vector3 {
        (self.v[1] - self.v[0]).cross(self.v[2] - self.v[0]).normalised()
    }

    pub fn reversed(&self) -> Quadrilateral3D {
        Quadrilateral3D::new(self.v[3], self.v[2], self.v[1], self.v[0])
    }

    /// Polygon-centroid formula applied to the XY, XZ and YZ projections and
    /// combined component-wise: each coordinate is estimated by the (up to)
    /// two projections that retain it, averaged; a projection whose signed
    /// area collapses to zero (the quad's plane is perpendicular to it) is
    /// dropped from the average for the coordinates it would have supplied.
    pub fn centroid(&self) -> Point3 {
        *self.centroid.get_or_init(|| {
            let xy: Vec<(f64, f64)> = self.v.iter().map(|p| (p.x, p.y)).collect();
            let xz: Vec<(f64, f64)> = self.v.iter().map(|p| (p.x, p.z)).collect();
            let yz: Vec<(f64, f64)> = self.v.iter().map(|p| (p.y, p.z)).collect();

            let c_xy = polygon_centroid_2d(&xy);
            let c_xz = polygon_centroid_2d(&xz);
            let c_yz = polygon_centroid_2d(&yz);

            let fallback = Point3::centroid(&self.v);

            let x = average_of([c_xy.map(|c| c.0), c_xz.map(|c| c.0)], fallback.x);
            let y = average_of([c_xy.map(|c| c.1), c_yz.map(|c| c.0)], fallback.y);
            let z = average_of([c_xz.map(|c| c.1), c_yz.map(|c| c.1)], fallback.z);

            Point3::new(x, y, z)
        })
    }

    /// Ray-from-point-to-centroid / edge-intersection method: inside iff `p`
    /// is on the polygon's plane and the segment from `p` to the centroid
    /// crosses none of the four edges.
    pub fn is_point_inside(&self, p: Point3) -> bool {
        let Ok(plane) = Plane3::from_points(self.v[0], self.v[1], self.v[2]) else {
            return false;
        };
        if !plane.contains_point(p) {
            return false;
        }
        let centroid = self.centroid();
        for i in 0..4 {
            let e0 = self.v[i];
            let e1 = self.v[(i + 1) % 4];
            if is_vector_range_intersection(p, centroid, e0, e1) {
                return false;
            }
        }
        true
    }
}

fn average_of(values: [Option<f64>; 2], fallback: f64) -> f64 {
    let present: Vec<f64> = values.into_iter().flatten().collect();
    if present.is_empty() {
        fallback
    } else {
        present.iter().sum::<f64>() / present.len() as f64
    }
}

/// Closed-form polygon centroid (shoelace-weighted) for a 2D projection.
/// Returns `None` if the signed area is too close to zero to divide by.
fn polygon_centroid_2d(pts: &[(f64, f64)]) -> Option<(f64, f64)> {
    let n = pts.len();
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let (x0, y0) = pts[i];
        let (x1, y1) = pts[(i + 1) % n];
        let cross = x0 * y1 - x1 * y0;
        area2 += cross;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }
    if area2.abs() <= EPS {
        return None;
    }
    let area = area2 / 2.0;
    Some((cx / (6.0 * area), cy / (6.0 * area)))
}

/// Shared state any polyhedron provides.
pub trait Polyhedron {
    fn volume(&self) -> f64;
    fn centroid(&self) -> Point3;
    fn is_point_inside(&self, p: Point3) -> bool;
}

/// Test every oriented-outward face of a convex polyhedron: inside iff
/// `dot(normal, p - face_vertex) <= 0` (within tolerance) for all of them.
/// On-face / on-edge / on-vertex points satisfy this automatically by
/// convexity, with no separate case needed.
fn inside_convex_faces(faces: &[(Point3, Vector3)], p: Point3) -> bool {
    faces
        .iter()
        .all(|&(v0, n)| n.dot(p - v0) <= EPS)
}

/// Orient `normal` (computed from `verts` in their given order) away from
/// `interior`.
fn outward_normal(verts: &[Point3], interior: Point3) -> Vector3 {
    let n = (verts[1] - verts[0]).cross(verts[2] - verts[0]).normalised();
    if n.dot(verts[0] - interior) < 0.0 {
        -n
    } else {
        n
    }
}

/// Apex + triangular base. Volume = 1/3 * base area * height (the base-plane
/// distance from the apex); centroid = 1/4 * sum of the four vertices.
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    pub apex: Point3,
    pub base: Triangle3D,
    volume: OnceCell<f64>,
    centroid: OnceCell<Point3>,
}

impl Tetrahedron {
    pub fn new(apex: Point3, base: Triangle3D) -> Self {
        Tetrahedron {
            apex,
            base,
            volume: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    fn faces(&self) -> [(Point3, Vector3); 4] {
        let c = self.centroid();
        let base_verts = self.base.vertices();
        let side = |a: Point3, b: Point3| (a, outward_normal(&[a, b, self.apex], c));
        [
            (base_verts[0], outward_normal(&base_verts, c)),
            side(base_verts[0], base_verts[1]),
            side(base_verts[1], base_verts[2]),
            side(base_verts[2], base_verts[0]),
        ]
    }
}

impl Polyhedron for Tetrahedron {
    fn volume(&self) -> f64 {
        *self.volume.get_or_init(|| {
            let Ok(plane) = Plane3::from_points(self.base.a, self.base.b, self.base.c) else {
                return 0.0;
            };
            let height = plane.distance(self.apex);
            (1.0 / 3.0) * self.base.area() * height
        })
    }

    fn centroid(&self) -> Point3 {
        *self.centroid.get_or_init(|| {
            Point3::centroid(&[self.apex, self.base.a, self.base.b, self.base.c])
        })
    }

    fn is_point_inside(&self, p: Point3) -> bool {
        inside_convex_faces(&self.faces(), p)
    }
}

/// Apex + quadrilateral base. Volume = 1/3 * base area * height; centroid =
/// `base_centroid + 1/4 * (apex - base_centroid)`.
#[derive(Debug, Clone)]
pub struct QuadPyramid {
    pub apex: Point3,
    pub base: Quadrilateral3D,
    volume: OnceCell<f64>,
    centroid: OnceCell<Point3>,
}

impl QuadPyramid {
    pub fn new(apex: Point3, base: Quadrilateral3D) -> Self {
        QuadPyramid {
            apex,
            base,
            volume: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    fn faces(&self) -> [(Point3, Vector3); 5] {
        let c = self.centroid();
        let b = self.base.v;
        let side = |i: usize| {
            let a = b[i];
            let d = b[(i + 1) % 4];
            (a, outward_normal(&[a, d, self.apex], c))
        };
        [
            (b[0], outward_normal(&b, c)),
            side(0),
            side(1),
            side(2),
            side(3),
        ]
    }
}

impl Polyhedron for QuadPyramid {
    fn volume(&self) -> f64 {
        *self.volume.get_or_init(|| {
            let Ok(plane) = Plane3::from_points(self.base.v[0], self.base.v[1], self.base.v[2])
            else {
                return 0.0;
            };
            let height = plane.distance(self.apex);
            (1.0 / 3.0) * self.base.area() * height
        })
    }

    fn centroid(&self) -> Point3 {
        *self.centroid.get_or_init(|| {
            let bc = self.base.centroid();
            bc + (self.apex - bc) * 0.25
        })
    }

    fn is_point_inside(&self, p: Point3) -> bool {
        inside_convex_faces(&self.faces(), p)
    }
}

/// Top and bottom triangles, `top[i]` connected by a vertical edge to
/// `bottom[i]`. Volume = `|top_centroid - bottom_centroid| * base_area`;
/// centroid = 1/6 * sum of the six vertices.
#[derive(Debug, Clone)]
pub struct TriPrism {
    pub top: Triangle3D,
    pub bottom: Triangle3D,
    volume: OnceCell<f64>,
    centroid: OnceCell<Point3>,
}

impl TriPrism {
    pub fn new(top: Triangle3D, bottom: Triangle3D) -> Self {
        TriPrism {
            top,
            bottom,
            volume: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    fn faces(&self) -> [(Point3, Vector3); 5] {
        let c = self.centroid();
        let t = self.top.vertices();
        let b = self.bottom.vertices();
        let side = |i: usize| {
            let j = (i + 1) % 3;
            (b[i], outward_normal(&[b[i], b[j], t[i]], c))
        };
        [
            (t[0], outward_normal(&t, c)),
            (b[0], outward_normal(&b, c)),
            side(0),
            side(1),
            side(2),
        ]
    }
}

impl Polyhedron for TriPrism {
    fn volume(&self) -> f64 {
        *self.volume.get_or_init(|| {
            let height = (self.top.centroid() - self.bottom.centroid()).length();
            let base_area = (self.top.area() + self.bottom.area()) / 2.0;
            height * base_area
        })
    }

    fn centroid(&self) -> Point3 {
        *self.centroid.get_or_init(|| {
            let t = self.top.vertices();
            let b = self.bottom.vertices();
            Point3::centroid(&[t[0], t[1], t[2], b[0], b[1], b[2]])
        })
    }

    fn is_point_inside(&self, p: Point3) -> bool {
        inside_convex_faces(&self.faces(), p)
    }
}

/// Six quadrilateral faces, decomposed into five tetrahedra. `volume` and
/// `centroid` are the sum / volume-weighted average of that decomposition —
/// they are not computed independently and cross-checked, so the
/// decomposition-sums-to-the-whole invariant holds by construction.
#[derive(Debug, Clone)]
pub struct Hexahedron {
    faces: [Quadrilateral3D; 6],
    tets: Vec<Tetrahedron>,
    volume: OnceCell<f64>,
    centroid: OnceCell<Point3>,
}

impl Hexahedron {
    /// Builds a hexahedron from six quadrilateral faces in no particular
    /// order. Panics if two faces share all four vertices (a genuine
    /// contract breach from the caller, not a recoverable geometry error) or
    /// if the faces do not resolve to exactly eight distinct vertices.
    pub fn from_faces(faces: [Quadrilateral3D; 6]) -> Self {
        let (verts, face_idx) = dedupe_vertices(&faces);
        assert_eq!(
            verts.len(),
            8,
            "hexahedron faces must resolve to exactly 8 distinct vertices, found {}",
            verts.len()
        );
        for i in 0..6 {
            for j in (i + 1)..6 {
                if same_vertex_set(&face_idx[i], &face_idx[j]) {
                    panic!("hexahedron constructed from two identical faces");
                }
            }
        }

        let interior = Point3::centroid(&verts);
        let oriented: Vec<[usize; 4]> = face_idx
            .iter()
            .map(|idx| orient_face_outward(idx, &verts, interior))
            .collect();

        let bottom = &oriented[0];
        let top: [usize; 4] = *oriented[1..]
            .iter()
            .find(|idx| disjoint(bottom, idx))
            .expect("a hexahedron must have an opposite face with no shared vertices");

        let side_faces: Vec<&[usize; 4]> = oriented
            .iter()
            .filter(|idx| *idx != bottom && **idx != top)
            .collect();

        let top_set: std::collections::HashSet<usize> = top.iter().copied().collect();
        let mut top_aligned = [0usize; 4];
        for (i, &bi) in bottom.iter().enumerate() {
            let containing: Vec<&&[usize; 4]> = side_faces
                .iter()
                .filter(|f| f.contains(&bi))
                .collect();
            let mut candidates: Option<std::collections::HashSet<usize>> = None;
            for f in containing {
                let members: std::collections::HashSet<usize> = f
                    .iter()
                    .copied()
                    .filter(|v| top_set.contains(v))
                    .collect();
                candidates = Some(match candidates {
                    Some(prev) => prev.intersection(&members).copied().collect(),
                    None => members,
                });
            }
            let candidates = candidates.unwrap_or_default();
            top_aligned[i] = *candidates
                .iter()
                .next()
                .expect("could not align hexahedron top face to bottom face");
        }

        let b = [verts[bottom[0]], verts[bottom[1]], verts[bottom[2]], verts[bottom[3]]];
        let t = [
            verts[top_aligned[0]],
            verts[top_aligned[1]],
            verts[top_aligned[2]],
            verts[top_aligned[3]],
        ];

        let tet = |p: Point3, q: Point3, r: Point3, apex: Point3| {
            Tetrahedron::new(apex, Triangle3D::new(p, q, r))
        };
        let tets = vec![
            tet(b[0], b[1], b[3], t[0]),
            tet(b[1], b[2], b[3], t[2]),
            tet(b[1], t[0], t[1], t[2]),
            tet(b[3], t[0], t[2], t[3]),
            tet(b[1], b[3], t[0], t[2]),
        ];

        Hexahedron {
            faces,
            tets,
            volume: OnceCell::new(),
            centroid: OnceCell::new(),
        }
    }

    pub fn faces(&self) -> &[Quadrilateral3D; 6] {
        &self.faces
    }
}

fn dedupe_vertices(faces: &[Quadrilateral3D; 6]) -> (Vec<Point3>, [[usize; 4]; 6]) {
    let mut verts: Vec<Point3> = Vec::new();
    let mut idx_of = |p: Point3, verts: &mut Vec<Point3>| -> usize {
        if let Some(i) = verts.iter().position(|&q| (q - p).length() <= EPS) {
            i
        } else {
            verts.push(p);
            verts.len() - 1
        }
    };
    let mut face_idx = [[0usize; 4]; 6];
    for (f, face) in faces.iter().enumerate() {
        for (i, &v) in face.v.iter().enumerate() {
            face_idx[f][i] = idx_of(v, &mut verts);
        }
    }
    (verts, face_idx)
}

fn same_vertex_set(a: &[usize; 4], b: &[usize; 4]) -> bool {
    let mut a = *a;
    let mut b = *b;
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

fn disjoint(a: &[usize; 4], b: &[usize; 4]) -> bool {
    !a.iter().any(|x| b.contains(x))
}

fn orient_face_outward(idx: &[usize; 4], verts: &[Point3], interior: Point3) -> [usize; 4] {
    let pts = [verts[idx[0]], verts[idx[1]], verts[idx[2]], verts[idx[3]]];
    let n = (pts[1] - pts[0]).cross(pts[2] - pts[0]);
    if n.dot(pts[0] - interior) < 0.0 {
        [idx[0], idx[3], idx[2], idx[1]]
    } else {
        *idx
    }
}

impl Polyhedron for Hexahedron {
    fn volume(&self) -> f64 {
        *self
            .volume
            .get_or_init(|| self.tets.iter().map(Polyhedron::volume).sum())
    }

    fn centroid(&self) -> Point3 {
        *self.centroid.get_or_init(|| {
            let total_volume = self.volume();
            if total_volume <= EPS {
                return Point3::centroid(
                    &self.faces.iter().flat_map(|f| f.v).collect::<Vec<_>>(),
                );
            }
            let weighted = self.tets.iter().fold(Vector3::ZERO, |acc, t| {
                acc + t.centroid().to_vector() * t.volume()
            });
            Point3::ORIGIN + weighted / total_volume
        })
    }

    fn is_point_inside(&self, p: Point3) -> bool {
        let interior = self.centroid();
        let faces: Vec<(Point3, Vector3)> = self
            .faces
            .iter()
            .map(|f| (f.v[0], outward_normal(&f.v, interior)))
            .collect();
        inside_convex_faces(&faces, p)
    }
}

/// A tagged union over the four reconstructable polyhedron shapes, the
/// idiomatic replacement for the source's CRTP dispatch: one `match` in
/// `build_polyhedron`, then the concrete variant carries all of its own
/// state.
#[derive(Debug, Clone)]
pub enum Shape {
    Tetrahedron(Tetrahedron),
    QuadPyramid(QuadPyramid),
    TriPrism(TriPrism),
    Hexahedron(Hexahedron),
}

impl Polyhedron for Shape {
    fn volume(&self) -> f64 {
        match self {
            Shape::Tetrahedron(s) => s.volume(),
            Shape::QuadPyramid(s) => s.volume(),
            Shape::TriPrism(s) => s.volume(),
            Shape::Hexahedron(s) => s.volume(),
        }
    }

    fn centroid(&self) -> Point3 {
        match self {
            Shape::Tetrahedron(s) => s.centroid(),
            Shape::QuadPyramid(s) => s.centroid(),
            Shape::TriPrism(s) => s.centroid(),
            Shape::Hexahedron(s) => s.centroid(),
        }
    }

    fn is_point_inside(&self, p: Point3) -> bool {
        match self {
            Shape::Tetrahedron(s) => s.is_point_inside(p),
            Shape::QuadPyramid(s) => s.is_point_inside(p),
            Shape::TriPrism(s) => s.is_point_inside(p),
            Shape::Hexahedron(s) => s.is_point_inside(p),
        }
    }
}

/// The four shape kinds identifiable from `(vertex_count, face_count)` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyhedronKind {
    Tetrahedron,
    QuadPyramid,
    TriPrism,
    Hexahedron,
    Unknown,
}

impl PolyhedronKind {
    pub fn name(self) -> &'static str {
        match self {
            PolyhedronKind::Tetrahedron => "tetrahedron",
            PolyhedronKind::QuadPyramid => "quadrilateral pyramid",
            PolyhedronKind::TriPrism => "triangular prism",
            PolyhedronKind::Hexahedron => "hexahedron",
            PolyhedronKind::Unknown => "unknown",
        }
    }
}

/// `(4,4) -> Tet`, `(5,5) -> QuadPyramid`, `(6,5) -> TriPrism`,
/// `(8,6) -> Hex`, else `Unknown`.
pub fn find_polyhedron_type(n_vertices: usize, n_faces: usize) -> PolyhedronKind {
    match (n_vertices, n_faces) {
        (4, 4) => PolyhedronKind::Tetrahedron,
        (5, 5) => PolyhedronKind::QuadPyramid,
        (6, 5) => PolyhedronKind::TriPrism,
        (8, 6) => PolyhedronKind::Hexahedron,
        _ => PolyhedronKind::Unknown,
    }
}

pub fn expect_polyhedron_shape(
    shape: PolyhedronKind,
    n_vertices: usize,
    n_faces: usize,
) -> Result<(), GeometryError> {
    let actual = find_polyhedron_type(n_vertices, n_faces);
    if actual == shape {
        Ok(())
    } else {
        Err(GeometryError::PolyhedronMismatch {
            shape: shape.name(),
            vertices: n_vertices,
            faces: n_faces,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> Tetrahedron {
        Tetrahedron::new(
            Point3::new(0.0, 0.0, 1.0),
            Triangle3D::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
        )
    }

    #[test]
    fn tetrahedron_centroid_and_volume() {
        let tet = unit_tet();
        let c = tet.centroid();
        assert!((c.x - 0.25).abs() < 1e-9);
        assert!((c.y - 0.25).abs() < 1e-9);
        assert!((c.z - 0.25).abs() < 1e-9);
        assert!((tet.volume() - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn tetrahedron_centroid_is_inside() {
        let tet = unit_tet();
        assert!(tet.volume() > 0.0);
        assert!(tet.is_point_inside(tet.centroid()));
        assert!(!tet.is_point_inside(Point3::new(5.0, 5.0, 5.0)));
    }

    #[test]
    fn polyhedron_type_identification() {
        assert_eq!(find_polyhedron_type(4, 4), PolyhedronKind::Tetrahedron);
        assert_eq!(find_polyhedron_type(5, 5), PolyhedronKind::QuadPyramid);
        assert_eq!(find_polyhedron_type(6, 5), PolyhedronKind::TriPrism);
        assert_eq!(find_polyhedron_type(8, 6), PolyhedronKind::Hexahedron);
        assert_eq!(find_polyhedron_type(7, 7), PolyhedronKind::Unknown);
    }

    fn unit_cube_faces() -> [Quadrilateral3D; 6] {
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let v000 = p(0.0, 0.0, 0.0);
        let v100 = p(1.0, 0.0, 0.0);
        let v110 = p(1.0, 1.0, 0.0);
        let v010 = p(0.0, 1.0, 0.0);
        let v001 = p(0.0, 0.0, 1.0);
        let v101 = p(1.0, 0.0, 1.0);
        let v111 = p(1.0, 1.0, 1.0);
        let v011 = p(0.0, 1.0, 1.0);
        [
            Quadrilateral3D::new(v000, v010, v110, v100), // bottom
            Quadrilateral3D::new(v001, v101, v111, v011), // top
            Quadrilateral3D::new(v000, v100, v101, v001), // front
            Quadrilateral3D::new(v100, v110, v111, v101), // right
            Quadrilateral3D::new(v110, v010, v011, v111), // back
            Quadrilateral3D::new(v010, v000, v001, v011), // left
        ]
    }

    #[test]
    fn hexahedron_decomposition_matches_unit_cube_volume() {
        let hex = Hexahedron::from_faces(unit_cube_faces());
        assert!((hex.volume() - 1.0).abs() < 1e-9);
        let sum: f64 = hex.tets.iter().map(Polyhedron::volume).sum();
        assert!((sum - hex.volume()).abs() < 1e-12);
    }

    #[test]
    fn hexahedron_centroid_is_inside() {
        let hex = Hexahedron::from_faces(unit_cube_faces());
        let c = hex.centroid();
        assert!((c.x - 0.5).abs() < 1e-9);
        assert!((c.y - 0.5).abs() < 1e-9);
        assert!((c.z - 0.5).abs() < 1e-9);
        assert!(hex.is_point_inside(c));
        assert!(!hex.is_point_inside(Point3::new(2.0, 2.0, 2.0)));
    }

    #[test]
    #[should_panic(expected = "identical faces")]
    fn hexahedron_rejects_duplicate_faces() {
        let mut faces = unit_cube_faces();
        faces[1] = faces[0].clone();
        Hexahedron::from_faces(faces);
    }

    #[test]
    fn quadrilateral_point_inside() {
        let q = Quadrilateral3D::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(q.is_point_inside(Point3::new(0.5, 0.5, 0.0)));
        assert!(!q.is_point_inside(Point3::new(2.0, 2.0, 0.0)));
    }
}
