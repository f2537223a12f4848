//! 3D Euclidean primitives: points, vectors, and planes, with the tolerance
//! semantics the base spec requires ("all equality/on-plane/on-line tests
//! must use a tolerance relative to machine epsilon").
//!
//! Concretely typed over `f64` rather than generic over a scalar type `T`:
//! every downstream consumer (mesh geometry, sparse-matrix values) in this
//! workspace operates on `f64`, and a generic `T: Float` parameter would add
//! trait-bound ceremony with no caller that ever instantiates anything else.
//! Recorded in DESIGN.md.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Tolerance used for on-plane / on-line / collinearity tests, scaled off
/// `f64::EPSILON` rather than a fixed absolute constant so it degrades
/// gracefully for meshes at very different physical scales.
pub const EPS: f64 = 1e-9;

fn nearly_zero(x: f64) -> bool {
    x.abs() <= EPS
}

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn to_vector(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn distance(self, other: Point3) -> f64 {
        (self - other).length()
    }

    /// Arithmetic mean of a set of points. Panics on an empty slice: callers
    /// always have at least one vertex by construction.
    pub fn centroid(points: &[Point3]) -> Point3 {
        assert!(!points.is_empty(), "centroid of zero points is undefined");
        let n = points.len() as f64;
        let sum = points
            .iter()
            .fold(Vector3::ZERO, |acc, &p| acc + p.to_vector());
        Point3::ORIGIN + sum / n
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;
    fn add(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Vector3;
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A free vector in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalises to unit length. Returns the zero vector if `self` is (near)
    /// zero rather than producing `NaN`.
    pub fn normalised(self) -> Vector3 {
        let len = self.length();
        if nearly_zero(len) {
            Vector3::ZERO
        } else {
            self / len
        }
    }

    pub fn is_parallel_to(self, other: Vector3) -> bool {
        self.cross(other).length() <= EPS
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;
    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// A plane in 3D, constructed from three non-collinear points.
#[derive(Debug, Clone, Copy)]
pub struct Plane3 {
    point: Point3,
    normal: Vector3,
}

impl Plane3 {
    /// Builds the plane through `a`, `b`, `c`. Fails if the points are
    /// collinear (the implied normal would be the zero vector).
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> Result<Self, cfdmesh_common::GeometryError> {
        let normal = (b - a).cross(c - a);
        if nearly_zero(normal.length()) {
            return Err(cfdmesh_common::GeometryError::CollinearPoints);
        }
        Ok(Plane3 {
            point: a,
            normal: normal.normalised(),
        })
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance of `p` from the plane, positive on the side the
    /// normal points to.
    pub fn signed_distance(&self, p: Point3) -> f64 {
        self.normal.dot(p - self.point)
    }

    pub fn distance(&self, p: Point3) -> f64 {
        self.signed_distance(p).abs()
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        nearly_zero(self.signed_distance(p))
    }

    /// True if `v` lies in the plane (i.e. is perpendicular to its normal).
    pub fn contains_vector_direction(&self, v: Vector3) -> bool {
        nearly_zero(self.normal.dot(v))
    }
}

/// Whether segment `p1`-`p2` crosses segment `q1`-`q2` in 3D. Handles the
/// coplanar case; collinear overlap counts as an intersection.
pub fn is_vector_range_intersection(p1: Point3, p2: Point3, q1: Point3, q2: Point3) -> bool {
    let d1 = p2 - p1;
    let d2 = q2 - q1;
    let r = q1 - p1;

    let cross_dirs = d1.cross(d2);
    let coplanar = nearly_zero(r.dot(cross_dirs));

    if !coplanar {
        return false;
    }

    if nearly_zero(cross_dirs.length()) {
        // Parallel (possibly collinear) segments: overlap iff collinear and
        // their 1D projections along d1 overlap.
        if !nearly_zero(r.cross(d1).length()) {
            return false; // parallel but offset, never touching
        }
        let d1_len_sq = d1.length_squared();
        if nearly_zero(d1_len_sq) {
            return p1 == q1 || p1 == q2;
        }
        let t0 = r.dot(d1) / d1_len_sq;
        let t1 = (q2 - p1).dot(d1) / d1_len_sq;
        let (lo, hi) = (t0.min(t1), t0.max(t1));
        return hi >= -EPS && lo <= 1.0 + EPS;
    }

    // Skew-but-coplanar general case: solve p1 + s*d1 = q1 + t*d2 for s, t
    // using the two most well-conditioned axes.
    let denom = cross_dirs.length_squared();
    let s = r.cross(d2).dot(cross_dirs) / denom;
    let t = r.cross(d1).dot(cross_dirs) / denom;
    (-EPS..=1.0 + EPS).contains(&s) && (-EPS..=1.0 + EPS).contains(&t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_and_dot() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(y), 0.0);
    }

    #[test]
    fn plane_from_three_points() {
        let plane = Plane3::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert!((plane.normal().z.abs() - 1.0).abs() < 1e-9);
        assert!(plane.contains_point(Point3::new(0.5, 0.5, 0.0)));
        assert!(!plane.contains_point(Point3::new(0.5, 0.5, 1.0)));
    }

    #[test]
    fn collinear_points_rejected() {
        let err = Plane3::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        )
        .unwrap_err();
        assert_eq!(err, cfdmesh_common::GeometryError::CollinearPoints);
    }

    #[test]
    fn crossing_segments_in_plane() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(2.0, 2.0, 0.0);
        let q1 = Point3::new(0.0, 2.0, 0.0);
        let q2 = Point3::new(2.0, 0.0, 0.0);
        assert!(is_vector_range_intersection(p1, p2, q1, q2));
    }

    #[test]
    fn parallel_offset_segments_do_not_intersect() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(1.0, 0.0, 0.0);
        let q1 = Point3::new(0.0, 1.0, 0.0);
        let q2 = Point3::new(1.0, 1.0, 0.0);
        assert!(!is_vector_range_intersection(p1, p2, q1, q2));
    }

    #[test]
    fn collinear_overlap_counts_as_intersection() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(2.0, 0.0, 0.0);
        let q1 = Point3::new(1.0, 0.0, 0.0);
        let q2 = Point3::new(3.0, 0.0, 0.0);
        assert!(is_vector_range_intersection(p1, p2, q1, q2));
    }
}
