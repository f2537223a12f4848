//! End-to-end scenarios tying the mesh, geometry, sparse-matrix, and
//! solver-bridge layers together through the public `cfdmesh` surface.

use cfdmesh::comm::SingleRankCommunicator;
use cfdmesh::common::Label;
use cfdmesh::geometry::{find_polyhedron_type, Point3, Polyhedron, PolyhedronKind, Tetrahedron, Triangle3D};
use cfdmesh::mesh::ingest_mesh;
use cfdmesh::solver::{Algorithm, ReferenceCgSolver, SolverBridge};
use cfdmesh::sparse::{MatrixStorage, SparseMatrix};
use cfdmesh_testkit::StructuredGridSource;

#[test]
fn sparse_insertion_keeps_rows_in_lexicographic_order() {
    let mut matrix = SparseMatrix::new_coo(4, 4, 0).unwrap();
    matrix.set_element(2, 1, 10.0).unwrap();
    matrix.set_element(0, 3, 20.0).unwrap();
    matrix.set_element(2, 1, 30.0).unwrap();
    matrix.set_element(1, 0, 40.0).unwrap();

    assert_eq!(matrix.nnz(), 3);
    assert_eq!(matrix.non_zero_row_indexes(), vec![0, 1, 2]);
    assert_eq!(matrix.get_element(2, 1).unwrap(), 30.0);
}

#[test]
fn structured_grid_three_cubed_matches_documented_counts() {
    use cfdmesh::mesh::MeshSource;

    let source = StructuredGridSource::unit_cube(3);
    assert_eq!(source.cell_count(), 27);
    assert_eq!(source.vertex_count(), 64);
    assert_eq!(source.boundary_count(), 54);
}

#[test]
fn polyhedron_identification_matches_vertex_and_face_counts() {
    assert_eq!(find_polyhedron_type(6, 5), PolyhedronKind::TriPrism);
    assert_eq!(find_polyhedron_type(8, 6), PolyhedronKind::Hexahedron);
}

#[test]
fn tetrahedron_centroid_and_volume_match_the_closed_form() {
    let base = Triangle3D::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 1.0));
    let tet = Tetrahedron::new(Point3::new(0.0, 0.0, 0.0), base);

    let centroid = tet.centroid();
    assert!((centroid.x - 0.25).abs() < 1e-12);
    assert!((centroid.y - 0.25).abs() < 1e-12);
    assert!((centroid.z - 0.25).abs() < 1e-12);
    assert!((tet.volume() - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn point_in_cell_search_on_the_unit_cube() {
    let source = StructuredGridSource::unit_cube(1);
    let assigned = vec![Label(0)];
    let mesh = ingest_mesh(&source, &assigned, Box::new(SingleRankCommunicator::new())).unwrap();

    let found = mesh.find_cell_id(Point3::new(0.5, 0.5, 0.5)).unwrap();
    assert_eq!(found.0, 0);

    assert!(mesh.find_cell_id(Point3::new(2.0, 2.0, 2.0)).is_err());
}

#[test]
fn diagonal_system_converges_to_reciprocals_on_a_single_rank() {
    let n = 8;
    let mut matrix = SparseMatrix::new_csr(n, n, 0).unwrap();
    for i in 0..n as i64 {
        matrix.set_element(i, i, (i + 1) as f64 / 10.0).unwrap();
    }

    let mut solver = ReferenceCgSolver::new(
        Box::new(SingleRankCommunicator::new()),
        Algorithm::cg_amg(),
        1e-12,
        1e-10,
    );
    solver.setup(&matrix).unwrap();
    solver.setup_vector_x(n, 0).unwrap();
    solver.setup_vector_b(n, 0).unwrap();
    solver.set_values_vector_b_scalar(0.1).unwrap();
    solver.set_values_matrix_a(&matrix).unwrap();

    let report = solver.solve().unwrap();
    assert_eq!(report.reason, cfdmesh::solver::ConvergenceReason::Converged);

    let x = solver.get_values_vector_x().unwrap();
    for i in 0..n {
        let expected = 1.0 / (i as f64 + 1.0);
        assert!((x[i] - expected).abs() < 1e-6, "x[{i}] = {}, expected {}", x[i], expected);
    }
}
