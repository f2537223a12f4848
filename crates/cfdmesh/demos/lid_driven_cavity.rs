//! Builds a small structured cube mesh, ingests it on a single rank, and
//! solves a diagonally-dominant placeholder pressure system against it with
//! the reference CG backend. Stands in for the PETSc-backed driver a real
//! lid-driven-cavity benchmark would run.

use cfdmesh::comm::SingleRankCommunicator;
use cfdmesh::common::Label;
use cfdmesh::mesh::ingest_mesh;
use cfdmesh::solver::{Algorithm, ReferenceCgSolver, SolverBridge};
use cfdmesh::sparse::{MatrixStorage, SparseMatrix};
use cfdmesh_testkit::StructuredGridSource;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = StructuredGridSource::unit_cube(4);
    let assigned: Vec<Label> = (0..4 * 4 * 4).map(Label).collect();
    let mesh = ingest_mesh(&source, &assigned, Box::new(SingleRankCommunicator::new()))?;
    let properties = mesh.properties();
    println!(
        "ingested {} cells, {} faces, {} vertices",
        properties.local_cells, properties.faces, properties.vertices
    );

    let n = properties.local_cells;
    let mut matrix = SparseMatrix::new_csr(n, n, 0)?;
    for i in 0..n as i64 {
        matrix.set_element(i, i, n as f64)?;
    }

    let mut solver = ReferenceCgSolver::new(
        Box::new(SingleRankCommunicator::new()),
        Algorithm::cg_amg(),
        1e-10,
        1e-8,
    );
    solver.setup(&matrix)?;
    solver.setup_vector_x(n, 0)?;
    solver.setup_vector_b(n, 0)?;
    solver.set_values_vector_b_scalar(1.0)?;
    solver.set_values_matrix_a(&matrix)?;

    let report = solver.solve()?;
    println!("solved in {} iterations, residual {:.3e}", report.iterations, report.residual);

    Ok(())
}
