//! The abstract contract an external iterative linear solver backend must
//! satisfy. The backend itself (PETSc or equivalent) is an external
//! collaborator; only this trait and a reference implementation sufficient
//! to exercise it live here.

use cfdmesh_sparse::MatrixStorage;

use cfdmesh_common::SolverError;

/// One of the two preconfigured algorithmic profiles a backend may run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    /// Read solver options from the host environment (the backend's own
    /// command-line-style configuration), rather than a profile fixed here.
    CommandLine,
    /// Conjugate gradient preconditioned by algebraic multigrid, with a
    /// smoothing count of 1 and an AMG strength threshold of 0.02.
    CgAmg { smoothing_steps: u32, amg_threshold: f64 },
}

impl Algorithm {
    pub fn cg_amg() -> Self {
        Algorithm::CgAmg { smoothing_steps: 1, amg_threshold: 0.02 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceReason {
    Converged,
    DivergedMaxIterations,
    DivergedBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    pub iterations: u32,
    pub residual: f64,
    pub reason: ConvergenceReason,
}

/// The fourteen-odd operations a solver backend exposes: reset, vector/matrix
/// lifecycle, value access, and `solve` itself. `solve` is collective: every
/// rank sharing the backend's communicator must call it together.
pub trait SolverBridge {
    fn reset(&mut self);
    fn reset_vector_x(&mut self);
    fn reset_vector_b(&mut self);
    fn reset_matrix_a(&mut self);

    fn setup_vector_x(&mut self, size: usize, base: i64) -> Result<(), SolverError>;
    fn setup_vector_b(&mut self, size: usize, base: i64) -> Result<(), SolverError>;

    /// Fixes the non-zero structure every subsequent `set_values_matrix_a`
    /// call must match.
    fn setup_matrix_a(&mut self, source: &dyn MatrixStorage) -> Result<(), SolverError>;

    /// `setup_matrix_a` plus whatever internal preconditioner state the
    /// chosen [`Algorithm`] needs (e.g. the AMG hierarchy).
    fn setup(&mut self, source: &dyn MatrixStorage) -> Result<(), SolverError>;

    fn set_values_vector_x_scalar(&mut self, value: f64) -> Result<(), SolverError>;
    fn set_values_vector_b_scalar(&mut self, value: f64) -> Result<(), SolverError>;

    fn set_values_vector_x(
        &mut self,
        values: &[f64],
        indices: &[i64],
        base: i64,
    ) -> Result<(), SolverError>;
    fn set_values_vector_b(
        &mut self,
        values: &[f64],
        indices: &[i64],
        base: i64,
    ) -> Result<(), SolverError>;

    /// Must use the exact non-zero structure fixed by `setup`/`setup_matrix_a`.
    fn set_values_matrix_a(&mut self, source: &dyn MatrixStorage) -> Result<(), SolverError>;

    fn get_values_vector_x(&self) -> Result<Vec<f64>, SolverError>;
    fn get_values_vector_b(&self) -> Result<Vec<f64>, SolverError>;
    fn get_values_vector_x_at(&self, indices: &[i64], base: i64) -> Result<Vec<f64>, SolverError>;
    fn get_values_vector_b_at(&self, indices: &[i64], base: i64) -> Result<Vec<f64>, SolverError>;

    /// Writes the solver's matrix state into `target`, which must already
    /// have the fixed non-zero structure.
    fn get_values_matrix_a(&self, target: &mut dyn MatrixStorage) -> Result<(), SolverError>;

    fn clear_vector_x(&mut self) -> Result<(), SolverError>;
    fn clear_vector_b(&mut self) -> Result<(), SolverError>;
    fn clear_matrix_a(&mut self) -> Result<(), SolverError>;

    /// Collective: reads A and B, writes X, and records a convergence
    /// reason.
    fn solve(&mut self) -> Result<SolveReport, SolverError>;
}
