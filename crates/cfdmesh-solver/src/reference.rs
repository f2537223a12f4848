//! A reference solver backend: Jacobi-preconditioned conjugate gradient.
//! Exists to exercise [`crate::SolverBridge`] end-to-end (the diagonal
//! 8x8 round-trip scenario in particular) without depending on an external
//! solver library. On a diagonal system a Jacobi preconditioner is exact,
//! so this degenerates correctly for that case; for genuinely
//! off-diagonal systems it is a plain PCG, not algebraic multigrid — the
//! real AMG hierarchy stays an external collaborator (see DESIGN.md).

use cfdmesh_comm::Communicator;
use cfdmesh_common::SolverError;
use cfdmesh_sparse::{CsrMatrix, MatrixStorage};

use crate::bridge::{Algorithm, ConvergenceReason, SolveReport, SolverBridge};

pub struct ReferenceCgSolver {
    comm: Box<dyn Communicator>,
    algorithm: Algorithm,
    e_tol: f64,
    r_tol: f64,
    row_base: i64,
    row_size: Option<usize>,
    x: Option<Vec<f64>>,
    b: Option<Vec<f64>>,
    matrix: Option<CsrMatrix>,
}

impl ReferenceCgSolver {
    pub fn new(comm: Box<dyn Communicator>, algorithm: Algorithm, e_tol: f64, r_tol: f64) -> Self {
        ReferenceCgSolver {
            comm,
            algorithm,
            e_tol,
            r_tol,
            row_base: 0,
            row_size: None,
            x: None,
            b: None,
            matrix: None,
        }
    }

    fn copy_into_csr(source: &dyn MatrixStorage) -> Result<CsrMatrix, SolverError> {
        let (m, n) = source.shape();
        let mut csr = CsrMatrix::new(m, n, source.base_index())
            .map_err(|e| SolverError::Backend(e.to_string()))?;
        for row in source.non_zero_row_indexes() {
            let cols = source
                .row_column_indexes(row)
                .map_err(|e| SolverError::Backend(e.to_string()))?;
            let vals = source
                .row_values(row)
                .map_err(|e| SolverError::Backend(e.to_string()))?;
            for (&col, &val) in cols.iter().zip(vals.iter()) {
                csr.set_element(row, col, val)
                    .map_err(|e| SolverError::Backend(e.to_string()))?;
            }
        }
        Ok(csr)
    }

    fn same_structure(a: &CsrMatrix, b: &dyn MatrixStorage) -> bool {
        if a.shape() != b.shape() || a.base_index() != b.base_index() {
            return false;
        }
        let rows = a.non_zero_row_indexes();
        if rows != b.non_zero_row_indexes() {
            return false;
        }
        rows.iter().all(|&row| {
            a.row_column_indexes(row).ok() == b.row_column_indexes(row).ok()
        })
    }

    fn dot(&self, a: &[f64], b: &[f64]) -> f64 {
        let local: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        self.comm.allreduce_sum_f64(local)
    }

    fn matvec(matrix: &CsrMatrix, base: i64, row_size: usize, v: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; row_size];
        for (i, slot) in out.iter_mut().enumerate() {
            let row = base + i as i64;
            let cols = matrix.row_column_indexes(row).unwrap_or_default();
            let vals = matrix.row_values(row).unwrap_or_default();
            *slot = cols
                .iter()
                .zip(vals.iter())
                .map(|(&c, &val)| val * v[(c - base) as usize])
                .sum();
        }
        out
    }
}

impl SolverBridge for ReferenceCgSolver {
    fn reset(&mut self) {
        self.reset_vector_x();
        self.reset_vector_b();
        self.reset_matrix_a();
    }

    fn reset_vector_x(&mut self) {
        self.x = None;
    }

    fn reset_vector_b(&mut self) {
        self.b = None;
    }

    fn reset_matrix_a(&mut self) {
        self.matrix = None;
        self.row_size = None;
    }

    fn setup_vector_x(&mut self, size: usize, base: i64) -> Result<(), SolverError> {
        self.row_base = base;
        self.x = Some(vec![0.0; size]);
        Ok(())
    }

    fn setup_vector_b(&mut self, size: usize, base: i64) -> Result<(), SolverError> {
        self.row_base = base;
        self.b = Some(vec![0.0; size]);
        Ok(())
    }

    fn setup_matrix_a(&mut self, source: &dyn MatrixStorage) -> Result<(), SolverError> {
        let csr = Self::copy_into_csr(source)?;
        self.row_base = csr.base_index();
        self.row_size = Some(csr.shape().0);
        self.matrix = Some(csr);
        Ok(())
    }

    fn setup(&mut self, source: &dyn MatrixStorage) -> Result<(), SolverError> {
        self.setup_matrix_a(source)
    }

    fn set_values_vector_x_scalar(&mut self, value: f64) -> Result<(), SolverError> {
        self.x.as_mut().ok_or(SolverError::VectorNotSetup("X"))?.fill(value);
        Ok(())
    }

    fn set_values_vector_b_scalar(&mut self, value: f64) -> Result<(), SolverError> {
        self.b.as_mut().ok_or(SolverError::VectorNotSetup("B"))?.fill(value);
        Ok(())
    }

    fn set_values_vector_x(
        &mut self,
        values: &[f64],
        indices: &[i64],
        base: i64,
    ) -> Result<(), SolverError> {
        let v = self.x.as_mut().ok_or(SolverError::VectorNotSetup("X"))?;
        for (&idx, &val) in indices.iter().zip(values.iter()) {
            let local = (idx - base) as usize;
            *v.get_mut(local).ok_or(SolverError::Backend(format!(
                "index {idx} out of range for vector X"
            )))? = val;
        }
        Ok(())
    }

    fn set_values_vector_b(
        &mut self,
        values: &[f64],
        indices: &[i64],
        base: i64,
    ) -> Result<(), SolverError> {
        let v = self.b.as_mut().ok_or(SolverError::VectorNotSetup("B"))?;
        for (&idx, &val) in indices.iter().zip(values.iter()) {
            let local = (idx - base) as usize;
            *v.get_mut(local).ok_or(SolverError::Backend(format!(
                "index {idx} out of range for vector B"
            )))? = val;
        }
        Ok(())
    }

    fn set_values_matrix_a(&mut self, source: &dyn MatrixStorage) -> Result<(), SolverError> {
        let current = self.matrix.as_ref().ok_or(SolverError::MatrixNotSetup)?;
        if !Self::same_structure(current, source) {
            return Err(SolverError::StructureMismatch);
        }
        self.matrix = Some(Self::copy_into_csr(source)?);
        Ok(())
    }

    fn get_values_vector_x(&self) -> Result<Vec<f64>, SolverError> {
        self.x.clone().ok_or(SolverError::VectorNotSetup("X"))
    }

    fn get_values_vector_b(&self) -> Result<Vec<f64>, SolverError> {
        self.b.clone().ok_or(SolverError::VectorNotSetup("B"))
    }

    fn get_values_vector_x_at(&self, indices: &[i64], base: i64) -> Result<Vec<f64>, SolverError> {
        let v = self.x.as_ref().ok_or(SolverError::VectorNotSetup("X"))?;
        indices
            .iter()
            .map(|&idx| {
                v.get((idx - base) as usize).copied().ok_or(SolverError::Backend(format!(
                    "index {idx} out of range for vector X"
                )))
            })
            .collect()
    }

    fn get_values_vector_b_at(&self, indices: &[i64], base: i64) -> Result<Vec<f64>, SolverError> {
        let v = self.b.as_ref().ok_or(SolverError::VectorNotSetup("B"))?;
        indices
            .iter()
            .map(|&idx| {
                v.get((idx - base) as usize).copied().ok_or(SolverError::Backend(format!(
                    "index {idx} out of range for vector B"
                )))
            })
            .collect()
    }

    fn get_values_matrix_a(&self, target: &mut dyn MatrixStorage) -> Result<(), SolverError> {
        let csr = self.matrix.as_ref().ok_or(SolverError::MatrixNotSetup)?;
        for row in csr.non_zero_row_indexes() {
            let cols = csr.row_column_indexes(row).map_err(|e| SolverError::Backend(e.to_string()))?;
            let vals = csr.row_values(row).map_err(|e| SolverError::Backend(e.to_string()))?;
            for (&col, &val) in cols.iter().zip(vals.iter()) {
                target
                    .set_element(row, col, val)
                    .map_err(|_| SolverError::StructureMismatch)?;
            }
        }
        Ok(())
    }

    fn clear_vector_x(&mut self) -> Result<(), SolverError> {
        self.x.as_mut().ok_or(SolverError::VectorNotSetup("X"))?.fill(0.0);
        Ok(())
    }

    fn clear_vector_b(&mut self) -> Result<(), SolverError> {
        self.b.as_mut().ok_or(SolverError::VectorNotSetup("B"))?.fill(0.0);
        Ok(())
    }

    fn clear_matrix_a(&mut self) -> Result<(), SolverError> {
        self.matrix.as_mut().ok_or(SolverError::MatrixNotSetup)?.clear();
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    fn solve(&mut self) -> Result<SolveReport, SolverError> {
        let row_size = self.row_size.ok_or(SolverError::UnsetRowSize)?;
        let base = self.row_base;
        let matrix = self.matrix.as_ref().ok_or(SolverError::MatrixNotSetup)?.clone();
        let b = self.b.clone().ok_or(SolverError::VectorNotSetup("B"))?;
        let mut x = self.x.clone().ok_or(SolverError::VectorNotSetup("X"))?;

        let diag: Vec<f64> = (0..row_size)
            .map(|i| matrix.get_element(base + i as i64, base + i as i64).unwrap_or(0.0))
            .collect();
        let precondition = |r: &[f64]| -> Vec<f64> {
            r.iter()
                .zip(diag.iter())
                .map(|(&ri, &di)| if di != 0.0 { ri / di } else { ri })
                .collect()
        };

        let mut r: Vec<f64> = {
            let ax = Self::matvec(&matrix, base, row_size, &x);
            b.iter().zip(ax.iter()).map(|(&bi, &axi)| bi - axi).collect()
        };
        let mut z = precondition(&r);
        let mut p = z.clone();
        let mut rz_old = self.dot(&r, &z);

        let b_norm = self.dot(&b, &b).sqrt();
        let tol = (self.r_tol * b_norm).max(self.e_tol);
        let max_iterations = match self.algorithm {
            Algorithm::CgAmg { .. } => (row_size as u32).max(1) * 50,
            Algorithm::CommandLine => (row_size as u32).max(1) * 50,
        };

        let mut iterations = 0u32;
        let mut residual_norm = self.dot(&r, &r).sqrt();
        let reason = loop {
            if residual_norm <= tol {
                break ConvergenceReason::Converged;
            }
            if iterations >= max_iterations {
                break ConvergenceReason::DivergedMaxIterations;
            }
            let ap = Self::matvec(&matrix, base, row_size, &p);
            let pap = self.dot(&p, &ap);
            if pap.abs() < f64::EPSILON {
                break ConvergenceReason::DivergedBreakdown;
            }
            let alpha = rz_old / pap;
            for i in 0..row_size {
                x[i] += alpha * p[i];
                r[i] -= alpha * ap[i];
            }
            z = precondition(&r);
            let rz_new = self.dot(&r, &z);
            let beta = rz_new / rz_old;
            for i in 0..row_size {
                p[i] = z[i] + beta * p[i];
            }
            rz_old = rz_new;
            residual_norm = self.dot(&r, &r).sqrt();
            iterations += 1;
        };

        self.x = Some(x);
        #[cfg(feature = "tracing")]
        tracing::info!(iterations, residual = residual_norm, ?reason, "solve converged");
        Ok(SolveReport { iterations, residual: residual_norm, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfdmesh_comm::SingleRankCommunicator;
    use cfdmesh_sparse::SparseMatrix;

    #[test]
    fn diagonal_system_converges_to_reciprocals() {
        let n = 8;
        let mut a = SparseMatrix::new_csr(n, n, 0).unwrap();
        for i in 0..n {
            a.set_element(i as i64, i as i64, (i as f64 + 1.0) / 10.0).unwrap();
        }

        let mut solver = ReferenceCgSolver::new(
            Box::new(SingleRankCommunicator::new()),
            Algorithm::cg_amg(),
            1e-10,
            1e-10,
        );
        solver.setup(&a).unwrap();
        solver.setup_vector_x(n, 0).unwrap();
        solver.setup_vector_b(n, 0).unwrap();
        solver.set_values_vector_b_scalar(0.1).unwrap();

        let report = solver.solve().unwrap();
        assert_eq!(report.reason, ConvergenceReason::Converged);

        let x = solver.get_values_vector_x().unwrap();
        for i in 0..n {
            let expected = 1.0 / (i as f64 + 1.0);
            assert!((x[i] - expected).abs() < 1e-6, "x[{i}] = {}, expected {expected}", x[i]);
        }
    }

    #[test]
    fn set_values_matrix_a_rejects_different_structure() {
        let mut a = SparseMatrix::new_csr(2, 2, 0).unwrap();
        a.set_element(0, 0, 1.0).unwrap();
        a.set_element(1, 1, 1.0).unwrap();

        let mut solver = ReferenceCgSolver::new(
            Box::new(SingleRankCommunicator::new()),
            Algorithm::cg_amg(),
            1e-8,
            1e-8,
        );
        solver.setup_matrix_a(&a).unwrap();

        let mut b = SparseMatrix::new_csr(2, 2, 0).unwrap();
        b.set_element(0, 1, 2.0).unwrap();
        let err = solver.set_values_matrix_a(&b).unwrap_err();
        assert_eq!(err, SolverError::StructureMismatch);
    }
}
