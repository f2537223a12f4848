//! The storage-format contract shared by [`crate::CooMatrix`] and
//! [`crate::CsrMatrix`], plus [`SparseMatrix`], the tagged variant over the
//! two that lets the solver bridge accept either without caring which.
//!
//! The source expresses this with CRTP so every getter/setter call site is
//! shared at zero virtual-call cost; the two storage layouts here are a
//! closed set, so the idiomatic Rust replacement is a tagged enum rather
//! than a trait object (see DESIGN.md).

use cfdmesh_common::MatrixError;

/// Operations common to every sparse-matrix storage layout. Implementors
/// keep entries sorted in row-major, column-secondary order; `nnz` always
/// equals the number of distinct stored `(row, col)` pairs.
pub trait MatrixStorage {
    /// `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    fn base_index(&self) -> i64;

    fn nnz(&self) -> usize;

    /// Drops all stored values and sets a new shape. `m` and `n` must both
    /// be at least 1.
    fn resize(&mut self, m: usize, n: usize) -> Result<(), MatrixError>;

    /// Drops all stored values, keeping the current shape.
    fn clear(&mut self);

    /// Overwrites the value at `(row, col)` if already stored, else inserts
    /// it (even if `val == 0.0` — zeroes are not auto-deleted).
    fn set_element(&mut self, row: i64, col: i64, val: f64) -> Result<(), MatrixError>;

    /// The value at `(row, col)`, or `0.0` if nothing is stored there — a
    /// stored zero and an absent entry are indistinguishable to the reader.
    fn get_element(&self, row: i64, col: i64) -> Result<f64, MatrixError>;

    /// Distinct, sorted row indexes with at least one stored entry.
    fn non_zero_row_indexes(&self) -> Vec<i64>;

    /// Sorted column indexes stored in `row`. Fails if `row` has no entries.
    fn row_column_indexes(&self, row: i64) -> Result<Vec<i64>, MatrixError>;

    /// Values stored in `row`, in the same order as [`row_column_indexes`].
    ///
    /// [`row_column_indexes`]: MatrixStorage::row_column_indexes
    fn row_values(&self, row: i64) -> Result<Vec<f64>, MatrixError>;

    fn bounds_check(&self, row: i64, col: i64) -> Result<(), MatrixError> {
        let (m, n) = self.shape();
        let base = self.base_index();
        if row < base || row >= base + m as i64 {
            return Err(MatrixError::RowOutOfBounds { row, base, rows: m });
        }
        if col < base || col >= base + n as i64 {
            return Err(MatrixError::ColOutOfBounds { col, base, cols: n });
        }
        Ok(())
    }
}

/// Tagged union over the two interchangeable sparse-matrix storage formats.
#[derive(Debug, Clone)]
pub enum SparseMatrix {
    Coo(crate::CooMatrix),
    Csr(crate::CsrMatrix),
}

impl SparseMatrix {
    pub fn new_coo(m: usize, n: usize, base_index: i64) -> Result<Self, MatrixError> {
        Ok(SparseMatrix::Coo(crate::CooMatrix::new(m, n, base_index)?))
    }

    pub fn new_csr(m: usize, n: usize, base_index: i64) -> Result<Self, MatrixError> {
        Ok(SparseMatrix::Csr(crate::CsrMatrix::new(m, n, base_index)?))
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        match $self {
            SparseMatrix::Coo(m) => m.$method($($arg),*),
            SparseMatrix::Csr(m) => m.$method($($arg),*),
        }
    };
}

impl MatrixStorage for SparseMatrix {
    fn shape(&self) -> (usize, usize) {
        dispatch!(self, shape)
    }

    fn base_index(&self) -> i64 {
        dispatch!(self, base_index)
    }

    fn nnz(&self) -> usize {
        dispatch!(self, nnz)
    }

    fn resize(&mut self, m: usize, n: usize) -> Result<(), MatrixError> {
        dispatch!(self, resize, m, n)
    }

    fn clear(&mut self) {
        dispatch!(self, clear)
    }

    fn set_element(&mut self, row: i64, col: i64, val: f64) -> Result<(), MatrixError> {
        dispatch!(self, set_element, row, col, val)
    }

    fn get_element(&self, row: i64, col: i64) -> Result<f64, MatrixError> {
        dispatch!(self, get_element, row, col)
    }

    fn non_zero_row_indexes(&self) -> Vec<i64> {
        dispatch!(self, non_zero_row_indexes)
    }

    fn row_column_indexes(&self, row: i64) -> Result<Vec<i64>, MatrixError> {
        dispatch!(self, row_column_indexes, row)
    }

    fn row_values(&self, row: i64) -> Result<Vec<f64>, MatrixError> {
        dispatch!(self, row_values, row)
    }
}
