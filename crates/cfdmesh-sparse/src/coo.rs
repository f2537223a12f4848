//! Coordinate-format sparse matrix: three parallel sequences kept sorted by
//! `(row, col)`.

use cfdmesh_common::MatrixError;

use crate::matrix::MatrixStorage;

#[derive(Debug, Clone)]
pub struct CooMatrix {
    m: usize,
    n: usize,
    base_index: i64,
    rows: Vec<i64>,
    cols: Vec<i64>,
    vals: Vec<f64>,
}

impl CooMatrix {
    pub fn new(m: usize, n: usize, base_index: i64) -> Result<Self, MatrixError> {
        if m == 0 {
            return Err(MatrixError::InvalidRowSize(m as i64));
        }
        if n == 0 {
            return Err(MatrixError::InvalidColSize(n as i64));
        }
        Ok(CooMatrix {
            m,
            n,
            base_index,
            rows: Vec::new(),
            cols: Vec::new(),
            vals: Vec::new(),
        })
    }

    /// Binary search for `(row, col)` in the sorted parallel arrays.
    /// `Ok(i)` is an exact match at index `i`; `Err(i)` is the insertion
    /// point that keeps the arrays sorted.
    fn locate(&self, row: i64, col: i64) -> Result<usize, usize> {
        self.rows
            .iter()
            .zip(self.cols.iter())
            .map(|(&r, &c)| (r, c))
            .collect::<Vec<_>>()
            .binary_search(&(row, col))
    }
}

impl MatrixStorage for CooMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn base_index(&self) -> i64 {
        self.base_index
    }

    fn nnz(&self) -> usize {
        self.rows.len()
    }

    fn resize(&mut self, m: usize, n: usize) -> Result<(), MatrixError> {
        if m == 0 {
            return Err(MatrixError::InvalidRowSize(m as i64));
        }
        if n == 0 {
            return Err(MatrixError::InvalidColSize(n as i64));
        }
        self.m = m;
        self.n = n;
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.cols.clear();
        self.vals.clear();
    }

    fn set_element(&mut self, row: i64, col: i64, val: f64) -> Result<(), MatrixError> {
        self.bounds_check(row, col)?;
        match self.locate(row, col) {
            Ok(i) => self.vals[i] = val,
            Err(i) => {
                self.rows.insert(i, row);
                self.cols.insert(i, col);
                self.vals.insert(i, val);
            }
        }
        Ok(())
    }

    fn get_element(&self, row: i64, col: i64) -> Result<f64, MatrixError> {
        self.bounds_check(row, col)?;
        Ok(match self.locate(row, col) {
            Ok(i) => self.vals[i],
            Err(_) => 0.0,
        })
    }

    fn non_zero_row_indexes(&self) -> Vec<i64> {
        cfdmesh_common::distinct_array(&self.rows)
    }

    fn row_column_indexes(&self, row: i64) -> Result<Vec<i64>, MatrixError> {
        let cols: Vec<i64> = self
            .rows
            .iter()
            .zip(self.cols.iter())
            .filter(|(&r, _)| r == row)
            .map(|(_, &c)| c)
            .collect();
        if cols.is_empty() {
            return Err(MatrixError::EmptyRow(row));
        }
        Ok(cols)
    }

    fn row_values(&self, row: i64) -> Result<Vec<f64>, MatrixError> {
        let vals: Vec<f64> = self
            .rows
            .iter()
            .zip(self.vals.iter())
            .filter(|(&r, _)| r == row)
            .map(|(_, &v)| v)
            .collect();
        if vals.is_empty() {
            return Err(MatrixError::EmptyRow(row));
        }
        Ok(vals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_ordering_scenario() {
        let mut m = CooMatrix::new(4, 4, 0).unwrap();
        m.set_element(2, 1, 10.0).unwrap(); // A
        m.set_element(0, 3, 20.0).unwrap(); // B
        m.set_element(2, 1, 30.0).unwrap(); // C, overwrites A
        m.set_element(1, 0, 40.0).unwrap(); // D

        assert_eq!(m.nnz(), 3);
        assert_eq!(m.rows, vec![0, 1, 2]);
        assert_eq!(m.cols, vec![3, 0, 1]);
        assert_eq!(m.vals, vec![20.0, 40.0, 30.0]);
    }

    #[test]
    fn set_zero_still_creates_entry() {
        let mut m = CooMatrix::new(2, 2, 0).unwrap();
        m.set_element(0, 0, 0.0).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get_element(0, 0), Ok(0.0));
        assert_eq!(m.get_element(1, 1), Ok(0.0));
    }

    #[test]
    fn row_out_of_bounds() {
        let mut m = CooMatrix::new(4, 4, 0).unwrap();
        assert_eq!(
            m.set_element(-1, 0, 1.0),
            Err(MatrixError::RowOutOfBounds { row: -1, base: 0, rows: 4 })
        );
    }

    #[test]
    fn resize_clears_non_zero_rows() {
        let mut m = CooMatrix::new(4, 4, 0).unwrap();
        m.set_element(1, 1, 5.0).unwrap();
        m.resize(2, 2).unwrap();
        assert!(m.non_zero_row_indexes().is_empty());
        assert_eq!(m.shape(), (2, 2));
    }

    #[test]
    fn empty_row_query_fails() {
        let m = CooMatrix::new(2, 2, 0).unwrap();
        assert_eq!(m.row_column_indexes(0), Err(MatrixError::EmptyRow(0)));
    }
}
