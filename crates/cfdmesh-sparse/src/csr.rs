//! Compressed sparse row storage: `row_ptr[i]..row_ptr[i+1]` slices
//! `col_idx`/`vals` into row `i`'s entries, each block kept sorted by column.

use cfdmesh_common::MatrixError;

use crate::matrix::MatrixStorage;

#[derive(Debug, Clone)]
pub struct CsrMatrix {
    m: usize,
    n: usize,
    base_index: i64,
    row_ptr: Vec<usize>,
    col_idx: Vec<i64>,
    vals: Vec<f64>,
}

impl CsrMatrix {
    pub fn new(m: usize, n: usize, base_index: i64) -> Result<Self, MatrixError> {
        if m == 0 {
            return Err(MatrixError::InvalidRowSize(m as i64));
        }
        if n == 0 {
            return Err(MatrixError::InvalidColSize(n as i64));
        }
        Ok(CsrMatrix {
            m,
            n,
            base_index,
            row_ptr: vec![0; m + 1],
            col_idx: Vec::new(),
            vals: Vec::new(),
        })
    }

    fn row_block(&self, row_idx: usize) -> std::ops::Range<usize> {
        self.row_ptr[row_idx]..self.row_ptr[row_idx + 1]
    }

    /// Locate `col` within row `row_idx`'s block. `Ok` is an exact match
    /// (absolute index into `col_idx`/`vals`); `Err` is the absolute
    /// insertion point that keeps the block sorted.
    fn locate(&self, row_idx: usize, col: i64) -> Result<usize, usize> {
        let block = self.row_block(row_idx);
        match self.col_idx[block.clone()].binary_search(&col) {
            Ok(i) => Ok(block.start + i),
            Err(i) => Err(block.start + i),
        }
    }
}

impl MatrixStorage for CsrMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn base_index(&self) -> i64 {
        self.base_index
    }

    fn nnz(&self) -> usize {
        self.col_idx.len()
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
        self.row_ptr = vec![0; m + 1];
        self.col_idx.clear();
        self.vals.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.row_ptr.iter_mut().for_each(|p| *p = 0);
        self.col_idx.clear();
        self.vals.clear();
    }

    fn set_element(&mut self, row: i64, col: i64, val: f64) -> Result<(), MatrixError> {
        self.bounds_check(row, col)?;
        let row_idx = (row - self.base_index) as usize;
        match self.locate(row_idx, col) {
            Ok(i) => self.vals[i] = val,
            Err(i) => {
                self.col_idx.insert(i, col);
                self.vals.insert(i, val);
                for p in self.row_ptr[row_idx + 1..].iter_mut() {
                    *p += 1;
                }
            }
        }
        Ok(())
    }

    fn get_element(&self, row: i64, col: i64) -> Result<f64, MatrixError> {
        self.bounds_check(row, col)?;
        let row_idx = (row - self.base_index) as usize;
        Ok(match self.locate(row_idx, col) {
            Ok(i) => self.vals[i],
            Err(_) => 0.0,
        })
    }

    fn non_zero_row_indexes(&self) -> Vec<i64> {
        (0..self.m)
            .filter(|&i| !self.row_block(i).is_empty())
            .map(|i| i as i64 + self.base_index)
            .collect()
    }

    fn row_column_indexes(&self, row: i64) -> Result<Vec<i64>, MatrixError> {
        self.bounds_check(row, self.base_index)?;
        let row_idx = (row - self.base_index) as usize;
        let block = self.row_block(row_idx);
        if block.is_empty() {
            return Err(MatrixError::EmptyRow(row));
        }
        Ok(self.col_idx[block].to_vec())
    }

    fn row_values(&self, row: i64) -> Result<Vec<f64>, MatrixError> {
        self.bounds_check(row, self.base_index)?;
        let row_idx = (row - self.base_index) as usize;
        let block = self.row_block(row_idx);
        if block.is_empty() {
            return Err(MatrixError::EmptyRow(row));
        }
        Ok(self.vals[block].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_ordering_scenario() {
        let mut m = CsrMatrix::new(4, 4, 0).unwrap();
        m.set_element(2, 1, 10.0).unwrap(); // A
        m.set_element(0, 3, 20.0).unwrap(); // B
        m.set_element(2, 1, 30.0).unwrap(); // C, overwrites A
        m.set_element(1, 0, 40.0).unwrap(); // D

        assert_eq!(m.nnz(), 3);
        assert_eq!(m.row_column_indexes(0).unwrap(), vec![3]);
        assert_eq!(m.row_column_indexes(1).unwrap(), vec![0]);
        assert_eq!(m.row_column_indexes(2).unwrap(), vec![1]);
        assert_eq!(m.get_element(2, 1), Ok(30.0));
    }

    #[test]
    fn set_zero_still_creates_entry() {
        let mut m = CsrMatrix::new(2, 2, 0).unwrap();
        m.set_element(0, 0, 0.0).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get_element(0, 0), Ok(0.0));
        assert_eq!(m.get_element(1, 1), Ok(0.0));
    }

    #[test]
    fn row_out_of_bounds() {
        let mut m = CsrMatrix::new(4, 4, 0).unwrap();
        assert_eq!(
            m.set_element(-1, 0, 1.0),
            Err(MatrixError::RowOutOfBounds { row: -1, base: 0, rows: 4 })
        );
    }

    #[test]
    fn resize_clears_non_zero_rows() {
        let mut m = CsrMatrix::new(4, 4, 0).unwrap();
        m.set_element(1, 1, 5.0).unwrap();
        m.resize(2, 2).unwrap();
        assert!(m.non_zero_row_indexes().is_empty());
        assert_eq!(m.shape(), (2, 2));
    }

    #[test]
    fn multi_column_row_stays_sorted() {
        let mut m = CsrMatrix::new(3, 5, 0).unwrap();
        m.set_element(1, 4, 1.0).unwrap();
        m.set_element(1, 0, 2.0).unwrap();
        m.set_element(1, 2, 3.0).unwrap();
        assert_eq!(m.row_column_indexes(1).unwrap(), vec![0, 2, 4]);
        assert_eq!(m.row_values(1).unwrap(), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn empty_row_query_fails() {
        let m = CsrMatrix::new(2, 2, 0).unwrap();
        assert_eq!(m.row_column_indexes(0), Err(MatrixError::EmptyRow(0)));
    }
}
