pub mod coo;
pub mod csr;
pub mod matrix;

pub use coo::CooMatrix;
pub use csr::CsrMatrix;
pub use matrix::{MatrixStorage, SparseMatrix};
