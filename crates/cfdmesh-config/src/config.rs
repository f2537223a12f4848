//! The JSON run-configuration document: benchmark identity, data
//! distribution, linear-solver profile, and the three file pairs a driver
//! reads its matrix/vectors from.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DataDistribution {
    Concurrent,
    Distributed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SolverAlgorithm {
    CommandLine,
    #[serde(rename = "CGAMG")]
    CgAmg,
}

/// Currently closed to a single variant on purpose: an unrecognised format
/// in the source document should fail deserialization, not silently pick a
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "HDF5")]
    Hdf5,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearSolverPetsc {
    #[serde(rename = "Algorithm")]
    pub algorithm: SolverAlgorithm,
    #[serde(rename = "eTol")]
    pub e_tol: f64,
    #[serde(rename = "rTol")]
    pub r_tol: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearSolver {
    #[serde(rename = "LinearSolverPETSc")]
    pub petsc: LinearSolverPetsc,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileRef {
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "FileFormat")]
    pub file_format: FileFormat,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SparseMatrixConfig {
    #[serde(rename = "SparseMatrixFile")]
    pub sparse_matrix_file: FileRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RhsVectorConfig {
    #[serde(rename = "VectorFile")]
    pub vector_file: FileRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolVectorConfig {
    #[serde(rename = "VectorFile")]
    pub vector_file: FileRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(rename = "BenchmarkName")]
    pub benchmark_name: String,
    #[serde(rename = "Repetitions")]
    pub repetitions: u32,
    #[serde(rename = "DataDistribution")]
    pub data_distribution: DataDistribution,
    #[serde(rename = "LinearSolver")]
    pub linear_solver: LinearSolver,
    #[serde(rename = "SparseMatrix")]
    pub sparse_matrix: SparseMatrixConfig,
    #[serde(rename = "RHSVector")]
    pub rhs_vector: RhsVectorConfig,
    #[serde(rename = "SolVector")]
    pub sol_vector: SolVectorConfig,
}

impl Config {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
        "BenchmarkName": "lid-driven-cavity",
        "Repetitions": 5,
        "DataDistribution": "Distributed",
        "LinearSolver": {
            "LinearSolverPETSc": { "Algorithm": "CGAMG", "eTol": 1e-8, "rTol": 1e-6 }
        },
        "SparseMatrix": {
            "SparseMatrixFile": { "FilePath": "a.h5", "FileFormat": "HDF5" }
        },
        "RHSVector": {
            "VectorFile": { "FilePath": "b.h5", "FileFormat": "HDF5" }
        },
        "SolVector": {
            "VectorFile": { "FilePath": "x.h5", "FileFormat": "HDF5" }
        }
    }
    "#;

    #[test]
    fn parses_the_documented_schema() {
        let config = Config::from_json(SAMPLE).unwrap();
        assert_eq!(config.benchmark_name, "lid-driven-cavity");
        assert_eq!(config.repetitions, 5);
        assert_eq!(config.data_distribution, DataDistribution::Distributed);
        assert_eq!(config.linear_solver.petsc.algorithm, SolverAlgorithm::CgAmg);
        assert_eq!(config.sparse_matrix.sparse_matrix_file.file_format, FileFormat::Hdf5);
    }

    #[test]
    fn rejects_an_unrecognised_file_format() {
        let bad = SAMPLE.replace("\"HDF5\"", "\"CSV\"");
        assert!(Config::from_json(&bad).is_err());
    }
}
