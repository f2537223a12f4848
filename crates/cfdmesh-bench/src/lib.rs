//! Scenario and timing contracts shared by `cfdmesh` benchmark suites: a
//! named, repeated scenario and a per-block stopwatch, in the shape the
//! solver-bridge driver benchmark originally used.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use cfdmesh_common::SolverError;
use cfdmesh_config::Config;
use cfdmesh_solver::SolverBridge;
use cfdmesh_sparse::MatrixStorage;

/// A named, repeated unit of work, mirroring the `BenchmarkName` /
/// `Repetitions` fields of the run-configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkScenario {
    pub name: String,
    pub repetitions: u32,
}

impl BenchmarkScenario {
    pub fn new(name: impl Into<String>, repetitions: u32) -> Self {
        BenchmarkScenario { name: name.into(), repetitions }
    }

    /// Builds a scenario from the benchmark identity fields of a run
    /// configuration, ignoring the linear-solver and file-source sections.
    pub fn from_config(config: &Config) -> Self {
        BenchmarkScenario::new(config.benchmark_name.clone(), config.repetitions)
    }
}

/// Accumulates wall-clock time per named block across repetitions, the way
/// the original linear-solver benchmark timed `ClearMatrixA`, `SetValuesVectorB`,
/// `Solve`, and so on as separate tracked blocks within one repeated scenario.
#[derive(Debug, Default)]
pub struct BlockTimer {
    totals: BTreeMap<String, Duration>,
    counts: BTreeMap<String, u32>,
}

impl BlockTimer {
    pub fn new() -> Self {
        BlockTimer::default()
    }

    /// Times `block` and records its duration under `name`.
    pub fn time_block<T>(&mut self, name: &str, block: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = block();
        let elapsed = start.elapsed();
        *self.totals.entry(name.to_string()).or_insert(Duration::ZERO) += elapsed;
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
        result
    }

    /// Mean duration of `name` across all recorded calls.
    pub fn mean(&self, name: &str) -> Option<Duration> {
        let total = *self.totals.get(name)?;
        let count = *self.counts.get(name)?;
        (count > 0).then(|| total / count)
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }
}

/// Repeatedly clears and re-populates a solver's matrix and vectors from a
/// fixed source and runs `solve`, timing each block. This is the hot loop a
/// linear-solver benchmark scenario drives: the setup cost is paid once,
/// then the measured repetitions only touch `clear*`/`set_values*`/`solve`.
pub fn run_linear_solver_benchmark(
    solver: &mut dyn SolverBridge,
    matrix: &dyn MatrixStorage,
    rhs: &[f64],
    initial_x: &[f64],
    scenario: &BenchmarkScenario,
) -> Result<BlockTimer, SolverError> {
    let mut timer = BlockTimer::new();
    let row_indexes = matrix.non_zero_row_indexes();

    for _ in 0..scenario.repetitions {
        timer.time_block("ClearMatrixA", || solver.clear_matrix_a())?;
        timer.time_block("ClearVectorX", || solver.clear_vector_x())?;
        timer.time_block("ClearVectorB", || solver.clear_vector_b())?;
        timer.time_block("SetValuesVectorB", || {
            solver.set_values_vector_b(rhs, &row_indexes, matrix.base_index())
        })?;
        timer.time_block("SetValuesVectorX", || {
            solver.set_values_vector_x(initial_x, &row_indexes, matrix.base_index())
        })?;
        timer.time_block("SetValuesMatrixA", || solver.set_values_matrix_a(matrix))?;
        timer.time_block("Solve", || solver.solve().map(|_| ()))?;
    }

    Ok(timer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn block_timer_accumulates_across_repeated_calls() {
        let mut timer = BlockTimer::new();
        for _ in 0..3 {
            timer.time_block("work", || sleep(Duration::from_millis(1)));
        }
        assert!(timer.mean("work").unwrap() >= Duration::from_millis(1));
        assert!(timer.mean("missing").is_none());
    }

    #[test]
    fn scenario_from_config_reads_name_and_repetitions() {
        let json = r#"
        {
            "BenchmarkName": "lid-driven-cavity",
            "Repetitions": 10,
            "DataDistribution": "Concurrent",
            "LinearSolver": {
                "LinearSolverPETSc": { "Algorithm": "CommandLine", "eTol": 1e-8, "rTol": 1e-6 }
            },
            "SparseMatrix": { "SparseMatrixFile": { "FilePath": "a.h5", "FileFormat": "HDF5" } },
            "RHSVector": { "VectorFile": { "FilePath": "b.h5", "FileFormat": "HDF5" } },
            "SolVector": { "VectorFile": { "FilePath": "x.h5", "FileFormat": "HDF5" } }
        }
        "#;
        let config = Config::from_json(json).unwrap();
        let scenario = BenchmarkScenario::from_config(&config);
        assert_eq!(scenario.name, "lid-driven-cavity");
        assert_eq!(scenario.repetitions, 10);
    }
}
