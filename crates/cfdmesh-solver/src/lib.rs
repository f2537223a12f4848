//! The solver-bridge abstraction: a backend-agnostic contract for driving
//! an external iterative linear solver, plus a reference backend for
//! exercising it without that external dependency.

pub mod bridge;
pub mod reference;

pub use bridge::{Algorithm, ConvergenceReason, SolveReport, SolverBridge};
pub use reference::ReferenceCgSolver;
