//! The one abstraction every collective mesh/solver operation is built on
//! top of: one process per rank, no shared memory, collectives are
//! synchronous from the caller's point of view.
//!
//! A real deployment wires this to an MPI binding; this crate only defines
//! the contract and a loopback implementation for single-rank runs and
//! tests (see [`crate::SingleRankCommunicator`]). Swapping in an MPI-backed
//! implementation never touches mesh or solver code — they only depend on
//! this trait.

use std::fmt::Debug;

/// Collective and point-to-point operations available to every rank.
///
/// Every method here blocks until the collective completes; there is no
/// async variant; a multi-threaded-per-rank deployment (the `threaded`
/// feature on `cfdmesh-solver`) parallelises work *within* a rank and never
/// crosses this boundary concurrently.
pub trait Communicator: Debug + Send + Sync {
    /// This process's position in `0..size()`.
    fn rank(&self) -> usize;

    /// Total number of ranks in the communicator.
    fn size(&self) -> usize;

    /// Blocks until every rank has entered the barrier.
    fn barrier(&self);

    /// Every rank receives `root`'s value.
    fn broadcast_i64(&self, value: i64, root: usize) -> i64;

    /// Every rank receives `root`'s buffer, replacing its own.
    fn broadcast_f64_vec(&self, values: &[f64], root: usize) -> Vec<f64>;

    /// Every rank's `value`, ordered by rank.
    fn allgather_i64(&self, value: i64) -> Vec<i64>;

    /// Every rank's `values`, concatenated in rank order.
    fn allgather_i64_vec(&self, values: &[i64]) -> Vec<i64>;

    /// Sum of `value` across every rank, known to every rank.
    fn allreduce_sum_i64(&self, value: i64) -> i64;

    /// Sum of `value` across every rank, known to every rank.
    fn allreduce_sum_f64(&self, value: f64) -> f64;

    /// Blocking point-to-point send, tagged for matching on the receiver.
    fn send_i64_vec(&self, dest: usize, tag: i32, data: &[i64]);

    /// Blocking point-to-point receive matching `source`/`tag`.
    fn recv_i64_vec(&self, source: usize, tag: i32) -> Vec<i64>;
}
