//! Small newtypes distinguishing externally supplied labels from locally
//! assigned indices, so the two can never be mixed up at a call site.

use std::fmt;

/// An externally supplied, globally unique identifier for an entity, as used
/// at ingestion time. Stable across ranks and across the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(pub i64);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label(v)
    }
}

/// A zero-based, contiguous, per-rank identifier used for array indexing.
/// Stable only after `finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalId(pub usize);

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for LocalId {
    fn from(v: usize) -> Self {
        LocalId(v)
    }
}

impl LocalId {
    pub fn index(self) -> usize {
        self.0
    }
}
