//! The cell-connectivity graph used to discover ghost cells during
//! ingestion.
//!
//! The mesh consumes only the narrow [`ConnectivityGraph`] contract
//! (`finalize`/`local_nodes`/`ghost_nodes`/`global_id`); building the graph
//! (`add_node`/`add_neighbour`) is this crate's own business, kept off the
//! trait so the mesh never reaches past the contract it actually needs. No
//! reference into the graph escapes the mesh that owns it — callers get
//! owned label slices and numeric ids, never graph-internal handles.

use cfdmesh_common::{GraphError, Label};
use rustc_hash::{FxHashMap, FxHashSet};

/// The contract a finalized connectivity graph exposes to its owner.
pub trait ConnectivityGraph: std::fmt::Debug {
    fn is_finalized(&self) -> bool;

    /// Sorted labels of nodes owned by this rank.
    fn local_nodes(&self) -> Result<&[Label], GraphError>;

    /// Sorted labels of nodes owned elsewhere but adjacent to a local node.
    fn ghost_nodes(&self) -> Result<&[Label], GraphError>;

    /// The stable cross-rank id assigned to `label` at finalize time.
    fn global_id(&self, label: Label) -> Result<u64, GraphError>;
}

/// An adjacency-list connectivity graph over cell labels. Locally owned
/// nodes are registered explicitly; any label that shows up only as a
/// neighbour of a local node becomes a ghost once [`Self::finalize`] runs.
#[derive(Debug, Default)]
pub struct AdjacencyListGraph {
    local: FxHashSet<Label>,
    edges: FxHashMap<Label, Vec<Label>>,
    finalized: bool,
    local_nodes: Vec<Label>,
    ghost_nodes: Vec<Label>,
    global_ids: FxHashMap<Label, u64>,
}

impl AdjacencyListGraph {
    pub fn new() -> Self {
        AdjacencyListGraph::default()
    }

    /// Registers `label` as owned by this rank. Must be called before
    /// `finalize`; duplicate registration is a contract violation.
    pub fn add_node(&mut self, label: Label) -> Result<(), GraphError> {
        if self.finalized {
            return Err(GraphError::AlreadyFinalized);
        }
        if !self.local.insert(label) {
            return Err(GraphError::DuplicateNode(label.0));
        }
        self.edges.entry(label).or_default();
        Ok(())
    }

    /// Records that `cell` shares a face with `neighbour`. `neighbour` need
    /// not have been registered with `add_node` — if it wasn't, it becomes
    /// a ghost at finalize time.
    pub fn add_neighbour(&mut self, cell: Label, neighbour: Label) -> Result<(), GraphError> {
        if self.finalized {
            return Err(GraphError::AlreadyFinalized);
        }
        self.edges.entry(cell).or_default().push(neighbour);
        Ok(())
    }

    /// The locally registered node's recorded neighbours, local and ghost
    /// alike, sorted and deduplicated. Used by the mesh to rebuild
    /// cell-face adjacency after ingestion.
    pub fn neighbours_of(&self, cell: Label) -> Vec<Label> {
        let mut ns = self.edges.get(&cell).cloned().unwrap_or_default();
        ns.sort_unstable();
        ns.dedup();
        ns
    }
}

impl ConnectivityGraph for AdjacencyListGraph {
    fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn local_nodes(&self) -> Result<&[Label], GraphError> {
        if !self.finalized {
            return Err(GraphError::NotFinalized);
        }
        Ok(&self.local_nodes)
    }

    fn ghost_nodes(&self) -> Result<&[Label], GraphError> {
        if !self.finalized {
            return Err(GraphError::NotFinalized);
        }
        Ok(&self.ghost_nodes)
    }

    fn global_id(&self, label: Label) -> Result<u64, GraphError> {
        if !self.finalized {
            return Err(GraphError::NotFinalized);
        }
        self.global_ids
            .get(&label)
            .copied()
            .ok_or(GraphError::UnknownNode(label.0))
    }
}

impl AdjacencyListGraph {
    pub fn finalize(&mut self) -> Result<(), GraphError> {
        if self.finalized {
            return Err(GraphError::AlreadyFinalized);
        }
        let mut ghosts: Vec<Label> = self
            .edges
            .values()
            .flatten()
            .copied()
            .filter(|l| !self.local.contains(l))
            .collect();
        ghosts.sort_unstable();
        ghosts.dedup();

        let mut locals: Vec<Label> = self.local.iter().copied().collect();
        locals.sort_unstable();

        for (id, &label) in locals.iter().chain(ghosts.iter()).enumerate() {
            self.global_ids.insert(label, id as u64);
        }

        self.local_nodes = locals;
        self.ghost_nodes = ghosts;
        self.finalized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_discovers_ghosts() {
        let mut g = AdjacencyListGraph::new();
        g.add_node(Label(0)).unwrap();
        g.add_node(Label(1)).unwrap();
        g.add_neighbour(Label(0), Label(1)).unwrap();
        g.add_neighbour(Label(0), Label(2)).unwrap();
        g.add_neighbour(Label(1), Label(2)).unwrap();
        g.finalize().unwrap();

        assert_eq!(g.local_nodes().unwrap(), &[Label(0), Label(1)]);
        assert_eq!(g.ghost_nodes().unwrap(), &[Label(2)]);
        assert!(g.global_id(Label(2)).unwrap() >= 2);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut g = AdjacencyListGraph::new();
        g.add_node(Label(0)).unwrap();
        assert_eq!(g.add_node(Label(0)), Err(GraphError::DuplicateNode(0)));
    }

    #[test]
    fn queries_before_finalize_fail() {
        let g = AdjacencyListGraph::new();
        assert_eq!(g.local_nodes(), Err(GraphError::NotFinalized));
    }

    #[test]
    fn no_ghosts_when_all_neighbours_are_local() {
        let mut g = AdjacencyListGraph::new();
        g.add_node(Label(0)).unwrap();
        g.add_node(Label(1)).unwrap();
        g.add_neighbour(Label(0), Label(1)).unwrap();
        g.add_neighbour(Label(1), Label(0)).unwrap();
        g.finalize().unwrap();
        assert!(g.ghost_nodes().unwrap().is_empty());
    }
}
