pub mod adjacency;

pub use adjacency::{AdjacencyListGraph, ConnectivityGraph};
