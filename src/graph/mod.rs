//! Town graphs and the shortest-path engine.
//!
//! - [`TownGraph`] — capability trait every backend implements
//! - [`Graph`] — general adjacency list, dense or sparse Dijkstra per query
//! - [`Clique`] — dense complete-graph matrix
//! - [`Chain`] — towns along a line, prefix-sum distances
//! - [`generate`] — seeded random graphs

mod adjacency;
mod chain;
mod clique;
mod dijkstra;
mod edge;
mod error;
pub mod generate;
mod search;
mod town_graph;

pub use adjacency::Graph;
pub use chain::Chain;
pub use clique::Clique;
pub use dijkstra::{prefers_dense, shortest_path_tree, DijkstraStrategy};
pub use edge::{path_length, Edge};
pub use error::GraphError;
pub use search::ShortestPathTree;
pub use town_graph::TownGraph;
