//! # u-dispatch
//!
//! Shortest paths over a weighted graph of towns, and dispatch of goods
//! and vehicles between those towns.
//!
//! ## Modules
//!
//! - [`graph`] — Graph backends (adjacency list, clique, chain), BFS and dense/sparse Dijkstra
//! - [`traffic`] — Inventories, nearest-vehicle allocation, one-way and round-trip transport
//!
//! ## Example
//!
//! ```
//! use u_dispatch::graph::{Graph, TownGraph};
//! use u_dispatch::traffic::TrafficManager;
//!
//! let graph = Graph::try_from(vec![
//!     vec![(1, 3)],
//!     vec![(0, 3), (2, 4)],
//!     vec![(1, 4)],
//! ])
//! .unwrap();
//! assert_eq!(graph.distance(0, 2).unwrap(), Some(7));
//!
//! let mut tm = TrafficManager::new(&graph, vec![10, 0, 0], vec![0, 0, 2], 5).unwrap();
//! // Both vehicles drive 2 -> 0 (7), then carry the goods 0 -> 2 (7).
//! assert_eq!(tm.transport(0, 2, 10).unwrap(), 14);
//! assert_eq!(tm.goods(), &[0, 0, 10]);
//! ```

pub mod graph;
pub mod traffic;
