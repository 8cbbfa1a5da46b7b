//! Weighted edge type and path helpers.

use serde::{Deserialize, Serialize};

/// A directed, weighted connection owned by its source town.
///
/// The source is implicit: an edge lives in the outgoing list of the town
/// it leaves, so only the destination and the length are stored.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::Edge;
///
/// let e = Edge::new(3, 7);
/// assert_eq!(e.to, 3);
/// assert_eq!(e.length, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Destination town.
    pub to: usize,
    /// Travel cost (and travel time) along this edge.
    pub length: u64,
}

impl Edge {
    /// Creates an edge to `to` with the given length.
    pub fn new(to: usize, length: u64) -> Self {
        Self { to, length }
    }
}

/// Total length of a path given as a sequence of edges.
///
/// An empty path has length zero.
pub fn path_length(path: &[Edge]) -> u64 {
    path.iter().map(|e| e.length).sum()
}
