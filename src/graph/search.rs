//! Breadth-first search and back-pointer path restoration.
//!
//! Search results are stored as arrays indexed by town id: for every
//! reached town the edge that entered it and the town it came from.

use std::collections::VecDeque;

use super::{Edge, GraphError, TownGraph};

/// Back-pointers per town: `(entering edge, predecessor)`.
pub(crate) type Ancestors = Vec<Option<(Edge, usize)>>;

/// Result of a single-source shortest-path computation.
///
/// Holds the distance to every town and the back-pointer structure needed
/// to restore any path without running the search again.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::{Edge, Graph, TownGraph};
///
/// let graph = Graph::new(vec![
///     vec![Edge::new(1, 2)],
///     vec![Edge::new(2, 3)],
///     vec![],
/// ])
/// .unwrap();
/// let tree = graph.shortest_path_tree(0).unwrap();
/// assert_eq!(tree.distance(2), Some(5));
/// assert_eq!(tree.predecessor(2), Some((Edge::new(2, 3), 1)));
///
/// let back = graph.shortest_path_tree(2).unwrap();
/// assert_eq!(back.distance(0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    source: usize,
    dist: Vec<Option<u64>>,
    ancestors: Ancestors,
}

impl ShortestPathTree {
    /// An empty tree over `size` towns where only `source` is reached.
    pub(crate) fn rooted(source: usize, size: usize) -> Self {
        let mut dist = vec![None; size];
        dist[source] = Some(0);
        Self {
            source,
            dist,
            ancestors: vec![None; size],
        }
    }

    /// Builds a tree from precomputed parts.
    pub(crate) fn from_parts(source: usize, dist: Vec<Option<u64>>, ancestors: Ancestors) -> Self {
        debug_assert_eq!(dist.len(), ancestors.len());
        Self {
            source,
            dist,
            ancestors,
        }
    }

    /// Tentative distance to `town`, used by the Dijkstra loops.
    pub(crate) fn tentative(&self, town: usize) -> Option<u64> {
        self.dist[town]
    }

    /// Relaxes `edge` leaving `vertex`, whose settled distance is `base`.
    ///
    /// Returns `true` if the edge improved its destination.
    pub(crate) fn relax(&mut self, vertex: usize, base: u64, edge: Edge) -> bool {
        let candidate = base.saturating_add(edge.length);
        match self.dist[edge.to] {
            Some(current) if current <= candidate => false,
            _ => {
                self.dist[edge.to] = Some(candidate);
                self.ancestors[edge.to] = Some((edge, vertex));
                true
            }
        }
    }

    /// Town the tree is rooted at.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of towns covered by the tree.
    pub fn size(&self) -> usize {
        self.dist.len()
    }

    /// Shortest distance from the source, `None` if unreachable.
    pub fn distance(&self, to: usize) -> Option<u64> {
        self.dist.get(to).copied().flatten()
    }

    /// Distances to every town, indexed by town.
    pub fn distances(&self) -> &[Option<u64>] {
        &self.dist
    }

    /// Returns `true` if `to` can be reached from the source.
    pub fn is_reachable(&self, to: usize) -> bool {
        self.distance(to).is_some()
    }

    /// The edge entering `to` on its shortest path and the town it leaves.
    pub fn predecessor(&self, to: usize) -> Option<(Edge, usize)> {
        self.ancestors.get(to).copied().flatten()
    }

    /// Shortest path from the source to `to`; empty if unreachable.
    pub fn path_to(&self, to: usize) -> Vec<Edge> {
        restore_path(&self.ancestors, to)
    }

    /// Shortest paths to every town, indexed by destination.
    pub fn paths(&self) -> Vec<Vec<Edge>> {
        (0..self.size()).map(|to| self.path_to(to)).collect()
    }
}

/// Walks back-pointers from `to` to the root and returns the path in
/// forward order.
pub(crate) fn restore_path(ancestors: &[Option<(Edge, usize)>], to: usize) -> Vec<Edge> {
    let mut path = Vec::new();
    let mut current = to;
    while let Some(&Some((edge, prev))) = ancestors.get(current) {
        path.push(edge);
        current = prev;
    }
    path.reverse();
    path
}

/// Breadth-first search from `from`, ignoring edge lengths.
pub(crate) fn breadth_first<G: TownGraph + ?Sized>(
    graph: &G,
    from: usize,
) -> Result<Ancestors, GraphError> {
    graph.check_town(from)?;

    let n = graph.size();
    let mut seen = vec![false; n];
    let mut ancestors: Ancestors = vec![None; n];
    let mut queue = VecDeque::from([from]);
    seen[from] = true;

    while let Some(vertex) = queue.pop_front() {
        for edge in graph.edges(vertex)?.iter() {
            if !seen[edge.to] {
                seen[edge.to] = true;
                ancestors[edge.to] = Some((*edge, vertex));
                queue.push_back(edge.to);
            }
        }
    }

    Ok(ancestors)
}
