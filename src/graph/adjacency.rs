//! General adjacency-list graph.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::dijkstra::{self, DijkstraStrategy};
use super::search::ShortestPathTree;
use super::{Edge, GraphError, TownGraph};

/// Immutable weighted graph stored as one outgoing edge list per town.
///
/// Direction and weight may be asymmetric. Shortest paths use the dense or
/// sparse Dijkstra variant according to [`DijkstraStrategy`].
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::{Edge, Graph, TownGraph};
///
/// let graph = Graph::complete(4);
/// assert_eq!(graph.size(), 4);
/// assert_eq!(graph.edges_count(), 6);
/// assert_eq!(
///     graph.edges(0).unwrap().as_ref(),
///     &[Edge::new(1, 1), Edge::new(2, 1), Edge::new(3, 1)]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    connections: Vec<Vec<Edge>>,
    #[serde(default)]
    strategy: DijkstraStrategy,
}

#[derive(Deserialize)]
struct RawGraph {
    connections: Vec<Vec<Edge>>,
    #[serde(default)]
    strategy: DijkstraStrategy,
}

impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        Ok(Graph::new(raw.connections)?.with_strategy(raw.strategy))
    }
}

impl Graph {
    /// Creates a graph from per-town outgoing edge lists.
    ///
    /// Fails if any edge points outside `0..connections.len()`.
    pub fn new(connections: Vec<Vec<Edge>>) -> Result<Self, GraphError> {
        let size = connections.len();
        if let Some(edge) = connections.iter().flatten().find(|e| e.to >= size) {
            return Err(GraphError::VertexOutOfRange {
                vertex: edge.to,
                size,
            });
        }
        Ok(Self::from_connections(connections))
    }

    /// Wraps already validated edge lists.
    pub(crate) fn from_connections(connections: Vec<Vec<Edge>>) -> Self {
        Self {
            connections,
            strategy: DijkstraStrategy::Auto,
        }
    }

    /// Complete graph over `n` towns with unit-length edges.
    pub fn complete(n: usize) -> Self {
        let connections = (0..n)
            .map(|i| (0..n).filter(|&j| j != i).map(|j| Edge::new(j, 1)).collect())
            .collect();
        Self::from_connections(connections)
    }

    /// Builds the reverse of `graph`: every edge `u -> v` becomes `v -> u`
    /// with the same length.
    ///
    /// A shortest-path tree of the reverse graph rooted at `t` holds the
    /// distance from every town *to* `t` in the original.
    ///
    /// ```
    /// use u_dispatch::graph::{Edge, Graph, TownGraph};
    ///
    /// let one_way = Graph::new(vec![vec![], vec![Edge::new(0, 3)]]).unwrap();
    /// let reverse = Graph::transposed(&one_way).unwrap();
    /// assert_eq!(reverse.edges(0).unwrap().as_ref(), &[Edge::new(1, 3)]);
    /// assert_eq!(reverse.shortest_path_tree(0).unwrap().distance(1), Some(3));
    /// ```
    pub fn transposed<G: TownGraph + ?Sized>(graph: &G) -> Result<Self, GraphError> {
        let mut connections = vec![Vec::new(); graph.size()];
        for from in 0..graph.size() {
            for edge in graph.edges(from)?.iter() {
                connections[edge.to].push(Edge::new(from, edge.length));
            }
        }
        Ok(Self::from_connections(connections))
    }

    /// Forces a Dijkstra variant instead of choosing one per query.
    pub fn with_strategy(mut self, strategy: DijkstraStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Dijkstra variant used for shortest-path queries.
    pub fn strategy(&self) -> DijkstraStrategy {
        self.strategy
    }

    /// Outgoing edge lists of every town.
    pub fn connections(&self) -> &[Vec<Edge>] {
        &self.connections
    }
}

/// Builds a graph from signed `(to, length)` pairs, rejecting negative
/// lengths.
///
/// ```
/// use u_dispatch::graph::{Graph, GraphError};
///
/// let ok = Graph::try_from(vec![vec![(1, 3)], vec![(0, 3)]]);
/// assert!(ok.is_ok());
///
/// let bad = Graph::try_from(vec![vec![(1, -3)], vec![]]);
/// assert_eq!(bad, Err(GraphError::NegativeLength { from: 0, to: 1, length: -3 }));
/// ```
impl TryFrom<Vec<Vec<(usize, i64)>>> for Graph {
    type Error = GraphError;

    fn try_from(list: Vec<Vec<(usize, i64)>>) -> Result<Self, Self::Error> {
        let mut connections = Vec::with_capacity(list.len());
        for (from, edges) in list.into_iter().enumerate() {
            let mut out = Vec::with_capacity(edges.len());
            for (to, length) in edges {
                let length = u64::try_from(length)
                    .map_err(|_| GraphError::NegativeLength { from, to, length })?;
                out.push(Edge::new(to, length));
            }
            connections.push(out);
        }
        Graph::new(connections)
    }
}

impl TownGraph for Graph {
    fn size(&self) -> usize {
        self.connections.len()
    }

    fn edges(&self, from: usize) -> Result<Cow<'_, [Edge]>, GraphError> {
        self.check_town(from)?;
        Ok(Cow::Borrowed(&self.connections[from]))
    }

    fn edges_count(&self) -> usize {
        self.connections.iter().map(Vec::len).sum::<usize>() / 2
    }

    fn shortest_path_tree(&self, from: usize) -> Result<ShortestPathTree, GraphError> {
        dijkstra::shortest_path_tree(self, from, self.strategy)
    }
}
