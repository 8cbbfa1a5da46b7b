//! Capability trait shared by every graph backend.

use std::borrow::Cow;

use super::dijkstra::{self, DijkstraStrategy};
use super::search::{self, ShortestPathTree};
use super::{Edge, GraphError};

/// Read-only view of a weighted graph of towns `0..size()`.
///
/// Backends only have to describe their topology (`size`, `edges`,
/// `edges_count`); path queries come with default implementations built on
/// the crate's BFS and Dijkstra routines. Backends with cheaper structure
/// (a chain, a dense matrix) override the queries they can answer faster.
///
/// Every edge returned by `edges` must point at a town in `0..size()`.
/// The trait is object safe, so dispatch code can also run over
/// `&dyn TownGraph`.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::{Edge, Graph, TownGraph};
///
/// let graph = Graph::new(vec![
///     vec![Edge::new(1, 4), Edge::new(2, 1)],
///     vec![Edge::new(0, 4), Edge::new(2, 1)],
///     vec![Edge::new(0, 1), Edge::new(1, 1)],
/// ])
/// .unwrap();
///
/// assert_eq!(graph.size(), 3);
/// assert_eq!(graph.edges_count(), 3);
/// assert_eq!(graph.edge_length(0, 1).unwrap(), Some(4));
/// assert_eq!(graph.distance(0, 1).unwrap(), Some(2));
/// assert_eq!(graph.shortest_path(0, 1).unwrap(), vec![Edge::new(2, 1), Edge::new(1, 1)]);
/// assert_eq!(graph.any_path(0, 1).unwrap(), vec![Edge::new(1, 4)]);
/// ```
pub trait TownGraph {
    /// Number of towns.
    fn size(&self) -> usize;

    /// Outgoing edges of `from`, in the backend's canonical order.
    fn edges(&self, from: usize) -> Result<Cow<'_, [Edge]>, GraphError>;

    /// Number of edges, counting each direction-pair once.
    fn edges_count(&self) -> usize;

    /// Fails with [`GraphError::VertexOutOfRange`] unless `town < size()`.
    fn check_town(&self, town: usize) -> Result<(), GraphError> {
        if town < self.size() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: town,
                size: self.size(),
            })
        }
    }

    /// Length of the direct edge `from -> to`, or `None` if there is none.
    ///
    /// A zero-length edge is reported as `Some(0)`.
    fn edge_length(&self, from: usize, to: usize) -> Result<Option<u64>, GraphError> {
        self.check_town(to)?;
        Ok(self
            .edges(from)?
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.length))
    }

    /// Some path from `from` to `to`, found by breadth-first search.
    ///
    /// Ignores lengths. Empty if `from == to` or `to` is unreachable.
    fn any_path(&self, from: usize, to: usize) -> Result<Vec<Edge>, GraphError> {
        self.check_town(to)?;
        let ancestors = search::breadth_first(self, from)?;
        Ok(search::restore_path(&ancestors, to))
    }

    /// Shortest-path tree rooted at `from`.
    fn shortest_path_tree(&self, from: usize) -> Result<ShortestPathTree, GraphError> {
        dijkstra::shortest_path_tree(self, from, DijkstraStrategy::Auto)
    }

    /// Minimum-length path from `from` to `to`.
    ///
    /// Empty if `from == to` or `to` is unreachable.
    fn shortest_path(&self, from: usize, to: usize) -> Result<Vec<Edge>, GraphError> {
        self.check_town(to)?;
        Ok(self.shortest_path_tree(from)?.path_to(to))
    }

    /// Shortest paths from `from` to every town, indexed by destination.
    ///
    /// All paths are restored from a single traversal.
    fn shortest_paths(&self, from: usize) -> Result<Vec<Vec<Edge>>, GraphError> {
        Ok(self.shortest_path_tree(from)?.paths())
    }

    /// Length of the shortest path, or `None` if `to` is unreachable.
    fn distance(&self, from: usize, to: usize) -> Result<Option<u64>, GraphError> {
        self.check_town(to)?;
        Ok(self.shortest_path_tree(from)?.distance(to))
    }
}
