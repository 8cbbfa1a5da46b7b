//! Dijkstra's algorithm in dense and sparse form.
//!
//! # Algorithm
//!
//! Both variants settle towns in order of increasing distance and relax
//! their outgoing edges. They differ only in how the next town is found:
//!
//! - **Dense**: linear scan over all unsettled towns, O(V²). No heap
//!   overhead, so it wins when almost every pair of towns is connected.
//! - **Sparse**: binary min-heap with lazy deletion, O(E log V).
//!
//! Both produce identical distances; when several shortest paths exist
//! the chosen predecessors may differ.
//!
//! Edge lengths are unsigned, so the non-negative weight requirement of
//! Dijkstra holds by construction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;
use serde::{Deserialize, Serialize};

use super::search::ShortestPathTree;
use super::{GraphError, TownGraph};

/// Which Dijkstra variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DijkstraStrategy {
    /// Pick per query from the graph's density.
    #[default]
    Auto,
    /// O(V²) scan.
    Dense,
    /// O(E log V) binary heap.
    Sparse,
}

impl DijkstraStrategy {
    /// Resolves `Auto` into a concrete variant for a graph of the given shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::graph::DijkstraStrategy;
    ///
    /// // 100 towns, complete graph: 4950 edges.
    /// assert_eq!(DijkstraStrategy::Auto.resolve(100, 4950), DijkstraStrategy::Dense);
    /// // 100 towns on a ring.
    /// assert_eq!(DijkstraStrategy::Auto.resolve(100, 100), DijkstraStrategy::Sparse);
    /// assert_eq!(DijkstraStrategy::Dense.resolve(100, 100), DijkstraStrategy::Dense);
    /// ```
    pub fn resolve(self, size: usize, edges_count: usize) -> DijkstraStrategy {
        match self {
            DijkstraStrategy::Auto if prefers_dense(size, edges_count) => DijkstraStrategy::Dense,
            DijkstraStrategy::Auto => DijkstraStrategy::Sparse,
            other => other,
        }
    }
}

/// Returns `true` when the graph is dense enough relative to `n log n`
/// that the O(n²) scan beats the heap.
///
/// Compares the heap cost `E · ln n` against the scan cost `n² + E`.
pub fn prefers_dense(size: usize, edges_count: usize) -> bool {
    if size < 2 {
        return false;
    }
    let n = size as f64;
    let e = edges_count as f64;
    e * n.ln() > n * n + e
}

/// Computes the shortest-path tree rooted at `from`.
pub fn shortest_path_tree<G: TownGraph + ?Sized>(
    graph: &G,
    from: usize,
    strategy: DijkstraStrategy,
) -> Result<ShortestPathTree, GraphError> {
    graph.check_town(from)?;
    let resolved = strategy.resolve(graph.size(), graph.edges_count());
    trace!("dijkstra from {from} over {} towns: {resolved:?}", graph.size());
    match resolved {
        DijkstraStrategy::Dense => dense(graph, from),
        _ => sparse(graph, from),
    }
}

fn dense<G: TownGraph + ?Sized>(graph: &G, from: usize) -> Result<ShortestPathTree, GraphError> {
    let n = graph.size();
    let mut tree = ShortestPathTree::rooted(from, n);
    let mut settled = vec![false; n];

    for _ in 0..n {
        // Closest unsettled town; ties go to the lower index.
        let next = (0..n)
            .filter(|&v| !settled[v])
            .filter_map(|v| tree.tentative(v).map(|d| (d, v)))
            .min();
        let Some((base, vertex)) = next else {
            break;
        };
        settled[vertex] = true;

        for edge in graph.edges(vertex)?.iter() {
            tree.relax(vertex, base, *edge);
        }
    }

    Ok(tree)
}

fn sparse<G: TownGraph + ?Sized>(graph: &G, from: usize) -> Result<ShortestPathTree, GraphError> {
    let n = graph.size();
    let mut tree = ShortestPathTree::rooted(from, n);
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((base, vertex))) = heap.pop() {
        // Skip stale heap entries.
        if tree.tentative(vertex).is_some_and(|best| base > best) {
            continue;
        }
        for edge in graph.edges(vertex)?.iter() {
            if tree.relax(vertex, base, *edge) {
                heap.push(Reverse((base.saturating_add(edge.length), edge.to)));
            }
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Graph};

    fn sample() -> Graph {
        Graph::new(vec![
            vec![Edge::new(4, 6)],
            vec![Edge::new(2, 3), Edge::new(4, 1)],
            vec![Edge::new(1, 3), Edge::new(3, 2)],
            vec![Edge::new(2, 2), Edge::new(4, 7)],
            vec![Edge::new(0, 6), Edge::new(1, 1), Edge::new(3, 7)],
        ])
        .expect("valid graph")
    }

    #[test]
    fn test_dense_and_sparse_agree() {
        let g = sample();
        for from in 0..g.size() {
            let d = dense(&g, from).expect("in range");
            let s = sparse(&g, from).expect("in range");
            assert_eq!(d.distances(), s.distances());
        }
    }

    #[test]
    fn test_known_distances() {
        let tree = shortest_path_tree(&sample(), 0, DijkstraStrategy::Auto).expect("in range");
        assert_eq!(
            tree.distances(),
            &[Some(0), Some(7), Some(10), Some(12), Some(6)]
        );
        assert_eq!(
            tree.path_to(3),
            vec![Edge::new(4, 6), Edge::new(1, 1), Edge::new(2, 3), Edge::new(3, 2)]
        );
    }

    #[test]
    fn test_unreachable() {
        let g = Graph::new(vec![vec![Edge::new(1, 1)], vec![], vec![]]).expect("valid graph");
        for strategy in [DijkstraStrategy::Dense, DijkstraStrategy::Sparse] {
            let tree = shortest_path_tree(&g, 0, strategy).expect("in range");
            assert_eq!(tree.distances(), &[Some(0), Some(1), None]);
            assert!(tree.path_to(2).is_empty());
        }
    }

    #[test]
    fn test_zero_length_edges() {
        let g = Graph::new(vec![
            vec![Edge::new(1, 0), Edge::new(2, 5)],
            vec![Edge::new(2, 0)],
            vec![],
        ])
        .expect("valid graph");
        for strategy in [DijkstraStrategy::Dense, DijkstraStrategy::Sparse] {
            let tree = shortest_path_tree(&g, 0, strategy).expect("in range");
            assert_eq!(tree.distance(2), Some(0));
            assert_eq!(tree.path_to(2).len(), 2);
        }
    }

    #[test]
    fn test_out_of_range_source() {
        assert!(matches!(
            shortest_path_tree(&sample(), 5, DijkstraStrategy::Sparse),
            Err(GraphError::VertexOutOfRange { vertex: 5, size: 5 })
        ));
    }

    #[test]
    fn test_prefers_dense() {
        assert!(!prefers_dense(0, 0));
        assert!(!prefers_dense(1, 0));
        assert!(!prefers_dense(4, 6));
        assert!(prefers_dense(100, 4950));
        assert!(!prefers_dense(100, 99));
    }
}
