//! Seeded random graph generators.
//!
//! Used to exercise the shortest-path engine on graphs ranging from sparse
//! to complete. All generators take the random source explicitly so runs
//! are reproducible.

use rand::Rng;

use super::{Chain, Edge, Graph, GraphError};

/// Symmetric random graph: each unordered pair of distinct towns is joined
/// with probability `density`, by two mirrored edges of the same length
/// drawn from `0..=max_length`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dispatch::graph::{generate, TownGraph};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let graph = generate::random_graph(10, 1.0, 20, &mut rng);
/// assert_eq!(graph.edges_count(), 45);
/// ```
pub fn random_graph<R: Rng + ?Sized>(
    size: usize,
    density: f64,
    max_length: u64,
    rng: &mut R,
) -> Graph {
    let density = density.clamp(0.0, 1.0);
    let mut connections = vec![Vec::new(); size];
    for i in 0..size {
        for j in (i + 1)..size {
            if rng.random_bool(density) {
                let length = rng.random_range(0..=max_length);
                connections[i].push(Edge::new(j, length));
                connections[j].push(Edge::new(i, length));
            }
        }
    }
    Graph::from_connections(connections)
}

/// Directed random graph: each ordered pair of distinct towns gets an edge
/// with probability `density`, lengths drawn independently.
pub fn random_digraph<R: Rng + ?Sized>(
    size: usize,
    density: f64,
    max_length: u64,
    rng: &mut R,
) -> Graph {
    let density = density.clamp(0.0, 1.0);
    let mut connections = vec![Vec::new(); size];
    for (i, edges) in connections.iter_mut().enumerate() {
        for j in (0..size).filter(|&j| j != i) {
            if rng.random_bool(density) {
                edges.push(Edge::new(j, rng.random_range(0..=max_length)));
            }
        }
    }
    Graph::from_connections(connections)
}

/// Chain of `size` towns with random edge lengths in `0..=max_length`.
///
/// Fails only when the drawn lengths sum past `u64::MAX`.
pub fn random_chain<R: Rng + ?Sized>(
    size: usize,
    max_length: u64,
    rng: &mut R,
) -> Result<Chain, GraphError> {
    if size == 0 {
        return Ok(Chain::default());
    }
    let lengths: Vec<u64> = (1..size).map(|_| rng.random_range(0..=max_length)).collect();
    Chain::from_lengths(&lengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TownGraph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_graph_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        let g = random_graph(12, 0.4, 9, &mut rng);
        for from in 0..g.size() {
            for edge in g.edges(from).expect("in range").iter() {
                assert_eq!(
                    g.edge_length(edge.to, from).expect("in range"),
                    Some(edge.length)
                );
                assert!(edge.length <= 9);
            }
        }
    }

    #[test]
    fn test_density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_graph(8, 0.0, 5, &mut rng).edges_count(), 0);
        assert_eq!(random_graph(8, 1.0, 5, &mut rng).edges_count(), 28);
        let d = random_digraph(5, 1.0, 5, &mut rng);
        assert!((0..5).all(|v| d.edges(v).expect("in range").len() == 4));
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = random_digraph(10, 0.3, 50, &mut StdRng::seed_from_u64(3));
        let b = random_digraph(10, 0.3, 50, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_chain() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(random_chain(0, 3, &mut rng).expect("valid chain").size(), 0);
        let c = random_chain(6, 3, &mut rng).expect("valid chain");
        assert_eq!(c.size(), 6);
        assert_eq!(c.edges_count(), 5);
    }
}
