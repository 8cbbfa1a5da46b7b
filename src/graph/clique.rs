//! Dense complete-graph backend.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::dijkstra::{self, DijkstraStrategy};
use super::search::ShortestPathTree;
use super::{Edge, GraphError, TownGraph};

/// A complete graph stored as a dense n×n length matrix in row-major order.
///
/// Every ordered pair of distinct towns is connected. O(n²) space, O(1)
/// edge lookup. The diagonal is unused.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::{Clique, TownGraph};
///
/// let clique = Clique::from_matrix(vec![
///     vec![0, 5, 1],
///     vec![5, 0, 1],
///     vec![1, 1, 0],
/// ])
/// .unwrap();
/// assert_eq!(clique.get(0, 1), 5);
/// assert_eq!(clique.size(), 3);
/// assert_eq!(clique.edges_count(), 3);
/// assert_eq!(clique.distance(0, 1).unwrap(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClique")]
pub struct Clique {
    data: Vec<u64>,
    size: usize,
}

#[derive(Deserialize)]
struct RawClique {
    data: Vec<u64>,
    size: usize,
}

impl TryFrom<RawClique> for Clique {
    type Error = GraphError;

    fn try_from(raw: RawClique) -> Result<Self, Self::Error> {
        Clique::from_data(raw.size, raw.data)
    }
}

impl Clique {
    /// Complete graph over `size` towns with unit-length edges.
    pub fn new(size: usize) -> Self {
        let mut data = vec![1; size * size];
        for i in 0..size {
            data[i * size + i] = 0;
        }
        Self { data, size }
    }

    /// Creates a clique from an explicit row-major n×n grid.
    ///
    /// Fails if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<u64>) -> Result<Self, GraphError> {
        let expected = size.checked_mul(size).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(GraphError::MatrixShape {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a clique from a square matrix of rows.
    pub fn from_matrix(rows: Vec<Vec<u64>>) -> Result<Self, GraphError> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(GraphError::MatrixShape {
                expected: size,
                actual: row.len(),
            });
        }
        Self::from_data(size, rows.into_iter().flatten().collect())
    }

    /// Creates a clique from per-town edge lists.
    ///
    /// Every town must list exactly one edge to each other town.
    pub fn from_adjacency(list: &[Vec<Edge>]) -> Result<Self, GraphError> {
        let size = list.len();
        let mut clique = Self::new(size);
        for (from, edges) in list.iter().enumerate() {
            let mut seen = vec![false; size];
            for edge in edges {
                if edge.to >= size {
                    return Err(GraphError::VertexOutOfRange {
                        vertex: edge.to,
                        size,
                    });
                }
                if edge.to != from && !seen[edge.to] {
                    seen[edge.to] = true;
                    clique.set(from, edge.to, edge.length);
                }
            }
            let covered = seen.iter().filter(|&&s| s).count();
            if edges.len() + 1 != size || covered + 1 != size {
                return Err(GraphError::DegreeMismatch {
                    vertex: from,
                    expected: size - 1,
                    actual: edges.len(),
                });
            }
        }
        Ok(clique)
    }

    /// Returns the length of the edge from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, length: u64) {
        self.data[from * self.size + to] = length;
    }

    /// Returns `true` if every edge has the same length in both directions.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}

impl TownGraph for Clique {
    fn size(&self) -> usize {
        self.size
    }

    fn edges(&self, from: usize) -> Result<Cow<'_, [Edge]>, GraphError> {
        self.check_town(from)?;
        Ok(Cow::Owned(
            (0..self.size)
                .filter(|&to| to != from)
                .map(|to| Edge::new(to, self.get(from, to)))
                .collect(),
        ))
    }

    fn edges_count(&self) -> usize {
        self.size * self.size.saturating_sub(1) / 2
    }

    fn edge_length(&self, from: usize, to: usize) -> Result<Option<u64>, GraphError> {
        self.check_town(from)?;
        self.check_town(to)?;
        Ok((from != to).then(|| self.get(from, to)))
    }

    // Always dense: every town is adjacent to every other.
    fn shortest_path_tree(&self, from: usize) -> Result<ShortestPathTree, GraphError> {
        dijkstra::shortest_path_tree(self, from, DijkstraStrategy::Dense)
    }
}
