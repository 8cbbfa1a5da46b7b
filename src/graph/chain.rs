//! Linear chain backend.
//!
//! Towns sit on a line, so the only path between two towns is the
//! monotone walk between them. Distances come from prefix sums of the edge
//! lengths in O(1); no search is ever run.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::search::ShortestPathTree;
use super::{Edge, GraphError, TownGraph};

/// Undirected path graph with O(n) storage.
///
/// Towns may be numbered in any order along the line; `order` maps line
/// positions to town ids and `position` maps them back.
///
/// Serialized as the town order plus the edge lengths between consecutive
/// towns; deserializing rebuilds and validates the prefix sums.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::{Chain, Edge, TownGraph};
///
/// // 1 -(1)- 0 -(2)- 2 -(5)- 3
/// let chain = Chain::from_adjacency(&[
///     vec![Edge::new(1, 1), Edge::new(2, 2)],
///     vec![Edge::new(0, 1)],
///     vec![Edge::new(0, 2), Edge::new(3, 5)],
///     vec![Edge::new(2, 5)],
/// ])
/// .unwrap();
/// assert_eq!(chain.edges_count(), 3);
/// assert_eq!(chain.distance(1, 3).unwrap(), Some(8));
/// assert_eq!(chain.shortest_path(3, 0).unwrap(), vec![Edge::new(2, 5), Edge::new(0, 2)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawChain", try_from = "RawChain")]
pub struct Chain {
    prefix: Vec<u64>,
    order: Vec<usize>,
    position: Vec<usize>,
}

#[derive(Serialize, Deserialize)]
struct RawChain {
    order: Vec<usize>,
    lengths: Vec<u64>,
}

impl From<Chain> for RawChain {
    fn from(chain: Chain) -> Self {
        let lengths = chain.prefix.windows(2).map(|w| w[1] - w[0]).collect();
        Self {
            order: chain.order,
            lengths,
        }
    }
}

impl TryFrom<RawChain> for Chain {
    type Error = GraphError;

    fn try_from(raw: RawChain) -> Result<Self, Self::Error> {
        let n = raw.order.len();
        if raw.lengths.len() != n.saturating_sub(1) {
            return Err(GraphError::NotAChain("expected one length per consecutive pair"));
        }
        let mut position = vec![usize::MAX; n];
        for (pos, &town) in raw.order.iter().enumerate() {
            if town >= n {
                return Err(GraphError::VertexOutOfRange { vertex: town, size: n });
            }
            if position[town] != usize::MAX {
                return Err(GraphError::NotAChain("town appears twice"));
            }
            position[town] = pos;
        }
        Ok(Self {
            prefix: prefix_sums(&raw.lengths)?,
            order: raw.order,
            position,
        })
    }
}

/// Running totals of `lengths`, starting at zero.
fn prefix_sums(lengths: &[u64]) -> Result<Vec<u64>, GraphError> {
    let mut prefix = Vec::with_capacity(lengths.len() + 1);
    let mut total: u64 = 0;
    prefix.push(total);
    for &len in lengths {
        total = total.checked_add(len).ok_or(GraphError::LengthOverflow)?;
        prefix.push(total);
    }
    Ok(prefix)
}

impl Chain {
    /// Chain `0 - 1 - … - n-1` with unit-length edges.
    pub fn new(n: usize) -> Self {
        Self {
            prefix: (0..n as u64).collect(),
            order: (0..n).collect(),
            position: (0..n).collect(),
        }
    }

    /// Chain `0 - 1 - … - n` where `lengths[i]` joins towns `i` and `i + 1`.
    ///
    /// Fails with [`GraphError::LengthOverflow`] if the total length does
    /// not fit in `u64`.
    pub fn from_lengths(lengths: &[u64]) -> Result<Self, GraphError> {
        let n = lengths.len() + 1;
        Ok(Self {
            prefix: prefix_sums(lengths)?,
            order: (0..n).collect(),
            position: (0..n).collect(),
        })
    }

    /// Recovers the line from symmetric per-town edge lists.
    ///
    /// Each town must have one or two neighbours (none for a single town),
    /// every edge must be mirrored with the same length, and the towns must
    /// form one simple path. The two edges of a town may be listed in
    /// either order; [`edges`](TownGraph::edges) always reports them as
    /// `[previous, next]` along the line, where the line starts at the
    /// first town with a single neighbour.
    pub fn from_adjacency(list: &[Vec<Edge>]) -> Result<Self, GraphError> {
        let n = list.len();
        if n == 0 {
            return Ok(Self::default());
        }
        if n == 1 {
            return if list[0].is_empty() {
                Ok(Self::new(1))
            } else {
                Err(GraphError::NotAChain("a single town cannot have edges"))
            };
        }

        for (from, edges) in list.iter().enumerate() {
            if edges.is_empty() || edges.len() > 2 {
                return Err(GraphError::DegreeMismatch {
                    vertex: from,
                    expected: if edges.is_empty() { 1 } else { 2 },
                    actual: edges.len(),
                });
            }
            for edge in edges {
                if edge.to >= n {
                    return Err(GraphError::VertexOutOfRange {
                        vertex: edge.to,
                        size: n,
                    });
                }
                if edge.to == from {
                    return Err(GraphError::NotAChain("self loop"));
                }
                let mirrored = list[edge.to]
                    .iter()
                    .any(|back| back.to == from && back.length == edge.length);
                if !mirrored {
                    return Err(GraphError::NotAChain("edge without a matching reverse edge"));
                }
            }
        }

        let start = list
            .iter()
            .position(|edges| edges.len() == 1)
            .ok_or(GraphError::NotAChain("towns form a cycle"))?;

        let mut lengths = Vec::with_capacity(n - 1);
        let mut order = vec![start];
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut current = start;
        while let Some(next) = list[current].iter().find(|e| !visited[e.to]) {
            visited[next.to] = true;
            lengths.push(next.length);
            order.push(next.to);
            current = next.to;
        }
        if order.len() != n {
            return Err(GraphError::NotAChain("towns are not connected"));
        }

        let mut position = vec![0; n];
        for (pos, &town) in order.iter().enumerate() {
            position[town] = pos;
        }
        Ok(Self {
            prefix: prefix_sums(&lengths)?,
            order,
            position,
        })
    }

    /// Edge from line position `pos` to the adjacent position `next`.
    fn step(&self, pos: usize, next: usize) -> Edge {
        Edge::new(self.order[next], self.prefix[pos].abs_diff(self.prefix[next]))
    }

    /// The unique walk from `from` to `to` along the line.
    fn walk(&self, from: usize, to: usize) -> Vec<Edge> {
        let (a, b) = (self.position[from], self.position[to]);
        if a <= b {
            (a..b).map(|p| self.step(p, p + 1)).collect()
        } else {
            (b + 1..=a).rev().map(|p| self.step(p, p - 1)).collect()
        }
    }
}

impl TownGraph for Chain {
    fn size(&self) -> usize {
        self.order.len()
    }

    /// Neighbours in line order: the previous town first, then the next.
    fn edges(&self, from: usize) -> Result<Cow<'_, [Edge]>, GraphError> {
        self.check_town(from)?;
        let pos = self.position[from];
        let mut edges = Vec::with_capacity(2);
        if pos > 0 {
            edges.push(self.step(pos, pos - 1));
        }
        if pos + 1 < self.size() {
            edges.push(self.step(pos, pos + 1));
        }
        Ok(Cow::Owned(edges))
    }

    fn edges_count(&self) -> usize {
        self.size().saturating_sub(1)
    }

    fn any_path(&self, from: usize, to: usize) -> Result<Vec<Edge>, GraphError> {
        self.shortest_path(from, to)
    }

    fn shortest_path_tree(&self, from: usize) -> Result<ShortestPathTree, GraphError> {
        self.check_town(from)?;
        let origin = self.position[from];
        let mut dist = vec![None; self.size()];
        let mut ancestors = vec![None; self.size()];
        for (pos, &town) in self.order.iter().enumerate() {
            dist[town] = Some(self.prefix[pos].abs_diff(self.prefix[origin]));
            let prev = match pos.cmp(&origin) {
                std::cmp::Ordering::Less => pos + 1,
                std::cmp::Ordering::Greater => pos - 1,
                std::cmp::Ordering::Equal => continue,
            };
            ancestors[town] = Some((self.step(prev, pos), self.order[prev]));
        }
        Ok(ShortestPathTree::from_parts(from, dist, ancestors))
    }

    fn shortest_path(&self, from: usize, to: usize) -> Result<Vec<Edge>, GraphError> {
        self.check_town(from)?;
        self.check_town(to)?;
        Ok(self.walk(from, to))
    }

    fn distance(&self, from: usize, to: usize) -> Result<Option<u64>, GraphError> {
        self.check_town(from)?;
        self.check_town(to)?;
        Ok(Some(
            self.prefix[self.position[from]].abs_diff(self.prefix[self.position[to]]),
        ))
    }
}
