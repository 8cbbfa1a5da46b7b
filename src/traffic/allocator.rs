//! Nearest-vehicle allocator.
//!
//! # Algorithm
//!
//! Best-first search from the target town over reversed edges, so every
//! settled distance is the length of the drive *to* the target. The
//! frontier is an ordered set of `(distance, town)` pairs; since it has no
//! decrease-key, an improved town is removed and reinserted. Each settled
//! town other than the target gives up `min(vehicles there, still needed)`
//! vehicles. The search stops once the quota is met or the frontier runs
//! dry.
//!
//! Planning is pure: nothing moves until the caller applies the plan, so a
//! shortfall can be reported with inventories untouched.

use std::collections::BTreeSet;

use log::debug;

use super::TrafficError;
use crate::graph::{Graph, TownGraph};

/// One relocation in an [`AllocationPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStep {
    /// Town the vehicles leave.
    pub town: usize,
    /// Number of vehicles moved.
    pub vehicles: u64,
    /// Shortest-path length from `town` to the target.
    pub distance: u64,
}

/// Vehicles to pull toward a target town, nearest sources first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    /// Town the vehicles are gathered at.
    pub target: usize,
    /// Relocations in the order they were chosen.
    pub steps: Vec<AllocationStep>,
}

impl AllocationPlan {
    /// Total vehicles the plan brings to the target.
    pub fn total_vehicles(&self) -> u64 {
        self.steps.iter().map(|s| s.vehicles).sum()
    }
}

/// Plans how to gather `count` vehicles at `target` from the closest towns.
///
/// `vehicles` holds the current stock per town. The target's own stock is
/// never counted. Towns with no route to the target are never reached.
///
/// Fails with [`TrafficError::Shortfall`] when fewer than `count` vehicles
/// can be gathered.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::Graph;
/// use u_dispatch::traffic::plan_nearest;
///
/// let graph = Graph::try_from(vec![
///     vec![(1, 10)],
///     vec![(0, 10), (2, 1), (3, 2)],
///     vec![(1, 1)],
///     vec![(1, 2)],
/// ])
/// .unwrap();
///
/// let plan = plan_nearest(&graph, &[5, 0, 1, 1], 1, 3).unwrap();
/// let towns: Vec<usize> = plan.steps.iter().map(|s| s.town).collect();
/// assert_eq!(towns, vec![2, 3, 0]);
/// assert_eq!(plan.total_vehicles(), 3);
/// ```
pub fn plan_nearest<G: TownGraph + ?Sized>(
    graph: &G,
    vehicles: &[u64],
    target: usize,
    count: u64,
) -> Result<AllocationPlan, TrafficError> {
    graph.check_town(target)?;
    if vehicles.len() != graph.size() {
        return Err(TrafficError::LengthMismatch {
            expected: graph.size(),
            actual: vehicles.len(),
        });
    }

    let mut plan = AllocationPlan {
        target,
        steps: Vec::new(),
    };
    let mut remaining = count;
    if remaining == 0 {
        return Ok(plan);
    }

    let inbound = Graph::transposed(graph)?;
    let n = graph.size();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut frontier = BTreeSet::new();
    dist[target] = Some(0);
    frontier.insert((0u64, target));

    while let Some((base, town)) = frontier.pop_first() {
        settled[town] = true;

        if town != target && vehicles[town] > 0 {
            let take = vehicles[town].min(remaining);
            plan.steps.push(AllocationStep {
                town,
                vehicles: take,
                distance: base,
            });
            remaining -= take;
            if remaining == 0 {
                debug!("allocator gathers {count} vehicles at {target}: {:?}", plan.steps);
                return Ok(plan);
            }
        }

        // Reversed edge `town -> edge.to` is the road `edge.to -> town`.
        for edge in inbound.edges(town)?.iter() {
            if settled[edge.to] {
                continue;
            }
            let candidate = base.saturating_add(edge.length);
            match dist[edge.to] {
                Some(current) if current <= candidate => {}
                previous => {
                    if let Some(current) = previous {
                        frontier.remove(&(current, edge.to));
                    }
                    dist[edge.to] = Some(candidate);
                    frontier.insert((candidate, edge.to));
                }
            }
        }
    }

    Err(TrafficError::Shortfall {
        requested: count,
        available: count - remaining,
    })
}
