//! Discrete-event simulation behind round-trip transport.
//!
//! Each queued action is a batch of vehicles arriving somewhere at a given
//! time. Actions are processed in `(timestamp, sequence)` order, so batches
//! arriving at the same moment are handled in the order they were queued.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::{trace, warn};

use super::{ArrivalEstimate, TrafficError};
use crate::graph::{Graph, TownGraph};

/// A batch of vehicles that arrives at `to` at `timestamp`, having left `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArrivalAction {
    timestamp: u64,
    sequence: u64,
    vehicles: u64,
    from: usize,
    to: usize,
}

impl Ord for ArrivalAction {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.timestamp, self.sequence).cmp(&(other.timestamp, other.sequence))
    }
}

impl PartialOrd for ArrivalAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of pending arrivals.
#[derive(Debug, Default)]
struct ActionQueue {
    heap: BinaryHeap<Reverse<ArrivalAction>>,
    next_sequence: u64,
}

impl ActionQueue {
    fn push(&mut self, timestamp: u64, vehicles: u64, from: usize, to: usize) {
        self.heap.push(Reverse(ArrivalAction {
            timestamp,
            sequence: self.next_sequence,
            vehicles,
            from,
            to,
        }));
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<ArrivalAction> {
        self.heap.pop().map(|Reverse(action)| action)
    }
}

/// Runs the shuttle simulation for `needed` loads from `from` to `to`.
///
/// Returns the time at which the last required load arrives. Vehicles are
/// moved in `vehicles` as the simulation runs; goods are left to the
/// caller. Expects `from != to` and `needed > 0`.
pub(crate) fn run_round_trips<G: TownGraph + ?Sized>(
    graph: &G,
    vehicles: &mut [u64],
    estimate: ArrivalEstimate,
    from: usize,
    to: usize,
    mut needed: u64,
) -> Result<u64, TrafficError> {
    // Trees over reversed roads give distances toward their root.
    let inbound = Graph::transposed(graph)?;
    let to_dest = inbound.shortest_path_tree(to)?;
    let to_source = inbound.shortest_path_tree(from)?;
    let main = to_dest
        .distance(from)
        .ok_or(TrafficError::Unreachable { from, to })?;
    let back = to_source.distance(to);

    let mut queue = ActionQueue::default();
    let mut supply: u64 = 0;
    let own = vehicles[from];
    if own > 0 {
        queue.push(0, own, from, from);
        supply += own;
    }
    for town in (0..graph.size()).filter(|&t| t != from) {
        let count = vehicles[town];
        if count == 0 {
            continue;
        }
        let Some(direct) = to_dest.distance(town) else {
            continue;
        };
        let timestamp = match estimate {
            ArrivalEstimate::ViaSource => match to_source.distance(town) {
                Some(detour) => detour.checked_add(main).ok_or(TrafficError::TimeOverflow)?,
                None => direct,
            },
            ArrivalEstimate::Direct => direct,
        };
        queue.push(timestamp, count, town, to);
        supply = supply.saturating_add(count);
    }

    if supply == 0 || (back.is_none() && supply < needed) {
        return Err(TrafficError::Shortfall {
            requested: needed,
            available: supply,
        });
    }

    while let Some(action) = queue.pop() {
        trace!(
            "t={}: {} vehicles {} -> {}",
            action.timestamp,
            action.vehicles,
            action.from,
            action.to
        );
        shift(vehicles, action.from, action.to, action.vehicles)?;

        if action.to == to {
            if action.vehicles >= needed {
                send_home(graph, vehicles, to, action.from, action.vehicles - needed)?;
                return Ok(action.timestamp);
            }
            needed -= action.vehicles;
            if let Some(back) = back {
                let timestamp = action
                    .timestamp
                    .checked_add(back)
                    .ok_or(TrafficError::TimeOverflow)?;
                queue.push(timestamp, action.vehicles, to, from);
            }
        } else {
            let timestamp = action
                .timestamp
                .checked_add(main)
                .ok_or(TrafficError::TimeOverflow)?;
            queue.push(timestamp, action.vehicles, from, to);
        }
    }

    // Only reachable when returns are impossible and the loads ran out,
    // which the supply check rules out.
    Err(TrafficError::Shortfall {
        requested: needed,
        available: 0,
    })
}

fn shift(vehicles: &mut [u64], from: usize, to: usize, count: u64) -> Result<(), TrafficError> {
    let available = vehicles[from];
    if available < count {
        return Err(TrafficError::InsufficientVehicles {
            town: from,
            available,
            requested: count,
        });
    }
    vehicles[from] -= count;
    vehicles[to] += count;
    Ok(())
}

/// Sends vehicles left over at `at` back to `home`, or leaves them parked
/// when no road leads there.
fn send_home<G: TownGraph + ?Sized>(
    graph: &G,
    vehicles: &mut [u64],
    at: usize,
    home: usize,
    count: u64,
) -> Result<(), TrafficError> {
    if count == 0 || at == home {
        return Ok(());
    }
    if graph.distance(at, home)?.is_none() {
        warn!("{count} surplus vehicles stay at {at}: no route back to {home}");
        return Ok(());
    }
    shift(vehicles, at, home, count)
}
