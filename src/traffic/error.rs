//! Errors raised by inventory updates and dispatch.

use crate::graph::GraphError;

/// Errors that can occur while updating inventories or dispatching vehicles.
///
/// Every dispatch operation checks its preconditions and plans its moves
/// before touching any inventory, so an `Err` means nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrafficError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("expected {expected} per-town entries, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("vehicle capacity must be positive")]
    ZeroCapacity,
    #[error("town {town} holds {available} goods, {requested} requested")]
    InsufficientGoods {
        town: usize,
        available: u64,
        requested: u64,
    },
    #[error("town {town} holds {available} vehicles, {requested} requested")]
    InsufficientVehicles {
        town: usize,
        available: u64,
        requested: u64,
    },
    #[error("town {to} is unreachable from town {from}")]
    Unreachable { from: usize, to: usize },
    #[error("vehicle shortfall: {requested} needed, only {available} can reach the shipment")]
    Shortfall { requested: u64, available: u64 },
    #[error("relocation cost does not fit in u64")]
    CostOverflow,
    #[error("simulated time does not fit in u64")]
    TimeOverflow,
}
