//! Goods and vehicle inventories, and the dispatch operations over them.
//!
//! - [`TrafficManager`] — per-town stock, vehicle moves, one-way and round-trip transport
//! - [`plan_nearest`] — nearest-vehicle allocator used to cover shortfalls
//! - [`DispatchConfig`] — cost accounting and arrival-time estimation knobs
//! - [`TrafficError`] — failures of inventory updates and dispatch

mod allocator;
mod config;
mod error;
mod manager;
mod scheduler;

pub use allocator::{plan_nearest, AllocationPlan, AllocationStep};
pub use config::{ArrivalEstimate, CostAccounting, DispatchConfig};
pub use error::TrafficError;
pub use manager::TrafficManager;
