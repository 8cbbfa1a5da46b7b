//! Dispatch configuration.

use serde::{Deserialize, Serialize};

/// How the nearest-vehicle allocator reports the cost of gathering
/// vehicles from several towns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostAccounting {
    /// Sum of every relocation step.
    #[default]
    Cumulative,
    /// Cost of the last relocation step only.
    LastStep,
}

/// How the round-trip scheduler estimates when a town's vehicles first
/// reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalEstimate {
    /// `distance(town, from) + distance(from, to)`: the town's vehicles
    /// drive to the shipment source, then take the main leg. The detour is
    /// measured from the town toward the source, which matters on one-way
    /// roads. Towns with no route to the source fall back to `Direct`.
    #[default]
    ViaSource,
    /// `distance(town, to)`: the town's vehicles drive straight to the
    /// destination.
    Direct,
}

/// Tunable behaviour of a [`TrafficManager`](super::TrafficManager).
///
/// # Examples
///
/// ```
/// use u_dispatch::traffic::{ArrivalEstimate, CostAccounting, DispatchConfig};
///
/// let config = DispatchConfig::new()
///     .with_cost_accounting(CostAccounting::LastStep)
///     .with_arrival_estimate(ArrivalEstimate::Direct);
/// assert_eq!(config.cost_accounting(), CostAccounting::LastStep);
/// assert_eq!(config.arrival_estimate(), ArrivalEstimate::Direct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    cost_accounting: CostAccounting,
    arrival_estimate: ArrivalEstimate,
}

impl DispatchConfig {
    /// Default configuration: cumulative costs, via-source arrival estimate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how allocator costs are accumulated.
    pub fn with_cost_accounting(mut self, accounting: CostAccounting) -> Self {
        self.cost_accounting = accounting;
        self
    }

    /// Sets how first arrivals are timed in round-trip dispatch.
    pub fn with_arrival_estimate(mut self, estimate: ArrivalEstimate) -> Self {
        self.arrival_estimate = estimate;
        self
    }

    /// Allocator cost accounting.
    pub fn cost_accounting(&self) -> CostAccounting {
        self.cost_accounting
    }

    /// Round-trip arrival estimate.
    pub fn arrival_estimate(&self) -> ArrivalEstimate {
        self.arrival_estimate
    }
}
