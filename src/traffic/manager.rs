//! Per-town inventories and dispatch operations.

use log::debug;

use super::allocator::{plan_nearest, AllocationPlan};
use super::scheduler;
use super::{CostAccounting, DispatchConfig, TrafficError};
use crate::graph::{Graph, TownGraph};

/// Goods and vehicle inventories over a shared town graph.
///
/// Keeps running totals of goods and vehicles next to the per-town arrays;
/// every mutator updates both in the same step.
///
/// All mutating operations take `&mut self`. Dispatch operations validate
/// and plan before mutating, so an `Err` leaves the inventories untouched.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::Graph;
/// use u_dispatch::traffic::TrafficManager;
///
/// let graph = Graph::complete(4);
/// let tm = TrafficManager::new(&graph, vec![1, 2, 3, 42], vec![42, 1, 4, 8], 14).unwrap();
/// assert_eq!(tm.total_goods(), 48);
/// assert_eq!(tm.total_vehicles(), 55);
/// assert_eq!(tm.vehicles_needed(29), 3);
/// ```
#[derive(Debug)]
pub struct TrafficManager<'g, G: TownGraph + ?Sized = Graph> {
    graph: &'g G,
    goods: Vec<u64>,
    vehicles: Vec<u64>,
    vehicle_capacity: u64,
    total_goods: u64,
    total_vehicles: u64,
    config: DispatchConfig,
}

impl<'g, G: TownGraph + ?Sized> TrafficManager<'g, G> {
    /// Creates a manager over `graph` with the given per-town stock.
    ///
    /// Both arrays must have one entry per town and the capacity must be
    /// positive.
    pub fn new(
        graph: &'g G,
        goods: Vec<u64>,
        vehicles: Vec<u64>,
        vehicle_capacity: u64,
    ) -> Result<Self, TrafficError> {
        if vehicle_capacity == 0 {
            return Err(TrafficError::ZeroCapacity);
        }
        check_len(graph.size(), goods.len())?;
        check_len(graph.size(), vehicles.len())?;
        Ok(Self {
            graph,
            total_goods: goods.iter().sum(),
            total_vehicles: vehicles.iter().sum(),
            goods,
            vehicles,
            vehicle_capacity,
            config: DispatchConfig::default(),
        })
    }

    /// Replaces the dispatch configuration.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The graph this manager dispatches over.
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Current dispatch configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Goods each vehicle can carry.
    pub fn vehicle_capacity(&self) -> u64 {
        self.vehicle_capacity
    }

    /// Goods per town.
    pub fn goods(&self) -> &[u64] {
        &self.goods
    }

    /// Vehicles per town.
    pub fn vehicles(&self) -> &[u64] {
        &self.vehicles
    }

    /// Goods stored in `town`.
    pub fn goods_at(&self, town: usize) -> Result<u64, TrafficError> {
        self.graph.check_town(town)?;
        Ok(self.goods[town])
    }

    /// Vehicles parked in `town`.
    pub fn vehicles_at(&self, town: usize) -> Result<u64, TrafficError> {
        self.graph.check_town(town)?;
        Ok(self.vehicles[town])
    }

    /// Goods across all towns.
    pub fn total_goods(&self) -> u64 {
        self.total_goods
    }

    /// Vehicles across all towns.
    pub fn total_vehicles(&self) -> u64 {
        self.total_vehicles
    }

    /// Replaces every town's goods.
    pub fn set_goods(&mut self, goods: Vec<u64>) -> Result<(), TrafficError> {
        check_len(self.graph.size(), goods.len())?;
        self.total_goods = goods.iter().sum();
        self.goods = goods;
        Ok(())
    }

    /// Replaces every town's vehicles.
    pub fn set_vehicles(&mut self, vehicles: Vec<u64>) -> Result<(), TrafficError> {
        check_len(self.graph.size(), vehicles.len())?;
        self.total_vehicles = vehicles.iter().sum();
        self.vehicles = vehicles;
        Ok(())
    }

    /// Sets the goods stored in one town.
    pub fn set_goods_at(&mut self, town: usize, amount: u64) -> Result<(), TrafficError> {
        self.graph.check_town(town)?;
        self.total_goods = self.total_goods - self.goods[town] + amount;
        self.goods[town] = amount;
        Ok(())
    }

    /// Sets the vehicles parked in one town.
    pub fn set_vehicles_at(&mut self, town: usize, count: u64) -> Result<(), TrafficError> {
        self.graph.check_town(town)?;
        self.total_vehicles = self.total_vehicles - self.vehicles[town] + count;
        self.vehicles[town] = count;
        Ok(())
    }

    /// Vehicles required to carry `goods`: `ceil(goods / capacity)`.
    pub fn vehicles_needed(&self, goods: u64) -> u64 {
        goods.div_ceil(self.vehicle_capacity)
    }

    /// Moves `count` vehicles from `from` to `to` along the shortest path.
    ///
    /// Returns the path length. The same figure serves as the relocation
    /// cost (summed by [`transport`](Self::transport)) and as the travel
    /// time (used as a clock by
    /// [`transport_with_returns`](Self::transport_with_returns)).
    ///
    /// Fails without moving anything if either town is out of range, `to`
    /// is unreachable, or `from` holds fewer than `count` vehicles.
    pub fn move_vehicles(&mut self, from: usize, to: usize, count: u64) -> Result<u64, TrafficError> {
        self.graph.check_town(from)?;
        self.graph.check_town(to)?;
        let available = self.vehicles[from];
        if available < count {
            return Err(TrafficError::InsufficientVehicles {
                town: from,
                available,
                requested: count,
            });
        }
        let length = self
            .graph
            .distance(from, to)?
            .ok_or(TrafficError::Unreachable { from, to })?;
        self.vehicles[from] -= count;
        self.vehicles[to] += count;
        Ok(length)
    }

    /// Pulls `count` vehicles into `target` from the nearest towns.
    ///
    /// Returns the relocation cost per the configured [`CostAccounting`].
    /// The target's own vehicles are not counted toward `count`.
    pub fn gather_nearest(&mut self, target: usize, count: u64) -> Result<u64, TrafficError> {
        let plan = plan_nearest(self.graph, &self.vehicles, target, count)?;
        let cost = self.plan_cost(&plan)?;
        self.apply_plan(&plan)?;
        Ok(cost)
    }

    fn plan_cost(&self, plan: &AllocationPlan) -> Result<u64, TrafficError> {
        let mut cost: u64 = 0;
        for step in &plan.steps {
            cost = match self.config.cost_accounting() {
                CostAccounting::Cumulative => cost
                    .checked_add(step.distance)
                    .ok_or(TrafficError::CostOverflow)?,
                CostAccounting::LastStep => step.distance,
            };
        }
        Ok(cost)
    }

    fn apply_plan(&mut self, plan: &AllocationPlan) -> Result<(), TrafficError> {
        for step in &plan.steps {
            self.move_vehicles(step.town, plan.target, step.vehicles)?;
        }
        Ok(())
    }

    /// Ships `goods` from `from` to `to` one way.
    ///
    /// Needs `ceil(goods / capacity)` vehicles at `from`; any shortfall is
    /// pulled in from the nearest towns first. The vehicles stay at `to`.
    /// Returns the relocation cost: gathering cost plus the main leg.
    ///
    /// A shipment within one town, or of zero goods, needs no vehicles and
    /// costs nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::graph::Graph;
    /// use u_dispatch::traffic::TrafficManager;
    ///
    /// let graph = Graph::try_from(vec![
    ///     vec![(1, 10)],
    ///     vec![(0, 10), (2, 1), (3, 2), (4, 3)],
    ///     vec![(1, 1)],
    ///     vec![(1, 2)],
    ///     vec![(1, 3)],
    /// ])
    /// .unwrap();
    /// let mut tm =
    ///     TrafficManager::new(&graph, vec![1, 14, 1, 1, 1], vec![14, 14, 14, 28, 14], 14).unwrap();
    ///
    /// assert_eq!(tm.transport(1, 0, 12).unwrap(), 10);
    /// assert_eq!(tm.goods(), &[13, 2, 1, 1, 1]);
    /// assert_eq!(tm.vehicles(), &[15, 13, 14, 28, 14]);
    /// ```
    pub fn transport(&mut self, from: usize, to: usize, goods: u64) -> Result<u64, TrafficError> {
        self.check_shipment(from, to, goods)?;
        let needed = self.vehicles_needed(goods);
        if needed == 0 || from == to {
            return Ok(0);
        }
        let main = self
            .graph
            .distance(from, to)?
            .ok_or(TrafficError::Unreachable { from, to })?;

        let own = self.vehicles[from];
        let plan = if own < needed {
            let plan = plan_nearest(self.graph, &self.vehicles, from, needed - own)
                .map_err(|e| match e {
                    TrafficError::Shortfall { available, .. } => TrafficError::Shortfall {
                        requested: needed,
                        available: own + available,
                    },
                    other => other,
                })?;
            Some(plan)
        } else {
            None
        };
        let gathering = match &plan {
            Some(plan) => self.plan_cost(plan)?,
            None => 0,
        };
        let cost = gathering
            .checked_add(main)
            .ok_or(TrafficError::CostOverflow)?;
        debug!("transport {goods} goods {from} -> {to}: {needed} vehicles, {own} on site");

        if let Some(plan) = plan {
            self.apply_plan(&plan)?;
        }
        self.move_vehicles(from, to, needed)?;
        self.move_goods(from, to, goods);
        Ok(cost)
    }

    /// Ships `goods` from `from` to `to` with vehicles shuttling back and
    /// forth until enough loads have been delivered.
    ///
    /// Runs a discrete-event simulation: vehicles from every town head for
    /// `to`, and each batch that arrives without completing the shipment
    /// returns to `from` to pick up another load. Returns the simulated
    /// time at which the last required load arrives. Unlike
    /// [`transport`](Self::transport), the result is elapsed time, not a
    /// summed cost.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::graph::Graph;
    /// use u_dispatch::traffic::TrafficManager;
    ///
    /// let graph = Graph::try_from(vec![
    ///     vec![(1, 10)],
    ///     vec![(0, 10), (2, 1), (3, 2), (4, 3)],
    ///     vec![(1, 1)],
    ///     vec![(1, 2)],
    ///     vec![(1, 3)],
    /// ])
    /// .unwrap();
    /// let mut tm = TrafficManager::new(&graph, vec![0, 16, 0, 0, 0], vec![1, 0, 1, 1, 1], 5).unwrap();
    ///
    /// assert_eq!(tm.transport_with_returns(1, 0, 16).unwrap(), 20);
    /// assert_eq!(tm.vehicles(), &[4, 0, 0, 0, 0]);
    /// ```
    pub fn transport_with_returns(
        &mut self,
        from: usize,
        to: usize,
        goods: u64,
    ) -> Result<u64, TrafficError> {
        self.check_shipment(from, to, goods)?;
        let needed = self.vehicles_needed(goods);
        if needed == 0 || from == to {
            return Ok(0);
        }
        debug!("round-trip transport {goods} goods {from} -> {to}: {needed} loads");

        let mut fleet = self.vehicles.clone();
        let elapsed = scheduler::run_round_trips(
            self.graph,
            &mut fleet,
            self.config.arrival_estimate(),
            from,
            to,
            needed,
        )?;
        self.vehicles = fleet;
        self.move_goods(from, to, goods);
        Ok(elapsed)
    }

    fn check_shipment(&self, from: usize, to: usize, goods: u64) -> Result<(), TrafficError> {
        self.graph.check_town(from)?;
        self.graph.check_town(to)?;
        let available = self.goods[from];
        if available < goods {
            return Err(TrafficError::InsufficientGoods {
                town: from,
                available,
                requested: goods,
            });
        }
        Ok(())
    }

    fn move_goods(&mut self, from: usize, to: usize, amount: u64) {
        self.goods[from] -= amount;
        self.goods[to] += amount;
    }

    /// Recomputes both totals from the per-town arrays and compares them
    /// with the cached values. O(n).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn totals_consistent(&self) -> bool {
        self.goods.iter().sum::<u64>() == self.total_goods
            && self.vehicles.iter().sum::<u64>() == self.total_vehicles
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), TrafficError> {
    if expected == actual {
        Ok(())
    } else {
        Err(TrafficError::LengthMismatch { expected, actual })
    }
}
