//! Fluent builder for constructing a [`Simulation`].

use rsb_core::{Bounds, CoreError, SimConfig, StopId, VehicleId};
use rsb_dispatch::StrategyKind;
use rsb_network::{RoadNetwork, Router, ShortestPaths};

use crate::{ActiveVehicles, SimError, SimResult, Simulation, Stop, Vehicle, VehicleSpec};

/// Fluent builder for [`Simulation<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: speed, capacity, seed, tick limit
/// - [`RoadNetwork`]: the road graph
/// - `R: Router`: shortest-path engine, usually [`ShortestPaths`]
///   (see [`SimBuilder::with_shortest_paths`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                   |
/// |-----------------|---------------------------|
/// | `.stops(v)`     | No stops                  |
/// | `.vehicles(v)`  | None (build fails)        |
/// | `.strategy(k)`  | `StrategyKind::Nearest`   |
/// | `.active(a)`    | `ActiveVehicles::All`     |
/// | `.bounds(b)`    | `Bounds::default()`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::with_shortest_paths(config, network)
///     .stops(stops)
///     .vehicles(specs)
///     .strategy(StrategyKind::BestRatio)
///     .build()?;
/// let reason = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<R: Router> {
    config:   SimConfig,
    network:  RoadNetwork,
    router:   R,
    bounds:   Bounds,
    stops:    Vec<Stop>,
    vehicles: Vec<VehicleSpec>,
    strategy: StrategyKind,
    active:   ActiveVehicles,
}

impl SimBuilder<ShortestPaths> {
    /// Run Floyd–Warshall over `network` and use it as the router.
    pub fn with_shortest_paths(config: SimConfig, network: RoadNetwork) -> Self {
        let paths = ShortestPaths::compute(&network);
        Self::new(config, network, paths)
    }
}

impl<R: Router> SimBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, network: RoadNetwork, router: R) -> Self {
        Self {
            config,
            network,
            router,
            bounds:   Bounds::default(),
            stops:    Vec::new(),
            vehicles: Vec::new(),
            strategy: StrategyKind::default(),
            active:   ActiveVehicles::All,
        }
    }

    /// Supply the passenger stops.
    ///
    /// Stops are renumbered `0..n` in the given order and snapped to their
    /// nearest road node at build time.
    pub fn stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    /// Supply the fleet.  Vehicle `i` gets `VehicleId(i)`.
    pub fn vehicles(mut self, vehicles: Vec<VehicleSpec>) -> Self {
        self.vehicles = vehicles;
        self
    }

    /// Strategy for every vehicle without its own override.
    pub fn strategy(mut self, kind: StrategyKind) -> Self {
        self.strategy = kind;
        self
    }

    pub fn active(mut self, active: ActiveVehicles) -> Self {
        self.active = active;
        self
    }

    /// Canvas that stop and vehicle positions must lie on.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Validate inputs, snap stops to the network and return a ready-to-run
    /// [`Simulation`].
    pub fn build(self) -> SimResult<Simulation<R>> {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        if !self.bounds.is_valid() {
            return Err(SimError::Config(format!(
                "canvas must have positive size, got {} x {}",
                self.bounds.width, self.bounds.height
            )));
        }
        if self.vehicles.is_empty() {
            return Err(SimError::NoVehicles);
        }
        if self.vehicles.len() > usize::from(u16::MAX) {
            return Err(SimError::Config(format!(
                "at most {} vehicles are supported, got {}",
                u16::MAX,
                self.vehicles.len()
            )));
        }
        if self.network.is_empty() {
            return Err(SimError::Config("road network has no nodes".into()));
        }
        if let ActiveVehicles::Selected(id) = self.active {
            if id.index() >= self.vehicles.len() {
                return Err(SimError::UnknownVehicle(id));
            }
        }
        let outside = self
            .vehicles
            .iter()
            .map(|v| v.start)
            .chain(self.stops.iter().map(|s| s.pos))
            .find(|&p| !self.bounds.contains(p));
        if let Some(p) = outside {
            return Err(CoreError::OutOfBounds(p).into());
        }

        // ── Snap stops ────────────────────────────────────────────────────
        let mut stops = self.stops;
        for (i, stop) in stops.iter_mut().enumerate() {
            stop.id = StopId(i as u32);
            stop.node = self
                .network
                .snap_to_node(stop.pos)
                .ok_or_else(|| SimError::Config("road network has no nodes".into()))?;
        }

        // ── Fleet ─────────────────────────────────────────────────────────
        let capacity = self.config.vehicle_capacity;
        let vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, spec)| Vehicle::new(VehicleId(i as u16), spec, capacity))
            .collect();
        let strategies = self
            .vehicles
            .iter()
            .map(|spec| spec.strategy.unwrap_or(self.strategy).into_strategy())
            .collect();

        Ok(Simulation::assemble(
            self.config,
            self.network,
            self.router,
            stops,
            vehicles,
            strategies,
            self.active,
        ))
    }
}
