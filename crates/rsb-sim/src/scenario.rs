//! Seeded scenario generation: network, stops and fleet from one config.

use rsb_core::{SimConfig, SimRng};
use rsb_dispatch::StrategyKind;
use rsb_network::{GridConfig, RoadNetwork, ShortestPaths, generate_grid};
use tracing::info;

use crate::{SimBuilder, SimError, SimResult, Simulation, Stop, VehicleSpec, generate_stops, random_vehicles};

/// Everything needed to generate and run one sandbox session.
///
/// Loaded from JSON by the CLI (with the `serde` feature); every field has a
/// default so partial files are accepted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    pub grid:           GridConfig,
    pub sim:            SimConfig,
    /// Number of passenger stops.
    pub stops:          usize,
    /// Each stop starts with `1..=max_passengers` waiting.
    pub max_passengers: u32,
    pub vehicles:       usize,
    pub strategy:       StrategyKind,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            grid:           GridConfig::default(),
            sim:            SimConfig::default(),
            stops:          20,
            max_passengers: 20,
            vehicles:       3,
            strategy:       StrategyKind::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> SimResult<()> {
        self.grid.validate()?;
        self.sim.validate()?;
        if self.vehicles == 0 {
            return Err(SimError::NoVehicles);
        }
        if self.max_passengers == 0 {
            return Err(SimError::Config("max_passengers must be at least 1".into()));
        }
        Ok(())
    }

    /// Generate the network, its shortest paths, the stops and the fleet.
    ///
    /// Each part draws from its own child RNG of `sim.seed`, so changing the
    /// stop count does not move the roads.  Stops come back snapped to their
    /// nearest node.
    pub fn generate(&self) -> SimResult<Scenario> {
        self.validate()?;
        let mut rng = SimRng::new(self.sim.seed);
        let mut network_rng = rng.child(1);
        let mut stop_rng = rng.child(2);
        let mut fleet_rng = rng.child(3);

        let network = generate_grid(&self.grid, &mut network_rng)?;
        let paths = ShortestPaths::compute(&network);
        let bounds = self.grid.bounds;
        let mut stops = generate_stops(self.stops, bounds, self.max_passengers, &mut stop_rng);
        for stop in &mut stops {
            stop.node = network
                .snap_to_node(stop.pos)
                .ok_or_else(|| SimError::Config("road network has no nodes".into()))?;
        }
        let vehicles = random_vehicles(self.vehicles, bounds, &mut fleet_rng);

        info!(
            seed = self.sim.seed,
            nodes = network.node_count(),
            roads = network.edge_count() / 2,
            stops = stops.len(),
            vehicles = vehicles.len(),
            "scenario generated"
        );
        Ok(Scenario { config: self.clone(), network, paths, stops, vehicles })
    }
}

/// A generated scenario, reusable across strategies.
#[derive(Clone)]
pub struct Scenario {
    pub config:   ScenarioConfig,
    pub network:  RoadNetwork,
    pub paths:    ShortestPaths,
    pub stops:    Vec<Stop>,
    pub vehicles: Vec<VehicleSpec>,
}

impl Scenario {
    /// A fresh simulation using the configured strategy.
    pub fn simulation(&self) -> SimResult<Simulation> {
        self.simulation_with(self.config.strategy)
    }

    /// A fresh simulation of the same network, stops and fleet under `kind`.
    pub fn simulation_with(&self, kind: StrategyKind) -> SimResult<Simulation> {
        SimBuilder::new(self.config.sim.clone(), self.network.clone(), self.paths.clone())
            .bounds(self.config.grid.bounds)
            .stops(self.stops.clone())
            .vehicles(self.vehicles.clone())
            .strategy(kind)
            .build()
    }
}
