//! The `Simulation` struct and its tick loop.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use rsb_core::{Point, SimClock, SimConfig, StopId, Tick, VehicleId, VehicleRng};
use rsb_dispatch::{Candidate, DispatchStrategy};
use rsb_network::{RoadNetwork, Router, ShortestPaths};

use crate::{
    DispatchEvent, PickupEvent, SessionStats, SimError, SimObserver, SimResult, Stop, Vehicle,
    VehicleStatus,
};

// ── Control types ─────────────────────────────────────────────────────────────

/// Which vehicles the tick loop moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveVehicles {
    /// Every vehicle, in ascending `VehicleId` order.
    #[default]
    All,
    /// Only this vehicle; the rest stay parked.
    Selected(VehicleId),
}

impl ActiveVehicles {
    #[inline]
    pub fn includes(self, vehicle: VehicleId) -> bool {
        match self {
            ActiveVehicles::All => true,
            ActiveVehicles::Selected(id) => id == vehicle,
        }
    }
}

/// Why a session paused itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Every stop has been visited.
    AllStopsServed,
    /// Un-picked stops remain but no idle vehicle can reach any of them.
    NoReachableStops,
    /// Every active vehicle is at capacity.
    AllVehiclesFull,
    /// `config.max_ticks` reached.
    TickLimit,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::AllStopsServed   => "all-stops-served",
            StopReason::NoReachableStops => "no-reachable-stops",
            StopReason::AllVehiclesFull  => "all-vehicles-full",
            StopReason::TickLimit        => "tick-limit",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single [`Simulation::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    Paused(StopReason),
}

impl StepOutcome {
    #[inline]
    pub fn is_paused(self) -> bool {
        matches!(self, StepOutcome::Paused(_))
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick, for every active vehicle in ascending `VehicleId` order:
///
/// 1. **Dispatch**: an idle vehicle snaps its position to the nearest road
///    node, collects every un-picked, unreserved, reachable stop as a
///    [`Candidate`] and asks its strategy for one.  The chosen stop is
///    reserved and the vehicle gets a polyline: its own position, the node
///    positions along the shortest path, then the stop itself.
/// 2. **Move**: an en-route vehicle covers `config.vehicle_speed` units along
///    the polyline.
/// 3. **Pickup**: on reaching the last waypoint it boards
///    `min(waiting, capacity - load)` passengers and the stop is marked picked.
///
/// The session pauses itself when nothing can make progress; see
/// [`StopReason`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<R: Router = ShortestPaths> {
    pub(crate) config:     SimConfig,
    pub(crate) clock:      SimClock,
    pub(crate) network:    RoadNetwork,
    pub(crate) router:     R,
    pub(crate) stops:      Vec<Stop>,
    pub(crate) vehicles:   Vec<Vehicle>,
    /// Indexed by `VehicleId`.
    pub(crate) strategies: Vec<Box<dyn DispatchStrategy>>,
    pub(crate) rngs:       Vec<VehicleRng>,
    pub(crate) active:     ActiveVehicles,

    /// Stops some vehicle is currently driving to.
    reserved:   FxHashSet<StopId>,
    stats:      SessionStats,
    paused:     Option<StopReason>,
    /// Scratch buffer reused by every dispatch.
    candidates: Vec<Candidate>,
}

impl<R: Router> Simulation<R> {
    pub(crate) fn assemble(
        config:     SimConfig,
        network:    RoadNetwork,
        router:     R,
        stops:      Vec<Stop>,
        vehicles:   Vec<Vehicle>,
        strategies: Vec<Box<dyn DispatchStrategy>>,
        active:     ActiveVehicles,
    ) -> Self {
        let rngs = vehicles.iter().map(|v| VehicleRng::new(config.seed, v.id)).collect();
        Self {
            config,
            clock: SimClock::new(),
            network,
            router,
            stops,
            vehicles,
            strategies,
            rngs,
            active,
            reserved: FxHashSet::default(),
            stats: SessionStats::default(),
            paused: None,
            candidates: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The next tick to be processed.
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> SimResult<&Vehicle> {
        self.vehicles.get(id.index()).ok_or(SimError::UnknownVehicle(id))
    }

    /// Name of the strategy dispatching `id`.
    pub fn strategy_name(&self, id: VehicleId) -> SimResult<&'static str> {
        self.strategies
            .get(id.index())
            .map(|s| s.name())
            .ok_or(SimError::UnknownVehicle(id))
    }

    pub fn active(&self) -> ActiveVehicles {
        self.active
    }

    /// `Some(reason)` once the session has paused itself.
    pub fn paused(&self) -> Option<StopReason> {
        self.paused
    }

    pub fn unpicked_count(&self) -> usize {
        self.stops.iter().filter(|s| !s.picked).count()
    }

    /// `true` if `stop` is the target of some vehicle.
    pub fn is_reserved(&self, stop: StopId) -> bool {
        self.reserved.contains(&stop)
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Change which vehicles are simulated.
    ///
    /// Vehicles that drop out abandon their trip so the target stop becomes
    /// available to the others.  Clears a previous pause.
    pub fn set_active(&mut self, active: ActiveVehicles) -> SimResult<()> {
        if let ActiveVehicles::Selected(id) = active {
            if id.index() >= self.vehicles.len() {
                return Err(SimError::UnknownVehicle(id));
            }
        }
        for vehicle in &mut self.vehicles {
            if active.includes(vehicle.id) {
                continue;
            }
            if let Some(stop) = vehicle.abandon_trip() {
                self.reserved.remove(&stop);
            }
        }
        self.active = active;
        self.paused = None;
        Ok(())
    }

    /// Put vehicles, stops, statistics and the clock back to their
    /// session-start state.  The network and shortest paths are kept.
    pub fn reset_session(&mut self) {
        self.clock.reset();
        self.stats.reset();
        self.reserved.clear();
        self.paused = None;
        for stop in &mut self.stops {
            stop.reset();
        }
        for vehicle in &mut self.vehicles {
            vehicle.reset();
        }
        for (rng, vehicle) in self.rngs.iter_mut().zip(&self.vehicles) {
            *rng = VehicleRng::new(self.config.seed, vehicle.id);
        }
        info!(seed = self.config.seed, "session reset");
    }

    // ── Public run API ────────────────────────────────────────────────────

    /// Step until the session pauses and return why.
    ///
    /// Always terminates: `config.max_ticks` bounds the session.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> StopReason {
        loop {
            if let StepOutcome::Paused(reason) = self.step(observer) {
                return reason;
            }
        }
    }

    /// Run at most `n` ticks; stops early if the session pauses.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> StepOutcome {
        let mut outcome = StepOutcome::Running;
        for _ in 0..n {
            outcome = self.step(observer);
            if outcome.is_paused() {
                break;
            }
        }
        outcome
    }

    /// Process exactly one tick.
    ///
    /// A paused session returns its pause reason without doing anything.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> StepOutcome {
        if let Some(reason) = self.paused {
            return StepOutcome::Paused(reason);
        }
        let now = self.clock.current_tick;
        if now >= self.config.end_tick() {
            return self.pause(StopReason::TickLimit, observer);
        }
        if let Some(reason) = self.idle_reason() {
            return self.pause(reason, observer);
        }

        observer.on_tick_start(now);
        // Vehicles that were en route this tick, freshly dispatched included.
        let mut acted = 0usize;
        for i in 0..self.vehicles.len() {
            if !self.active.includes(self.vehicles[i].id) {
                continue;
            }
            if self.vehicles[i].needs_target() {
                if let Some(event) = self.dispatch(i, now) {
                    observer.on_dispatch(&event);
                }
            }
            if self.vehicles[i].is_en_route() {
                acted += 1;
                if let Some(event) = self.advance(i, now) {
                    observer.on_pickup(&event);
                }
            }
        }

        self.stats.ticks += 1;
        observer.on_tick_end(now, &self.stats);
        if self.config.snapshot_due(now) {
            observer.on_snapshot(now, &self.vehicles, &self.stops);
        }
        self.clock.advance();

        match self.idle_reason() {
            Some(reason) => self.pause(reason, observer),
            None if acted == 0 => self.pause(StopReason::NoReachableStops, observer),
            None => StepOutcome::Running,
        }
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Pick a target for vehicle `i` and start its trip.
    fn dispatch(&mut self, i: usize, now: Tick) -> Option<DispatchEvent> {
        let vehicle = &self.vehicles[i];
        let from = self.network.snap_to_node(vehicle.pos)?;

        self.candidates.clear();
        for stop in &self.stops {
            if stop.picked || self.reserved.contains(&stop.id) {
                continue;
            }
            if let Some(d) = self.router.distance(&self.network, from, stop.node) {
                self.candidates.push(Candidate::new(stop.id, stop.waiting, d));
            }
        }

        let strategy = &self.strategies[i];
        let choice = strategy.select(vehicle.id, &self.candidates, &mut self.rngs[i])?;
        let stop = self.stops.get(choice.index())?;

        let route = match self.router.route(&self.network, from, stop.node) {
            Ok(route) => route,
            Err(e) => {
                warn!(vehicle = %vehicle.id, stop = %choice, error = %e, "target unreachable");
                return None;
            }
        };
        let waypoints = polyline(
            vehicle.pos,
            route.nodes.iter().map(|&n| self.network.position(n)),
            stop.pos,
        );

        let event = DispatchEvent {
            tick:          now,
            vehicle:       vehicle.id,
            stop:          choice,
            from_node:     from,
            road_distance: route.distance,
            strategy:      strategy.name(),
        };
        debug!(
            tick = now.0,
            vehicle = %event.vehicle,
            stop = %choice,
            road_distance = route.distance,
            strategy = event.strategy,
            "dispatched"
        );

        self.reserved.insert(choice);
        self.vehicles[i].begin_trip(choice, waypoints);
        Some(event)
    }

    /// Move vehicle `i`; board passengers if it arrives.
    fn advance(&mut self, i: usize, now: Tick) -> Option<PickupEvent> {
        let vehicle = &mut self.vehicles[i];
        let (moved, arrived) = vehicle.advance(self.config.vehicle_speed);
        self.stats.distance += f64::from(moved);
        if !arrived {
            return None;
        }

        let stop_id = vehicle.target?;
        let stop = self.stops.get_mut(stop_id.index())?;
        let boarded = vehicle.board(stop.waiting);
        stop.waiting -= boarded;
        stop.picked = true;
        self.reserved.remove(&stop_id);

        self.stats.passengers_picked += u64::from(boarded);
        self.stats.stops_visited += 1;
        self.stats.left_behind += u64::from(stop.waiting);

        debug!(
            tick = now.0,
            vehicle = %vehicle.id,
            stop = %stop_id,
            boarded,
            left_behind = stop.waiting,
            load = vehicle.load,
            "pickup"
        );
        if vehicle.status == VehicleStatus::Full {
            debug!(vehicle = %vehicle.id, capacity = vehicle.capacity, "vehicle full");
        }

        Some(PickupEvent {
            tick:        now,
            vehicle:     vehicle.id,
            stop:        stop_id,
            boarded,
            left_behind: stop.waiting,
            load:        vehicle.load,
        })
    }

    /// Pause reason that holds regardless of what the next tick would do.
    fn idle_reason(&self) -> Option<StopReason> {
        if self.unpicked_count() == 0 {
            return Some(StopReason::AllStopsServed);
        }
        let all_full = self
            .vehicles
            .iter()
            .filter(|v| self.active.includes(v.id))
            .all(|v| v.status == VehicleStatus::Full);
        all_full.then_some(StopReason::AllVehiclesFull)
    }

    fn pause<O: SimObserver>(&mut self, reason: StopReason, observer: &mut O) -> StepOutcome {
        let now = self.clock.current_tick;
        self.paused = Some(reason);
        info!(
            tick = now.0,
            reason = %reason,
            distance = self.stats.distance,
            passengers = self.stats.passengers_picked,
            efficiency = self.stats.efficiency(),
            "simulation paused"
        );
        observer.on_pause(now, reason, &self.stats);
        StepOutcome::Paused(reason)
    }
}

/// Waypoints from `start` through `nodes` to `end`, without zero-length legs.
pub(crate) fn polyline(
    start: Point,
    nodes: impl Iterator<Item = Point>,
    end:   Point,
) -> VecDeque<Point> {
    let mut points = VecDeque::new();
    let mut last = start;
    for p in nodes.chain(std::iter::once(end)) {
        if p != last {
            points.push_back(p);
            last = p;
        }
    }
    points
}
