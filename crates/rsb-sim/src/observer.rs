//! Simulation observer trait for progress reporting and data collection.

use rsb_core::{NodeId, StopId, Tick, VehicleId};

use crate::{SessionStats, StopReason, Stop, Vehicle};

/// A vehicle was assigned a new target stop.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchEvent {
    pub tick:          Tick,
    pub vehicle:       VehicleId,
    pub stop:          StopId,
    /// Snapped node the route starts from.
    pub from_node:     NodeId,
    /// Road distance between the snapped nodes.
    pub road_distance: f32,
    /// Strategy that made the choice.
    pub strategy:      &'static str,
}

/// A vehicle reached its target and boarded passengers.
#[derive(Clone, Debug, PartialEq)]
pub struct PickupEvent {
    pub tick:        Tick,
    pub vehicle:     VehicleId,
    pub stop:        StopId,
    pub boarded:     u32,
    pub left_behind: u32,
    /// Vehicle load after boarding.
    pub load:        u32,
}

/// Callbacks invoked by [`Simulation::step`][crate::Simulation::step] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_pickup(&mut self, event: &PickupEvent) {
///         println!("{}: {} boarded {} at {}", event.tick, event.vehicle, event.boarded, event.stop);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each processed tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_dispatch(&mut self, _event: &DispatchEvent) {}

    fn on_pickup(&mut self, _event: &PickupEvent) {}

    /// Called at the end of each processed tick with the running totals.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &SessionStats) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to the fleet and the stops.
    fn on_snapshot(&mut self, _tick: Tick, _vehicles: &[Vehicle], _stops: &[Stop]) {}

    /// Called once when the simulation pauses itself.
    fn on_pause(&mut self, _tick: Tick, _reason: StopReason, _stats: &SessionStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
