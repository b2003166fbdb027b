//! Per-vehicle movement and load state.

use std::collections::VecDeque;

use rsb_core::{Bounds, Point, SimRng, StopId, VehicleId};
use rsb_dispatch::StrategyKind;

/// What a vehicle is doing this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleStatus {
    /// No target; will ask its strategy for one next tick.
    #[default]
    Idle,
    /// Following a path to `Vehicle::target`.
    EnRoute,
    /// At capacity; no longer dispatched.
    Full,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Idle    => "idle",
            VehicleStatus::EnRoute => "en-route",
            VehicleStatus::Full    => "full",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input description of one vehicle for [`SimBuilder`](crate::SimBuilder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    pub start: Point,
    /// Display name, e.g. the operating sacco and plate.
    pub label: String,
    /// Overrides the run-wide strategy for this vehicle.
    pub strategy: Option<StrategyKind>,
}

impl VehicleSpec {
    pub fn new(start: Point) -> Self {
        Self { start, label: String::new(), strategy: None }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn strategy(mut self, kind: StrategyKind) -> Self {
        self.strategy = Some(kind);
        self
    }
}

/// Place `count` vehicles uniformly at random on the canvas.
pub fn random_vehicles(count: usize, bounds: Bounds, rng: &mut SimRng) -> Vec<VehicleSpec> {
    (0..count)
        .map(|i| {
            let start = Point::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
            );
            VehicleSpec::new(start).label(format!("bus-{i}"))
        })
        .collect()
}

/// A simulated vehicle.
///
/// Movement follows a polyline of `waypoints`; the vehicle covers a fixed
/// distance per tick and may pass several waypoints in one tick.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id:       VehicleId,
    pub label:    String,
    pub pos:      Point,
    /// Session-start position, restored by a reset.
    pub start:    Point,
    pub capacity: u32,
    /// Passengers on board.  Never exceeds `capacity`.
    pub load:     u32,
    pub status:   VehicleStatus,
    /// Stop currently being driven to.
    pub target:   Option<StopId>,
    /// Remaining polyline points, nearest first.
    pub waypoints: VecDeque<Point>,

    // ── Per-vehicle totals ────────────────────────────────────────────────
    pub distance:          f32,
    pub passengers_picked: u32,
    pub stops_visited:     u32,
}

impl Vehicle {
    pub fn new(id: VehicleId, spec: &VehicleSpec, capacity: u32) -> Self {
        Self {
            id,
            label:             spec.label.clone(),
            pos:               spec.start,
            start:             spec.start,
            capacity,
            load:              0,
            status:            VehicleStatus::Idle,
            target:            None,
            waypoints:         VecDeque::new(),
            distance:          0.0,
            passengers_picked: 0,
            stops_visited:     0,
        }
    }

    #[inline]
    pub fn free_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.load)
    }

    #[inline]
    pub fn is_en_route(&self) -> bool {
        self.status == VehicleStatus::EnRoute
    }

    #[inline]
    pub fn needs_target(&self) -> bool {
        self.status == VehicleStatus::Idle
    }

    /// Start driving to `stop` along `waypoints`.
    pub fn begin_trip(&mut self, stop: StopId, waypoints: VecDeque<Point>) {
        self.target = Some(stop);
        self.waypoints = waypoints;
        self.status = VehicleStatus::EnRoute;
    }

    /// Move up to `speed` units along the remaining polyline.
    ///
    /// Returns the distance covered and whether the final waypoint has been
    /// reached.
    pub fn advance(&mut self, speed: f32) -> (f32, bool) {
        let mut budget = speed;
        let mut moved = 0.0;
        while budget > 0.0 {
            let Some(&next) = self.waypoints.front() else { break };
            let (pos, covered) = self.pos.move_towards(next, budget);
            self.pos = pos;
            moved += covered;
            budget -= covered;
            if pos == next {
                self.waypoints.pop_front();
            } else {
                break;
            }
        }
        self.distance += moved;
        (moved, self.waypoints.is_empty())
    }

    /// Board up to `waiting` passengers and finish the trip.
    ///
    /// Returns the number boarded: `min(waiting, capacity - load)`.
    pub fn board(&mut self, waiting: u32) -> u32 {
        let boarded = waiting.min(self.free_seats());
        self.load += boarded;
        self.passengers_picked += boarded;
        self.stops_visited += 1;
        self.target = None;
        self.waypoints.clear();
        self.status = if self.free_seats() == 0 {
            VehicleStatus::Full
        } else {
            VehicleStatus::Idle
        };
        boarded
    }

    /// Drop the current target without visiting it.
    pub fn abandon_trip(&mut self) -> Option<StopId> {
        self.waypoints.clear();
        if self.status == VehicleStatus::EnRoute {
            self.status = VehicleStatus::Idle;
        }
        self.target.take()
    }

    /// Restore the session-start state.
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.load = 0;
        self.status = VehicleStatus::Idle;
        self.target = None;
        self.waypoints.clear();
        self.distance = 0.0;
        self.passengers_picked = 0;
        self.stops_visited = 0;
    }
}
