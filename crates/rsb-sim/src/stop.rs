//! Passenger stops.

use rsb_core::{Bounds, NodeId, Point, SimRng, StopId};

/// A synthetic pickup point with a crowd of waiting passengers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub id: StopId,
    pub pos: Point,
    /// Nearest road node, filled in when the simulation is built.
    pub node: NodeId,
    /// Passengers present when the session started.
    pub initial_passengers: u32,
    /// Passengers still waiting.  After a visit this holds whoever did not
    /// fit on the vehicle.
    pub waiting: u32,
    /// Set once a vehicle has visited the stop.
    pub picked: bool,
}

impl Stop {
    pub fn new(id: StopId, pos: Point, passengers: u32) -> Self {
        Self {
            id,
            pos,
            node: NodeId::INVALID,
            initial_passengers: passengers,
            waiting: passengers,
            picked: false,
        }
    }

    /// Restore the session-start state.
    pub fn reset(&mut self) {
        self.waiting = self.initial_passengers;
        self.picked = false;
    }
}

/// Scatter `count` stops uniformly over `bounds`, each with
/// `1..=max_passengers` waiting passengers.
pub fn generate_stops(count: usize, bounds: Bounds, max_passengers: u32, rng: &mut SimRng) -> Vec<Stop> {
    let max_passengers = max_passengers.max(1);
    (0..count)
        .map(|i| {
            let pos = Point::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
            );
            Stop::new(StopId(i as u32), pos, rng.gen_range(1..=max_passengers))
        })
        .collect()
}
