//! Candidate stops offered to a strategy.

use rsb_core::StopId;

/// One stop a vehicle could be sent to, with its cost precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub stop: StopId,
    /// Passengers currently waiting at the stop.
    pub passengers: u32,
    /// Road distance from the vehicle's snapped node to the stop's snapped
    /// node.  Always finite: unreachable stops are never offered.
    pub road_distance: f32,
}

impl Candidate {
    pub fn new(stop: StopId, passengers: u32, road_distance: f32) -> Self {
        Self { stop, passengers, road_distance }
    }

    /// Passengers per unit of road distance.  A zero distance counts as 1 so
    /// a stop at the vehicle's own node scores its passenger count.
    #[inline]
    pub fn ratio(&self) -> f32 {
        let d = if self.road_distance > 0.0 { self.road_distance } else { 1.0 };
        self.passengers as f32 / d
    }

    /// Sampling weight for [`WeightedRandom`](crate::WeightedRandom):
    /// grows with passengers, shrinks with distance.
    #[inline]
    pub fn weight(&self) -> f64 {
        (self.passengers as f64 + 1.0) / (self.road_distance as f64 + 1.0)
    }
}
