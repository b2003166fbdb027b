//! Session-wide running totals.

use std::fmt;

/// Totals accumulated since the session started (or was last reset).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionStats {
    /// Ticks processed.
    pub ticks: u64,
    /// Distance travelled by all vehicles, in canvas units.
    pub distance: f64,
    pub passengers_picked: u64,
    pub stops_visited: u64,
    /// Passengers still waiting at visited stops because the vehicle was full.
    pub left_behind: u64,
}

impl SessionStats {
    /// Passengers picked up per 100 distance units; 0 before any movement.
    pub fn efficiency(&self) -> f64 {
        if self.distance > 0.0 {
            self.passengers_picked as f64 / self.distance * 100.0
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks, {:.1} units, {} passengers from {} stops ({} left behind), efficiency {:.2}",
            self.ticks,
            self.distance,
            self.passengers_picked,
            self.stops_visited,
            self.left_behind,
            self.efficiency(),
        )
    }
}
