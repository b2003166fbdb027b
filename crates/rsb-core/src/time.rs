//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! animation frame of the sandbox: vehicles move `vehicle_speed` canvas units
//! per tick.  There is no wall-clock mapping.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (saturating).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

/// Same as [`Tick::since`]: zero when `rhs` is later.
impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick of a session.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0 (session reset).
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Loaded from a JSON scenario file by the CLI and passed to the simulation
/// builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Hard cap on the session length.  The run pauses with `TickLimit`
    /// when reached.
    pub max_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Canvas units a vehicle covers per tick.
    pub vehicle_speed: f32,

    /// Passenger capacity of every vehicle.
    pub vehicle_capacity: u32,

    /// Emit a vehicle snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Reject configurations the tick loop cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.vehicle_speed.is_finite() && self.vehicle_speed > 0.0) {
            return Err(CoreError::Config(format!(
                "vehicle_speed must be positive, got {}",
                self.vehicle_speed
            )));
        }
        if self.vehicle_capacity == 0 {
            return Err(CoreError::Config("vehicle_capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` when a snapshot is due at `tick`.
    #[inline]
    pub fn snapshot_due(&self, tick: Tick) -> bool {
        self.snapshot_interval_ticks > 0 && tick.0 % self.snapshot_interval_ticks == 0
    }
}

impl Default for SimConfig {
    /// Sandbox defaults: speed 2 units/tick, 50-seat vehicles.
    fn default() -> Self {
        Self {
            max_ticks:               20_000,
            seed:                    42,
            vehicle_speed:           2.0,
            vehicle_capacity:        50,
            snapshot_interval_ticks: 10,
        }
    }
}
