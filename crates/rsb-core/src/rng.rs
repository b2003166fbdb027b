//! Seeded random sources.
//!
//! `SimRng` drives scenario generation (grid jitter, shortcut roads, stop
//! placement, fleet placement); each of those draws from its own
//! [`child`](SimRng::child) so the parts stay independent of each other.
//!
//! `VehicleRng` is handed to dispatch strategies.  Vehicle `v` of a run with
//! seed `s` is seeded with `s ^ (v * φ64)`, where `φ64` is the 64-bit
//! fractional golden ratio; appending a vehicle leaves the draws of the
//! existing fleet unchanged.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Random source owned by one vehicle for the length of a session.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    pub fn new(seed: u64, vehicle: VehicleId) -> Self {
        VehicleRng(SmallRng::seed_from_u64(seed ^ u64::from(vehicle.0).wrapping_mul(GOLDEN_GAMMA)))
    }

    /// The underlying generator, for `rand` distributions such as
    /// `WeightedIndex`.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Scenario-level random source.  Not shared across threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent generator tagged by `stream`.
    ///
    /// Advances `self` by one draw.
    pub fn child(&mut self, stream: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ stream.wrapping_mul(GOLDEN_GAMMA);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`, clamped to `0..=1`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
