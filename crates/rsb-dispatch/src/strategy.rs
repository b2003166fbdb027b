//! The `DispatchStrategy` trait and the four built-in strategies.

use rand::distributions::{Distribution, WeightedIndex};

use rsb_core::{StopId, VehicleId, VehicleRng};

use crate::Candidate;

/// Pluggable next-stop selection.
///
/// # Thread safety
///
/// Strategies are shared by every vehicle of a run and hold no mutable
/// state; per-vehicle randomness comes in through `rng`.
pub trait DispatchStrategy: Send + Sync {
    /// Pick one of `candidates`, or `None` if the slice is empty.
    ///
    /// `candidates` is sorted by `StopId`; deterministic strategies return
    /// the first candidate among equals.
    fn select(
        &self,
        vehicle:    VehicleId,
        candidates: &[Candidate],
        rng:        &mut VehicleRng,
    ) -> Option<StopId>;

    /// Short identifier used in logs and output files.
    fn name(&self) -> &'static str;
}

/// First candidate that is strictly better than every earlier one under
/// `better`.
fn first_best<F>(candidates: &[Candidate], better: F) -> Option<StopId>
where
    F: Fn(&Candidate, &Candidate) -> bool,
{
    let mut best: Option<&Candidate> = None;
    for c in candidates {
        if best.is_none_or(|b| better(c, b)) {
            best = Some(c);
        }
    }
    best.map(|c| c.stop)
}

// ── NearestFirst ──────────────────────────────────────────────────────────────

/// Minimum road distance from the vehicle's current position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestFirst;

impl DispatchStrategy for NearestFirst {
    fn select(&self, _: VehicleId, candidates: &[Candidate], _: &mut VehicleRng) -> Option<StopId> {
        first_best(candidates, |c, b| c.road_distance < b.road_distance)
    }

    fn name(&self) -> &'static str {
        "nearest"
    }
}

// ── MostPassengers ────────────────────────────────────────────────────────────

/// Largest waiting crowd, regardless of distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostPassengers;

impl DispatchStrategy for MostPassengers {
    fn select(&self, _: VehicleId, candidates: &[Candidate], _: &mut VehicleRng) -> Option<StopId> {
        first_best(candidates, |c, b| c.passengers > b.passengers)
    }

    fn name(&self) -> &'static str {
        "most-passengers"
    }
}

// ── BestRatio ─────────────────────────────────────────────────────────────────

/// Highest passengers-per-distance ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestRatio;

impl DispatchStrategy for BestRatio {
    fn select(&self, _: VehicleId, candidates: &[Candidate], _: &mut VehicleRng) -> Option<StopId> {
        first_best(candidates, |c, b| c.ratio() > b.ratio())
    }

    fn name(&self) -> &'static str {
        "best-ratio"
    }
}

// ── WeightedRandom ────────────────────────────────────────────────────────────

/// Random pick with probability proportional to [`Candidate::weight`].
///
/// Falls back to [`BestRatio`] if the weights cannot form a distribution
/// (all zero or non-finite).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRandom;

impl DispatchStrategy for WeightedRandom {
    fn select(
        &self,
        vehicle:    VehicleId,
        candidates: &[Candidate],
        rng:        &mut VehicleRng,
    ) -> Option<StopId> {
        if candidates.is_empty() {
            return None;
        }
        match WeightedIndex::new(candidates.iter().map(Candidate::weight)) {
            Ok(dist) => Some(candidates[dist.sample(rng.inner())].stop),
            Err(_) => BestRatio.select(vehicle, candidates, rng),
        }
    }

    fn name(&self) -> &'static str {
        "weighted-random"
    }
}
