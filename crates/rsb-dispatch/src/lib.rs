//! `rsb-dispatch`: choosing the next stop for a vehicle.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`candidate`] | `Candidate`: one assignable stop as seen from a vehicle  |
//! | [`strategy`]  | `DispatchStrategy` trait and the four built-in strategies |
//! | [`kind`]      | `StrategyKind`: name-addressable strategy selector       |
//! | [`error`]     | `DispatchError`, `DispatchResult<T>`                      |
//!
//! # Contract
//!
//! The simulation builds the candidate list (un-picked, unreserved, reachable
//! stops, sorted by `StopId`) and asks the vehicle's strategy for one of them.
//! Strategies never see the network; everything they need is precomputed in
//! the [`Candidate`]s.  Ties always resolve to the earliest candidate, so only
//! [`WeightedRandom`] depends on the RNG.

pub mod candidate;
pub mod error;
pub mod kind;
pub mod strategy;


pub use candidate::Candidate;
pub use error::{DispatchError, DispatchResult};
pub use kind::StrategyKind;
pub use strategy::{BestRatio, DispatchStrategy, MostPassengers, NearestFirst, WeightedRandom};
