//! `rsb-core`: foundational types for the `route_sandbox` dispatch simulator.
//!
//! This crate is a dependency of every other `rsb-*` crate.  It has no
//! `rsb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `StopId`, `VehicleId`                       |
//! | [`geo`]         | `Point`, `Bounds` (planar canvas coordinates)         |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Point};
pub use ids::{NodeId, StopId, VehicleId};
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, SimConfig, Tick};
