//! `rsb-sim`: tick loop, vehicles and stops for the route_sandbox dispatch
//! simulator.
//!
//! # Tick loop
//!
//! ```text
//! for each tick until paused:
//!   for each active vehicle, ascending VehicleId:
//!     ① Dispatch  idle: snap position → candidates → strategy.select
//!                 → route → polyline; target stop reserved
//!     ② Move      en route: advance `vehicle_speed` units along polyline
//!     ③ Pickup    last waypoint reached: board min(waiting, free seats)
//!   pause when every stop is picked, every vehicle is full,
//!   or no vehicle was en route this tick
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Floyd–Warshall on Rayon's thread pool.                 |
//! | `serde`    | Serde derives on `ScenarioConfig` and the state types. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rsb_sim::{NoopObserver, ScenarioConfig};
//!
//! let scenario = ScenarioConfig::default().generate()?;
//! let mut sim = scenario.simulation()?;
//! let reason = sim.run(&mut NoopObserver);
//! println!("{reason}: {}", sim.stats());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;
pub mod stats;
pub mod stop;
pub mod vehicle;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{DispatchEvent, NoopObserver, PickupEvent, SimObserver};
pub use scenario::{Scenario, ScenarioConfig};
pub use sim::{ActiveVehicles, Simulation, StepOutcome, StopReason};
pub use stats::SessionStats;
pub use stop::{Stop, generate_stops};
pub use vehicle::{Vehicle, VehicleSpec, VehicleStatus, random_vehicles};
