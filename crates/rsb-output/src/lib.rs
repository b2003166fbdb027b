//! `rsb-output`: session output writers for route_sandbox.
//!
//! | Item                    | Files created                                                  |
//! |-------------------------|----------------------------------------------------------------|
//! | [`CsvWriter`]           | `vehicle_snapshots.csv`, `tick_summaries.csv`, `pickups.csv`   |
//! | [`export_network_json`] | one JSON file with nodes, roads and stops                      |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `rsb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rsb_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod network;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use network::{export_network_json, network_json};
pub use observer::SimOutputObserver;
pub use row::{PickupRow, TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
