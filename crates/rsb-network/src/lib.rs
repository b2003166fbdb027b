//! `rsb-network`: road network, snapping, and shortest paths.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`          |
//! | [`grid`]    | `GridConfig`, `generate_grid` (jittered grid + shortcuts)   |
//! | [`apsp`]    | `ShortestPaths`: Floyd–Warshall distance/next-hop tables   |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Floyd–Warshall row relaxation on Rayon.                   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `GridConfig`.        |

pub mod apsp;
pub mod error;
pub mod grid;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use apsp::ShortestPaths;
pub use error::{NetworkError, NetworkResult};
pub use grid::{GridConfig, generate_grid};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use router::{DijkstraRouter, Route, Router};
