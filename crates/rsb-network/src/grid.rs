//! Synthetic road-network generator.
//!
//! Nodes sit on a `rows × cols` grid over the canvas, each displaced by a
//! random jitter inside its cell.  Every node is joined to its right and
//! lower neighbour; `extra_edges` random node pairs are then connected to
//! create shortcuts.  Road weight is the Euclidean length.

use rsb_core::{Bounds, NodeId, Point, SimRng};
use tracing::debug;

use crate::{NetworkError, NetworkResult, RoadNetwork, RoadNetworkBuilder};

/// Parameters for [`generate_grid`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// Canvas the grid is laid over.
    pub bounds: Bounds,
    /// Maximum displacement as a fraction of the cell size, on each axis.
    /// `0.0` gives a perfectly regular grid; `0.5` lets nodes reach the
    /// cell border.
    pub jitter: f32,
    /// Number of random shortcut attempts.  Self loops and pairs that are
    /// already connected are skipped, so the final count may be lower.
    pub extra_edges: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows:        6,
            cols:        8,
            bounds:      Bounds::default(),
            jitter:      0.3,
            extra_edges: 10,
        }
    }
}

impl GridConfig {
    pub fn node_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn validate(&self) -> NetworkResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(NetworkError::InvalidGrid(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !self.bounds.is_valid() {
            return Err(NetworkError::InvalidGrid(format!(
                "canvas must be positive, got {}x{}",
                self.bounds.width, self.bounds.height
            )));
        }
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return Err(NetworkError::InvalidGrid(format!(
                "jitter must be non-negative, got {}",
                self.jitter
            )));
        }
        Ok(())
    }

    /// Id of the node at grid cell `(row, col)`.
    #[inline]
    pub fn node_at(&self, row: u32, col: u32) -> NodeId {
        NodeId(row * self.cols + col)
    }
}

/// Build a jittered grid network.
///
/// The same `config` and RNG state always produce the same network.
pub fn generate_grid(config: &GridConfig, rng: &mut SimRng) -> NetworkResult<RoadNetwork> {
    config.validate()?;

    let n = config.node_count();
    let grid_roads = (config.rows as usize) * (config.cols as usize - 1)
        + (config.rows as usize - 1) * (config.cols as usize);
    let mut b = RoadNetworkBuilder::with_capacity(n, 2 * (grid_roads + config.extra_edges as usize));

    let cell_w = config.bounds.width / config.cols as f32;
    let cell_h = config.bounds.height / config.rows as f32;
    let max_dx = config.jitter * cell_w;
    let max_dy = config.jitter * cell_h;

    for row in 0..config.rows {
        for col in 0..config.cols {
            let center = Point::new((col as f32 + 0.5) * cell_w, (row as f32 + 0.5) * cell_h);
            let offset = Point::new(jitter(rng, max_dx), jitter(rng, max_dy));
            b.add_node(config.bounds.clamp(Point::new(center.x + offset.x, center.y + offset.y)));
        }
    }

    for row in 0..config.rows {
        for col in 0..config.cols {
            let here = config.node_at(row, col);
            if col + 1 < config.cols {
                b.add_road(here, config.node_at(row, col + 1));
            }
            if row + 1 < config.rows {
                b.add_road(here, config.node_at(row + 1, col));
            }
        }
    }

    let mut shortcuts = 0u32;
    if n >= 2 {
        for _ in 0..config.extra_edges {
            let a = NodeId(rng.gen_range(0..n as u32));
            let c = NodeId(rng.gen_range(0..n as u32));
            if a == c || b.has_edge(a, c) {
                continue;
            }
            b.add_road(a, c);
            shortcuts += 1;
        }
    }

    debug!(
        rows = config.rows,
        cols = config.cols,
        shortcuts,
        "generated grid network"
    );
    Ok(b.build())
}

fn jitter(rng: &mut SimRng, max: f32) -> f32 {
    if max > 0.0 { rng.gen_range(-max..=max) } else { 0.0 }
}
