//! All-pairs shortest paths via Floyd–Warshall.
//!
//! # Layout
//!
//! Two dense `n × n` row-major tables:
//!
//! - `dist[i * n + j]`: shortest known distance `i → j`, `f32::INFINITY` if
//!   unreachable.
//! - `next[i * n + j]`: first hop on the shortest path `i → j`,
//!   `NodeId::INVALID` if unreachable.
//!
//! Paths are reconstructed by following `next` until the destination is
//! reached.  Memory is `O(n²)` and construction `O(n³)`, which is fine for
//! sandbox networks of a few hundred nodes.
//!
//! # Tie-breaking
//!
//! Relaxation only replaces a distance when the candidate is strictly
//! shorter, so among equal-length paths the one discovered first (lowest
//! intermediate `k`) is kept.

use rsb_core::NodeId;
use tracing::info;

use crate::RoadNetwork;

/// Precomputed shortest-path tables for a [`RoadNetwork`].
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    n:    usize,
    dist: Vec<f32>,
    next: Vec<NodeId>,
}

impl ShortestPaths {
    /// Run Floyd–Warshall over `network`.
    pub fn compute(network: &RoadNetwork) -> Self {
        let n = network.node_count();
        let mut dist = vec![f32::INFINITY; n * n];
        let mut next = vec![NodeId::INVALID; n * n];

        for i in 0..n {
            dist[i * n + i] = 0.0;
            next[i * n + i] = NodeId(i as u32);
        }
        for e in 0..network.edge_count() {
            let u = network.edge_from[e].index();
            let v = network.edge_to[e];
            let w = network.edge_length[e];
            if w < dist[u * n + v.index()] {
                dist[u * n + v.index()] = w;
                next[u * n + v.index()] = v;
            }
        }

        for k in 0..n {
            // Row k is fixed during round k: dist[k][k] = 0 means no entry of
            // row k can improve through k itself.
            let row_k: Vec<f32> = dist[k * n..(k + 1) * n].to_vec();
            relax_round(&mut dist, &mut next, &row_k, k, n);
        }

        let paths = Self { n, dist, next };
        info!(
            nodes = n,
            reachable_pairs = paths.reachable_pairs().count(),
            "all-pairs shortest paths computed"
        );
        paths
    }

    /// Number of nodes covered by the tables.
    pub fn node_count(&self) -> usize {
        self.n
    }

    #[inline]
    fn in_range(&self, node: NodeId) -> bool {
        node.index() < self.n
    }

    /// Shortest distance `from → to`, or `None` if unreachable or either id is
    /// out of range.
    #[inline]
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<f32> {
        if !self.in_range(from) || !self.in_range(to) {
            return None;
        }
        let d = self.dist[from.index() * self.n + to.index()];
        d.is_finite().then_some(d)
    }

    #[inline]
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> bool {
        self.distance(from, to).is_some()
    }

    /// First hop on the shortest path `from → to`.
    #[inline]
    pub fn next_hop(&self, from: NodeId, to: NodeId) -> Option<NodeId> {
        if !self.in_range(from) || !self.in_range(to) {
            return None;
        }
        let hop = self.next[from.index() * self.n + to.index()];
        hop.is_valid().then_some(hop)
    }

    /// Node sequence of the shortest path, both endpoints included.
    ///
    /// `Some(vec![from])` when `from == to`; `None` when unreachable.
    pub fn path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        self.distance(from, to)?;
        let mut path = vec![from];
        let mut cur = from;
        while cur != to {
            cur = self.next_hop(cur, to)?;
            path.push(cur);
            // A consistent table never revisits a node; guard against loops.
            if path.len() > self.n {
                return None;
            }
        }
        Some(path)
    }

    /// Every ordered pair `(i, j)`, `i != j`, with a finite distance.
    pub fn reachable_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId, f32)> + '_ {
        let n = self.n;
        self.dist.iter().enumerate().filter_map(move |(idx, &d)| {
            let (i, j) = (idx / n, idx % n);
            (i != j && d.is_finite()).then(|| (NodeId(i as u32), NodeId(j as u32), d))
        })
    }
}

/// Relax one row against intermediate node `k`.
#[inline]
fn relax_row(row: &mut [f32], next_row: &mut [NodeId], row_k: &[f32], k: usize) {
    let d_ik = row[k];
    if !d_ik.is_finite() {
        return;
    }
    let hop = next_row[k];
    for (j, &d_kj) in row_k.iter().enumerate() {
        let candidate = d_ik + d_kj;
        if candidate < row[j] {
            row[j] = candidate;
            next_row[j] = hop;
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn relax_round(dist: &mut [f32], next: &mut [NodeId], row_k: &[f32], k: usize, n: usize) {
    if n == 0 {
        return;
    }
    for (row, next_row) in dist.chunks_mut(n).zip(next.chunks_mut(n)) {
        relax_row(row, next_row, row_k, k);
    }
}

#[cfg(feature = "parallel")]
fn relax_round(dist: &mut [f32], next: &mut [NodeId], row_k: &[f32], k: usize, n: usize) {
    use rayon::prelude::*;

    if n == 0 {
        return;
    }
    dist.par_chunks_mut(n)
        .zip(next.par_chunks_mut(n))
        .for_each(|(row, next_row)| relax_row(row, next_row, row_k, k));
}
