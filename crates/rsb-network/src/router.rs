//! Routing trait and its two implementations.
//!
//! # Pluggability
//!
//! The simulation asks for paths through the [`Router`] trait.
//! [`ShortestPaths`] answers from its precomputed Floyd–Warshall tables (the
//! default; one `O(n³)` build, then `O(path)` queries).  [`DijkstraRouter`]
//! searches on demand and serves as an independent cross-check.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rsb_core::NodeId;

use crate::{NetworkError, NetworkResult, RoadNetwork, ShortestPaths};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes to visit in order, both endpoints included.
    pub nodes: Vec<NodeId>,
    /// Sum of edge weights along `nodes`.
    pub distance: f32,
}

impl Route {
    /// `true` if source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router: Send + Sync {
    /// Shortest route from `from` to `to`.
    ///
    /// `from == to` yields a single-node route of distance 0.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> NetworkResult<Route>;

    /// Shortest distance only.  Override when it is cheaper than a full route.
    fn distance(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Option<f32> {
        self.route(network, from, to).ok().map(|r| r.distance)
    }
}

impl Router for ShortestPaths {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> NetworkResult<Route> {
        check_nodes(network, from, to)?;
        let distance = ShortestPaths::distance(self, from, to)
            .ok_or(NetworkError::NoRoute { from, to })?;
        let nodes = self.path(from, to).ok_or(NetworkError::NoRoute { from, to })?;
        Ok(Route { nodes, distance })
    }

    fn distance(&self, _network: &RoadNetwork, from: NodeId, to: NodeId) -> Option<f32> {
        ShortestPaths::distance(self, from, to)
    }
}

fn check_nodes(network: &RoadNetwork, from: NodeId, to: NodeId) -> NetworkResult<()> {
    for node in [from, to] {
        if !network.contains(node) {
            return Err(NetworkError::NodeNotFound(node));
        }
    }
    Ok(())
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR graph using `edge_length` as cost.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> NetworkResult<Route> {
        check_nodes(network, from, to)?;
        dijkstra(network, from, to)
    }
}

/// Min-heap entry.  Edge lengths are finite and non-negative, so
/// `total_cmp` gives the numeric order; `NodeId` breaks ties.
#[derive(Copy, Clone, PartialEq)]
struct HeapEntry {
    cost: f32,
    node: NodeId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> NetworkResult<Route> {
    if from == to {
        return Ok(Route { nodes: vec![from], distance: 0.0 });
    }

    let n = network.node_count();
    let mut dist = vec![f32::INFINITY; n];
    // prev[v] = node that reached v; INVALID for unreached nodes.
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry { cost: 0.0, node: from });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, from, to, cost));
        }
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        for e in network.out_edges(node) {
            let neighbor = network.edge_to[e];
            let new_cost = cost + network.edge_length[e];
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(HeapEntry { cost: new_cost, node: neighbor });
            }
        }
    }

    Err(NetworkError::NoRoute { from, to })
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId, distance: f32) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes, distance }
}
