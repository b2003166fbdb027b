//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays (`edge_from`, `edge_to`, `edge_length`) are sorted by source
//! node.  Roads are undirected, so every road is stored as two directed
//! edges.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a canvas point to the nearest `NodeId`.
//! [`RoadNetwork::snap_to_node`] and the brute-force
//! [`RoadNetwork::snap_linear`] always return the same node: ties go to the
//! lowest index in both.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashSet;

use rsb_core::{NodeId, Point};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    pos: Point,
    id:  NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.pos.x, self.pos.y])
    }
}

impl PointDistance for NodeEntry {
    /// Same operand order as `snap_linear` so both paths produce bit-identical
    /// distances and therefore identical tie-breaks.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        Point::new(point[0], point[1]).distance_sq(self.pos)
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected road graph in CSR format plus a spatial index for snapping.
///
/// Do not construct directly; use [`RoadNetworkBuilder`] or
/// [`generate_grid`](crate::generate_grid).
#[derive(Clone)]
pub struct RoadNetwork {
    /// Canvas position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each directed edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each directed edge.
    pub edge_to: Vec<NodeId>,

    /// Edge weight: Euclidean length unless overridden at build time.
    pub edge_length: Vec<f32>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// A network with no nodes.  Every snap returns `None`.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of **directed** edges (twice the number of roads).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the edge indices of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    /// Nodes directly connected to `node`.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edge_to[e])
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// `true` if a directed edge `from → to` exists.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.contains(from) && self.neighbors(from).any(|n| n == to)
    }

    /// Length of the shortest parallel edge `from → to`, if any.
    pub fn edge_length_between(&self, from: NodeId, to: NodeId) -> Option<f32> {
        if !self.contains(from) {
            return None;
        }
        self.out_edges(from)
            .filter(|&e| self.edge_to[e] == to)
            .map(|e| self.edge_length[e])
            .min_by(f32::total_cmp)
    }

    /// Each undirected road once, as `(a, b, length)` with `a < b`.
    pub fn roads(&self) -> impl Iterator<Item = (NodeId, NodeId, f32)> + '_ {
        (0..self.edge_count())
            .filter(|&e| self.edge_from[e] < self.edge_to[e])
            .map(|e| (self.edge_from[e], self.edge_to[e], self.edge_length[e]))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node to `point` through the R-tree.
    ///
    /// Among equidistant nodes the lowest `NodeId` wins.  Returns `None` only
    /// if the network has no nodes.
    pub fn snap_to_node(&self, point: Point) -> Option<NodeId> {
        let query = [point.x, point.y];
        let mut iter = self.spatial_idx.nearest_neighbor_iter(&query);
        let first = iter.next()?;
        let best = first.distance_2(&query);
        let tied = iter
            .take_while(|e| e.distance_2(&query) == best)
            .map(|e| e.id)
            .min();
        Some(tied.map_or(first.id, |t| t.min(first.id)))
    }

    /// Nearest node to `point` by linear scan over squared distance.
    ///
    /// The first-encountered (lowest) index wins ties.
    pub fn snap_linear(&self, point: Point) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for (i, &pos) in self.node_pos.iter().enumerate() {
            let d = point.distance_sq(pos);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((NodeId(i as u32), d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Up to `k` nearest nodes to `point`, by ascending distance.
    pub fn k_nearest_nodes(&self, point: Point, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[point.x, point.y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rsb_core::Point;
/// use rsb_network::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(Point::new(0.0, 0.0));
/// let c = b.add_node(Point::new(3.0, 4.0));
/// b.add_road(a, c); // length 5.0
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<Point>,
    raw_edges: Vec<RawEdge>,
    seen:      FxHashSet<(u32, u32)>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    length: f32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            raw_edges: Vec::new(),
            seen:      FxHashSet::default(),
        }
    }

    /// Pre-allocate for the expected number of nodes and directed edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            seen:      FxHashSet::default(),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge with an explicit length.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length: f32) {
        self.seen.insert((from.0, to.0));
        self.raw_edges.push(RawEdge { from, to, length });
    }

    /// Add an undirected road whose weight is the Euclidean distance between
    /// the endpoints.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) {
        let length = self.node_pos(a).distance(self.node_pos(b));
        self.add_road_with_length(a, b, length);
    }

    /// Add an undirected road with an explicit weight.
    pub fn add_road_with_length(&mut self, a: NodeId, b: NodeId, length: f32) {
        self.add_directed_edge(a, b, length);
        self.add_directed_edge(b, a, length);
    }

    /// `true` if an edge `a → b` has already been added.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.seen.contains(&(a.0, b.0))
    }

    pub fn node_pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's edges, which in
        // turn fixes Dijkstra's tie-breaking.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f32>    = raw.iter().map(|e| e.length).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { pos, id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
