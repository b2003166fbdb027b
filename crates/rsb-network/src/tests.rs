//! Unit tests for rsb-network.
//!
//! All tests use hand-crafted or seeded synthetic networks.

#[cfg(test)]
mod helpers {
    use rsb_core::{NodeId, Point, SimRng};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Small network with explicit weights.
    ///
    /// Nodes (x, y):
    ///   0:(0,0)  1:(10,0)  2:(20,0)
    ///   3:(0,10)           4:(20,10)
    ///
    /// Roads: 0-1 (10), 1-2 (10), 2-4 (10), 0-3 (50), 3-4 (10)
    ///
    /// Shortest 0→4 is 0→1→2→4 = 30; the detour via 3 costs 60.
    pub fn ring_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(Point::new(0.0, 0.0));
        let n1 = b.add_node(Point::new(10.0, 0.0));
        let n2 = b.add_node(Point::new(20.0, 0.0));
        let n3 = b.add_node(Point::new(0.0, 10.0));
        let n4 = b.add_node(Point::new(20.0, 10.0));

        b.add_road_with_length(n0, n1, 10.0);
        b.add_road_with_length(n1, n2, 10.0);
        b.add_road_with_length(n2, n4, 10.0);
        b.add_road_with_length(n0, n3, 50.0);
        b.add_road_with_length(n3, n4, 10.0);

        (b.build(), [n0, n1, n2, n3, n4])
    }

    /// Random graph with `n` nodes and roughly `density` of all pairs
    /// connected.  May be disconnected.
    pub fn random_graph(n: u32, density: f64, seed: u64) -> RoadNetwork {
        let mut rng = SimRng::new(seed);
        let mut b = RoadNetworkBuilder::new();
        for _ in 0..n {
            b.add_node(Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)));
        }
        for a in 0..n {
            for c in (a + 1)..n {
                if rng.gen_bool(density) {
                    b.add_road(NodeId(a), NodeId(c));
                }
            }
        }
        b.build()
    }

    /// Minimum path weight over all simple paths `from → to`, by DFS.
    pub fn brute_force_shortest(net: &RoadNetwork, from: NodeId, to: NodeId) -> Option<f32> {
        fn dfs(
            net: &RoadNetwork,
            cur: NodeId,
            to: NodeId,
            acc: f32,
            visited: &mut Vec<bool>,
            best: &mut Option<f32>,
        ) {
            if cur == to {
                if best.is_none_or(|b| acc < b) {
                    *best = Some(acc);
                }
                return;
            }
            for e in net.out_edges(cur) {
                let next = net.edge_to[e];
                if visited[next.index()] {
                    continue;
                }
                visited[next.index()] = true;
                dfs(net, next, to, acc + net.edge_length[e], visited, best);
                visited[next.index()] = false;
            }
        }

        let mut visited = vec![false; net.node_count()];
        visited[from.index()] = true;
        let mut best = None;
        dfs(net, from, to, 0.0, &mut visited, &mut best);
        best
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rsb_core::Point;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn road_length_is_euclidean() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(3.0, 4.0));
        b.add_road(a, c);
        let net = b.build();
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.edge_length_between(a, c), Some(5.0));
        assert_eq!(net.edge_length_between(c, a), Some(5.0));
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::ring_network();
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 2);
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 2);
        assert_eq!(net.out_degree(n4), 2);
        for e in net.out_edges(n0) {
            assert_eq!(net.edge_from[e], n0);
        }
    }

    #[test]
    fn has_edge_both_directions() {
        let (net, [n0, n1, _, _, n4]) = super::helpers::ring_network();
        assert!(net.has_edge(n0, n1));
        assert!(net.has_edge(n1, n0));
        assert!(!net.has_edge(n0, n4));
    }

    #[test]
    fn roads_lists_each_road_once() {
        let (net, _) = super::helpers::ring_network();
        assert_eq!(net.roads().count(), 5);
        assert!(net.roads().all(|(a, b, _)| a < b));
    }

    #[test]
    fn builder_tracks_added_edges() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(1.0, 0.0));
        assert!(!b.has_edge(a, c));
        b.add_directed_edge(a, c, 1.0);
        assert!(b.has_edge(a, c));
        assert!(!b.has_edge(c, a));
    }
}

// ── Grid generator ────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use rsb_core::{Bounds, SimRng};
    use crate::{GridConfig, NetworkError, generate_grid};

    #[test]
    fn regular_grid_has_expected_shape() {
        let cfg = GridConfig { rows: 3, cols: 4, jitter: 0.0, extra_edges: 0, ..GridConfig::default() };
        let net = generate_grid(&cfg, &mut SimRng::new(1)).unwrap();
        assert_eq!(net.node_count(), 12);
        // 3 rows × 3 horizontal + 2 × 4 vertical = 17 roads.
        assert_eq!(net.roads().count(), 17);
        // Corner has 2 neighbours, interior has 4.
        assert_eq!(net.out_degree(cfg.node_at(0, 0)), 2);
        assert_eq!(net.out_degree(cfg.node_at(1, 1)), 4);
    }

    #[test]
    fn grid_neighbours_are_right_and_down() {
        let cfg = GridConfig { rows: 2, cols: 2, jitter: 0.0, extra_edges: 0, ..GridConfig::default() };
        let net = generate_grid(&cfg, &mut SimRng::new(1)).unwrap();
        assert!(net.has_edge(cfg.node_at(0, 0), cfg.node_at(0, 1)));
        assert!(net.has_edge(cfg.node_at(0, 0), cfg.node_at(1, 0)));
        assert!(!net.has_edge(cfg.node_at(0, 0), cfg.node_at(1, 1)));
    }

    #[test]
    fn zero_jitter_centres_nodes_in_cells() {
        let cfg = GridConfig {
            rows: 2,
            cols: 2,
            bounds: Bounds::new(100.0, 100.0),
            jitter: 0.0,
            extra_edges: 0,
        };
        let net = generate_grid(&cfg, &mut SimRng::new(0)).unwrap();
        assert_eq!(net.position(cfg.node_at(0, 0)).x, 25.0);
        assert_eq!(net.position(cfg.node_at(1, 1)).y, 75.0);
    }

    #[test]
    fn jittered_nodes_stay_on_canvas() {
        let cfg = GridConfig { jitter: 0.5, ..GridConfig::default() };
        let net = generate_grid(&cfg, &mut SimRng::new(7)).unwrap();
        assert!(net.node_pos.iter().all(|&p| cfg.bounds.contains(p)));
    }

    #[test]
    fn shortcuts_add_roads_and_never_self_loop() {
        let base = GridConfig { extra_edges: 0, ..GridConfig::default() };
        let with = GridConfig { extra_edges: 25, ..GridConfig::default() };
        let plain = generate_grid(&base, &mut SimRng::new(3)).unwrap();
        let extra = generate_grid(&with, &mut SimRng::new(3)).unwrap();
        assert!(extra.roads().count() > plain.roads().count());
        assert!(extra.roads().count() <= plain.roads().count() + 25);
        assert!(extra.roads().all(|(a, b, _)| a != b));
    }

    #[test]
    fn edge_weights_are_euclidean() {
        let net = generate_grid(&GridConfig::default(), &mut SimRng::new(11)).unwrap();
        for (a, b, len) in net.roads() {
            let expected = net.position(a).distance(net.position(b));
            assert!((len - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn same_seed_same_network() {
        let cfg = GridConfig::default();
        let a = generate_grid(&cfg, &mut SimRng::new(5)).unwrap();
        let b = generate_grid(&cfg, &mut SimRng::new(5)).unwrap();
        assert_eq!(a.node_pos, b.node_pos);
        assert_eq!(a.edge_to, b.edge_to);
    }

    #[test]
    fn single_node_grid() {
        let cfg = GridConfig { rows: 1, cols: 1, ..GridConfig::default() };
        let net = generate_grid(&cfg, &mut SimRng::new(0)).unwrap();
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn invalid_configs_rejected() {
        let mut rng = SimRng::new(0);
        let no_rows = GridConfig { rows: 0, ..GridConfig::default() };
        assert!(matches!(generate_grid(&no_rows, &mut rng), Err(NetworkError::InvalidGrid(_))));

        let flat = GridConfig { bounds: Bounds::new(100.0, 0.0), ..GridConfig::default() };
        assert!(generate_grid(&flat, &mut rng).is_err());

        let negative = GridConfig { jitter: -0.1, ..GridConfig::default() };
        assert!(generate_grid(&negative, &mut rng).is_err());
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use rsb_core::{Point, SimRng};
    use crate::{GridConfig, RoadNetworkBuilder, generate_grid};

    #[test]
    fn snap_exact_position() {
        let (net, [n0, ..]) = super::helpers::ring_network();
        assert_eq!(net.snap_to_node(Point::new(0.0, 0.0)), Some(n0));
    }

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::ring_network();
        assert_eq!(net.snap_to_node(Point::new(4.0, 0.0)), Some(n0));
        assert_eq!(net.snap_to_node(Point::new(6.0, 0.0)), Some(n1));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let (net, [n0, ..]) = super::helpers::ring_network();
        // (0, 5) is 5 units from both n0 and n3.
        assert_eq!(net.snap_linear(Point::new(0.0, 5.0)), Some(n0));
        assert_eq!(net.snap_to_node(Point::new(0.0, 5.0)), Some(n0));
    }

    #[test]
    fn ties_with_reversed_insertion() {
        let mut b = RoadNetworkBuilder::new();
        let east = b.add_node(Point::new(10.0, 0.0));
        let _west = b.add_node(Point::new(-10.0, 0.0));
        let net = b.build();
        assert_eq!(net.snap_to_node(Point::new(0.0, 0.0)), Some(east));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.snap_to_node(Point::new(0.0, 0.0)).is_none());
        assert!(net.snap_linear(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn snapping_is_idempotent_on_node_positions() {
        let net = generate_grid(&GridConfig::default(), &mut SimRng::new(21)).unwrap();
        for (i, &pos) in net.node_pos.iter().enumerate() {
            assert_eq!(net.snap_to_node(pos).map(|n| n.index()), Some(i));
            assert_eq!(net.snap_linear(pos).map(|n| n.index()), Some(i));
        }
    }

    #[test]
    fn rtree_agrees_with_linear_scan() {
        let net = generate_grid(&GridConfig::default(), &mut SimRng::new(4)).unwrap();
        let mut rng = SimRng::new(99);
        for _ in 0..500 {
            let p = Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            assert_eq!(net.snap_to_node(p), net.snap_linear(p));
        }
    }

    #[test]
    fn k_nearest_order() {
        let (net, [n0, n1, ..]) = super::helpers::ring_network();
        let nearest = net.k_nearest_nodes(Point::new(1.0, 0.0), 2);
        assert_eq!(nearest, vec![n0, n1]);
    }
}

// ── Floyd–Warshall ────────────────────────────────────────────────────────────

#[cfg(test)]
mod apsp {
    use rsb_core::{NodeId, Point, SimRng};
    use crate::{GridConfig, RoadNetworkBuilder, ShortestPaths, generate_grid};
    use super::helpers::{brute_force_shortest, random_graph, ring_network};

    #[test]
    fn ring_distances() {
        let (net, [n0, n1, n2, n3, n4]) = ring_network();
        let sp = ShortestPaths::compute(&net);
        assert_eq!(sp.distance(n0, n4), Some(30.0));
        assert_eq!(sp.distance(n0, n3), Some(40.0)); // via 1,2,4 beats the 50 direct road
        assert_eq!(sp.distance(n2, n2), Some(0.0));
        assert_eq!(sp.path(n0, n4), Some(vec![n0, n1, n2, n4]));
        assert_eq!(sp.path(n0, n3), Some(vec![n0, n1, n2, n4, n3]));
        assert_eq!(sp.path(n1, n1), Some(vec![n1]));
    }

    #[test]
    fn unreachable_pairs_are_omitted() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(1.0, 0.0));
        let island = b.add_node(Point::new(9.0, 9.0));
        b.add_road(a, c);
        let sp = ShortestPaths::compute(&b.build());

        assert!(sp.is_reachable(a, c));
        assert_eq!(sp.distance(a, island), None);
        assert_eq!(sp.path(island, a), None);
        assert_eq!(sp.next_hop(a, island), None);
        // Only a↔c.
        assert_eq!(sp.reachable_pairs().count(), 2);
    }

    #[test]
    fn out_of_range_ids() {
        let (net, [n0, ..]) = ring_network();
        let sp = ShortestPaths::compute(&net);
        assert_eq!(sp.distance(n0, NodeId(99)), None);
        assert_eq!(sp.path(NodeId::INVALID, n0), None);
    }

    #[test]
    fn directed_edge_respected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(0.0, 1.0));
        b.add_directed_edge(a, c, 1.0);
        let sp = ShortestPaths::compute(&b.build());
        assert_eq!(sp.distance(a, c), Some(1.0));
        assert_eq!(sp.distance(c, a), None);
    }

    #[test]
    fn parallel_edges_keep_the_shorter() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(0.0, 1.0));
        b.add_road_with_length(a, c, 7.0);
        b.add_road_with_length(a, c, 3.0);
        let sp = ShortestPaths::compute(&b.build());
        assert_eq!(sp.distance(a, c), Some(3.0));
    }

    #[test]
    fn empty_network() {
        let sp = ShortestPaths::compute(&RoadNetworkBuilder::new().build());
        assert_eq!(sp.node_count(), 0);
        assert_eq!(sp.reachable_pairs().count(), 0);
    }

    #[test]
    fn matches_exhaustive_search_on_small_graphs() {
        for seed in 0..40 {
            let n = 3 + (seed % 6) as u32; // 3..=8 nodes
            let net = random_graph(n, 0.45, seed);
            let sp = ShortestPaths::compute(&net);
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let (a, b) = (NodeId(i), NodeId(j));
                    match (sp.distance(a, b), brute_force_shortest(&net, a, b)) {
                        (Some(fw), Some(bf)) => {
                            assert!((fw - bf).abs() < 1e-3, "seed {seed} {a}->{b}: {fw} vs {bf}")
                        }
                        (None, None) => {}
                        (fw, bf) => panic!("seed {seed} {a}->{b}: reachability differs {fw:?} vs {bf:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn paths_are_contiguous_and_sum_to_distance() {
        let net = generate_grid(&GridConfig::default(), &mut SimRng::new(17)).unwrap();
        let sp = ShortestPaths::compute(&net);
        for (a, b, d) in sp.reachable_pairs() {
            let path = sp.path(a, b).expect("reachable pair has a path");
            assert_eq!(path.first(), Some(&a));
            assert_eq!(path.last(), Some(&b));
            let mut total = 0.0;
            for w in path.windows(2) {
                assert!(net.has_edge(w[0], w[1]), "{} -> {} is not a road", w[0], w[1]);
                total += net.edge_length_between(w[0], w[1]).unwrap();
            }
            assert!((total - d).abs() < 1e-2 * d.max(1.0));
        }
    }

    #[test]
    fn generated_grid_is_connected() {
        let net = generate_grid(&GridConfig::default(), &mut SimRng::new(2)).unwrap();
        let sp = ShortestPaths::compute(&net);
        let n = net.node_count();
        assert_eq!(sp.reachable_pairs().count(), n * (n - 1));
    }
}

// ── Routers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rsb_core::{NodeId, Point, SimRng};
    use crate::{
        DijkstraRouter, GridConfig, NetworkError, RoadNetworkBuilder, Router, ShortestPaths,
        generate_grid,
    };

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::ring_network();
        let r = DijkstraRouter.route(&net, n0, n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.distance, 0.0);

        let sp = ShortestPaths::compute(&net);
        let r = sp.route(&net, n0, n0).unwrap();
        assert!(r.is_trivial());
    }

    #[test]
    fn dijkstra_shortest_path() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::ring_network();
        let route = DijkstraRouter.route(&net, n0, n4).unwrap();
        assert_eq!(route.distance, 30.0);
        assert_eq!(route.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(route.origin(), Some(n0));
        assert_eq!(route.destination(), Some(n4));
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(1.0, 0.0));
        let net = b.build();
        let sp = ShortestPaths::compute(&net);
        assert!(matches!(DijkstraRouter.route(&net, a, c), Err(NetworkError::NoRoute { .. })));
        assert!(matches!(sp.route(&net, a, c), Err(NetworkError::NoRoute { .. })));
        assert_eq!(Router::distance(&sp, &net, a, c), None);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let (net, [n0, ..]) = super::helpers::ring_network();
        let result = DijkstraRouter.route(&net, n0, NodeId(42));
        assert!(matches!(result, Err(NetworkError::NodeNotFound(NodeId(42)))));
    }

    #[test]
    fn table_router_agrees_with_dijkstra() {
        let net = generate_grid(&GridConfig::default(), &mut SimRng::new(8)).unwrap();
        let sp = ShortestPaths::compute(&net);
        let n = net.node_count() as u32;
        for i in (0..n).step_by(5) {
            for j in 0..n {
                let (a, b) = (NodeId(i), NodeId(j));
                let table = sp.route(&net, a, b).unwrap();
                let dij = DijkstraRouter.route(&net, a, b).unwrap();
                assert!((table.distance - dij.distance).abs() < 1e-2);
            }
        }
    }
}
