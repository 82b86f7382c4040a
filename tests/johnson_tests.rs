use airnet::algorithm::bellman_ford::BellmanFord;
use airnet::algorithm::dijkstra::Dijkstra;
use airnet::algorithm::ShortestPathAlgorithm;
use airnet::graph::generators::{apply_random_potential, generate_airlines, generate_random_graph, generate_random_network};
use airnet::graph::{DirectedGraph, Graph, IndexedNetwork, MutableGraph};
use airnet::network::{AirportRecord, RouteRecord};
use airnet::{all_pairs_shortest_paths, AirlineNetwork, CancellationToken, Error, Johnson, NetworkBuilder};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Network with one airport per code and the given directed routes
fn network_from_edges(codes: &[&str], edges: &[(&str, &str, f64)]) -> AirlineNetwork {
    let airports: Vec<AirportRecord> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| AirportRecord::new(code, code, i as f64, i as f64))
        .collect();
    let routes: Vec<RouteRecord> = edges
        .iter()
        .map(|(from, to, w)| RouteRecord::new(from, to, *w))
        .collect();
    NetworkBuilder::new()
        .with_airports(&airports)
        .with_routes(&routes)
        .build()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_four_airport_scenario() {
    let network = network_from_edges(
        &["A", "B", "C", "D"],
        &[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 20.0), ("C", "D", 3.0)],
    );

    let shortest = all_pairs_shortest_paths(&network).unwrap();

    assert!(close(shortest.distance("A", "D").unwrap(), 18.0));
    assert_eq!(shortest.path("A", "D").unwrap(), ["A", "B", "C", "D"]);
    assert_eq!(shortest.stops("A", "D"), Some(2));
    assert!(close(shortest.distance("A", "C").unwrap(), 15.0));
    assert_eq!(shortest.from_source("A").map(|row| row.len()), Some(4));

    // Self pairs are present with a single-element path
    assert_eq!(shortest.distance("B", "B"), Some(0.0));
    assert_eq!(shortest.path("B", "B").unwrap(), ["B"]);

    // Nothing flows back towards A
    assert!(!shortest.is_reachable("D", "A"));
    assert_eq!(shortest.distance("D", "A"), None);
    assert!(shortest.path("D", "A").is_none());
}

#[test]
fn test_unreachable_pairs_are_absent() {
    let network = network_from_edges(&["A", "B", "X"], &[("A", "B", 1.0)]);
    let shortest = all_pairs_shortest_paths(&network).unwrap();

    // A->A, A->B, B->B, X->X
    assert_eq!(shortest.distances.len(), 4);
    assert_eq!(shortest.paths.len(), 4);
    assert!(shortest.distances.iter().all(|(_, _, d)| d.is_finite()));
    assert!(shortest.distance("A", "X").is_none());
    assert!(shortest.distance("X", "A").is_none());
}

#[test]
fn test_matches_dijkstra_on_non_negative_graphs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..5 {
        let network = generate_random_network(40, 3.0, &mut rng);
        let shortest = all_pairs_shortest_paths(&network).unwrap();

        let indexed = IndexedNetwork::from_network(&network);
        let dijkstra = Dijkstra::new();
        for source in 0..indexed.vertex_count() {
            let expected = dijkstra.compute_shortest_paths(indexed.graph(), source).unwrap();
            let s = indexed.code(source).unwrap();
            for (target, distance) in expected.distances.iter().enumerate() {
                let t = indexed.code(target).unwrap();
                match distance {
                    Some(d) => assert!(close(shortest.distance(s, t).unwrap(), d.0), "{}->{}", s, t),
                    None => assert!(!shortest.is_reachable(s, t), "{}->{} should be unreachable", s, t),
                }
            }
        }
    }
}

#[test]
fn test_negative_edges_reweight_to_non_negative() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..5 {
        let base = generate_random_graph(30, 3.0, &mut rng);
        let shifted = apply_random_potential(&base, 50.0, &mut rng);
        assert!(!shifted.validate_non_negative(), "potential shift should create negative edges");

        let reweighted = Johnson::new().reweighted_graph(&shifted).unwrap();
        assert_eq!(reweighted.edge_count(), shifted.edge_count());
        assert!(reweighted.validate_non_negative());
    }
}

#[test]
fn test_negative_edges_match_bellman_ford() {
    let mut rng = StdRng::seed_from_u64(23);
    let base = generate_random_graph(25, 3.0, &mut rng);
    let shifted = apply_random_potential(&base, 40.0, &mut rng);

    let results = Johnson::new().compute_indexed(&shifted).unwrap();
    let bellman_ford = BellmanFord::new();

    for (source, johnson) in results.iter().enumerate() {
        let expected = bellman_ford.compute_shortest_paths(&shifted, source).unwrap();
        for (target, distance) in expected.distances.iter().enumerate() {
            match (distance, johnson.distances[target]) {
                (Some(d), Some(j)) => assert!(close(d.0, j.0), "{}->{}: {} vs {}", source, target, d.0, j.0),
                (None, None) => {}
                other => panic!("{}->{} reachability differs: {:?}", source, target, other),
            }
        }
    }
}

#[test]
fn test_negative_route_without_cycle() {
    let network = network_from_edges(
        &["A", "B", "C"],
        &[("A", "B", 4.0), ("B", "C", -3.0), ("A", "C", 2.0)],
    );
    let shortest = all_pairs_shortest_paths(&network).unwrap();

    assert!(close(shortest.distance("A", "C").unwrap(), 1.0));
    assert_eq!(shortest.path("A", "C").unwrap(), ["A", "B", "C"]);
    assert!(close(shortest.distance("B", "C").unwrap(), -3.0));
}

#[test]
fn test_negative_cycle_is_rejected() {
    let network = network_from_edges(
        &["A", "B", "C", "Z"],
        &[("A", "B", 1.0), ("B", "C", 1.0), ("C", "B", -2.5), ("Z", "A", 3.0)],
    );

    assert_eq!(all_pairs_shortest_paths(&network), Err(Error::NegativeCycle));
    assert_eq!(
        Johnson::new().with_parallel(true).compute(&network),
        Err(Error::NegativeCycle)
    );
}

#[test]
fn test_negative_self_loop_is_a_cycle() {
    let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::with_capacity(2);
    graph.add_edge(0, 1, OrderedFloat(1.0));
    graph.add_edge(1, 1, OrderedFloat(-0.5));

    assert_eq!(Johnson::new().compute_indexed(&graph), Err(Error::NegativeCycle));
}

#[test]
fn test_non_negative_self_loop_is_tolerated() {
    let network = network_from_edges(&["A", "B"], &[("A", "A", 2.0), ("A", "B", 1.0)]);
    let shortest = all_pairs_shortest_paths(&network).unwrap();

    assert_eq!(shortest.distance("A", "A"), Some(0.0));
    assert_eq!(shortest.path("A", "A").unwrap(), ["A"]);
    assert!(close(shortest.distance("A", "B").unwrap(), 1.0));
}

#[test]
fn test_overflowing_distance_is_unreachable() {
    let network = network_from_edges(&["A", "B", "C"], &[("A", "B", 1e308), ("B", "C", 1e308)]);
    let shortest = all_pairs_shortest_paths(&network).unwrap();

    assert_eq!(shortest.distance("A", "B"), Some(1e308));
    assert_eq!(shortest.distance("B", "C"), Some(1e308));
    assert!(!shortest.is_reachable("A", "C"));
    assert!(shortest.path("A", "C").is_none());
    assert!(shortest.distances.iter().all(|(_, _, d)| d.is_finite()));
    assert_eq!(shortest.distances.len(), shortest.paths.len());
}

#[test]
fn test_paths_are_valid() {
    let mut rng = StdRng::seed_from_u64(99);
    let network = generate_airlines(40, 3, &mut rng).build();
    let shortest = all_pairs_shortest_paths(&network).unwrap();
    assert!(!shortest.distances.is_empty());

    for (s, t, distance, path) in shortest.reachable_pairs() {
        assert_eq!(path.first().map(String::as_str), Some(s));
        assert_eq!(path.last().map(String::as_str), Some(t));

        let mut total = 0.0;
        for leg in path.windows(2) {
            let route = network
                .route(&leg[0], &leg[1])
                .unwrap_or_else(|| panic!("{}->{} is not a route", leg[0], leg[1]));
            total += route.distance_km;
        }
        assert!(close(total, distance), "{}->{}: path sums to {}, reported {}", s, t, total, distance);
    }
    assert_eq!(shortest.distances.len(), shortest.paths.len());
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(3);
    let network = generate_airlines(30, 3, &mut rng).build();

    let first = all_pairs_shortest_paths(&network).unwrap();
    let second = all_pairs_shortest_paths(&network).unwrap();
    let parallel = Johnson::new().with_parallel(true).compute(&network).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, parallel);
    for (s, t, d) in first.distances.iter() {
        assert_eq!(d.to_bits(), second.distance(s, t).unwrap().to_bits());
        assert_eq!(d.to_bits(), parallel.distance(s, t).unwrap().to_bits());
    }
}

#[test]
fn test_cancellation_stops_computation() {
    let network = network_from_edges(&["A", "B"], &[("A", "B", 1.0)]);
    let token = CancellationToken::new();
    let johnson = Johnson::new().with_cancellation(token.clone());

    assert!(johnson.compute(&network).is_ok());

    token.cancel();
    assert_eq!(johnson.compute(&network), Err(Error::Cancelled));
    assert_eq!(
        Johnson::new().with_parallel(true).with_cancellation(token).compute(&network),
        Err(Error::Cancelled)
    );
}

#[test]
fn test_empty_network() {
    let shortest = all_pairs_shortest_paths(&AirlineNetwork::new()).unwrap();
    assert!(shortest.distances.is_empty());
    assert!(shortest.paths.is_empty());
}

#[test]
fn test_dijkstra_rejects_negative_weights() {
    let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::with_capacity(2);
    graph.add_edge(0, 1, OrderedFloat(-1.0));

    let result = Dijkstra::new().compute_shortest_paths(&graph, 0);
    assert_eq!(result, Err(Error::NegativeWeight(-1.0)));
    assert_eq!(Dijkstra::new().compute_shortest_paths(&graph, 5), Err(Error::SourceNotFound));
}

#[test]
fn test_updating_a_weight_changes_the_answer() {
    let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::with_capacity(3);
    graph.add_edge(0, 1, OrderedFloat(1.0));
    graph.add_edge(1, 2, OrderedFloat(1.0));
    graph.add_edge(0, 2, OrderedFloat(5.0));

    let before = Johnson::new().compute_indexed(&graph).unwrap();
    assert_eq!(before[0].distances[2], Some(OrderedFloat(2.0)));
    assert_eq!(before[0].path_to(2), Some(vec![0, 1, 2]));

    assert!(graph.update_edge_weight(0, 2, OrderedFloat(-1.0)));
    let after = Johnson::new().compute_indexed(&graph).unwrap();
    assert_eq!(after[0].distances[2], Some(OrderedFloat(-1.0)));
    assert_eq!(after[0].path_to(2), Some(vec![0, 2]));
}
