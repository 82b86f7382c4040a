use airnet::geo::haversine_distance;
use airnet::network::{
    build_graph, AirportRecord, BuildReport, Connectivity, HubSpecification, RouteInsert, RouteRecord,
};
use airnet::{network_metrics, AirlineNetwork, AirportOperator, NetworkBuilder};

fn brazil_airports() -> Vec<AirportRecord> {
    vec![
        AirportRecord::new("GRU", "Guarulhos", -23.4356, -46.4731).with_location("São Paulo", "Brazil"),
        AirportRecord::new("GIG", "Galeão", -22.8100, -43.2506).with_location("Rio de Janeiro", "Brazil"),
        AirportRecord::new("BSB", "Brasília", -15.8711, -47.9186).with_location("Brasília", "Brazil"),
        AirportRecord::new("VCP", "Viracopos", -23.0074, -47.1345).with_location("Campinas", "Brazil"),
        AirportRecord::new("POA", "Salgado Filho", -29.9944, -51.1714).with_location("Porto Alegre", "Brazil"),
        AirportRecord::new("MAO", "Eduardo Gomes", -3.0386, -60.0497).with_location("Manaus", "Brazil"),
    ]
}

#[test]
fn test_duplicate_route_rows_merge_operators() {
    let routes = vec![
        RouteRecord::new("GRU", "GIG", 340.0).with_operator("Gol"),
        RouteRecord::new("GRU", "GIG", 365.0).with_operator("Azul"),
    ];
    let (network, report) = build_graph(&brazil_airports(), Connectivity::Routes(&routes));

    assert_eq!(network.route_count(), 1);
    let route = network.route("GRU", "GIG").unwrap();
    assert_eq!(route.distance_km, 340.0);
    assert!(route.served_by("Gol"));
    assert!(route.served_by("Azul"));
    assert_eq!(route.operators.len(), 2);

    assert_eq!(report.merged_routes, 1);
    assert_eq!(report.divergent_weights, 1);
    // The reverse direction is an independent edge
    assert!(!network.has_route("GIG", "GRU"));
}

#[test]
fn test_unknown_airports_are_skipped() {
    let routes = vec![
        RouteRecord::new("GRU", "XXX", 100.0),
        RouteRecord::new("YYY", "GRU", 100.0),
        RouteRecord::new("GRU", "BSB", 870.0),
    ];
    let (network, report) = build_graph(&brazil_airports(), Connectivity::Routes(&routes));

    assert_eq!(network.route_count(), 1);
    assert!(network.has_route("GRU", "BSB"));
    assert_eq!(report.skipped_routes, 2);
    assert_eq!(network.airport_count(), 6);
}

#[test]
fn test_non_finite_distances_are_skipped() {
    let routes = vec![
        RouteRecord::new("GRU", "GIG", f64::NAN),
        RouteRecord::new("GIG", "GRU", f64::INFINITY),
        RouteRecord::new("GRU", "BSB", f64::NEG_INFINITY),
        RouteRecord::new("GRU", "POA", 850.0),
    ];
    let (network, report) = build_graph(&brazil_airports(), Connectivity::Routes(&routes));

    assert_eq!(report.skipped_routes, 3);
    assert!(!network.has_route("GRU", "GIG"));
    assert!(!network.has_route("GIG", "GRU"));
    assert!(!network.has_route("GRU", "BSB"));
    assert_eq!(network.route_count(), 1);

    // The shortest-path graph sees exactly the stored routes
    let metrics = network_metrics(&network).unwrap();
    assert_eq!(metrics.route_count, network.route_count());

    let mut network = network;
    assert_eq!(network.add_route("GRU", "MAO", f64::NAN, ["Gol"]), None);
    assert!(!network.has_route("GRU", "MAO"));
}

#[test]
fn test_airports_are_immutable_once_added() {
    let mut airports = brazil_airports();
    airports.push(AirportRecord::new("GRU", "Impostor", 0.0, 0.0));

    let builder = NetworkBuilder::new().with_airports(&airports);
    assert_eq!(builder.report().duplicate_airports, 1);
    let network = builder.build();
    assert_eq!(network.airport("GRU").unwrap().name, "Guarulhos");
}

#[test]
fn test_add_route_reports_outcome() {
    let mut network = NetworkBuilder::new().with_airports(&brazil_airports()).build();

    assert_eq!(network.add_route("GRU", "POA", 850.0, ["Gol"]), Some(RouteInsert::Added));
    assert_eq!(
        network.add_route("GRU", "POA", 850.0, ["Azul"]),
        Some(RouteInsert::Merged { divergent: false })
    );
    assert_eq!(network.add_route("GRU", "NOPE", 1.0, ["Gol"]), None);
    assert_eq!(network.out_degree("GRU"), 1);
    assert_eq!(network.in_degree("POA"), 1);
}

#[test]
fn test_spoke_connects_only_to_nearest_hub() {
    let airports = vec![
        AirportRecord::new("H1", "Hub one", 0.0, 0.0),
        AirportRecord::new("H2", "Hub two", 0.0, 20.0),
        AirportRecord::new("S", "Spoke", 1.0, 2.0),
    ];
    let spec = HubSpecification::new("Gol", ["H1", "H2"], ["H1", "H2", "S"]);
    let (network, report) = build_graph(&airports, Connectivity::Hubs(std::slice::from_ref(&spec)));

    assert!(network.has_route("S", "H1"));
    assert!(network.has_route("H1", "S"));
    assert!(!network.has_route("S", "H2"));
    assert!(!network.has_route("H2", "S"));

    // Hubs are joined to each other both ways
    assert!(network.has_route("H1", "H2"));
    assert!(network.has_route("H2", "H1"));
    assert_eq!(network.route_count(), 4);
    assert_eq!(report.skipped_airports, 0);

    let expected = haversine_distance(1.0, 2.0, 0.0, 0.0);
    let route = network.route("S", "H1").unwrap();
    assert!((route.distance_km - expected).abs() < 1e-9);
    assert!(route.served_by("Gol"));
}

#[test]
fn test_unserved_hubs_are_not_joined() {
    let airports = vec![
        AirportRecord::new("H1", "Hub one", 0.0, 0.0),
        AirportRecord::new("H2", "Hub two", 0.0, 20.0),
        AirportRecord::new("S", "Spoke", 0.0, 18.0),
    ];
    // H2 is listed as a hub but not served; spokes may still use it
    let spec = HubSpecification::new("Azul", ["H1", "H2"], ["H1", "S"]);
    let network = NetworkBuilder::new()
        .with_airports(&airports)
        .with_hub_network(&spec)
        .build();

    assert!(!network.has_route("H1", "H2"));
    assert!(network.has_route("S", "H2"));
}

#[test]
fn test_missing_airport_records_are_counted() {
    let spec = HubSpecification::new("Gol", ["GRU", "XXX"], ["GRU", "XXX", "GIG", "YYY"]);
    let (network, report) = build_graph(&brazil_airports(), Connectivity::Hubs(&[spec]));

    assert_eq!(report.skipped_airports, 2);
    assert!(network.has_route("GIG", "GRU"));
    assert!(network.has_route("GRU", "GIG"));
}

#[test]
fn test_shared_route_unions_operators() {
    let gol = HubSpecification::new("Gol", ["GRU", "GIG"], ["GRU", "GIG", "POA"]);
    let azul = HubSpecification::new("Azul", ["GIG", "GRU"], ["GIG", "GRU", "MAO"]);

    let builder = NetworkBuilder::combined(&brazil_airports(), &gol, &azul);
    let network = builder.network();

    // Both operators join their GRU and GIG hubs: one edge per direction
    for (origin, destination) in [("GRU", "GIG"), ("GIG", "GRU")] {
        let route = network.route(origin, destination).unwrap();
        assert_eq!(route.operators.iter().collect::<Vec<_>>(), vec!["Azul", "Gol"]);
        let expected = haversine_distance(-23.4356, -46.4731, -22.8100, -43.2506);
        assert!((route.distance_km - expected).abs() < 1e-9);
    }
    assert!(builder.report().merged_routes >= 2);
    assert_eq!(builder.report().divergent_weights, 0);

    // POA's nearest Gol hub is GRU
    assert!(network.route("POA", "GRU").unwrap().served_by("Gol"));
    assert!(!network.has_route("POA", "GIG"));
}

#[test]
fn test_combined_network_tags_operators() {
    let gol = HubSpecification::new("Gol", ["GRU"], ["GRU", "GIG", "BSB"]);
    let azul = HubSpecification::new("Azul", ["VCP"], ["VCP", "BSB", "MAO"]);
    let network = NetworkBuilder::combined(&brazil_airports(), &gol, &azul).build();

    let tag = |code: &str| network.airport(code).unwrap().operator;
    assert_eq!(tag("GRU"), Some(AirportOperator::Primary));
    assert_eq!(tag("GIG"), Some(AirportOperator::Primary));
    assert_eq!(tag("BSB"), Some(AirportOperator::Both));
    assert_eq!(tag("VCP"), Some(AirportOperator::Secondary));
    assert_eq!(tag("MAO"), Some(AirportOperator::Secondary));
    assert_eq!(tag("POA"), None);

    // BSB is a spoke for both operators
    assert!(network.route("BSB", "GRU").unwrap().served_by("Gol"));
    assert!(network.route("BSB", "VCP").unwrap().served_by("Azul"));
    assert_eq!(network.out_degree("POA"), 0);
}

#[test]
fn test_empty_inputs() {
    let (network, report) = build_graph(&[], Connectivity::Routes(&[]));
    assert!(network.is_empty());
    assert_eq!(report, BuildReport::default());
    assert_eq!(AirlineNetwork::new().route_count(), 0);
}
