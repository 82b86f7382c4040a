use airnet::codeshare::{connection_hubs, find_codeshare_opportunities, route_efficiency, CodeshareConfig};
use airnet::network::{AirportRecord, HubSpecification};
use airnet::{all_pairs_shortest_paths, network_metrics, DistanceMatrix, NetworkBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let airports = vec![
        AirportRecord::new("GRU", "Guarulhos", -23.4356, -46.4731).with_location("São Paulo", "Brazil"),
        AirportRecord::new("GIG", "Galeão", -22.8100, -43.2506).with_location("Rio de Janeiro", "Brazil"),
        AirportRecord::new("BSB", "Brasília", -15.8711, -47.9186).with_location("Brasília", "Brazil"),
        AirportRecord::new("VCP", "Viracopos", -23.0074, -47.1345).with_location("Campinas", "Brazil"),
        AirportRecord::new("CNF", "Confins", -19.6244, -43.9719).with_location("Belo Horizonte", "Brazil"),
        AirportRecord::new("REC", "Guararapes", -8.1265, -34.9236).with_location("Recife", "Brazil"),
        AirportRecord::new("POA", "Salgado Filho", -29.9944, -51.1714).with_location("Porto Alegre", "Brazil"),
        AirportRecord::new("MAO", "Eduardo Gomes", -3.0386, -60.0497).with_location("Manaus", "Brazil"),
        AirportRecord::new("FOR", "Pinto Martins", -3.7763, -38.5326).with_location("Fortaleza", "Brazil"),
        AirportRecord::new("CWB", "Afonso Pena", -25.5285, -49.1758).with_location("Curitiba", "Brazil"),
    ];

    let primary = HubSpecification::new(
        "Gol",
        ["GRU", "GIG", "BSB"],
        ["GRU", "GIG", "BSB", "POA", "FOR", "CWB"],
    );
    let secondary = HubSpecification::new(
        "Azul",
        ["VCP", "CNF", "REC"],
        ["VCP", "CNF", "REC", "MAO", "BSB"],
    );

    let builder = NetworkBuilder::combined(&airports, &primary, &secondary);
    println!("Build report: {:?}", builder.report());
    let network = builder.build();
    println!(
        "Network loaded: {} airports, {} routes",
        network.airport_count(),
        network.route_count()
    );

    let metrics = network_metrics(&network)?;
    println!("Network density: {:.4}", metrics.density);
    println!("Average out-degree: {:.2}", metrics.average_out_degree);
    println!("Is connected: {}", metrics.is_weakly_connected);

    println!("Running Johnson's algorithm...");
    let shortest = all_pairs_shortest_paths(&network)?;

    let (origin, destination) = ("POA", "MAO");
    match (shortest.distance(origin, destination), shortest.path(origin, destination)) {
        (Some(distance), Some(path)) => {
            println!("\nShortest path from {} to {}:", origin, destination);
            println!("Distance: {:.0} km", distance);
            println!("Path: {}", path.join(" → "));
            println!("Number of stops: {}", path.len() - 2);
        }
        _ => println!("No path found from {} to {}", origin, destination),
    }

    let config = CodeshareConfig::default();
    let opportunities = find_codeshare_opportunities(&network, &shortest, &primary, &secondary, &config);
    println!("\nTop 10 codeshare opportunities found:");
    for (i, opp) in opportunities.iter().take(10).enumerate() {
        println!(
            "{:2}. {} → {}: {:.0} km, {} stops",
            i + 1,
            opp.origin,
            opp.destination,
            opp.distance_km,
            opp.stops
        );
        println!("    Path: {}", opp.path.join(" → "));
    }

    println!("\nConnection hubs: {:?}", connection_hubs(&opportunities));

    // Great-circle distances as the "direct flight" reference
    let direct: DistanceMatrix = opportunities
        .iter()
        .filter_map(|opp| {
            let from = network.airport(&opp.origin)?.coordinate();
            let to = network.airport(&opp.destination)?.coordinate();
            Some((opp.origin.clone(), opp.destination.clone(), from.distance_to(&to)))
        })
        .collect();
    for efficiency in route_efficiency(&opportunities, &direct).iter().take(5) {
        println!(
            "{} → {}: detour factor {:.2}",
            efficiency.origin,
            efficiency.destination,
            efficiency.detour_factor.unwrap_or(f64::NAN)
        );
    }

    Ok(())
}
