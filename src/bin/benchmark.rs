use std::time::{Duration, Instant};

use airnet::graph::generators::generate_airlines;
use airnet::{AirlineNetwork, Johnson};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Time one Johnson run over the network
fn benchmark_johnson(name: &str, johnson: &Johnson, network: &AirlineNetwork) -> Duration {
    println!("Running {} on {} airports...", name, network.airport_count());

    let start = Instant::now();
    let result = johnson.compute(network);
    let duration = start.elapsed();

    match result {
        Ok(shortest) => println!("  - {} reachable pairs in {:?}", shortest.distances.len(), duration),
        Err(err) => println!("  - failed after {:?}: {}", duration, err),
    }

    duration
}

fn main() {
    env_logger::init();

    let network_sizes = vec![100, 250, 500, 1_000, 2_000];
    let hubs_per_operator = 6;
    let mut rng = StdRng::seed_from_u64(42);

    println!("=====================================================");
    println!("Benchmark: Johnson sequential vs parallel");
    println!("Two operators, {} hubs each", hubs_per_operator);
    println!("=====================================================");

    let sequential = Johnson::new();
    let parallel = Johnson::new().with_parallel(true);

    let mut results = Vec::new();

    for &size in &network_sizes {
        let airlines = generate_airlines(size, hubs_per_operator, &mut rng);
        let network = airlines.build();
        println!(
            "\nNetwork with {} airports and {} routes",
            network.airport_count(),
            network.route_count()
        );

        let sequential_time = benchmark_johnson("Johnson (sequential)", &sequential, &network);
        let parallel_time = benchmark_johnson("Johnson (parallel)", &parallel, &network);

        let speedup = sequential_time.as_secs_f64() / parallel_time.as_secs_f64();
        println!("Speedup - parallel vs sequential: {:.2}x", speedup);

        results.push((size, network.route_count(), sequential_time, parallel_time));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<10} | {:<15} | {:<15} | {:<10}",
        "Airports", "Routes", "Sequential (ms)", "Parallel (ms)", "SpeedUp"
    );
    println!("-----------------------------------------------------");

    for (size, routes, sequential_time, parallel_time) in &results {
        println!(
            "{:<10} | {:<10} | {:<15} | {:<15} | {:<10.2}",
            size,
            routes,
            sequential_time.as_millis(),
            parallel_time.as_millis(),
            sequential_time.as_secs_f64() / parallel_time.as_secs_f64()
        );
    }
}
