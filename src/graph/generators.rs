//! Synthetic graphs and airline networks for benchmarks and randomized tests.

use crate::graph::{DirectedGraph, Graph, MutableGraph};
use crate::network::{AirlineNetwork, AirportRecord, HubSpecification, NetworkBuilder, RouteRecord};
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Random directed graph with roughly `edge_factor * n` edges and weights in [1, 100)
pub fn generate_random_graph<R: Rng>(n: usize, edge_factor: f64, rng: &mut R) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(n);
    if n < 2 {
        return graph;
    }

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v && !graph.has_edge(u, v) {
            graph.add_edge(u, v, OrderedFloat(rng.gen_range(1.0..100.0)));
        }
    }

    graph
}

/// Shifts every edge by a random vertex potential: `w + p(u) - p(v)`.
///
/// Every cycle keeps its total weight, so a graph without negative cycles
/// stays free of them while individual edges may turn negative.
pub fn apply_random_potential<R: Rng>(
    graph: &DirectedGraph<OrderedFloat<f64>>,
    max_shift: f64,
    rng: &mut R,
) -> DirectedGraph<OrderedFloat<f64>> {
    let potential: Vec<f64> = (0..graph.vertex_count())
        .map(|_| rng.gen_range(-max_shift..max_shift))
        .collect();
    graph.map_weights(|u, v, w| OrderedFloat(w.0 + potential[u] - potential[v]))
}

/// Random airline network with named airports `A000`, `A001`, ... and
/// explicit route rows
pub fn generate_random_network<R: Rng>(n: usize, edge_factor: f64, rng: &mut R) -> AirlineNetwork {
    let airports = random_airports(n, rng);
    let graph = generate_random_graph(n, edge_factor, rng);
    let routes: Vec<RouteRecord> = graph
        .edges()
        .map(|(u, v, w)| RouteRecord::new(&airport_code(u), &airport_code(v), w.0))
        .collect();

    NetworkBuilder::new()
        .with_airports(&airports)
        .with_routes(&routes)
        .build()
}

/// Two synthetic operators sharing one set of airports
#[derive(Debug, Clone)]
pub struct SyntheticAirlines {
    pub airports: Vec<AirportRecord>,
    pub primary: HubSpecification,
    pub secondary: HubSpecification,
}

impl SyntheticAirlines {
    pub fn build(&self) -> AirlineNetwork {
        NetworkBuilder::combined(&self.airports, &self.primary, &self.secondary).build()
    }
}

/// Random two-operator network: each airport is served by one or both
/// operators, each operator gets `hubs_per_operator` hubs among the airports
/// it serves.
pub fn generate_airlines<R: Rng>(n: usize, hubs_per_operator: usize, rng: &mut R) -> SyntheticAirlines {
    let airports = random_airports(n, rng);

    let mut primary_served = Vec::new();
    let mut secondary_served = Vec::new();
    for airport in &airports {
        match rng.gen_range(0..10) {
            0..=3 => primary_served.push(airport.code.clone()),
            4..=7 => secondary_served.push(airport.code.clone()),
            _ => {
                primary_served.push(airport.code.clone());
                secondary_served.push(airport.code.clone());
            }
        }
    }

    let primary_hubs = primary_served
        .choose_multiple(rng, hubs_per_operator.min(primary_served.len()))
        .cloned()
        .collect::<Vec<_>>();
    let secondary_hubs = secondary_served
        .choose_multiple(rng, hubs_per_operator.min(secondary_served.len()))
        .cloned()
        .collect::<Vec<_>>();

    SyntheticAirlines {
        airports,
        primary: HubSpecification::new("Primary", primary_hubs, primary_served),
        secondary: HubSpecification::new("Secondary", secondary_hubs, secondary_served),
    }
}

fn airport_code(i: usize) -> String {
    format!("A{:03}", i)
}

/// Airports scattered over a South-America-sized bounding box
fn random_airports<R: Rng>(n: usize, rng: &mut R) -> Vec<AirportRecord> {
    (0..n)
        .map(|i| {
            let code = airport_code(i);
            AirportRecord::new(
                &code,
                &format!("Airport {}", i),
                rng.gen_range(-34.0..5.0),
                rng.gen_range(-74.0..-34.0),
            )
        })
        .collect()
}
