//! Airnet - all-pairs shortest paths over airline route networks
//!
//! The crate builds a weighted directed graph of airports and routes, runs
//! Johnson's algorithm (Bellman-Ford reweighting followed by one Dijkstra run
//! per source) to obtain every shortest path, and derives network metrics and
//! codeshare opportunities between two operators from the result.
//!
//! Airports are addressed by their string code at the API boundary; the
//! shortest-path engine works on a dense integer-indexed copy of the network.

pub mod algorithm;
pub mod cancel;
pub mod codeshare;
pub mod geo;
pub mod graph;
pub mod metrics;
pub mod network;
pub mod web;

pub use algorithm::{
    johnson::{all_pairs_shortest_paths, AllPairsShortestPaths, DistanceMatrix, Johnson, PathMatrix},
    ShortestPathAlgorithm, ShortestPathResult,
};
pub use cancel::CancellationToken;
pub use metrics::{network_metrics, MetricsReport};
/// Re-export main types for convenient use
pub use network::{AirlineNetwork, Airport, AirportOperator, NetworkBuilder, Route};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Unknown airport code: {0}")]
    UnknownAirport(String),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Graph contains a negative cycle")]
    NegativeCycle,

    #[error("Network metrics require at least one airport")]
    EmptyGraph,

    #[error("Computation cancelled")]
    Cancelled,

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
