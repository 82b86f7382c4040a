//! Johnson's all-pairs shortest paths.
//!
//! 1. Augment the graph with a vertex `q` joined to every vertex by a
//!    zero-weight edge and run Bellman-Ford from `q`. The distances are the
//!    potentials `h(v)`; a negative cycle anywhere aborts the computation.
//! 2. Reweight every edge to `w + h(u) - h(v)`, which is never negative.
//! 3. Run Dijkstra from every source on the reweighted graph and shift each
//!    distance back by `h(t) - h(s)`.
//!
//! The per-source runs only read the reweighted graph and can be spread over
//! rayon's thread pool.

use std::collections::HashMap;
use std::time::Instant;

use log::debug;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::bellman_ford::BellmanFord;
use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::cancel::CancellationToken;
use crate::graph::{DirectedGraph, Graph, IndexedNetwork, MutableGraph};
use crate::network::AirlineNetwork;
use crate::{Error, Result};

type Weight = OrderedFloat<f64>;

/// Shortest distances for every reachable ordered pair, keyed by source then
/// destination. Unreachable pairs have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistanceMatrix {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl DistanceMatrix {
    pub fn get(&self, source: &str, destination: &str) -> Option<f64> {
        self.rows.get(source)?.get(destination).copied()
    }

    pub fn contains(&self, source: &str, destination: &str) -> bool {
        self.get(source, destination).is_some()
    }

    /// Distances from one source to every destination it reaches
    pub fn from_source(&self, source: &str) -> Option<&HashMap<String, f64>> {
        self.rows.get(source)
    }

    /// Every (source, destination, distance) entry
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.rows.iter().flat_map(|(s, row)| {
            row.iter().map(move |(t, d)| (s.as_str(), t.as_str(), *d))
        })
    }

    /// Number of reachable ordered pairs, self pairs included
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a matrix from (source, destination, distance) entries, e.g. reference
/// great-circle distances for `codeshare::route_efficiency`
impl FromIterator<(String, String, f64)> for DistanceMatrix {
    fn from_iter<I: IntoIterator<Item = (String, String, f64)>>(iter: I) -> Self {
        let mut rows: HashMap<String, HashMap<String, f64>> = HashMap::new();
        for (source, destination, distance) in iter {
            rows.entry(source).or_default().insert(destination, distance);
        }
        DistanceMatrix { rows }
    }
}

/// Shortest paths as airport-code sequences, same domain as `DistanceMatrix`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathMatrix {
    rows: HashMap<String, HashMap<String, Vec<String>>>,
}

impl PathMatrix {
    pub fn get(&self, source: &str, destination: &str) -> Option<&[String]> {
        self.rows.get(source)?.get(destination).map(Vec::as_slice)
    }

    pub fn contains(&self, source: &str, destination: &str) -> bool {
        self.get(source, destination).is_some()
    }

    pub fn from_source(&self, source: &str) -> Option<&HashMap<String, Vec<String>>> {
        self.rows.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[String])> + '_ {
        self.rows.iter().flat_map(|(s, row)| {
            row.iter().map(move |(t, p)| (s.as_str(), t.as_str(), p.as_slice()))
        })
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of Johnson's algorithm for one network snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllPairsShortestPaths {
    pub distances: DistanceMatrix,
    pub paths: PathMatrix,
}

impl AllPairsShortestPaths {
    pub fn distance(&self, source: &str, destination: &str) -> Option<f64> {
        self.distances.get(source, destination)
    }

    pub fn path(&self, source: &str, destination: &str) -> Option<&[String]> {
        self.paths.get(source, destination)
    }

    pub fn is_reachable(&self, source: &str, destination: &str) -> bool {
        self.distances.contains(source, destination)
    }

    /// Shortest distances from `source` to every airport it reaches
    pub fn from_source(&self, source: &str) -> Option<&HashMap<String, f64>> {
        self.distances.from_source(source)
    }

    /// Intermediate airports on the shortest path
    pub fn stops(&self, source: &str, destination: &str) -> Option<usize> {
        self.path(source, destination).map(|p| p.len().saturating_sub(2))
    }

    /// Every reachable (source, destination, distance, path), self pairs included
    pub fn reachable_pairs(&self) -> impl Iterator<Item = (&str, &str, f64, &[String])> + '_ {
        self.distances.iter().filter_map(move |(s, t, d)| {
            self.paths.get(s, t).map(|p| (s, t, d, p))
        })
    }

    pub fn into_parts(self) -> (DistanceMatrix, PathMatrix) {
        (self.distances, self.paths)
    }
}

/// Johnson's algorithm with optional parallel fan-out and cooperative cancellation
#[derive(Debug, Clone, Default)]
pub struct Johnson {
    /// Run the per-source Dijkstra passes on rayon's thread pool
    parallel: bool,
    /// Checked before each per-source pass
    cancellation: Option<CancellationToken>,
}

impl Johnson {
    /// Creates a sequential instance without cancellation
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Vertex potentials `h(v)`: Bellman-Ford distances from a synthetic vertex
    /// joined to every vertex by a zero-weight edge.
    pub fn potentials(&self, graph: &DirectedGraph<Weight>) -> Result<Vec<f64>> {
        let augmented = AugmentedGraph::new(graph);
        let result = BellmanFord::new().compute_shortest_paths(&augmented.graph, augmented.source)?;

        // `q` reaches every vertex through its own edge, so every distance is set
        let potentials = result.distances[..graph.vertex_count()]
            .iter()
            .enumerate()
            .map(|(v, d)| {
                d.map(|d| d.0).ok_or_else(|| {
                    Error::AlgorithmError(format!("vertex {} unreachable from augmented source", v))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(potentials)
    }

    /// Applies `w' = w + h(u) - h(v)`. Rounding residue below zero is clamped
    /// so Dijkstra never sees a negative weight.
    pub fn reweight(graph: &DirectedGraph<Weight>, potentials: &[f64]) -> DirectedGraph<Weight> {
        graph.map_weights(|u, v, w| OrderedFloat((w.0 + potentials[u] - potentials[v]).max(0.0)))
    }

    /// The non-negative graph the Dijkstra passes run on
    pub fn reweighted_graph(&self, graph: &DirectedGraph<Weight>) -> Result<DirectedGraph<Weight>> {
        let potentials = self.potentials(graph)?;
        Ok(Self::reweight(graph, &potentials))
    }

    /// All-pairs shortest paths over dense indices: one single-source result
    /// per vertex, distances expressed in the original weights.
    pub fn compute_indexed(&self, graph: &DirectedGraph<Weight>) -> Result<Vec<ShortestPathResult<Weight>>> {
        let n = graph.vertex_count();

        let started = Instant::now();
        let potentials = self.potentials(graph)?;
        debug!("Potentials for {} vertices computed in {:?}", n, started.elapsed());

        let reweighted = Self::reweight(graph, &potentials);

        let started = Instant::now();
        let results = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(|source| self.single_source(&reweighted, &potentials, source))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..n)
                .map(|source| self.single_source(&reweighted, &potentials, source))
                .collect::<Result<Vec<_>>>()?
        };
        debug!(
            "{} Dijkstra passes over {} edges finished in {:?} (parallel: {})",
            n,
            reweighted.edge_count(),
            started.elapsed(),
            self.parallel
        );

        Ok(results)
    }

    fn single_source(
        &self,
        reweighted: &DirectedGraph<Weight>,
        potentials: &[f64],
        source: usize,
    ) -> Result<ShortestPathResult<Weight>> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut result = Dijkstra::new().compute_shortest_paths(reweighted, source)?;
        for (target, distance) in result.distances.iter_mut().enumerate() {
            let Some(d) = distance else {
                continue;
            };
            let corrected = d.0 + potentials[target] - potentials[source];
            // Overflowed sums are reported as unreachable
            if corrected.is_finite() {
                *d = OrderedFloat(corrected);
            } else {
                *distance = None;
                result.predecessors[target] = None;
            }
        }
        Ok(result)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map_or(false, CancellationToken::is_cancelled)
    }

    /// All-pairs shortest paths over an airline network, keyed by airport code
    pub fn compute(&self, network: &AirlineNetwork) -> Result<AllPairsShortestPaths> {
        let indexed = IndexedNetwork::from_network(network);
        let results = self.compute_indexed(indexed.graph())?;

        let mut distances = HashMap::with_capacity(results.len());
        let mut paths = HashMap::with_capacity(results.len());

        for result in &results {
            let source = indexed.code(result.source)?.to_string();
            let mut distance_row = HashMap::new();
            let mut path_row = HashMap::new();

            for (target, distance) in result.reachable() {
                let path = result.path_to(target).ok_or_else(|| {
                    Error::AlgorithmError(format!(
                        "no path to reachable vertex {} from {}",
                        target, result.source
                    ))
                })?;
                let destination = indexed.code(target)?.to_string();
                path_row.insert(destination.clone(), indexed.path_codes(&path)?);
                distance_row.insert(destination, distance.0);
            }

            distances.insert(source.clone(), distance_row);
            paths.insert(source, path_row);
        }

        Ok(AllPairsShortestPaths {
            distances: DistanceMatrix { rows: distances },
            paths: PathMatrix { rows: paths },
        })
    }
}

/// The input graph plus a synthetic source with a zero-weight edge to every
/// vertex. Lives only for the Bellman-Ford phase.
struct AugmentedGraph {
    graph: DirectedGraph<Weight>,
    source: usize,
}

impl AugmentedGraph {
    fn new(graph: &DirectedGraph<Weight>) -> Self {
        let mut augmented = graph.clone();
        let source = augmented.add_vertex();
        for v in 0..graph.vertex_count() {
            augmented.add_edge(source, v, OrderedFloat(0.0));
        }
        AugmentedGraph { graph: augmented, source }
    }
}

/// Runs Johnson's algorithm sequentially over `network`
pub fn all_pairs_shortest_paths(network: &AirlineNetwork) -> Result<AllPairsShortestPaths> {
    Johnson::new().compute(network)
}
