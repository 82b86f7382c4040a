//! Structural metrics of an airline network.
//!
//! Centrality follows the usual directed-graph conventions:
//! - degree: (in + out) / (n - 1)
//! - betweenness: Brandes over hop counts, scaled by 1 / ((n - 1)(n - 2))
//! - closeness: over incoming hop distances with the Wasserman-Faust
//!   correction for vertices that only part of the graph can reach

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

use log::debug;
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::johnson::AllPairsShortestPaths;
use crate::graph::{Graph, IndexedNetwork};
use crate::network::AirlineNetwork;
use crate::{Error, Result};

/// Per-airport centrality scores keyed by airport code
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CentralityReport {
    pub degree: HashMap<String, f64>,
    pub betweenness: HashMap<String, f64>,
    pub closeness: HashMap<String, f64>,
}

/// Summary metrics of one network snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub airport_count: usize,
    pub route_count: usize,
    /// routes / (n * (n - 1)); zero for a single airport
    pub density: f64,
    pub is_weakly_connected: bool,
    /// routes / n
    pub average_out_degree: f64,
    /// (in + out) summed over airports / n
    pub average_degree: f64,
    pub centrality: CentralityReport,
    /// Mean shortest distance over reachable pairs of distinct airports;
    /// only filled by `network_metrics_with_paths`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_shortest_distance_km: Option<f64>,
    /// Longest finite shortest distance; only filled by `network_metrics_with_paths`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_km: Option<f64>,
}

/// Computes counts, density, connectivity and centrality for `network`.
/// Fails with `Error::EmptyGraph` when the network has no airports.
pub fn network_metrics(network: &AirlineNetwork) -> Result<MetricsReport> {
    if network.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let indexed = IndexedNetwork::from_network(network);
    let graph = indexed.graph();
    let n = graph.vertex_count();
    let m = graph.edge_count();

    let density = if n > 1 {
        m as f64 / (n * (n - 1)) as f64
    } else {
        0.0
    };

    let by_code = |scores: Vec<f64>| -> HashMap<String, f64> {
        indexed.codes().iter().cloned().zip(scores).collect()
    };

    let centrality = CentralityReport {
        degree: by_code(degree_centrality(graph)),
        betweenness: by_code(betweenness_centrality(graph)),
        closeness: by_code(closeness_centrality(graph)),
    };

    debug!("Metrics computed for {} airports and {} routes", n, m);

    Ok(MetricsReport {
        airport_count: n,
        route_count: m,
        density,
        is_weakly_connected: is_weakly_connected(graph),
        average_out_degree: m as f64 / n as f64,
        average_degree: 2.0 * m as f64 / n as f64,
        centrality,
        average_shortest_distance_km: None,
        diameter_km: None,
    })
}

/// `network_metrics` plus distance statistics taken from an all-pairs result
/// computed on the same network snapshot
pub fn network_metrics_with_paths(
    network: &AirlineNetwork,
    shortest: &AllPairsShortestPaths,
) -> Result<MetricsReport> {
    let mut report = network_metrics(network)?;

    let distances: Vec<f64> = shortest
        .distances
        .iter()
        .filter(|(s, t, _)| s != t)
        .map(|(_, _, d)| d)
        .collect();

    if !distances.is_empty() {
        report.average_shortest_distance_km = Some(distances.iter().sum::<f64>() / distances.len() as f64);
        report.diameter_km = distances.iter().copied().reduce(f64::max);
    }

    Ok(report)
}

/// Degree centrality, indexed by vertex
pub fn degree_centrality<W, G>(graph: &G) -> Vec<f64>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    if n <= 1 {
        return vec![1.0; n];
    }

    let scale = 1.0 / (n - 1) as f64;
    (0..n)
        .map(|v| (graph.outgoing_edges(v).count() + graph.incoming_edges(v).count()) as f64 * scale)
        .collect()
}

/// Betweenness centrality (Brandes) over hop counts, indexed by vertex
pub fn betweenness_centrality<W, G>(graph: &G) -> Vec<f64>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    let mut betweenness = vec![0.0; n];
    if n <= 2 {
        return betweenness;
    }

    for s in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];

        sigma[s] = 1.0;
        dist[s] = Some(0);

        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dist_v) = dist[v] else {
                continue;
            };
            for (w, _) in graph.outgoing_edges(v) {
                if dist[w].is_none() {
                    dist[w] = Some(dist_v + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dist_v + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0_f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }
            if w != s {
                betweenness[w] += delta[w];
            }
        }
    }

    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for b in &mut betweenness {
        *b *= scale;
    }
    betweenness
}

/// Closeness centrality over incoming hop distances, indexed by vertex
pub fn closeness_centrality<W, G>(graph: &G) -> Vec<f64>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    (0..n)
        .map(|v| {
            let (reached, total) = incoming_hop_distances(graph, v);
            if total == 0 || n <= 1 {
                return 0.0;
            }
            let others = (reached - 1) as f64;
            (others / total as f64) * (others / (n - 1) as f64)
        })
        .collect()
}

/// BFS against edge direction: (vertices that reach `target` including itself,
/// sum of their hop distances)
fn incoming_hop_distances<W, G>(graph: &G, target: usize) -> (usize, usize)
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut dist: Vec<Option<usize>> = vec![None; graph.vertex_count()];
    dist[target] = Some(0);
    let mut queue = VecDeque::from([target]);
    let mut reached = 0;
    let mut total = 0;

    while let Some(v) = queue.pop_front() {
        let Some(dist_v) = dist[v] else {
            continue;
        };
        reached += 1;
        total += dist_v;
        for (u, _) in graph.incoming_edges(v) {
            if dist[u].is_none() {
                dist[u] = Some(dist_v + 1);
                queue.push_back(u);
            }
        }
    }

    (reached, total)
}

/// True if ignoring edge direction leaves a single connected component.
/// The empty graph is not connected.
pub fn is_weakly_connected<W, G>(graph: &G) -> bool
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    if n == 0 {
        return false;
    }

    let mut seen = vec![false; n];
    seen[0] = true;
    let mut queue = VecDeque::from([0]);
    let mut count = 1;

    while let Some(v) = queue.pop_front() {
        let neighbours = graph
            .outgoing_edges(v)
            .chain(graph.incoming_edges(v))
            .map(|(u, _)| u)
            .collect::<Vec<_>>();
        for u in neighbours {
            if !seen[u] {
                seen[u] = true;
                count += 1;
                queue.push_back(u);
            }
        }
    }

    count == n
}
