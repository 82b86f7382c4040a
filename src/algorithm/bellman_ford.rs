use std::fmt::Debug;
use log::debug;
use num_traits::{Float, Zero};

use crate::graph::Graph;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::{Error, Result};

/// Bellman-Ford single-source shortest paths. Accepts negative weights and
/// fails with `Error::NegativeCycle` when a negative cycle is reachable from
/// the source.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellmanFord;

impl BellmanFord {
    pub fn new() -> Self {
        BellmanFord
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for BellmanFord
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Bellman-Ford"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let n = graph.vertex_count();
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        distances[source] = Some(W::zero());

        // Without negative cycles every distance settles within n - 1 passes;
        // an update during pass n proves one exists.
        for pass in 1..=n {
            let mut updated = false;

            for u in 0..n {
                let Some(dist_u) = distances[u] else {
                    continue;
                };
                for (v, weight) in graph.outgoing_edges(u) {
                    let candidate = dist_u + weight;
                    let improves = match distances[v] {
                        None => true,
                        Some(current) => candidate < current,
                    };
                    if improves {
                        distances[v] = Some(candidate);
                        predecessors[v] = Some(u);
                        updated = true;
                    }
                }
            }

            if !updated {
                debug!("Bellman-Ford converged after {} passes over {} vertices", pass, n);
                return Ok(ShortestPathResult {
                    distances,
                    predecessors,
                    source,
                });
            }
        }

        Err(Error::NegativeCycle)
    }
}
