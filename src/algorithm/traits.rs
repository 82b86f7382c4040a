use std::fmt::Debug;
use log::warn;
use num_traits::{Float, Zero};
use crate::graph::Graph;
use crate::Result;

/// Result of a single-source shortest path computation
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex; `None` when unreachable
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Vertices with a finite distance from the source
    pub fn reachable(&self) -> impl Iterator<Item = (usize, W)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(v, d)| d.map(|d| (v, d)))
    }

    /// Walks the predecessor chain from `target` back to the source.
    ///
    /// Returns `None` for unreachable targets or a broken chain.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.predecessors.len() || self.distances[target].is_none() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = match self.predecessors[current] {
                Some(pred) => pred,
                None => {
                    warn!("Broken predecessor chain at vertex {} (source {})", current, self.source);
                    return None;
                }
            };
            path.push(current);

            // A simple path never visits more vertices than the graph has
            if path.len() > self.predecessors.len() {
                warn!("Predecessor cycle while rebuilding path to {} from {}", target, self.source);
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// Trait for single-source shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        result.path_to(target)
    }
}
