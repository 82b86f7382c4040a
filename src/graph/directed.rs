use crate::graph::traits::{Graph, MutableGraph};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A directed graph over dense vertex indices `0..vertex_count`, stored as
/// adjacency lists in both directions
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each vertex: [(target_vertex, weight)]
    outgoing_edges: Vec<Vec<(usize, W)>>,

    /// Incoming edges for each vertex: [(source_vertex, weight)]
    incoming_edges: Vec<Vec<(usize, W)>>,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            outgoing_edges: Vec::new(),
            incoming_edges: Vec::new(),
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            outgoing_edges: vec![Vec::new(); vertices],
            incoming_edges: vec![Vec::new(); vertices],
        }
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.outgoing_edges
            .iter()
            .flatten()
            .all(|(_, weight)| *weight >= W::zero())
    }

    /// Iterates over every edge as (from, to, weight)
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.outgoing_edges
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |&(to, weight)| (from, to, weight)))
    }

    /// Builds a graph with the same vertices and edges, each weight replaced
    /// by `f(from, to, weight)`
    pub fn map_weights<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, usize, W) -> W,
    {
        let mut result = DirectedGraph::with_capacity(self.vertex_count());
        for (from, to, weight) in self.edges() {
            result.add_edge(from, to, f(from, to, weight));
        }
        result
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.outgoing_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing_edges.iter().map(Vec::len).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.outgoing_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.incoming_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.outgoing_edges.len()
    }

    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges
            .get(from)?
            .iter()
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| *weight)
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        self.outgoing_edges.push(Vec::new());
        self.incoming_edges.push(Vec::new());
        self.outgoing_edges.len() - 1
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        // Negative weights are allowed; Johnson's reweighting handles them
        if !self.has_vertex(from) || !self.has_vertex(to) || !weight.is_finite() {
            return false;
        }

        if self.update_edge_weight(from, to, weight) {
            return true;
        }

        self.outgoing_edges[from].push((to, weight));
        self.incoming_edges[to].push((from, weight));
        true
    }

    fn update_edge_weight(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) || !weight.is_finite() {
            return false;
        }

        let Some(edge) = self.outgoing_edges[from].iter_mut().find(|(target, _)| *target == to) else {
            return false;
        };
        edge.1 = weight;

        if let Some(edge) = self.incoming_edges[to].iter_mut().find(|(source, _)| *source == from) {
            edge.1 = weight;
        }
        true
    }
}
