use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::graph::{DirectedGraph, MutableGraph};
use crate::network::AirlineNetwork;
use crate::{Error, Result};

/// Dense-index view of an `AirlineNetwork`.
///
/// Airport codes are sorted before indices are assigned, so two snapshots of
/// the same network always produce the same indexing and edge order.
#[derive(Debug, Clone)]
pub struct IndexedNetwork {
    codes: Vec<String>,
    index: HashMap<String, usize>,
    graph: DirectedGraph<OrderedFloat<f64>>,
}

impl IndexedNetwork {
    pub fn from_network(network: &AirlineNetwork) -> Self {
        let codes: Vec<String> = network.airport_codes().into_iter().map(str::to_string).collect();
        let index: HashMap<String, usize> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| (code.clone(), i))
            .collect();

        let mut graph = DirectedGraph::with_capacity(codes.len());
        for (from, code) in codes.iter().enumerate() {
            let mut routes: Vec<_> = network.routes_from(code).collect();
            routes.sort_by(|a, b| a.destination.cmp(&b.destination));
            for route in routes {
                if let Some(&to) = index.get(&route.destination) {
                    graph.add_edge(from, to, OrderedFloat(route.distance_km));
                }
            }
        }

        IndexedNetwork { codes, index, graph }
    }

    pub fn graph(&self) -> &DirectedGraph<OrderedFloat<f64>> {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.codes.len()
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn code(&self, vertex: usize) -> Result<&str> {
        self.codes
            .get(vertex)
            .map(String::as_str)
            .ok_or(Error::InvalidVertex(vertex))
    }

    pub fn index_of(&self, code: &str) -> Result<usize> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| Error::UnknownAirport(code.to_string()))
    }

    /// Translates a vertex path back to airport codes
    pub fn path_codes(&self, path: &[usize]) -> Result<Vec<String>> {
        path.iter()
            .map(|&v| self.code(v).map(str::to_string))
            .collect()
    }
}
