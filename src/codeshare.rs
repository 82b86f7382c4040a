//! Codeshare opportunity detection between two operators.
//!
//! An opportunity is a shortest path from an airport served only by one
//! operator to an airport served only by the other that needs at least one
//! connection and rides routes of both operators along the way.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::algorithm::johnson::{AllPairsShortestPaths, DistanceMatrix};
use crate::graph::IndexedNetwork;
use crate::metrics::{betweenness_centrality, closeness_centrality, degree_centrality};
use crate::network::{AirlineNetwork, AirportOperator, HubSpecification};

/// Thresholds an opportunity has to meet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodeshareConfig {
    /// Minimum total flown distance
    pub min_distance_km: f64,
    /// Maximum number of intermediate airports
    pub max_stops: usize,
}

impl Default for CodeshareConfig {
    fn default() -> Self {
        CodeshareConfig {
            min_distance_km: 1000.0,
            max_stops: 3,
        }
    }
}

impl CodeshareConfig {
    pub fn with_min_distance_km(mut self, km: f64) -> Self {
        self.min_distance_km = km;
        self
    }

    pub fn with_max_stops(mut self, stops: usize) -> Self {
        self.max_stops = stops;
        self
    }
}

/// Direction of an opportunity relative to the two operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CodeshareDirection {
    PrimaryToSecondary,
    SecondaryToPrimary,
    Mixed,
}

/// One leg of an opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub operators: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeshareOpportunity {
    pub origin: String,
    pub destination: String,
    pub direction: CodeshareDirection,
    /// Sum of segment distances
    pub distance_km: f64,
    pub stops: usize,
    pub path: Vec<String>,
    pub segments: Vec<Segment>,
    pub uses_primary: bool,
    pub uses_secondary: bool,
}

impl CodeshareOpportunity {
    /// Airports between origin and destination
    pub fn connections(&self) -> &[String] {
        match self.path.len() {
            0..=2 => &[],
            len => &self.path[1..len - 1],
        }
    }
}

/// Scans every (primary-only, secondary-only) airport pair in both
/// directions. Results are ordered by distance, then origin and destination.
pub fn find_codeshare_opportunities(
    network: &AirlineNetwork,
    shortest: &AllPairsShortestPaths,
    primary: &HubSpecification,
    secondary: &HubSpecification,
    config: &CodeshareConfig,
) -> Vec<CodeshareOpportunity> {
    let primary_codes: HashSet<&str> = primary.served.iter().map(String::as_str).collect();
    let secondary_codes: HashSet<&str> = secondary.served.iter().map(String::as_str).collect();

    let mut primary_only: Vec<&str> = primary_codes.difference(&secondary_codes).copied().collect();
    let mut secondary_only: Vec<&str> = secondary_codes.difference(&primary_codes).copied().collect();
    primary_only.sort_unstable();
    secondary_only.sort_unstable();

    let mut opportunities = Vec::new();
    for &p in &primary_only {
        for &s in &secondary_only {
            for (origin, destination) in [(p, s), (s, p)] {
                if let Some(found) = analyze_route(
                    network,
                    shortest,
                    origin,
                    destination,
                    primary,
                    secondary,
                    config,
                ) {
                    opportunities.push(found);
                }
            }
        }
    }

    opportunities.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.origin.cmp(&b.origin))
            .then_with(|| a.destination.cmp(&b.destination))
    });
    opportunities
}

/// Checks a single ordered pair. `None` when there is no path, the path is
/// direct or too long, it does not use both operators, or it is shorter
/// than the configured minimum distance.
pub fn analyze_route(
    network: &AirlineNetwork,
    shortest: &AllPairsShortestPaths,
    origin: &str,
    destination: &str,
    primary: &HubSpecification,
    secondary: &HubSpecification,
    config: &CodeshareConfig,
) -> Option<CodeshareOpportunity> {
    let path = shortest.path(origin, destination)?;
    if path.len() < 3 || path.len() - 2 > config.max_stops {
        return None;
    }

    let mut segments = Vec::with_capacity(path.len() - 1);
    let mut uses_primary = false;
    let mut uses_secondary = false;
    let mut distance_km = 0.0;

    for leg in path.windows(2) {
        let Some(route) = network.route(&leg[0], &leg[1]) else {
            continue;
        };
        uses_primary |= route.served_by(&primary.operator);
        uses_secondary |= route.served_by(&secondary.operator);
        distance_km += route.distance_km;
        segments.push(Segment {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            distance_km: route.distance_km,
            operators: route.operators.clone(),
        });
    }

    if !(uses_primary && uses_secondary) || distance_km < config.min_distance_km {
        return None;
    }

    let direction = if primary.serves(origin) && secondary.serves(destination) {
        CodeshareDirection::PrimaryToSecondary
    } else if secondary.serves(origin) && primary.serves(destination) {
        CodeshareDirection::SecondaryToPrimary
    } else {
        CodeshareDirection::Mixed
    };

    Some(CodeshareOpportunity {
        origin: origin.to_string(),
        destination: destination.to_string(),
        direction,
        distance_km,
        stops: path.len() - 2,
        path: path.to_vec(),
        segments,
        uses_primary,
        uses_secondary,
    })
}

/// How many opportunities connect through each airport
pub fn connection_hubs(opportunities: &[CodeshareOpportunity]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for opportunity in opportunities {
        for hub in opportunity.connections() {
            *counts.entry(hub.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Codeshare distance compared against a reference distance for the same pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEfficiency {
    pub origin: String,
    pub destination: String,
    pub codeshare_distance_km: f64,
    pub direct_distance_km: Option<f64>,
    /// direct / codeshare
    pub efficiency: Option<f64>,
    /// codeshare / direct
    pub detour_factor: Option<f64>,
}

/// Compares each opportunity with `direct_distances`, typically great-circle
/// distances or a distance matrix over a network with direct routes
pub fn route_efficiency(
    opportunities: &[CodeshareOpportunity],
    direct_distances: &DistanceMatrix,
) -> Vec<RouteEfficiency> {
    opportunities
        .iter()
        .map(|opportunity| {
            let direct = direct_distances
                .get(&opportunity.origin, &opportunity.destination)
                .filter(|d| *d > 0.0);
            let codeshare = opportunity.distance_km;
            RouteEfficiency {
                origin: opportunity.origin.clone(),
                destination: opportunity.destination.clone(),
                codeshare_distance_km: codeshare,
                direct_distance_km: direct,
                efficiency: direct.filter(|_| codeshare > 0.0).map(|d| d / codeshare),
                detour_factor: direct.map(|d| codeshare / d),
            }
        })
        .collect()
}

/// Structural importance of one airport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubImportance {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub operator: Option<AirportOperator>,
    /// in + out routes
    pub degree: usize,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    /// Mean shortest distance to the other airports it reaches
    pub average_distance_km: Option<f64>,
}

/// Ranks airports by their role in the network, most central first
/// (betweenness, then degree, then code)
pub fn hub_importance(network: &AirlineNetwork, distances: &DistanceMatrix) -> Vec<HubImportance> {
    let indexed = IndexedNetwork::from_network(network);
    let graph = indexed.graph();
    let degree = degree_centrality(graph);
    let betweenness = betweenness_centrality(graph);
    let closeness = closeness_centrality(graph);

    let mut ranking: Vec<HubImportance> = indexed
        .codes()
        .iter()
        .enumerate()
        .filter_map(|(i, code)| {
            let airport = network.airport(code)?;
            Some(HubImportance {
                code: code.clone(),
                name: airport.name.clone(),
                city: airport.city.clone(),
                country: airport.country.clone(),
                operator: airport.operator,
                degree: network.out_degree(code) + network.in_degree(code),
                degree_centrality: degree[i],
                betweenness_centrality: betweenness[i],
                closeness_centrality: closeness[i],
                average_distance_km: average_distance(distances.from_source(code)),
            })
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.betweenness_centrality
            .total_cmp(&a.betweenness_centrality)
            .then_with(|| b.degree.cmp(&a.degree))
            .then_with(|| a.code.cmp(&b.code))
    });
    ranking
}

fn average_distance(row: Option<&HashMap<String, f64>>) -> Option<f64> {
    let positive: Vec<f64> = row?.values().copied().filter(|d| *d > 0.0).collect();
    if positive.is_empty() {
        None
    } else {
        Some(positive.iter().sum::<f64>() / positive.len() as f64)
    }
}
