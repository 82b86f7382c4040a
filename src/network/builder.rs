use std::collections::HashSet;

use log::{debug, warn};
use serde::Serialize;

use super::{AirlineNetwork, AirportOperator, AirportRecord, HubSpecification, RouteInsert, RouteRecord};

/// Diagnostics collected while building a network. Rows counted here were
/// skipped; construction itself never fails because of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Route rows naming an unknown airport or carrying a non-finite distance
    pub skipped_routes: usize,
    /// Served or hub codes with no airport record
    pub skipped_airports: usize,
    /// Airport rows whose code was already present
    pub duplicate_airports: usize,
    /// Insertions that hit an existing directed edge
    pub merged_routes: usize,
    /// Merges whose incoming weight disagreed with the stored one
    pub divergent_weights: usize,
}

/// How the airports of a network are connected
#[derive(Debug, Clone, Copy)]
pub enum Connectivity<'a> {
    /// Explicit route rows
    Routes(&'a [RouteRecord]),
    /// Hub-and-spoke synthesis, one specification per operator
    Hubs(&'a [HubSpecification]),
}

/// Builds an `AirlineNetwork` from airport rows and either route rows or hub
/// specifications.
pub fn build_graph(airports: &[AirportRecord], connectivity: Connectivity<'_>) -> (AirlineNetwork, BuildReport) {
    let mut builder = NetworkBuilder::new().with_airports(airports);
    match connectivity {
        Connectivity::Routes(routes) => builder.add_routes(routes),
        Connectivity::Hubs(specs) => {
            for spec in specs {
                builder.add_hub_network(spec);
            }
        }
    }
    builder.finish()
}

/// Returns the hub geographically closest to `airport`.
///
/// Hubs are scanned in the given order and only a strictly shorter distance
/// replaces the current best, so exact ties go to the earliest hub. Hubs with
/// no airport record or a non-finite distance are ignored. Returns `None` when
/// the airport itself or every usable hub is missing from the network.
pub fn nearest_hub<'h>(network: &AirlineNetwork, airport: &str, hubs: &'h [String]) -> Option<&'h str> {
    let origin = network.airport(airport)?.coordinate();

    let mut best: Option<(&'h str, f64)> = None;
    for hub in hubs {
        let Some(hub_airport) = network.airport(hub) else {
            continue;
        };
        let distance = origin.distance_to(&hub_airport.coordinate());
        if !distance.is_finite() {
            continue;
        }
        let closer = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => true,
        };
        if closer {
            best = Some((hub.as_str(), distance));
        }
    }

    best.map(|(hub, _)| hub)
}

/// Incremental network construction with skip diagnostics
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    network: AirlineNetwork,
    report: BuildReport,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-operator network: airports tagged with the operator(s) serving
    /// them, then hub-and-spoke routes synthesized for both operators.
    pub fn combined(airports: &[AirportRecord], primary: &HubSpecification, secondary: &HubSpecification) -> Self {
        let primary_codes: HashSet<&str> = primary.served.iter().map(String::as_str).collect();
        let secondary_codes: HashSet<&str> = secondary.served.iter().map(String::as_str).collect();

        let mut builder = NetworkBuilder::new();
        for record in airports {
            let code = record.code.as_str();
            let operator = match (primary_codes.contains(code), secondary_codes.contains(code)) {
                (true, true) => Some(AirportOperator::Both),
                (true, false) => Some(AirportOperator::Primary),
                (false, true) => Some(AirportOperator::Secondary),
                (false, false) => None,
            };
            builder.insert_airport(record, operator);
        }

        builder.add_hub_network(primary);
        builder.add_hub_network(secondary);
        builder
    }

    /// Adds untagged airports
    pub fn with_airports(mut self, airports: &[AirportRecord]) -> Self {
        for record in airports {
            self.insert_airport(record, None);
        }
        self
    }

    pub fn with_routes(mut self, routes: &[RouteRecord]) -> Self {
        self.add_routes(routes);
        self
    }

    pub fn with_hub_network(mut self, spec: &HubSpecification) -> Self {
        self.add_hub_network(spec);
        self
    }

    fn insert_airport(&mut self, record: &AirportRecord, operator: Option<AirportOperator>) {
        if !self.network.add_airport(record.to_airport(operator)) {
            warn!("Duplicate airport record {} ignored", record.code);
            self.report.duplicate_airports += 1;
        }
    }

    /// Adds one directed edge per route row; rows with unknown endpoints or a
    /// non-finite distance are skipped
    pub fn add_routes(&mut self, routes: &[RouteRecord]) {
        for route in routes {
            if !route.distance_km.is_finite() {
                warn!(
                    "Skipping route {}->{}: distance {} is not finite",
                    route.origin, route.destination, route.distance_km
                );
                self.report.skipped_routes += 1;
                continue;
            }

            let inserted = self.network.add_route(
                &route.origin,
                &route.destination,
                route.distance_km,
                route.operators.iter().cloned(),
            );
            match inserted {
                Some(outcome) => self.record_insert(outcome),
                None => {
                    debug!("Skipping route {}->{}: unknown airport", route.origin, route.destination);
                    self.report.skipped_routes += 1;
                }
            }
        }
    }

    /// Connects every served hub pair in both directions, then every served
    /// non-hub airport to its nearest hub in both directions.
    pub fn add_hub_network(&mut self, spec: &HubSpecification) {
        let mut seen = HashSet::new();
        for code in spec.hubs.iter().chain(spec.served.iter()) {
            if seen.insert(code.as_str()) && !self.network.has_airport(code) {
                warn!("{}: no airport record for {}", spec.operator, code);
                self.report.skipped_airports += 1;
            }
        }

        let served: HashSet<&str> = spec.served.iter().map(String::as_str).collect();

        for (i, first) in spec.hubs.iter().enumerate() {
            for second in &spec.hubs[i + 1..] {
                if served.contains(first.as_str()) && served.contains(second.as_str()) {
                    self.add_bidirectional(first, second, &spec.operator);
                }
            }
        }

        for airport in &spec.served {
            if spec.is_hub(airport) {
                continue;
            }
            if let Some(hub) = nearest_hub(&self.network, airport, &spec.hubs) {
                self.add_bidirectional(airport, hub, &spec.operator);
            }
        }

        debug!(
            "{}: {} hubs, {} served airports, network now has {} routes",
            spec.operator,
            spec.hubs.len(),
            spec.served.len(),
            self.network.route_count()
        );
    }

    fn add_bidirectional(&mut self, a: &str, b: &str, operator: &str) {
        let (Some(from), Some(to)) = (self.network.airport(a), self.network.airport(b)) else {
            return;
        };
        let distance = from.coordinate().distance_to(&to.coordinate());

        for (origin, destination) in [(a, b), (b, a)] {
            if let Some(outcome) = self.network.add_route(origin, destination, distance, [operator]) {
                self.record_insert(outcome);
            }
        }
    }

    fn record_insert(&mut self, outcome: RouteInsert) {
        if let RouteInsert::Merged { divergent } = outcome {
            self.report.merged_routes += 1;
            if divergent {
                self.report.divergent_weights += 1;
            }
        }
    }

    pub fn network(&self) -> &AirlineNetwork {
        &self.network
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn build(self) -> AirlineNetwork {
        self.network
    }

    pub fn finish(self) -> (AirlineNetwork, BuildReport) {
        (self.network, self.report)
    }
}
