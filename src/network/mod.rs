pub mod builder;
pub mod records;

pub use builder::{build_graph, nearest_hub, BuildReport, Connectivity, NetworkBuilder};
pub use records::{AirportRecord, HubSpecification, RouteRecord};

use std::collections::{BTreeSet, HashMap};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::{Error, Result};

/// Relative tolerance used when deciding whether a merged route disagrees with
/// the weight already stored for it
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Which of the two analysed operators serve an airport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirportOperator {
    Primary,
    Secondary,
    Both,
}

/// An airport (graph vertex)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<AirportOperator>,
}

impl Airport {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A directed route between two airports (graph edge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    /// Edge weight; kilometers for real routes
    pub distance_km: f64,
    /// Operators flying this route
    pub operators: BTreeSet<String>,
}

impl Route {
    pub fn served_by(&self, operator: &str) -> bool {
        self.operators.contains(operator)
    }
}

/// Outcome of inserting a route into the network
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteInsert {
    /// A new directed edge was created
    Added,
    /// The edge already existed; operators were merged and the stored weight kept.
    /// `divergent` is set when the incoming weight disagreed with the stored one.
    Merged { divergent: bool },
}

/// Weighted directed airline network keyed by airport code
#[derive(Debug, Clone, Default)]
pub struct AirlineNetwork {
    airports: HashMap<String, Airport>,
    /// origin -> destination -> route
    routes: HashMap<String, HashMap<String, Route>>,
}

impl AirlineNetwork {
    /// Creates a new empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an airport. Airports are immutable once added: returns false and
    /// leaves the network untouched if the code is already present.
    pub fn add_airport(&mut self, airport: Airport) -> bool {
        if self.airports.contains_key(&airport.code) {
            return false;
        }
        self.routes.entry(airport.code.clone()).or_default();
        self.airports.insert(airport.code.clone(), airport);
        true
    }

    /// Adds a directed route, or merges operators into an existing one.
    ///
    /// Returns `None` when either endpoint is not a known airport or the
    /// distance is not finite. When the route already exists its weight is
    /// kept (first writer wins) and the operator labels are unioned.
    pub fn add_route<I, S>(
        &mut self,
        origin: &str,
        destination: &str,
        distance_km: f64,
        operators: I,
    ) -> Option<RouteInsert>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !distance_km.is_finite()
            || !self.airports.contains_key(origin)
            || !self.airports.contains_key(destination)
        {
            return None;
        }

        let outgoing = self.routes.entry(origin.to_string()).or_default();
        match outgoing.get_mut(destination) {
            Some(route) => {
                route.operators.extend(operators.into_iter().map(Into::into));
                let scale = route.distance_km.abs().max(1.0);
                let divergent = (route.distance_km - distance_km).abs() > WEIGHT_TOLERANCE * scale;
                if divergent {
                    warn!(
                        "Route {}->{} merged with weight {} but keeps stored weight {}",
                        origin, destination, distance_km, route.distance_km
                    );
                }
                Some(RouteInsert::Merged { divergent })
            }
            None => {
                outgoing.insert(
                    destination.to_string(),
                    Route {
                        origin: origin.to_string(),
                        destination: destination.to_string(),
                        distance_km,
                        operators: operators.into_iter().map(Into::into).collect(),
                    },
                );
                Some(RouteInsert::Added)
            }
        }
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn has_airport(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    /// Looks up an airport, failing with `UnknownAirport`
    pub fn require_airport(&self, code: &str) -> Result<&Airport> {
        self.airports
            .get(code)
            .ok_or_else(|| Error::UnknownAirport(code.to_string()))
    }

    pub fn airports(&self) -> impl Iterator<Item = &Airport> + '_ {
        self.airports.values()
    }

    /// Airport codes in ascending order
    pub fn airport_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.airports.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn route(&self, origin: &str, destination: &str) -> Option<&Route> {
        self.routes.get(origin).and_then(|out| out.get(destination))
    }

    pub fn has_route(&self, origin: &str, destination: &str) -> bool {
        self.route(origin, destination).is_some()
    }

    /// Outgoing routes of an airport (empty for unknown codes)
    pub fn routes_from(&self, origin: &str) -> impl Iterator<Item = &Route> + '_ {
        self.routes.get(origin).into_iter().flat_map(|out| out.values())
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values().flat_map(|out| out.values())
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Number of outgoing routes of an airport
    pub fn out_degree(&self, code: &str) -> usize {
        self.routes.get(code).map_or(0, HashMap::len)
    }

    /// Number of incoming routes of an airport
    pub fn in_degree(&self, code: &str) -> usize {
        self.routes
            .values()
            .filter(|out| out.contains_key(code))
            .count()
    }

    /// True if no route has a negative weight
    pub fn has_non_negative_weights(&self) -> bool {
        self.routes().all(|route| route.distance_km >= 0.0)
    }
}
