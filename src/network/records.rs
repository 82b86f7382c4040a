//! Tabular input rows handed over by an external data loader.

use serde::{Deserialize, Serialize};

use super::{Airport, AirportOperator};

/// One airport row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AirportRecord {
    pub fn new(code: &str, name: &str, latitude: f64, longitude: f64) -> Self {
        AirportRecord {
            code: code.to_string(),
            name: name.to_string(),
            city: String::new(),
            country: String::new(),
            latitude,
            longitude,
        }
    }

    pub fn with_location(mut self, city: &str, country: &str) -> Self {
        self.city = city.to_string();
        self.country = country.to_string();
        self
    }

    pub(crate) fn to_airport(&self, operator: Option<AirportOperator>) -> Airport {
        Airport {
            code: self.code.clone(),
            name: self.name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            operator,
        }
    }
}

/// One route row: a directed flight leg with its length and operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    #[serde(default)]
    pub operators: Vec<String>,
}

impl RouteRecord {
    pub fn new(origin: &str, destination: &str, distance_km: f64) -> Self {
        RouteRecord {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
            operators: Vec::new(),
        }
    }

    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operators.push(operator.to_string());
        self
    }
}

/// Hub-and-spoke description of one operator's network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpecification {
    /// Operator label written on every synthesized route
    pub operator: String,
    /// Hub airport codes; order decides nearest-hub ties
    pub hubs: Vec<String>,
    /// Every airport code the operator serves, hubs included
    pub served: Vec<String>,
}

impl HubSpecification {
    pub fn new<H, S>(operator: &str, hubs: H, served: S) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        HubSpecification {
            operator: operator.to_string(),
            hubs: hubs.into_iter().map(Into::into).collect(),
            served: served.into_iter().map(Into::into).collect(),
        }
    }

    pub fn serves(&self, code: &str) -> bool {
        self.served.iter().any(|c| c == code)
    }

    pub fn is_hub(&self, code: &str) -> bool {
        self.hubs.iter().any(|h| h == code)
    }
}
