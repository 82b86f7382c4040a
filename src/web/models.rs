use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::algorithm::johnson::AllPairsShortestPaths;
use crate::codeshare::CodeshareOpportunity;
use crate::network::{AirlineNetwork, AirportRecord, BuildReport, HubSpecification, RouteRecord};

/// Network upload: airports plus explicit routes and/or hub-and-spoke
/// specifications for up to two operators
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNetworkRequest {
    pub airports: Vec<AirportRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    #[serde(default)]
    pub primary: Option<HubSpecification>,
    #[serde(default)]
    pub secondary: Option<HubSpecification>,
}

/// Returned when a session is created or inspected
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub id: Uuid,
    pub airport_count: usize,
    pub route_count: usize,
    /// Reachable ordered pairs of distinct airports
    pub reachable_pairs: usize,
    pub report: BuildReport,
    pub computation_time_ms: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub stops: usize,
    pub path: Vec<String>,
}

/// Optional overrides of the default codeshare thresholds
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeshareQuery {
    pub min_distance_km: Option<f64>,
    pub max_stops: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeshareResponse {
    pub count: usize,
    pub opportunities: Vec<CodeshareOpportunity>,
    pub connection_hubs: BTreeMap<String, usize>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// A built network with its shortest paths, computed once at creation
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub network: AirlineNetwork,
    pub shortest: AllPairsShortestPaths,
    pub operators: Option<(HubSpecification, HubSpecification)>,
    pub report: BuildReport,
    pub computation_time_ms: f64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        network: AirlineNetwork,
        shortest: AllPairsShortestPaths,
        operators: Option<(HubSpecification, HubSpecification)>,
        report: BuildReport,
        computation_time_ms: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            network,
            shortest,
            operators,
            report,
            computation_time_ms,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            id: self.id,
            airport_count: self.network.airport_count(),
            route_count: self.network.route_count(),
            reachable_pairs: self
                .shortest
                .distances
                .iter()
                .filter(|(s, t, _)| s != t)
                .count(),
            report: self.report.clone(),
            computation_time_ms: self.computation_time_ms,
            created_at: self.created_at,
        }
    }
}
