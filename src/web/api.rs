use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::johnson::Johnson;
use crate::codeshare::{connection_hubs, find_codeshare_opportunities, CodeshareConfig};
use crate::metrics::{network_metrics_with_paths, MetricsReport};
use crate::network::{HubSpecification, NetworkBuilder};
use crate::web::models::*;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Arc<Session>>>>,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Arc<Session>>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_store_poisoned",
                "Session store is unavailable".to_string(),
            )
        })
    }

    fn session(&self, id: &Uuid) -> Result<Arc<Session>, ApiError> {
        self.lock()?.get(id).cloned().ok_or_else(|| {
            api_error(StatusCode::NOT_FOUND, "session_not_found", "Session not found".to_string())
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/networks", post(create_network))
        .route("/api/networks/:session_id", get(get_network))
        .route("/api/networks/:session_id/metrics", get(get_metrics))
        .route("/api/networks/:session_id/paths/:origin/:destination", get(get_path))
        .route("/api/networks/:session_id/codeshare", get(get_codeshare))
        .route("/api/sessions", get(list_sessions))
        .route("/api/health", get(health_check))
}

/// Build a network, run Johnson's algorithm on it and store the session
pub async fn create_network(
    State(state): State<AppState>,
    Json(request): Json<CreateNetworkRequest>,
) -> Result<Json<NetworkSummary>, ApiError> {
    let active = state.lock()?.len();
    if active >= state.max_sessions {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "too_many_sessions",
            format!("Session limit of {} reached", state.max_sessions),
        ));
    }

    let computed = tokio::task::spawn_blocking(move || {
        let CreateNetworkRequest {
            airports,
            routes,
            primary,
            secondary,
        } = request;

        let (mut builder, operators) = match (primary, secondary) {
            (Some(primary), Some(secondary)) => (
                NetworkBuilder::combined(&airports, &primary, &secondary),
                Some((primary, secondary)),
            ),
            (primary, secondary) => {
                let mut builder = NetworkBuilder::new().with_airports(&airports);
                for spec in primary.iter().chain(secondary.iter()) {
                    builder.add_hub_network(spec);
                }
                (builder, None)
            }
        };

        builder.add_routes(&routes);
        run_johnson(builder, operators)
    })
    .await
    .map_err(|err| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "computation_failed",
            format!("Shortest path task failed: {}", err),
        )
    })?;

    let session = computed.map_err(library_error)?;
    let summary = session.summary();
    info!(
        "Session {} created: {} airports, {} routes, {:.1} ms",
        summary.id, summary.airport_count, summary.route_count, summary.computation_time_ms
    );

    state.lock()?.insert(session.id, Arc::new(session));
    Ok(Json(summary))
}

fn run_johnson(
    builder: NetworkBuilder,
    operators: Option<(HubSpecification, HubSpecification)>,
) -> crate::Result<Session> {
    let (network, report) = builder.finish();
    let started = Instant::now();
    let shortest = Johnson::new().with_parallel(true).compute(&network)?;
    let elapsed = started.elapsed().as_secs_f64() * 1000.0;
    Ok(Session::new(network, shortest, operators, report, elapsed))
}

/// Summary of a stored network
pub async fn get_network(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<NetworkSummary>, ApiError> {
    Ok(Json(state.session(&session_id)?.summary()))
}

/// Metrics of a stored network
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MetricsReport>, ApiError> {
    let session = state.session(&session_id)?;
    network_metrics_with_paths(&session.network, &session.shortest)
        .map(Json)
        .map_err(library_error)
}

/// Shortest path between two airports
pub async fn get_path(
    State(state): State<AppState>,
    Path((session_id, origin, destination)): Path<(Uuid, String, String)>,
) -> Result<Json<PathResponse>, ApiError> {
    let session = state.session(&session_id)?;
    for code in [&origin, &destination] {
        session.network.require_airport(code).map_err(library_error)?;
    }

    match (
        session.shortest.distance(&origin, &destination),
        session.shortest.path(&origin, &destination),
    ) {
        (Some(distance_km), Some(path)) => Ok(Json(PathResponse {
            origin,
            destination,
            distance_km,
            stops: path.len().saturating_sub(2),
            path: path.to_vec(),
        })),
        _ => Err(api_error(
            StatusCode::NOT_FOUND,
            "unreachable",
            format!("No route from {} to {}", origin, destination),
        )),
    }
}

/// Codeshare opportunities of a network built from two hub specifications
pub async fn get_codeshare(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<CodeshareQuery>,
) -> Result<Json<CodeshareResponse>, ApiError> {
    let session = state.session(&session_id)?;
    let Some((primary, secondary)) = session.operators.as_ref() else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "no_operators",
            "Network was not built from two operator specifications".to_string(),
        ));
    };

    let mut config = CodeshareConfig::default();
    if let Some(km) = query.min_distance_km {
        config = config.with_min_distance_km(km);
    }
    if let Some(stops) = query.max_stops {
        config = config.with_max_stops(stops);
    }

    let opportunities = find_codeshare_opportunities(&session.network, &session.shortest, primary, secondary, &config);
    Ok(Json(CodeshareResponse {
        count: opportunities.len(),
        connection_hubs: connection_hubs(&opportunities),
        opportunities,
    }))
}

/// List all active sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Uuid>>, ApiError> {
    let sessions = state.lock()?;
    Ok(Json(sessions.keys().cloned().collect()))
}

/// Health check endpoint
pub async fn health_check() -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn library_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::UnknownAirport(_) => (StatusCode::NOT_FOUND, "unknown_airport"),
        Error::NegativeCycle => (StatusCode::UNPROCESSABLE_ENTITY, "negative_cycle"),
        Error::EmptyGraph => (StatusCode::UNPROCESSABLE_ENTITY, "empty_network"),
        Error::NegativeWeight(_) => (StatusCode::UNPROCESSABLE_ENTITY, "negative_weight"),
        Error::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "cancelled"),
        Error::InvalidVertex(_) | Error::SourceNotFound | Error::AlgorithmError(_) => {
            warn!("Internal shortest path error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };
    api_error(status, code, err.to_string())
}
