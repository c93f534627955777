//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::cache::CachedPlan;
use crate::planner::{PlanError, Planner, analyze, recommend};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops/search", get(search_stops))
        .route("/api/routes/popular", get(popular_routes))
        .route("/api/plan", post(plan_trip))
        .route("/api/analyze", post(analyze_option))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Suggest stop names for a partial query.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stops = state
        .index
        .suggest_stops(&req.q, limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(StopSearchResponse { stops })
}

/// List the routes with the most stops.
async fn popular_routes(
    State(state): State<AppState>,
    Query(req): Query<PopularRoutesRequest>,
) -> Json<PopularRoutesResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let routes = state
        .index
        .popular_routes(limit)
        .into_iter()
        .map(RouteSummary::from_route)
        .collect();

    Json(PopularRoutesResponse { routes })
}

/// Plan a trip between two locations.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, AppError> {
    let req: PlanRequest = parse_json(&body)?;
    let priority = req.priority.unwrap_or_default();

    let cached = cached_plan(&state, &req.from, &req.to).await?;
    let mut plan = recommend(cached.plan.clone(), priority);
    // A cache hit may have been planned for differently spelled text
    plan.from = req.from;
    plan.to = req.to;

    Ok(Json(PlanResponse::from_plan(&plan, priority, cached.planned_at)))
}

/// Analyse one option of a trip plan.
async fn analyze_option(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let req: AnalyzeRequest = parse_json(&body)?;
    let priority = req.priority.unwrap_or_default();

    let cached = cached_plan(&state, &req.from, &req.to).await?;
    let plan = recommend(cached.plan.clone(), priority);

    let option = plan.options.get(req.index).ok_or_else(|| AppError::NotFound {
        message: format!(
            "No option {} for this trip ({} found)",
            req.index,
            plan.options.len()
        ),
    })?;

    Ok(Json(AnalyzeResponse::new(option, analyze(option))))
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Fetch a plan from the cache, or compute it on the blocking pool.
///
/// Plans cut short by a search bound are returned but not cached, since a
/// later run may get further.
async fn cached_plan(state: &AppState, from: &str, to: &str) -> Result<Arc<CachedPlan>, AppError> {
    if let Some(hit) = state.cache.get(from, to).await {
        debug!(from, to, "plan cache hit");
        return Ok(hit);
    }

    let index = Arc::clone(&state.index);
    let config = Arc::clone(&state.config);
    let (query_from, query_to) = (from.to_string(), to.to_string());
    let task = tokio::task::spawn_blocking(move || {
        Planner::new(&index, &config).plan(&query_from, &query_to)
    });

    let joined = tokio::time::timeout(state.query_timeout, task)
        .await
        .map_err(|_| AppError::Timeout {
            message: format!(
                "Planning took longer than {} ms",
                state.query_timeout.as_millis()
            ),
        })?;
    let plan = joined.map_err(|e| AppError::Internal {
        message: format!("Planning task failed: {e}"),
    })??;

    if plan.truncated {
        return Ok(Arc::new(CachedPlan {
            plan,
            planned_at: chrono::Utc::now(),
        }));
    }
    Ok(state.cache.insert(from, to, plan).await)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::EmptyQuery { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
