//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. Finding
//! no itinerary is never an error; see `planner::PlanError` for query
//! validation.

use super::{RouteId, StopId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Two routes in a dataset share an id
    #[error("duplicate route id {0}")]
    DuplicateRoute(RouteId),

    /// A route cannot carry a passenger anywhere
    #[error("route {0} must have at least two stops")]
    RouteTooShort(RouteId),

    /// Route number is blank
    #[error("route {0} has an empty route number")]
    EmptyRouteNumber(RouteId),

    /// Invalid leg construction (e.g., boarding and alighting at the same stop)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Consecutive legs don't meet at a shared stop
    #[error("legs do not connect: stop {0} is followed by stop {1}")]
    LegsNotConnected(StopId, StopId),

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,
}

/// Errors from loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid dataset: {0}")]
    Invalid(#[from] DomainError),
}
