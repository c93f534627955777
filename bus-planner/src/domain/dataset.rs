//! The static route dataset consumed by the planner.

use std::collections::HashSet;
use std::path::Path;

use super::{DatasetError, DomainError, Route};

/// The full set of routes for a planning session.
///
/// # Invariants
///
/// - Route ids are unique
/// - Every route has at least two stops and a non-empty number
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    routes: Vec<Route>,
}

impl Dataset {
    /// Validate and wrap a list of routes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if route ids repeat, a route has fewer than two stops,
    /// or a route number is blank.
    pub fn new(routes: Vec<Route>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.id) {
                return Err(DomainError::DuplicateRoute(route.id));
            }
            if route.stops.len() < 2 {
                return Err(DomainError::RouteTooShort(route.id));
            }
            if route.number.trim().is_empty() {
                return Err(DomainError::EmptyRouteNumber(route.id));
            }
        }
        Ok(Self { routes })
    }

    /// Parse a JSON array of routes.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let routes: Vec<Route> = serde_json::from_str(json)?;
        Ok(Self::new(routes)?)
    }

    /// Read and parse a JSON file containing an array of routes.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Routes in dataset order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
