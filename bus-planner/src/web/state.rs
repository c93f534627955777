//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{PlanCache, PlanCacheConfig};
use crate::network::NetworkIndex;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// The network index is immutable after start-up, so request handlers and
/// blocking planning tasks share it through an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Indexed bus network
    pub index: Arc<NetworkIndex>,

    /// Trip planner configuration
    pub config: Arc<PlannerConfig>,

    /// Recently computed plans
    pub cache: Arc<PlanCache>,

    /// Upper bound on one planning request, cache misses included
    pub query_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        index: NetworkIndex,
        config: PlannerConfig,
        cache_config: &PlanCacheConfig,
        query_timeout: Duration,
    ) -> Self {
        Self {
            index: Arc::new(index),
            config: Arc::new(config),
            cache: Arc::new(PlanCache::new(cache_config)),
            query_timeout,
        }
    }
}
