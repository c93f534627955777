//! Search configuration for the trip planner.

use std::time::Duration;

use crate::domain::BacktrackLimit;

/// Bounds and rules applied while searching for itineraries.
///
/// Costs per hop and per transfer live in the index's `CostModel`; this
/// only controls how far the planner looks.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Backward limit for single-leg direct rides.
    pub direct_backtrack: BacktrackLimit,

    /// Backward limit for legs inside transfer itineraries.
    pub transfer_backtrack: BacktrackLimit,

    /// Maximum transfers explored by the breadth-first search.
    pub max_transfers: usize,

    /// Maximum transfers on a path found by informed search.
    pub max_astar_transfers: usize,

    /// Maximum origin x destination stop pairs searched per query.
    pub max_stop_pairs: usize,

    /// Maximum pending states in the breadth-first queue.
    /// Further states are dropped and the plan is flagged truncated.
    pub max_queue_size: usize,

    /// Wall-clock budget for one breadth-first search (milliseconds).
    pub bfs_budget_ms: u64,

    /// Wall-clock budget for a whole query (milliseconds).
    /// Stop pairs not started within it are skipped.
    pub search_budget_ms: u64,

    /// Multi-transfer itineraries kept per stop pair.
    pub max_multi_transfer_results: usize,

    /// Intermediate routes tried per pair of end routes.
    pub max_intermediate_routes: usize,

    /// Alternative search runs when a stop pair has fewer options than this.
    pub min_options_before_alternatives: usize,

    /// Number of alternative paths requested.
    pub alternatives_k: usize,
}

impl PlannerConfig {
    /// Returns the breadth-first search budget as a Duration.
    pub fn bfs_budget(&self) -> Duration {
        Duration::from_millis(self.bfs_budget_ms)
    }

    /// Returns the whole-query budget as a Duration.
    pub fn search_budget(&self) -> Duration {
        Duration::from_millis(self.search_budget_ms)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            direct_backtrack: BacktrackLimit::TWO_THIRDS,
            transfer_backtrack: BacktrackLimit::HALF,
            max_transfers: 3,
            max_astar_transfers: 5,
            max_stop_pairs: 10,
            max_queue_size: 1000,
            bfs_budget_ms: 2000,
            search_budget_ms: 5000,
            max_multi_transfer_results: 5,
            max_intermediate_routes: 3,
            min_options_before_alternatives: 3,
            alternatives_k: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.direct_backtrack, BacktrackLimit::TWO_THIRDS);
        assert_eq!(config.transfer_backtrack, BacktrackLimit::HALF);
        assert_eq!(config.max_transfers, 3);
        assert_eq!(config.max_astar_transfers, 5);
        assert_eq!(config.max_stop_pairs, 10);
        assert_eq!(config.max_queue_size, 1000);
        assert_eq!(config.max_multi_transfer_results, 5);
        assert_eq!(config.max_intermediate_routes, 3);
        assert_eq!(config.min_options_before_alternatives, 3);
        assert_eq!(config.alternatives_k, 3);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();

        assert_eq!(config.bfs_budget(), Duration::from_secs(2));
        assert_eq!(config.search_budget(), Duration::from_secs(5));
    }

    #[test]
    fn override_with_struct_update() {
        let config = PlannerConfig {
            max_transfers: 1,
            max_queue_size: 10,
            ..PlannerConfig::default()
        };

        assert_eq!(config.max_transfers, 1);
        assert_eq!(config.max_queue_size, 10);
        assert_eq!(config.max_stop_pairs, 10);
    }
}
