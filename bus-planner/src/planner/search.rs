//! Query entry point.
//!
//! Resolves origin and destination text to candidate stops, runs every
//! search strategy for each (bounded) pair of candidates, then merges,
//! ranks and de-duplicates the results into a `RoutePlan`.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use super::astar::{find_alternatives, find_path};
use super::config::PlannerConfig;
use super::direct::find_direct;
use super::multi::find_multi_transfer;
use super::rank::{deduplicate, rank_options};
use super::transfer::find_transfers;
use crate::domain::{RouteOption, RoutePlan, StopId};
use crate::network::NetworkIndex;

/// Error from trip planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Origin or destination text is blank
    #[error("{field} location must not be empty")]
    EmptyQuery { field: &'static str },
}

/// Result of searching a single pair of stops.
struct PairResult {
    options: Vec<RouteOption>,
    truncated: bool,
}

/// Trip planner over a prebuilt network index.
pub struct Planner<'a> {
    index: &'a NetworkIndex,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(index: &'a NetworkIndex, config: &'a PlannerConfig) -> Self {
        Self { index, config }
    }

    /// Plan trips between two free-text locations.
    ///
    /// No match and no path both give an empty plan rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either text is blank.
    pub fn plan(&self, from: &str, to: &str) -> Result<RoutePlan, PlanError> {
        if from.trim().is_empty() {
            return Err(PlanError::EmptyQuery { field: "from" });
        }
        if to.trim().is_empty() {
            return Err(PlanError::EmptyQuery { field: "to" });
        }

        let started = Instant::now();
        let deadline = started + self.config.search_budget();

        let origins = self.candidates(from);
        let destinations = self.candidates(to);
        debug!(
            from,
            to,
            origins = origins.len(),
            destinations = destinations.len(),
            "resolved locations"
        );

        if origins.is_empty() || destinations.is_empty() {
            debug!(from, to, "no matching stops");
            return Ok(RoutePlan::empty(from, to, elapsed_ms(started)));
        }

        let all_pairs = origins.len() * destinations.len();
        let mut truncated = all_pairs > self.config.max_stop_pairs;
        if truncated {
            debug!(
                pairs = all_pairs,
                limit = self.config.max_stop_pairs,
                "stop pair limit reached"
            );
        }

        let pairs = origins
            .iter()
            .flat_map(|o| destinations.iter().map(move |d| (*o, *d)))
            .take(self.config.max_stop_pairs);

        let mut options = Vec::new();
        for (origin, destination) in pairs {
            if Instant::now() >= deadline {
                warn!(from, to, "search budget exhausted");
                truncated = true;
                break;
            }
            if origin == destination {
                continue;
            }
            let result = self.search_pair(origin, destination, deadline);
            truncated |= result.truncated;
            options.extend(result.options);
        }

        let options = deduplicate(rank_options(options));
        let plan = RoutePlan {
            from: from.to_string(),
            to: to.to_string(),
            total_options: options.len(),
            options,
            search_time_ms: elapsed_ms(started),
            truncated,
        };

        match plan.best_option().and_then(|o| o.score().map(|s| (o, s))) {
            Some((best, score)) => info!(
                from,
                to,
                options = plan.total_options,
                best_time = best.total_time(),
                best_transfers = best.transfers(),
                best_score = score.total,
                truncated,
                elapsed_ms = plan.search_time_ms,
                "planned trip"
            ),
            None => info!(from, to, truncated, elapsed_ms = plan.search_time_ms, "no trip found"),
        }

        Ok(plan)
    }

    /// Matched stop ids for a location, each once, in resolution order.
    fn candidates(&self, text: &str) -> Vec<StopId> {
        let mut ids: Vec<StopId> = Vec::new();
        for m in self.index.resolve(text) {
            if !ids.contains(&m.stop.id) {
                ids.push(m.stop.id);
            }
        }
        ids
    }

    /// Run every strategy for one pair of stops.
    fn search_pair(&self, from: StopId, to: StopId, deadline: Instant) -> PairResult {
        let index = self.index;
        let config = self.config;

        let mut options = find_direct(index, from, to, config);
        options.extend(find_path(index, from, to, config));
        options.extend(find_transfers(index, from, to, config));

        let multi = find_multi_transfer(index, from, to, config, deadline);
        options.extend(multi.options);

        let mut truncated = multi.truncated;

        if options.len() < config.min_options_before_alternatives {
            let alternatives =
                find_alternatives(index, from, to, config.alternatives_k, config, deadline);
            options.extend(alternatives.options);
            truncated |= alternatives.truncated;
        }

        trace!(%from, %to, found = options.len(), truncated, "searched stop pair");
        PairResult { options, truncated }
    }
}

/// Plan trips with the default configuration.
///
/// # Errors
///
/// Returns `Err` if either text is blank.
pub fn find_routes(index: &NetworkIndex, from: &str, to: &str) -> Result<RoutePlan, PlanError> {
    Planner::new(index, &PlannerConfig::default()).plan(from, to)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
