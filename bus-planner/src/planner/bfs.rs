//! Bounded breadth-first search over the stop graph.
//!
//! Explores hop by hop from the origin, counting a transfer whenever the
//! next hop uses a different route from the current one. Used to find
//! itineraries with several transfers that the route-pair searches miss.
//!
//! The search is bounded three ways: a transfer limit, a cap on pending
//! states, and a wall-clock deadline. Hitting either of the last two
//! returns what was found so far with `truncated` set.

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use tracing::{debug, trace};

use super::assemble::{Hop, option_from_hops};
use super::config::PlannerConfig;
use crate::domain::{RouteId, RouteOption, StopId};
use crate::network::NetworkIndex;

/// BFS state: a partial path ending at a stop.
#[derive(Clone)]
struct BfsState {
    hops: Vec<Hop>,
    stop: StopId,
    route: Option<RouteId>,
    transfers: usize,
}

impl BfsState {
    /// True if the path already passes through `stop`.
    fn visits(&self, stop: StopId, origin: StopId) -> bool {
        stop == origin || self.hops.iter().any(|h| h.to() == stop)
    }
}

/// Result of BFS search: found itineraries and whether a bound was hit.
pub(crate) struct BfsResult {
    pub options: Vec<RouteOption>,
    pub truncated: bool,
}

/// Find itineraries from `from` to `to` with at most
/// `config.max_transfers` transfers.
pub(crate) fn find_bfs_routes(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    config: &PlannerConfig,
    deadline: Instant,
) -> BfsResult {
    let mut options = Vec::new();
    let mut truncated = false;

    // Track explored (stop, transfers, route) to avoid equivalent partial paths
    let mut explored: HashSet<(StopId, usize, Option<RouteId>)> = HashSet::new();

    let mut queue: VecDeque<BfsState> = VecDeque::new();
    queue.push_back(BfsState {
        hops: Vec::new(),
        stop: from,
        route: None,
        transfers: 0,
    });

    while let Some(state) = queue.pop_front() {
        if Instant::now() >= deadline {
            debug!(%from, %to, pending = queue.len(), "BFS deadline reached");
            truncated = true;
            break;
        }

        trace!(
            stop = %state.stop,
            transfers = state.transfers,
            pending = queue.len(),
            "BFS exploring stop"
        );

        for edge in index.edges_from(state.stop) {
            if state.visits(edge.to, from) {
                continue;
            }

            let transfers = match state.route {
                Some(route) if route != edge.route => state.transfers + 1,
                _ => state.transfers,
            };
            if transfers > config.max_transfers {
                continue;
            }

            let mut hops = state.hops.clone();
            hops.push(Hop {
                from: state.stop,
                edge: *edge,
            });

            if edge.to == to {
                if let Some(option) = option_from_hops(index, &hops, config.direct_backtrack) {
                    options.push(option);
                }
                continue;
            }

            if !explored.insert((edge.to, transfers, Some(edge.route))) {
                continue;
            }

            if queue.len() >= config.max_queue_size {
                truncated = true;
                continue;
            }

            queue.push_back(BfsState {
                hops,
                stop: edge.to,
                route: Some(edge.route),
                transfers,
            });
        }
    }

    debug!(%from, %to, found = options.len(), truncated, "BFS search complete");

    BfsResult { options, truncated }
}
