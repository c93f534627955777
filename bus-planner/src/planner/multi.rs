//! Itineraries with two or more transfers.
//!
//! Two strategies feed this: the bounded breadth-first search over stops,
//! and an explicit search for a third route bridging two routes that do
//! not share a stop.

use std::time::Instant;

use tracing::{debug, trace};

use super::bfs::find_bfs_routes;
use super::config::PlannerConfig;
use super::rank::deduplicate;
use crate::domain::{Route, RouteId, RouteLeg, RouteOption, Span, StopId};
use crate::network::NetworkIndex;

/// Result of multi-transfer search.
pub(crate) struct MultiResult {
    pub options: Vec<RouteOption>,
    pub truncated: bool,
}

/// Find up to `config.max_multi_transfer_results` itineraries with at
/// least two transfers, fewest transfers then shortest time first.
pub(crate) fn find_multi_transfer(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    config: &PlannerConfig,
    deadline: Instant,
) -> MultiResult {
    let bfs_deadline = deadline.min(Instant::now() + config.bfs_budget());
    let bfs = find_bfs_routes(index, from, to, config, bfs_deadline);

    let mut options: Vec<RouteOption> = bfs
        .options
        .into_iter()
        .filter(|o| o.transfers() >= 2)
        .collect();
    let bridged = find_bridged(index, from, to, config, deadline);
    options.extend(bridged.options);
    let truncated = bfs.truncated || bridged.truncated;

    let mut options = deduplicate(options);
    options.sort_by(|a, b| {
        a.transfers()
            .cmp(&b.transfers())
            .then(a.total_time().cmp(&b.total_time()))
            .then_with(|| a.key().cmp(&b.key()))
    });
    options.truncate(config.max_multi_transfer_results);

    debug!(%from, %to, found = options.len(), truncated, "multi-transfer search");

    MultiResult { options, truncated }
}

/// Routes sharing a stop with both `first` and `last`, in id order.
fn bridging_routes(index: &NetworkIndex, first: RouteId, last: RouteId, limit: usize) -> Vec<RouteId> {
    let graph = index.route_graph();
    graph
        .neighbors(first)
        .map(|(route, _)| route)
        .filter(|route| *route != last && graph.are_connected(*route, last))
        .take(limit)
        .collect()
}

/// Two-transfer itineraries through a bridging route, for each pair of
/// end routes with no stop in common.
///
/// Stops with `truncated` set once `deadline` passes.
fn find_bridged(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    config: &PlannerConfig,
    deadline: Instant,
) -> MultiResult {
    let mut options = Vec::new();
    let graph = index.route_graph();

    for first_id in index.routes_at(from) {
        for last_id in index.routes_at(to) {
            if first_id == last_id || graph.are_connected(first_id, last_id) {
                continue;
            }
            if Instant::now() >= deadline {
                debug!(%from, %to, found = options.len(), "bridged search deadline reached");
                return MultiResult {
                    options,
                    truncated: true,
                };
            }
            for bridge_id in bridging_routes(index, first_id, last_id, config.max_intermediate_routes)
            {
                let (Some(first), Some(bridge), Some(last)) = (
                    index.route(first_id),
                    index.route(bridge_id),
                    index.route(last_id),
                ) else {
                    continue;
                };
                if let Some(option) = best_bridge(index, from, to, [first, bridge, last], config) {
                    trace!(id = option.id(), "bridged itinerary");
                    options.push(option);
                }
            }
        }
    }

    MultiResult {
        options,
        truncated: false,
    }
}

/// Fastest pair of transfer stops for riding `first`, `bridge` then `last`.
fn best_bridge(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    [first, bridge, last]: [&Route; 3],
    config: &PlannerConfig,
) -> Option<RouteOption> {
    let limit = config.transfer_backtrack;
    let mut best: Option<(usize, [Span; 3])> = None;

    for x in index.shared_stops(first.id, bridge.id) {
        for y in index.shared_stops(bridge.id, last.id) {
            if x.id == y.id {
                continue;
            }
            let (Some(a), Some(b), Some(c)) = (
                first.best_span(from, x.id, limit),
                bridge.best_span(x.id, y.id, limit),
                last.best_span(y.id, to, limit),
            ) else {
                continue;
            };
            let hops = a.hops() + b.hops() + c.hops();
            if best.is_none_or(|(best_hops, _)| hops < best_hops) {
                best = Some((hops, [a, b, c]));
            }
        }
    }

    let (_, [a, b, c]) = best?;
    let legs = vec![
        RouteLeg::new(first, a, index.costs()).ok()?,
        RouteLeg::new(bridge, b, index.costs()).ok()?,
        RouteLeg::new(last, c, index.costs()).ok()?,
    ];
    RouteOption::new(legs, index.costs()).ok()
}
