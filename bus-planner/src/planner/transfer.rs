//! One-transfer itineraries through a shared stop.

use tracing::trace;

use super::config::PlannerConfig;
use crate::domain::{Route, RouteLeg, RouteOption, Span, StopId};
use crate::network::NetworkIndex;

/// Best one-transfer itinerary for each pair of routes serving the two
/// stops that share a stop of their own.
///
/// For each route pair the transfer stop minimising total time wins; the
/// first such stop in the first route's order breaks ties.
pub(crate) fn find_transfers(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    config: &PlannerConfig,
) -> Vec<RouteOption> {
    let mut options = Vec::new();

    for first_id in index.routes_at(from) {
        for second_id in index.routes_at(to) {
            if first_id == second_id {
                continue;
            }
            let one_transfer = index
                .shortest_route_path(first_id, second_id)
                .is_some_and(|path| path.len() == 2);
            if !one_transfer {
                continue;
            }
            let (Some(first), Some(second)) = (index.route(first_id), index.route(second_id))
            else {
                continue;
            };
            if let Some(option) = best_transfer(index, from, to, first, second, config) {
                options.push(option);
            }
        }
    }

    trace!(%from, %to, found = options.len(), "transfer search");
    options
}

fn best_transfer(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    first: &Route,
    second: &Route,
    config: &PlannerConfig,
) -> Option<RouteOption> {
    let limit = config.transfer_backtrack;
    let mut best: Option<(usize, Span, Span)> = None;

    for via in index.shared_stops(first.id, second.id) {
        let (Some(ride), Some(onward)) = (
            first.best_span(from, via.id, limit),
            second.best_span(via.id, to, limit),
        ) else {
            continue;
        };
        let hops = ride.hops() + onward.hops();
        if best.is_none_or(|(best_hops, _, _)| hops < best_hops) {
            best = Some((hops, ride, onward));
        }
    }

    let (_, ride, onward) = best?;
    let legs = vec![
        RouteLeg::new(first, ride, index.costs()).ok()?,
        RouteLeg::new(second, onward, index.costs()).ok()?,
    ];
    RouteOption::new(legs, index.costs()).ok()
}
