//! Single-route itineraries.

use tracing::trace;

use super::config::PlannerConfig;
use crate::domain::{RouteLeg, RouteOption, StopId};
use crate::network::NetworkIndex;

/// Every single-leg ride from `from` to `to`.
///
/// A route visiting either stop more than once yields one candidate per
/// allowed pair of visits; identical itineraries are merged later by
/// de-duplication.
pub(crate) fn find_direct(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    config: &PlannerConfig,
) -> Vec<RouteOption> {
    let mut options = Vec::new();

    for route_id in index.common_routes(from, to) {
        let Some(route) = index.route(route_id) else {
            continue;
        };
        for span in route.spans_between(from, to, config.direct_backtrack) {
            let Ok(leg) = RouteLeg::new(route, span, index.costs()) else {
                continue;
            };
            if let Ok(option) = RouteOption::new(vec![leg], index.costs()) {
                options.push(option);
            }
        }
    }

    trace!(%from, %to, found = options.len(), "direct search");
    options
}
