//! Turning hop-by-hop graph paths into itineraries.

use std::collections::BTreeSet;

use crate::domain::{BacktrackLimit, RouteId, RouteLeg, RouteOption, Span, StopId};
use crate::network::{Edge, NetworkIndex};

/// One step of a path through the stop graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Hop {
    pub from: StopId,
    pub edge: Edge,
}

impl Hop {
    pub(crate) fn to(&self) -> StopId {
        self.edge.to
    }

    /// True if `next` carries on along the same route without a break or
    /// a change of direction.
    pub(crate) fn continues_into(&self, next: &Edge) -> bool {
        self.edge.route == next.route
            && self.edge.to_pos == next.from_pos
            && (self.edge.from_pos < self.edge.to_pos) == (next.from_pos < next.to_pos)
    }
}

/// Group consecutive hops into per-route spans.
///
/// Hops merge only while they continue along the same route in the same
/// direction; any other hop starts a new group.
fn spans(hops: &[Hop]) -> Vec<(RouteId, Span)> {
    let mut groups: Vec<(RouteId, Span)> = Vec::new();
    let mut prev: Option<&Hop> = None;
    for hop in hops {
        match (prev, groups.last_mut()) {
            (Some(p), Some((_, span))) if p.continues_into(&hop.edge) => {
                span.to = hop.edge.to_pos;
            }
            _ => groups.push((hop.edge.route, Span::new(hop.edge.from_pos, hop.edge.to_pos))),
        }
        prev = Some(hop);
    }
    groups
}

/// Build the legs for a path, or `None` if any leg breaks the direction
/// rule or is degenerate.
pub(crate) fn legs_from_hops(
    index: &NetworkIndex,
    hops: &[Hop],
    limit: BacktrackLimit,
) -> Option<Vec<RouteLeg>> {
    spans(hops)
        .into_iter()
        .map(|(route_id, span)| {
            let route = index.route(route_id)?;
            if !route.allows_span(span, limit) {
                return None;
            }
            RouteLeg::new(route, span, index.costs()).ok()
        })
        .collect()
}

/// Build an itinerary from a path.
///
/// Rejected when no leg can be built, a leg is invalid, or a route is
/// ridden twice (a split ride on one route is never a real transfer).
pub(crate) fn option_from_hops(
    index: &NetworkIndex,
    hops: &[Hop],
    limit: BacktrackLimit,
) -> Option<RouteOption> {
    let legs = legs_from_hops(index, hops, limit)?;
    let distinct: BTreeSet<RouteId> = legs.iter().map(RouteLeg::route_id).collect();
    if distinct.len() != legs.len() {
        return None;
    }
    RouteOption::new(legs, index.costs()).ok()
}
