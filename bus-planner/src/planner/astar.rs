//! Informed single-pair search and k-alternative generation.
//!
//! The search runs over (stop, ride) labels so a change of route can be
//! charged the transfer penalty. Its estimate comes from the index's
//! heuristic table, which is not a strict lower bound: the path found is a
//! good one, not a provably cheapest one.
//!
//! Alternatives follow Yen's method: each prefix of an accepted path is
//! kept, the hop continuing it is excluded, and the search is re-run from
//! the prefix's end. Exclusions are passed to the search rather than
//! removed from the shared index.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, trace};

use super::assemble::{Hop, option_from_hops};
use super::config::PlannerConfig;
use crate::domain::{RouteId, RouteOption, StopId};
use crate::network::{Edge, NetworkIndex};

/// The route being ridden on arrival at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Ride {
    route: RouteId,
    pos: usize,
    forward: bool,
}

impl Ride {
    fn after(edge: &Edge) -> Self {
        Ride {
            route: edge.route,
            pos: edge.to_pos,
            forward: edge.from_pos < edge.to_pos,
        }
    }

    /// True if `edge` stays on this bus.
    fn continues_into(&self, edge: &Edge) -> bool {
        self.route == edge.route
            && self.pos == edge.from_pos
            && self.forward == (edge.from_pos < edge.to_pos)
    }
}

type Label = (StopId, Option<Ride>);

/// Open-set entry, ordered so the heap pops the lowest estimate first.
#[derive(Debug, Clone, Copy)]
struct Open {
    estimate: f64,
    cost: u32,
    transfers: usize,
    label: Label,
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then(other.cost.cmp(&self.cost))
            .then(other.label.cmp(&self.label))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

/// Hops and stops a search may not use.
#[derive(Debug, Clone, Default)]
pub(crate) struct Exclusions {
    pub hops: HashSet<Hop>,
    pub stops: HashSet<StopId>,
}

/// Cheapest-looking path of hops from `from` to `to`.
///
/// Boarding the first bus is free; every later change of bus costs the
/// transfer penalty and counts against `max_transfers`. Returns `None`
/// for the same stop or when no path exists.
pub(crate) fn shortest_path(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    max_transfers: usize,
    exclusions: &Exclusions,
) -> Option<Vec<Hop>> {
    if from == to {
        return None;
    }
    let penalty = index.costs().transfer_penalty_mins;

    let start: Label = (from, None);
    let mut best: HashMap<Label, u32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Label, (Label, Hop)> = HashMap::new();
    let mut closed: HashSet<Label> = HashSet::new();
    let mut open = BinaryHeap::from([Open {
        estimate: index.heuristic(from, to),
        cost: 0,
        transfers: 0,
        label: start,
    }]);

    while let Some(current) = open.pop() {
        if !closed.insert(current.label) {
            continue;
        }
        let (stop, ride) = current.label;
        if stop == to {
            return Some(reconstruct(&came_from, current.label));
        }

        for edge in index.edges_from(stop) {
            if exclusions.stops.contains(&edge.to) {
                continue;
            }
            let hop = Hop { from: stop, edge: *edge };
            if exclusions.hops.contains(&hop) {
                continue;
            }

            let (step, transfers) = match ride {
                Some(r) if !r.continues_into(edge) => {
                    (edge.weight + penalty, current.transfers + 1)
                }
                _ => (edge.weight, current.transfers),
            };
            if transfers > max_transfers {
                continue;
            }

            let next: Label = (edge.to, Some(Ride::after(edge)));
            if closed.contains(&next) {
                continue;
            }
            let cost = current.cost + step;
            if best.get(&next).is_some_and(|known| *known <= cost) {
                continue;
            }
            best.insert(next, cost);
            came_from.insert(next, (current.label, hop));
            open.push(Open {
                estimate: f64::from(cost) + index.heuristic(edge.to, to),
                cost,
                transfers,
                label: next,
            });
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Label, (Label, Hop)>, goal: Label) -> Vec<Hop> {
    let mut hops = Vec::new();
    let mut label = goal;
    while let Some((prev, hop)) = came_from.get(&label) {
        hops.push(*hop);
        label = *prev;
    }
    hops.reverse();
    hops
}

/// The informed search's itinerary from `from` to `to`, if it forms a
/// valid one.
pub(crate) fn find_path(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    config: &PlannerConfig,
) -> Option<RouteOption> {
    let hops = shortest_path(
        index,
        from,
        to,
        config.max_astar_transfers,
        &Exclusions::default(),
    )?;
    let option = option_from_hops(index, &hops, config.direct_backtrack);
    trace!(%from, %to, hops = hops.len(), valid = option.is_some(), "informed search");
    option
}

/// Result of alternative search.
pub(crate) struct Alternatives {
    pub options: Vec<RouteOption>,
    pub truncated: bool,
}

/// Up to `k` loopless paths from `from` to `to`, cheapest first, as
/// itineraries.
///
/// Stops early when no further path exists, or with `truncated` set when
/// `deadline` passes between rounds. Paths that don't form a valid
/// itinerary are skipped in the output.
pub(crate) fn find_alternatives(
    index: &NetworkIndex,
    from: StopId,
    to: StopId,
    k: usize,
    config: &PlannerConfig,
    deadline: Instant,
) -> Alternatives {
    let max_transfers = config.max_astar_transfers;
    let limit = config.direct_backtrack;

    let Some(first) = shortest_path(index, from, to, max_transfers, &Exclusions::default())
    else {
        return Alternatives {
            options: Vec::new(),
            truncated: false,
        };
    };

    let mut accepted: Vec<Vec<Hop>> = vec![first];
    let mut candidates: Vec<(Vec<Hop>, RouteOption)> = Vec::new();
    let mut truncated = false;

    while accepted.len() < k {
        if Instant::now() >= deadline {
            debug!(%from, %to, paths = accepted.len(), "alternative search deadline reached");
            truncated = true;
            break;
        }
        let Some(last) = accepted.last().cloned() else {
            break;
        };

        for i in 0..last.len() {
            let spur = last[i].from;
            let root = &last[..i];

            let mut exclusions = Exclusions::default();
            for path in &accepted {
                if path.len() > i && path[..i] == *root {
                    exclusions.hops.insert(path[i]);
                }
            }
            exclusions.stops.extend(root.iter().map(|h| h.from));

            let Some(spur_path) = shortest_path(index, spur, to, max_transfers, &exclusions)
            else {
                continue;
            };
            let mut path = root.to_vec();
            path.extend(spur_path);

            if accepted.contains(&path) || candidates.iter().any(|(p, _)| *p == path) {
                continue;
            }
            if let Some(option) = option_from_hops(index, &path, limit) {
                candidates.push((path, option));
            }
        }

        let best = candidates
            .iter()
            .enumerate()
            .min_by(|(_, (_, a)), (_, (_, b))| {
                a.total_time()
                    .cmp(&b.total_time())
                    .then_with(|| a.key().cmp(&b.key()))
            })
            .map(|(i, _)| i);
        let Some(best) = best else {
            break;
        };
        let (path, _) = candidates.swap_remove(best);
        accepted.push(path);
    }

    let options: Vec<RouteOption> = accepted
        .iter()
        .filter_map(|path| option_from_hops(index, path, limit))
        .collect();
    debug!(%from, %to, paths = accepted.len(), found = options.len(), truncated, "alternative search");
    Alternatives { options, truncated }
}
