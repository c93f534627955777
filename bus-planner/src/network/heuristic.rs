//! Precomputed stop-to-stop estimates guiding informed search.
//!
//! The estimate is a convenience approximation, not a lower bound on the
//! true cost; searches using it find a valid path, not a provably optimal
//! one.

use std::collections::{BTreeSet, HashMap};

use super::graph::RouteGraph;
use crate::domain::{RouteId, StopId};

/// Estimate for two stops served by a common route.
const NEAR_DIRECT: f64 = 0.5;

/// Minutes charged per route serving the less-connected stop.
const PER_ROUTE_MINS: f64 = 1.5;

/// Transfers assumed when no route chain joins the two stops.
const DISCONNECTED_TRANSFERS: usize = 3;

/// Symmetric table of estimates for every pair of distinct stops.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeuristicTable {
    values: HashMap<(StopId, StopId), f64>,
}

impl HeuristicTable {
    pub(crate) fn build(
        stops: &[StopId],
        stop_routes: &HashMap<StopId, BTreeSet<RouteId>>,
        graph: &RouteGraph,
        transfer_penalty: u32,
    ) -> Self {
        let hops: HashMap<RouteId, HashMap<RouteId, usize>> = graph
            .routes()
            .map(|r| (r, graph.hop_counts_from(r)))
            .collect();

        let empty = BTreeSet::new();
        let mut values = HashMap::with_capacity(stops.len() * stops.len() / 2);

        for (i, a) in stops.iter().enumerate() {
            let routes_a = stop_routes.get(a).unwrap_or(&empty);
            for b in &stops[i + 1..] {
                let routes_b = stop_routes.get(b).unwrap_or(&empty);
                let value = estimate(routes_a, routes_b, &hops, transfer_penalty);
                values.insert(key(*a, *b), value);
            }
        }

        Self { values }
    }

    /// Estimated cost between two stops; zero for the same stop or an
    /// unknown pair.
    pub(crate) fn get(&self, a: StopId, b: StopId) -> f64 {
        if a == b {
            return 0.0;
        }
        self.values.get(&key(a, b)).copied().unwrap_or(0.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

fn key(a: StopId, b: StopId) -> (StopId, StopId) {
    if a <= b { (a, b) } else { (b, a) }
}

fn estimate(
    routes_a: &BTreeSet<RouteId>,
    routes_b: &BTreeSet<RouteId>,
    hops: &HashMap<RouteId, HashMap<RouteId, usize>>,
    transfer_penalty: u32,
) -> f64 {
    if !routes_a.is_disjoint(routes_b) {
        return NEAR_DIRECT;
    }

    let min_transfers = routes_a
        .iter()
        .filter_map(|ra| hops.get(ra))
        .flat_map(|from_a| routes_b.iter().filter_map(|rb| from_a.get(rb).copied()))
        .min()
        .unwrap_or(DISCONNECTED_TRANSFERS);

    let base = routes_a.len().min(routes_b.len()) as f64 * PER_ROUTE_MINS;
    base + min_transfers as f64 * f64::from(transfer_penalty)
}
