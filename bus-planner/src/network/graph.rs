//! Route-to-route transfer graph.
//!
//! Nodes are routes; an edge joins two routes that share at least one stop,
//! weighted by the fixed transfer penalty.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, VecDeque};

use crate::domain::RouteId;

#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    edges: BTreeMap<RouteId, BTreeMap<RouteId, u32>>,
}

impl RouteGraph {
    /// Build the graph from each stop's set of serving routes.
    pub(crate) fn build<'a>(
        route_ids: impl IntoIterator<Item = RouteId>,
        stop_routes: impl IntoIterator<Item = &'a BTreeSet<RouteId>>,
        transfer_penalty: u32,
    ) -> Self {
        let mut edges: BTreeMap<RouteId, BTreeMap<RouteId, u32>> = route_ids
            .into_iter()
            .map(|id| (id, BTreeMap::new()))
            .collect();

        for routes in stop_routes {
            if routes.len() < 2 {
                continue;
            }
            for a in routes {
                for b in routes {
                    if a != b {
                        edges
                            .entry(*a)
                            .or_default()
                            .insert(*b, transfer_penalty);
                    }
                }
            }
        }

        Self { edges }
    }

    /// Number of routes in the graph.
    pub fn route_count(&self) -> usize {
        self.edges.len()
    }

    /// Routes sharing a stop with `route`, in id order, with edge weights.
    pub fn neighbors(&self, route: RouteId) -> impl Iterator<Item = (RouteId, u32)> + '_ {
        self.edges
            .get(&route)
            .into_iter()
            .flat_map(|n| n.iter().map(|(id, w)| (*id, *w)))
    }

    /// Returns true if the two routes share at least one stop.
    pub fn are_connected(&self, a: RouteId, b: RouteId) -> bool {
        self.edges.get(&a).is_some_and(|n| n.contains_key(&b))
    }

    /// Shortest chain of routes from `from` to `to` (Dijkstra).
    ///
    /// The path includes both ends, so a path of length 2 means one
    /// transfer. Returns `[from]` when both ends are the same route and
    /// `None` when either route is unknown or unreachable.
    pub fn shortest_path(&self, from: RouteId, to: RouteId) -> Option<Vec<RouteId>> {
        if !self.edges.contains_key(&from) || !self.edges.contains_key(&to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut dist: HashMap<RouteId, u32> = HashMap::new();
        let mut prev: HashMap<RouteId, RouteId> = HashMap::new();
        // Min-heap; the route id breaks ties deterministically
        let mut heap: BinaryHeap<Reverse<(u32, RouteId)>> = BinaryHeap::new();

        dist.insert(from, 0);
        heap.push(Reverse((0, from)));

        while let Some(Reverse((cost, route))) = heap.pop() {
            if route == to {
                break;
            }
            if dist.get(&route).is_some_and(|d| cost > *d) {
                continue;
            }
            for (next, weight) in self.neighbors(route) {
                let candidate = cost + weight;
                if dist.get(&next).is_none_or(|d| candidate < *d) {
                    dist.insert(next, candidate);
                    prev.insert(next, route);
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        if !dist.contains_key(&to) {
            return None;
        }

        let mut path = vec![to];
        let mut current = to;
        while let Some(p) = prev.get(&current) {
            path.push(*p);
            current = *p;
        }
        path.reverse();
        Some(path)
    }

    /// Minimum number of transfers from `from` to every reachable route.
    pub fn hop_counts_from(&self, from: RouteId) -> HashMap<RouteId, usize> {
        let mut hops = HashMap::new();
        if !self.edges.contains_key(&from) {
            return hops;
        }

        let mut queue = VecDeque::from([from]);
        hops.insert(from, 0);

        while let Some(route) = queue.pop_front() {
            let next_hops = hops[&route] + 1;
            for (next, _) in self.neighbors(route) {
                if !hops.contains_key(&next) {
                    hops.insert(next, next_hops);
                    queue.push_back(next);
                }
            }
        }

        hops
    }

    /// Route ids in the graph, in id order.
    pub fn routes(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.edges.keys().copied()
    }
}
