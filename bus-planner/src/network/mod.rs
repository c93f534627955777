//! Precomputed lookup structures over a route dataset.
//!
//! A `NetworkIndex` is built once per dataset and shared read-only by every
//! query. Building is the expensive part; lookups are map reads, apart from
//! the graph traversals on the route-transfer graph.

mod graph;
mod heuristic;
mod resolve;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{CostModel, Dataset, Route, RouteId, Stop, StopId};

pub use graph::RouteGraph;
use heuristic::HeuristicTable;
pub use resolve::StopMatch;

/// One hop along a route between adjacent stops.
///
/// Edges exist in both directions for every consecutive pair of stops, and
/// remember the positions of the hop in the route's stop list so hops can be
/// reassembled into contiguous legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Stop reached by the hop
    pub to: StopId,
    /// Route ridden
    pub route: RouteId,
    /// Position of the departure stop in the route
    pub from_pos: usize,
    /// Position of the arrival stop in the route
    pub to_pos: usize,
    /// Riding minutes
    pub weight: u32,
}

/// Lookup structures derived from a `Dataset`.
#[derive(Debug, Clone)]
pub struct NetworkIndex {
    routes: Vec<Route>,
    route_positions: HashMap<RouteId, usize>,
    stops: HashMap<StopId, Stop>,
    /// Stop ids in order of first appearance
    stop_order: Vec<StopId>,
    stop_routes: HashMap<StopId, BTreeSet<RouteId>>,
    route_stops: HashMap<RouteId, BTreeSet<StopId>>,
    /// Lowercased stop name to the ids carrying it
    name_index: HashMap<String, Vec<StopId>>,
    adjacency: HashMap<StopId, Vec<Edge>>,
    route_graph: RouteGraph,
    heuristics: HeuristicTable,
    costs: CostModel,
}

impl NetworkIndex {
    /// Build the index with the default cost model.
    pub fn build(dataset: &Dataset) -> Self {
        Self::build_with_costs(dataset, CostModel::default())
    }

    /// Build the index with explicit hop and transfer costs.
    pub fn build_with_costs(dataset: &Dataset, costs: CostModel) -> Self {
        let routes = dataset.routes().to_vec();

        let mut route_positions = HashMap::with_capacity(routes.len());
        let mut stops = HashMap::new();
        let mut stop_order = Vec::new();
        let mut stop_routes: HashMap<StopId, BTreeSet<RouteId>> = HashMap::new();
        let mut route_stops: HashMap<RouteId, BTreeSet<StopId>> = HashMap::new();
        let mut name_index: HashMap<String, Vec<StopId>> = HashMap::new();
        let mut adjacency: HashMap<StopId, Vec<Edge>> = HashMap::new();

        for (pos, route) in routes.iter().enumerate() {
            route_positions.insert(route.id, pos);
            let members = route_stops.entry(route.id).or_default();

            for stop in &route.stops {
                if !stops.contains_key(&stop.id) {
                    stops.insert(stop.id, stop.clone());
                    stop_order.push(stop.id);
                }
                stop_routes.entry(stop.id).or_default().insert(route.id);
                members.insert(stop.id);

                let ids = name_index.entry(stop.search_name()).or_default();
                if !ids.contains(&stop.id) {
                    ids.push(stop.id);
                }
            }

            for (i, pair) in route.stops.windows(2).enumerate() {
                let (a, b) = (&pair[0], &pair[1]);
                if a.id == b.id {
                    continue;
                }
                adjacency.entry(a.id).or_default().push(Edge {
                    to: b.id,
                    route: route.id,
                    from_pos: i,
                    to_pos: i + 1,
                    weight: costs.hop_time_mins,
                });
                adjacency.entry(b.id).or_default().push(Edge {
                    to: a.id,
                    route: route.id,
                    from_pos: i + 1,
                    to_pos: i,
                    weight: costs.hop_time_mins,
                });
            }
        }

        let route_graph = RouteGraph::build(
            routes.iter().map(|r| r.id),
            stop_routes.values(),
            costs.transfer_penalty_mins,
        );
        let heuristics = HeuristicTable::build(
            &stop_order,
            &stop_routes,
            &route_graph,
            costs.transfer_penalty_mins,
        );

        debug!(
            routes = routes.len(),
            stops = stop_order.len(),
            edges = adjacency.values().map(Vec::len).sum::<usize>(),
            heuristic_pairs = heuristics.len(),
            "built network index"
        );

        Self {
            routes,
            route_positions,
            stops,
            stop_order,
            stop_routes,
            route_stops,
            name_index,
            adjacency,
            route_graph,
            heuristics,
            costs,
        }
    }

    /// Hop and transfer costs the index was built with.
    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Routes in dataset order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.route_positions.get(&id).map(|pos| &self.routes[*pos])
    }

    /// The first-seen stop record for an id.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    /// Number of distinct stop ids.
    pub fn stop_count(&self) -> usize {
        self.stop_order.len()
    }

    /// Stop ids in order of first appearance in the dataset.
    pub fn stop_ids(&self) -> &[StopId] {
        &self.stop_order
    }

    /// Routes serving a stop, in id order.
    pub fn routes_at(&self, stop: StopId) -> impl Iterator<Item = RouteId> + '_ {
        self.stop_routes.get(&stop).into_iter().flatten().copied()
    }

    /// Stop ids served by a route, in id order.
    pub fn stops_on(&self, route: RouteId) -> impl Iterator<Item = StopId> + '_ {
        self.route_stops.get(&route).into_iter().flatten().copied()
    }

    /// Routes serving both stops, in id order.
    pub fn common_routes(&self, a: StopId, b: StopId) -> Vec<RouteId> {
        match (self.stop_routes.get(&a), self.stop_routes.get(&b)) {
            (Some(ra), Some(rb)) => ra.intersection(rb).copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Stops served by both routes, in `a`'s riding order, each id once.
    pub fn shared_stops(&self, a: RouteId, b: RouteId) -> Vec<&Stop> {
        let (Some(route_a), Some(members_b)) = (self.route(a), self.route_stops.get(&b)) else {
            return Vec::new();
        };
        let mut seen = BTreeSet::new();
        route_a
            .stops
            .iter()
            .filter(|s| members_b.contains(&s.id) && seen.insert(s.id))
            .collect()
    }

    /// Hops leaving a stop, in dataset order.
    pub fn edges_from(&self, stop: StopId) -> &[Edge] {
        self.adjacency.get(&stop).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn route_graph(&self) -> &RouteGraph {
        &self.route_graph
    }

    /// Shortest chain of routes between two routes; see
    /// [`RouteGraph::shortest_path`].
    pub fn shortest_route_path(&self, from: RouteId, to: RouteId) -> Option<Vec<RouteId>> {
        self.route_graph.shortest_path(from, to)
    }

    /// Search estimate between two stops.
    pub fn heuristic(&self, from: StopId, to: StopId) -> f64 {
        self.heuristics.get(from, to)
    }

    /// Routes with the most stops first, ties by route id.
    pub fn popular_routes(&self, limit: usize) -> Vec<&Route> {
        let mut routes: Vec<&Route> = self.routes.iter().collect();
        routes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.id.cmp(&b.id)));
        routes.truncate(limit);
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: u32, stops: &[(u32, &str)]) -> Route {
        Route::new(
            id,
            id.to_string(),
            stops.iter().map(|(s, n)| Stop::new(*s, *n)).collect(),
        )
    }

    fn index() -> NetworkIndex {
        let dataset = Dataset::new(vec![
            route(1, &[(1, "A"), (2, "B"), (3, "C")]),
            route(2, &[(3, "C"), (4, "D"), (5, "E"), (6, "F")]),
            route(3, &[(7, "G"), (8, "H")]),
        ])
        .unwrap();
        NetworkIndex::build(&dataset)
    }

    #[test]
    fn membership_maps() {
        let idx = index();
        assert_eq!(idx.stop_count(), 8);
        assert_eq!(
            idx.routes_at(StopId(3)).collect::<Vec<_>>(),
            vec![RouteId(1), RouteId(2)]
        );
        assert_eq!(
            idx.stops_on(RouteId(1)).collect::<Vec<_>>(),
            vec![StopId(1), StopId(2), StopId(3)]
        );
        assert_eq!(idx.routes_at(StopId(99)).count(), 0);
        assert_eq!(idx.common_routes(StopId(1), StopId(3)), vec![RouteId(1)]);
        assert!(idx.common_routes(StopId(1), StopId(4)).is_empty());
    }

    #[test]
    fn adjacency_is_bidirectional() {
        let idx = index();
        let from_b = idx.edges_from(StopId(2));
        assert_eq!(from_b.len(), 2);
        assert!(from_b.iter().any(|e| e.to == StopId(1) && e.to_pos == 0));
        assert!(from_b.iter().any(|e| e.to == StopId(3) && e.to_pos == 2));
        assert!(from_b.iter().all(|e| e.weight == 4));
        assert!(idx.edges_from(StopId(99)).is_empty());
    }

    #[test]
    fn route_graph_edges() {
        let idx = index();
        assert!(idx.route_graph().are_connected(RouteId(1), RouteId(2)));
        assert!(!idx.route_graph().are_connected(RouteId(1), RouteId(3)));
        assert_eq!(
            idx.shortest_route_path(RouteId(1), RouteId(2)),
            Some(vec![RouteId(1), RouteId(2)])
        );
        assert_eq!(idx.shortest_route_path(RouteId(1), RouteId(3)), None);
    }

    #[test]
    fn shared_stops_between_routes() {
        let idx = index();
        let shared = idx.shared_stops(RouteId(1), RouteId(2));
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].id, StopId(3));
        assert!(idx.shared_stops(RouteId(1), RouteId(3)).is_empty());
    }

    #[test]
    fn heuristic_values() {
        let idx = index();
        assert_eq!(idx.heuristic(StopId(1), StopId(2)), 0.5);
        // Stop 1 on route 1, stop 4 on route 2: 1 * 1.5 + 1 * 5
        assert_eq!(idx.heuristic(StopId(1), StopId(4)), 6.5);
    }

    #[test]
    fn popular_routes_by_length() {
        let idx = index();
        let ids: Vec<RouteId> = idx.popular_routes(2).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RouteId(2), RouteId(1)]);
    }

    #[test]
    fn empty_dataset_builds_empty_index() {
        let idx = NetworkIndex::build(&Dataset::default());
        assert_eq!(idx.stop_count(), 0);
        assert!(idx.routes().is_empty());
        assert_eq!(idx.route_graph().route_count(), 0);
        assert!(idx.popular_routes(5).is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        let a = index();
        let b = index();
        assert_eq!(a.stop_ids(), b.stop_ids());
        for stop in a.stop_ids() {
            assert_eq!(a.edges_from(*stop), b.edges_from(*stop));
        }
    }
}
