//! Route leg type.
//!
//! A `RouteLeg` is one uninterrupted ride on a single route, built by
//! slicing the route's stop list between two positions.

use super::{DomainError, Route, RouteId, Span, Stop};

/// Fixed per-hop and per-transfer costs.
///
/// Travel time and distance are not computed from geography: every hop
/// between adjacent stops costs the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Minutes per hop between adjacent stops.
    pub hop_time_mins: u32,

    /// Kilometres per hop between adjacent stops.
    pub hop_distance_km: f64,

    /// Minutes added to an itinerary per transfer.
    pub transfer_penalty_mins: u32,

    /// Walking minutes per transfer.
    pub walk_per_transfer_mins: u32,
}

impl CostModel {
    /// Riding time for `hops` hops.
    pub fn ride_time(&self, hops: usize) -> u32 {
        hops as u32 * self.hop_time_mins
    }

    /// Riding distance for `hops` hops, rounded to 0.1 km.
    pub fn ride_distance(&self, hops: usize) -> f64 {
        round_tenth(hops as f64 * self.hop_distance_km)
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            // round(2.5 min base + 0.8 km * 1.5 min/km)
            hop_time_mins: 4,
            hop_distance_km: 0.8,
            transfer_penalty_mins: 5,
            walk_per_transfer_mins: 2,
        }
    }
}

/// Round to one decimal place.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A leg of an itinerary (one bus).
///
/// # Invariants
///
/// - Board and alight positions are valid for the route and differ
/// - Board and alight stops have different ids
/// - `stops` is the contiguous slice of the route between the two
///   positions, in travel order
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    route_id: RouteId,
    route_number: String,
    span: Span,
    stops: Vec<Stop>,
    estimated_time: u32,
    distance: f64,
}

impl RouteLeg {
    /// Construct a leg riding `route` over `span`.
    ///
    /// Direction limits are not checked here; callers decide which
    /// `BacktrackLimit` applies.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either position is out of bounds, the positions are
    /// equal, or they name the same stop.
    pub fn new(route: &Route, span: Span, costs: &CostModel) -> Result<Self, DomainError> {
        let (Some(from), Some(to)) = (route.stops.get(span.from), route.stops.get(span.to)) else {
            return Err(DomainError::InvalidLeg("stop position out of bounds"));
        };
        if span.from == span.to {
            return Err(DomainError::InvalidLeg(
                "board and alight positions must differ",
            ));
        }
        if from.id == to.id {
            return Err(DomainError::InvalidLeg(
                "leg must connect two different stops",
            ));
        }

        let hops = span.hops();
        Ok(RouteLeg {
            route_id: route.id,
            route_number: route.number.clone(),
            span,
            stops: route.stops_along(span),
            estimated_time: costs.ride_time(hops),
            distance: costs.ride_distance(hops),
        })
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn route_number(&self) -> &str {
        &self.route_number
    }

    /// Positions in the route's stop list.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Boarding stop.
    pub fn from_stop(&self) -> &Stop {
        // Safe: at least two stops, validated at construction
        &self.stops[0]
    }

    /// Alighting stop.
    pub fn to_stop(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }

    /// All stops ridden, board and alight included, in travel order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Stops passed between boarding and alighting.
    pub fn intermediate_stops(&self) -> &[Stop] {
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of hops ridden.
    pub fn hop_count(&self) -> usize {
        self.span.hops()
    }

    /// Estimated riding time in minutes.
    pub fn estimated_time(&self) -> u32 {
        self.estimated_time
    }

    /// Riding distance in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// True if the leg follows the route's canonical direction.
    pub fn is_forward(&self) -> bool {
        self.span.is_forward()
    }
}
