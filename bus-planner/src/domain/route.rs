//! Route types and stop-list slicing rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Stop, StopId};

/// Stable identifier of a bus route.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How far a rider may travel against a route's canonical direction.
///
/// A backward ride is accepted only when its hop count is strictly less than
/// `numerator / denominator` of the route's stop count. Kept as a fraction so
/// the comparison is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackLimit {
    pub numerator: usize,
    pub denominator: usize,
}

impl BacktrackLimit {
    /// Limit used for single-leg direct rides.
    pub const TWO_THIRDS: Self = Self {
        numerator: 2,
        denominator: 3,
    };

    /// Limit used for legs that are part of a transfer itinerary.
    pub const HALF: Self = Self {
        numerator: 1,
        denominator: 2,
    };

    /// Returns true if a backward ride of `hops` hops is acceptable on a
    /// route of `route_len` stops.
    pub fn allows(&self, hops: usize, route_len: usize) -> bool {
        hops * self.denominator < route_len * self.numerator
    }
}

/// A pair of positions in a route's stop list, in travel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Number of hops between the two positions.
    pub fn hops(&self) -> usize {
        self.from.abs_diff(self.to)
    }

    /// True if the span follows the route's canonical direction.
    pub fn is_forward(&self) -> bool {
        self.from < self.to
    }
}

/// A fixed bus route: an ordered list of stops in one canonical direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub number: String,
    pub stops: Vec<Stop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Route {
    /// Create a route whose display name is its number.
    pub fn new(id: u32, number: impl Into<String>, stops: Vec<Stop>) -> Self {
        let number = number.into();
        Self {
            id: RouteId(id),
            name: number.clone(),
            number,
            stops,
            color: None,
            description: None,
        }
    }

    /// Number of stops on the route.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns true if the route serves the given stop.
    pub fn contains(&self, stop: StopId) -> bool {
        self.stops.iter().any(|s| s.id == stop)
    }

    /// All positions at which the route visits `stop`, in route order.
    pub fn positions_of(&self, stop: StopId) -> impl Iterator<Item = usize> + '_ {
        self.stops
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.id == stop)
            .map(|(i, _)| i)
    }

    /// Returns true if `span` is a ride a passenger could take on this route.
    ///
    /// Both positions must be in bounds and name different stops. Forward
    /// spans are always allowed; backward spans only within `limit`.
    pub fn allows_span(&self, span: Span, limit: BacktrackLimit) -> bool {
        let (Some(from), Some(to)) = (self.stops.get(span.from), self.stops.get(span.to)) else {
            return false;
        };
        if span.from == span.to || from.id == to.id {
            return false;
        }
        span.is_forward() || limit.allows(span.hops(), self.len())
    }

    /// Every allowed span from `from` to `to`, shortest first.
    ///
    /// A route that visits a stop more than once yields one candidate per
    /// pair of visits.
    pub fn spans_between(&self, from: StopId, to: StopId, limit: BacktrackLimit) -> Vec<Span> {
        let mut spans: Vec<Span> = self
            .positions_of(from)
            .flat_map(|i| self.positions_of(to).map(move |j| Span::new(i, j)))
            .filter(|span| self.allows_span(*span, limit))
            .collect();
        spans.sort_by_key(|span| (span.hops(), span.from, span.to));
        spans
    }

    /// The shortest allowed span from `from` to `to`, if any.
    pub fn best_span(&self, from: StopId, to: StopId, limit: BacktrackLimit) -> Option<Span> {
        self.spans_between(from, to, limit).into_iter().next()
    }

    /// Stops covered by `span`, inclusive, in travel order.
    ///
    /// Returns an empty list if the span is out of bounds.
    pub fn stops_along(&self, span: Span) -> Vec<Stop> {
        let (lo, hi) = if span.is_forward() {
            (span.from, span.to)
        } else {
            (span.to, span.from)
        };
        let Some(slice) = self.stops.get(lo..=hi) else {
            return Vec::new();
        };
        let mut stops = slice.to_vec();
        if !span.is_forward() {
            stops.reverse();
        }
        stops
    }
}
