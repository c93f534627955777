//! Itinerary types.
//!
//! A `RouteOption` is one complete journey from origin to destination made
//! of one or more legs, with the derived totals used for ranking.

use std::fmt;

use super::leg::round_tenth;
use super::{CostModel, DomainError, RouteId, RouteLeg, RouteScore, Stop, StopId};

/// Kind of itinerary, determined by its transfer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// No transfers
    Direct,
    /// Exactly one transfer
    Transfer,
    /// Two or more transfers
    MultiTransfer,
}

impl RouteType {
    pub fn from_transfers(transfers: usize) -> Self {
        match transfers {
            0 => RouteType::Direct,
            1 => RouteType::Transfer,
            _ => RouteType::MultiTransfer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Direct => "direct",
            RouteType::Transfer => "transfer",
            RouteType::MultiTransfer => "multi_transfer",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an itinerary for de-duplication: the ordered route ids and
/// the two end stops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItineraryKey {
    pub routes: Vec<RouteId>,
    pub from: StopId,
    pub to: StopId,
}

/// Heuristic reliability of an itinerary, in [0.1, 1.0].
///
/// Judged from the transfer count and the first leg's riding time.
pub fn confidence(first_leg_mins: u32, transfers: usize) -> f64 {
    let mut confidence = 1.0;

    confidence -= match transfers {
        0 => 0.0,
        1 => 0.15,
        2 => 0.3,
        _ => 0.5,
    };

    if first_leg_mins > 60 {
        confidence -= 0.1;
    }

    // A very short first ride before a transfer is likely an inefficient plan
    if first_leg_mins < 10 && transfers > 0 {
        confidence -= 0.2;
    }

    if transfers > 0 && first_leg_mins > 15 {
        confidence += 0.05;
    }

    f64::clamp(confidence, 0.1, 1.0)
}

/// A complete itinerary.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs meet at the same stop id
/// - `transfers == legs.len() - 1` and `route_type` matches it
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOption {
    id: String,
    legs: Vec<RouteLeg>,
    total_time: u32,
    total_distance: f64,
    transfers: usize,
    walking_time: u32,
    confidence: f64,
    route_type: RouteType,
    score: Option<RouteScore>,
}

impl RouteOption {
    /// Constructs an itinerary from legs, deriving its totals.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or two consecutive legs don't meet
    /// at the same stop.
    pub fn new(legs: Vec<RouteLeg>, costs: &CostModel) -> Result<Self, DomainError> {
        let Some(first) = legs.first() else {
            return Err(DomainError::EmptyItinerary);
        };

        for window in legs.windows(2) {
            let alight = window[0].to_stop().id;
            let board = window[1].from_stop().id;
            if alight != board {
                return Err(DomainError::LegsNotConnected(alight, board));
            }
        }

        let transfers = legs.len() - 1;
        let riding: u32 = legs.iter().map(RouteLeg::estimated_time).sum();
        let distance: f64 = legs.iter().map(RouteLeg::distance).sum();
        let route_type = RouteType::from_transfers(transfers);
        let confidence = confidence(first.estimated_time(), transfers);

        let routes: Vec<String> = legs.iter().map(|l| l.route_id().to_string()).collect();
        let id = format!(
            "{}-{}-{}-{}",
            route_type,
            routes.join("."),
            first.from_stop().id,
            legs[transfers].to_stop().id
        );

        Ok(RouteOption {
            id,
            total_time: riding + transfers as u32 * costs.transfer_penalty_mins,
            total_distance: round_tenth(distance),
            transfers,
            walking_time: transfers as u32 * costs.walk_per_transfer_mins,
            confidence,
            route_type,
            score: None,
            legs,
        })
    }

    /// Deterministic identifier derived from kind, routes and end stops.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Total minutes, transfer penalties included.
    pub fn total_time(&self) -> u32 {
        self.total_time
    }

    /// Total kilometres ridden.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// Minutes spent walking between transfer stops.
    pub fn walking_time(&self) -> u32 {
        self.walking_time
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    /// Score, once the itinerary has been ranked.
    pub fn score(&self) -> Option<&RouteScore> {
        self.score.as_ref()
    }

    /// Attach a computed score.
    pub fn with_score(mut self, score: RouteScore) -> Self {
        self.score = Some(score);
        self
    }

    /// Boarding stop of the first leg.
    pub fn origin(&self) -> &Stop {
        self.legs[0].from_stop()
    }

    /// Alighting stop of the last leg.
    pub fn destination(&self) -> &Stop {
        self.legs[self.legs.len() - 1].to_stop()
    }

    pub fn is_direct(&self) -> bool {
        self.transfers == 0
    }

    /// Route ids in riding order.
    pub fn route_ids(&self) -> Vec<RouteId> {
        self.legs.iter().map(RouteLeg::route_id).collect()
    }

    /// Stops where the rider changes bus.
    pub fn transfer_stops(&self) -> Vec<&Stop> {
        self.legs[1..].iter().map(RouteLeg::from_stop).collect()
    }

    /// Identity used for de-duplication.
    pub fn key(&self) -> ItineraryKey {
        ItineraryKey {
            routes: self.route_ids(),
            from: self.origin().id,
            to: self.destination().id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, Span};

    fn r1() -> Route {
        Route::new(
            1,
            "1",
            vec![Stop::new(1, "A"), Stop::new(2, "B"), Stop::new(3, "C")],
        )
    }

    fn r2() -> Route {
        Route::new(
            2,
            "2",
            vec![Stop::new(3, "C"), Stop::new(4, "D"), Stop::new(5, "E")],
        )
    }

    fn leg(route: &Route, from: usize, to: usize) -> RouteLeg {
        RouteLeg::new(route, Span::new(from, to), &CostModel::default()).unwrap()
    }

    #[test]
    fn direct_option_totals() {
        let option = RouteOption::new(vec![leg(&r1(), 0, 2)], &CostModel::default()).unwrap();
        assert_eq!(option.total_time(), 8);
        assert_eq!(option.total_distance(), 1.6);
        assert_eq!(option.transfers(), 0);
        assert_eq!(option.walking_time(), 0);
        assert_eq!(option.confidence(), 1.0);
        assert_eq!(option.route_type(), RouteType::Direct);
        assert_eq!(option.id(), "direct-1-1-3");
        assert!(option.score().is_none());
    }

    #[test]
    fn transfer_option_totals() {
        let option = RouteOption::new(
            vec![leg(&r1(), 0, 2), leg(&r2(), 0, 2)],
            &CostModel::default(),
        )
        .unwrap();
        // 8 + 8 riding + 5 transfer penalty
        assert_eq!(option.total_time(), 21);
        assert_eq!(option.total_distance(), 3.2);
        assert_eq!(option.transfers(), 1);
        assert_eq!(option.walking_time(), 2);
        assert_eq!(option.route_type(), RouteType::Transfer);
        assert_eq!(option.route_ids(), vec![RouteId(1), RouteId(2)]);
        assert_eq!(option.transfer_stops()[0].id, StopId(3));
        assert_eq!(option.id(), "transfer-1.2-1-5");
    }

    #[test]
    fn rejects_disconnected_legs() {
        let err = RouteOption::new(
            vec![leg(&r1(), 0, 1), leg(&r2(), 0, 2)],
            &CostModel::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::LegsNotConnected(StopId(2), StopId(3)));
    }

    #[test]
    fn rejects_empty() {
        let err = RouteOption::new(vec![], &CostModel::default()).unwrap_err();
        assert_eq!(err, DomainError::EmptyItinerary);
    }

    #[test]
    fn route_type_from_transfers() {
        assert_eq!(RouteType::from_transfers(0), RouteType::Direct);
        assert_eq!(RouteType::from_transfers(1), RouteType::Transfer);
        assert_eq!(RouteType::from_transfers(2), RouteType::MultiTransfer);
        assert_eq!(RouteType::from_transfers(3), RouteType::MultiTransfer);
        assert_eq!(RouteType::MultiTransfer.to_string(), "multi_transfer");
    }

    #[test]
    fn confidence_rules() {
        assert_eq!(confidence(20, 0), 1.0);
        assert!((confidence(61, 0) - 0.9).abs() < 1e-9);
        // 1.0 - 0.15 + 0.05
        assert!((confidence(20, 1) - 0.9).abs() < 1e-9);
        // 1.0 - 0.15 - 0.2
        assert!((confidence(8, 1) - 0.65).abs() < 1e-9);
        // 1.0 - 0.15, neither short nor long
        assert!((confidence(12, 1) - 0.85).abs() < 1e-9);
        // 1.0 - 0.5 - 0.1 + 0.05
        assert!((confidence(70, 3) - 0.45).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_clamped() {
        for mins in [0, 5, 12, 20, 61, 200] {
            for transfers in 0..6 {
                let c = confidence(mins, transfers);
                assert!((0.1..=1.0).contains(&c));
            }
        }
    }
}
