//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Route, RouteId, RouteLeg, RouteOption, RoutePlan, RouteScore, Stop, StopId};
use crate::planner::{Priority, RouteAnalysis};

/// Query for stop name suggestions.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Partial stop name
    #[serde(default)]
    pub q: String,

    /// Maximum number of names to return
    pub limit: Option<usize>,
}

/// Stop name suggestions, best first.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<String>,
}

/// Query for the routes with the most stops.
#[derive(Debug, Deserialize)]
pub struct PopularRoutesRequest {
    pub limit: Option<usize>,
}

/// A route without its stop list.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub id: RouteId,
    pub number: String,
    pub name: String,
    pub stop_count: usize,
    pub first_stop: Option<String>,
    pub last_stop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Response for popular routes.
#[derive(Debug, Serialize)]
pub struct PopularRoutesResponse {
    pub routes: Vec<RouteSummary>,
}

/// Request to plan a trip between two free-text locations.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Origin stop name (or part of one)
    pub from: String,

    /// Destination stop name (or part of one)
    pub to: String,

    /// How to order the options (defaults to balanced)
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub from: String,
    pub to: String,
    pub priority: Priority,

    /// Itineraries in priority order
    pub options: Vec<OptionResult>,

    /// Id of the first option, if any
    pub best_option: Option<String>,

    pub total_options: usize,

    /// True if a search bound stopped exploration early
    pub truncated: bool,

    /// Planning time of the (possibly cached) plan
    pub search_time_ms: u64,

    /// When the plan was computed
    pub planned_at: DateTime<Utc>,
}

/// Request to analyse one option of a plan.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub from: String,
    pub to: String,

    /// Position of the option in the plan (0 = best)
    #[serde(default)]
    pub index: usize,

    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Strengths, weaknesses and advice for one itinerary.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub option: OptionResult,
    pub strengths: Vec<&'static str>,
    pub weaknesses: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
    pub score: ScoreResult,
}

/// One itinerary.
#[derive(Debug, Serialize)]
pub struct OptionResult {
    pub id: String,

    /// "direct", "transfer" or "multi_transfer"
    pub route_type: &'static str,

    pub legs: Vec<LegResult>,

    /// Total minutes including transfer penalties
    pub total_time: u32,

    /// Kilometres, one decimal place
    pub total_distance: f64,

    pub transfers: usize,

    /// Minutes spent walking between transfers
    pub walking_time: u32,

    pub confidence: f64,

    pub score: Option<ScoreResult>,
}

/// One ride on one route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub route_id: RouteId,
    pub route_number: String,
    pub from: StopInfo,
    pub to: StopInfo,

    /// Stops passed between boarding and alighting
    pub stops: Vec<StopInfo>,

    pub estimated_time: u32,
    pub distance: f64,

    /// False if the leg rides the route's stop list in reverse
    pub forward: bool,
}

/// Stop information for display.
#[derive(Debug, Serialize)]
pub struct StopInfo {
    pub id: StopId,
    pub name: String,
}

/// Score breakdown.
#[derive(Debug, Serialize)]
pub struct ScoreResult {
    pub total: u32,
    pub time: u32,
    pub transfer: u32,
    pub distance: u32,
    pub reliability: u32,
    pub comfort: u32,
    pub accessibility: u32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteSummary {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id,
            number: route.number.clone(),
            name: route.name.clone(),
            stop_count: route.stops.len(),
            first_stop: route.stops.first().map(|s| s.name.clone()),
            last_stop: route.stops.last().map(|s| s.name.clone()),
            color: route.color.clone(),
        }
    }
}

impl PlanResponse {
    /// Create from a plan already ordered for `priority`.
    pub fn from_plan(plan: &RoutePlan, priority: Priority, planned_at: DateTime<Utc>) -> Self {
        Self {
            from: plan.from.clone(),
            to: plan.to.clone(),
            priority,
            options: plan.options.iter().map(OptionResult::from_option).collect(),
            best_option: plan.best_option().map(|o| o.id().to_string()),
            total_options: plan.total_options,
            truncated: plan.truncated,
            search_time_ms: plan.search_time_ms,
            planned_at,
        }
    }
}

impl AnalyzeResponse {
    pub fn new(option: &RouteOption, analysis: RouteAnalysis) -> Self {
        Self {
            option: OptionResult::from_option(option),
            strengths: analysis.strengths,
            weaknesses: analysis.weaknesses,
            recommendations: analysis.recommendations,
            score: ScoreResult::from_score(&analysis.score),
        }
    }
}

impl OptionResult {
    /// Create from a domain RouteOption.
    pub fn from_option(option: &RouteOption) -> Self {
        Self {
            id: option.id().to_string(),
            route_type: option.route_type().as_str(),
            legs: option.legs().iter().map(LegResult::from_leg).collect(),
            total_time: option.total_time(),
            total_distance: option.total_distance(),
            transfers: option.transfers(),
            walking_time: option.walking_time(),
            confidence: option.confidence(),
            score: option.score().map(ScoreResult::from_score),
        }
    }
}

impl LegResult {
    /// Create from a domain RouteLeg.
    pub fn from_leg(leg: &RouteLeg) -> Self {
        Self {
            route_id: leg.route_id(),
            route_number: leg.route_number().to_string(),
            from: StopInfo::from_stop(leg.from_stop()),
            to: StopInfo::from_stop(leg.to_stop()),
            stops: leg
                .intermediate_stops()
                .iter()
                .map(StopInfo::from_stop)
                .collect(),
            estimated_time: leg.estimated_time(),
            distance: leg.distance(),
            forward: leg.is_forward(),
        }
    }
}

impl StopInfo {
    fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id,
            name: stop.name.clone(),
        }
    }
}

impl ScoreResult {
    fn from_score(score: &RouteScore) -> Self {
        Self {
            total: score.total,
            time: score.time,
            transfer: score.transfer,
            distance: score.distance,
            reliability: score.reliability,
            comfort: score.comfort,
            accessibility: score.accessibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::rank::test_support::chain;
    use crate::planner::{analyze, score};

    fn scored(hops: &[usize]) -> RouteOption {
        let option = chain(hops);
        let s = score(&option);
        option.with_score(s)
    }

    #[test]
    fn option_result_from_direct_option() {
        let result = OptionResult::from_option(&scored(&[3]));

        assert_eq!(result.route_type, "direct");
        assert_eq!(result.transfers, 0);
        assert_eq!(result.total_time, 12);
        assert_eq!(result.walking_time, 0);
        assert_eq!(result.legs.len(), 1);
        assert_eq!(result.score.as_ref().map(|s| s.total), Some(92));
    }

    #[test]
    fn leg_result_lists_intermediate_stops() {
        let result = OptionResult::from_option(&scored(&[3]));
        let leg = &result.legs[0];

        assert_eq!(leg.from.id, StopId(1));
        assert_eq!(leg.to.id, StopId(4));
        assert_eq!(leg.from.name, "S1");
        assert!(leg.forward);

        let ids: Vec<_> = leg.stops.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![StopId(2), StopId(3)]);
    }

    #[test]
    fn transfer_option_serializes_route_type() {
        let result = OptionResult::from_option(&scored(&[2, 2]));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["route_type"], "transfer");
        assert_eq!(json["transfers"], 1);
        assert_eq!(json["legs"][1]["route_id"], 2);
        assert_eq!(json["legs"][1]["from"]["id"], 3);
    }

    #[test]
    fn plan_response_names_best_option() {
        let direct = scored(&[3]);
        let best_id = direct.id().to_string();
        let plan = RoutePlan {
            from: "S1".into(),
            to: "S4".into(),
            options: vec![direct],
            total_options: 1,
            search_time_ms: 2,
            truncated: false,
        };

        let response = PlanResponse::from_plan(&plan, Priority::Fastest, Utc::now());
        assert_eq!(response.best_option, Some(best_id));
        assert_eq!(response.priority, Priority::Fastest);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["priority"], "fastest");
        assert_eq!(json["truncated"], false);
    }

    #[test]
    fn empty_plan_has_no_best_option() {
        let plan = RoutePlan::empty("Nowhere", "Somewhere", 0);
        let response = PlanResponse::from_plan(&plan, Priority::Balanced, Utc::now());

        assert!(response.options.is_empty());
        assert!(response.best_option.is_none());
    }

    #[test]
    fn route_summary_from_route() {
        let route = Route::new(
            7,
            "7A",
            vec![Stop::new(1, "Depot"), Stop::new(2, "Market"), Stop::new(3, "Pier")],
        );
        let summary = RouteSummary::from_route(&route);

        assert_eq!(summary.id, RouteId(7));
        assert_eq!(summary.stop_count, 3);
        assert_eq!(summary.first_stop.as_deref(), Some("Depot"));
        assert_eq!(summary.last_stop.as_deref(), Some("Pier"));
    }

    #[test]
    fn analyze_response_carries_analysis() {
        let option = scored(&[3]);
        let response = AnalyzeResponse::new(&option, analyze(&option));

        assert_eq!(response.score.total, 92);
        assert!(response.strengths.contains(&"Fast travel time"));
        assert!(response.weaknesses.is_empty());
    }

    #[test]
    fn plan_request_priority_is_optional() {
        let req: PlanRequest = serde_json::from_str(r#"{"from":"A","to":"B"}"#).unwrap();
        assert!(req.priority.is_none());

        let req: PlanRequest =
            serde_json::from_str(r#"{"from":"A","to":"B","priority":"reliable"}"#).unwrap();
        assert_eq!(req.priority, Some(Priority::Reliable));
    }
}
