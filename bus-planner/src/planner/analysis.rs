//! Priority re-ordering and plain-language itinerary analysis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rank::score;
use crate::domain::{RouteOption, RoutePlan, RouteScore};

/// What the rider cares about most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Fastest,
    Comfortable,
    Reliable,
    Direct,
    #[default]
    Balanced,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Fastest => "fastest",
            Priority::Comfortable => "comfortable",
            Priority::Reliable => "reliable",
            Priority::Direct => "direct",
            Priority::Balanced => "balanced",
        }
    }

    /// The sub-score this priority sorts by.
    fn key(&self, score: &RouteScore) -> u32 {
        match self {
            Priority::Fastest => score.time,
            Priority::Comfortable => score.comfort,
            Priority::Reliable => score.reliability,
            Priority::Direct => score.accessibility,
            Priority::Balanced => score.total,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a priority name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(Priority::Fastest),
            "comfortable" => Ok(Priority::Comfortable),
            "reliable" => Ok(Priority::Reliable),
            "direct" => Ok(Priority::Direct),
            "balanced" => Ok(Priority::Balanced),
            _ => Err(UnknownPriority(s.to_string())),
        }
    }
}

/// Re-order a plan's options for a priority.
///
/// The sort is stable, so options equal on the chosen sub-score keep
/// their ranked order. The plan's best option follows the new order.
pub fn recommend(mut plan: RoutePlan, priority: Priority) -> RoutePlan {
    plan.options.sort_by_cached_key(|option| {
        let s = option.score().copied().unwrap_or_else(|| score(option));
        std::cmp::Reverse(priority.key(&s))
    });
    plan
}

/// Strengths, weaknesses and advice for one itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAnalysis {
    pub strengths: Vec<&'static str>,
    pub weaknesses: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
    pub score: RouteScore,
}

/// Describe an itinerary's strong and weak points.
pub fn analyze(option: &RouteOption) -> RouteAnalysis {
    let s = option.score().copied().unwrap_or_else(|| score(option));

    let strengths = [
        (s.time >= 20, "Fast travel time"),
        (s.transfer >= 20, "Minimal transfers"),
        (s.comfort >= 8, "Comfortable journey"),
        (s.reliability >= 12, "High reliability"),
        (s.accessibility >= 4, "Easy access"),
    ];
    let weaknesses = [
        (s.time < 10, "Long travel time"),
        (s.transfer < 10, "Multiple transfers required"),
        (s.comfort < 5, "Significant walking required"),
        (s.reliability < 8, "Lower reliability"),
        (s.accessibility < 2, "Complex route"),
    ];
    let recommendations = [
        (
            option.transfers() > 2,
            "Consider alternative routes with fewer transfers",
        ),
        (
            option.walking_time() > 10,
            "Prepare for significant walking between transfers",
        ),
        (option.total_time() > 60, "Allow extra time for this journey"),
        (
            s.total < 50,
            "This route may not be optimal - consider alternatives",
        ),
    ];

    RouteAnalysis {
        strengths: applicable(&strengths),
        weaknesses: applicable(&weaknesses),
        recommendations: applicable(&recommendations),
        score: s,
    }
}

fn applicable(checks: &[(bool, &'static str)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(holds, _)| *holds)
        .map(|(_, text)| *text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::rank::rank_options;
    use crate::planner::rank::test_support::{chain, chain_from};

    fn plan(options: Vec<RouteOption>) -> RoutePlan {
        let options = rank_options(options);
        RoutePlan {
            from: "a".to_string(),
            to: "b".to_string(),
            total_options: options.len(),
            options,
            search_time_ms: 0,
            truncated: false,
        }
    }

    #[test]
    fn parse_priority() {
        assert_eq!("Fastest".parse::<Priority>(), Ok(Priority::Fastest));
        assert_eq!(" direct ".parse::<Priority>(), Ok(Priority::Direct));
        assert!("cheapest".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Balanced);
        assert_eq!(Priority::Comfortable.to_string(), "comfortable");
    }

    #[test]
    fn fastest_puts_quickest_first() {
        // Long direct ride (25 hops, 100 min) vs a quick transfer (21 min)
        let plan = recommend(plan(vec![chain_from(10, &[25]), chain(&[2, 2])]), Priority::Fastest);
        assert_eq!(plan.options[0].transfers(), 1);
        assert_eq!(plan.best_option().unwrap().total_time(), 21);
    }

    #[test]
    fn direct_puts_single_leg_first() {
        let plan = recommend(plan(vec![chain_from(10, &[25]), chain(&[2, 2])]), Priority::Direct);
        assert!(plan.options[0].is_direct());
    }

    #[test]
    fn empty_plan_unchanged() {
        let plan = recommend(plan(vec![]), Priority::Reliable);
        assert!(plan.is_empty());
    }

    #[test]
    fn analysis_of_short_direct_ride() {
        let analysis = analyze(&chain(&[3]));
        assert_eq!(
            analysis.strengths,
            vec![
                "Fast travel time",
                "Minimal transfers",
                "Comfortable journey",
                "High reliability",
                "Easy access"
            ]
        );
        assert!(analysis.weaknesses.is_empty());
        assert!(analysis.recommendations.is_empty());
        assert_eq!(analysis.score.total, 92);
    }

    #[test]
    fn analysis_of_long_multi_transfer_ride() {
        // 4 legs of 20 hops: 320 + 15 min, 3 transfers
        let analysis = analyze(&chain(&[20, 20, 20, 20]));
        assert!(analysis.weaknesses.contains(&"Long travel time"));
        assert!(analysis.weaknesses.contains(&"Multiple transfers required"));
        assert!(!analysis.weaknesses.contains(&"Complex route"));
        assert_eq!(
            analysis.recommendations,
            vec![
                "Consider alternative routes with fewer transfers",
                "Allow extra time for this journey",
                "This route may not be optimal - consider alternatives",
            ]
        );
    }
}
