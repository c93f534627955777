//! Query result type.

use super::RouteOption;

/// Result of a trip-planning query.
///
/// Options are de-duplicated and sorted best-first. An empty plan means no
/// stop matched, no itinerary connects the matches, or a search guard cut
/// the search short; `truncated` tells the last case apart.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// Origin text as given by the caller
    pub from: String,
    /// Destination text as given by the caller
    pub to: String,
    /// Ranked itineraries
    pub options: Vec<RouteOption>,
    /// Number of itineraries in `options`
    pub total_options: usize,
    /// Wall-clock planning time
    pub search_time_ms: u64,
    /// True if a search bound stopped exploration early
    pub truncated: bool,
}

impl RoutePlan {
    /// A plan with no options.
    pub fn empty(from: impl Into<String>, to: impl Into<String>, search_time_ms: u64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            options: Vec::new(),
            total_options: 0,
            search_time_ms,
            truncated: false,
        }
    }

    /// The top-ranked itinerary, if any.
    pub fn best_option(&self) -> Option<&RouteOption> {
        self.options.first()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan() {
        let plan = RoutePlan::empty("Nowhere", "Somewhere", 3);
        assert!(plan.is_empty());
        assert!(plan.best_option().is_none());
        assert_eq!(plan.total_options, 0);
        assert_eq!(plan.search_time_ms, 3);
        assert!(!plan.truncated);
    }
}
