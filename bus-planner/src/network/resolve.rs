//! Free-text stop lookup.

use std::collections::HashSet;

use super::NetworkIndex;
use crate::domain::{Route, Stop};

/// A stop matched by name, paired with one route serving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopMatch<'a> {
    pub stop: &'a Stop,
    pub route: &'a Route,
}

impl NetworkIndex {
    /// Resolve a free-text location to candidate stops.
    ///
    /// An exact (case-insensitive, trimmed) name hit wins. Otherwise every
    /// stop whose name contains the text, or is contained in it, matches.
    /// Results follow dataset order, one entry per (stop, route) pair.
    /// Blank text matches nothing.
    pub fn resolve(&self, text: &str) -> Vec<StopMatch<'_>> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        if let Some(ids) = self.name_index.get(&needle) {
            let exact: Vec<StopMatch<'_>> = self
                .routes
                .iter()
                .flat_map(|route| {
                    ids.iter()
                        .filter(|id| route.contains(**id))
                        .filter_map(move |id| {
                            self.stop(*id).map(|stop| StopMatch { stop, route })
                        })
                })
                .collect();
            if !exact.is_empty() {
                return exact;
            }
        }

        let mut matches = Vec::new();
        for route in &self.routes {
            let mut seen = HashSet::new();
            for stop in &route.stops {
                let name = stop.search_name();
                if name.is_empty() || !seen.insert(stop.id) {
                    continue;
                }
                if name.contains(&needle) || needle.contains(&name) {
                    matches.push(StopMatch { stop, route });
                }
            }
        }
        matches
    }

    /// Distinct stop names for autocompletion.
    ///
    /// Names starting with the query come first, then names containing it,
    /// each group in dataset order.
    pub fn suggest_stops(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut prefixed = Vec::new();
        let mut containing = Vec::new();
        for id in &self.stop_order {
            let Some(stop) = self.stop(*id) else {
                continue;
            };
            let name = stop.search_name();
            if !seen.insert(name.clone()) {
                continue;
            }
            if name.starts_with(&needle) {
                prefixed.push(stop.name.as_str());
            } else if name.contains(&needle) {
                containing.push(stop.name.as_str());
            }
        }

        prefixed.into_iter().chain(containing).take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Dataset, Route, RouteId, Stop, StopId};
    use crate::network::NetworkIndex;

    fn index() -> NetworkIndex {
        let dataset = Dataset::new(vec![
            Route::new(
                1,
                "1",
                vec![
                    Stop::new(1, "Central Station"),
                    Stop::new(2, "Market"),
                    Stop::new(3, "Hospital"),
                ],
            ),
            Route::new(
                2,
                "2",
                vec![
                    Stop::new(3, "Hospital"),
                    Stop::new(4, "Station Road"),
                    // Same name as stop 2, different physical stop
                    Stop::new(5, "Market"),
                ],
            ),
        ])
        .unwrap();
        NetworkIndex::build(&dataset)
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let idx = index();
        let matches = idx.resolve("  hospital ");
        let pairs: Vec<(StopId, RouteId)> =
            matches.iter().map(|m| (m.stop.id, m.route.id)).collect();
        assert_eq!(
            pairs,
            vec![(StopId(3), RouteId(1)), (StopId(3), RouteId(2))]
        );
    }

    #[test]
    fn repeated_name_matches_every_id() {
        let idx = index();
        let ids: Vec<StopId> = idx.resolve("Market").iter().map(|m| m.stop.id).collect();
        assert_eq!(ids, vec![StopId(2), StopId(5)]);
    }

    #[test]
    fn substring_match_in_both_directions() {
        let idx = index();
        let ids: Vec<StopId> = idx.resolve("station").iter().map(|m| m.stop.id).collect();
        assert_eq!(ids, vec![StopId(1), StopId(4)]);

        let ids: Vec<StopId> = idx
            .resolve("Hospital main gate")
            .iter()
            .map(|m| m.stop.id)
            .collect();
        assert_eq!(ids, vec![StopId(3), StopId(3)]);
    }

    #[test]
    fn no_match_and_blank() {
        let idx = index();
        assert!(idx.resolve("Nonexistent Place").is_empty());
        assert!(idx.resolve("   ").is_empty());
    }

    #[test]
    fn suggestions_prefer_prefix() {
        let idx = index();
        assert_eq!(
            idx.suggest_stops("sta", 10),
            vec!["Station Road", "Central Station"]
        );
        assert_eq!(idx.suggest_stops("sta", 1), vec!["Station Road"]);
        assert_eq!(idx.suggest_stops("market", 10), vec!["Market"]);
        assert!(idx.suggest_stops("", 10).is_empty());
    }
}
