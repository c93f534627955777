//! Itinerary scoring and ranking.
//!
//! Every itinerary gets a score out of 100 built from six factors. Plans
//! are presented best-first by that score with a fixed tie-break chain, so
//! the order never depends on search or map iteration order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::domain::{RouteOption, RouteScore, ScoreFactors, StopId};

/// Compute the quality score of an itinerary.
///
/// - time: 25 - minutes / 4
/// - transfer: 25 - 8 per transfer
/// - distance: 20 - 2 per km
/// - reliability: 15 x confidence
/// - comfort: 10 - walking minutes / 2
/// - accessibility: 5 for a direct ride, else 5 - transfers
///
/// Each factor is floored at zero.
pub fn score(option: &RouteOption) -> RouteScore {
    let transfers = option.transfers() as f64;

    let time = (RouteScore::MAX_TIME as f64 - f64::from(option.total_time()) / 4.0).max(0.0);
    let transfer = (RouteScore::MAX_TRANSFER as f64 - transfers * 8.0).max(0.0);
    let distance = (RouteScore::MAX_DISTANCE as f64 - option.total_distance() * 2.0).max(0.0);
    let reliability = option.confidence() * RouteScore::MAX_RELIABILITY as f64;
    let comfort = (RouteScore::MAX_COMFORT as f64 - f64::from(option.walking_time()) / 2.0).max(0.0);
    let accessibility = if option.is_direct() {
        RouteScore::MAX_ACCESSIBILITY as f64
    } else {
        (RouteScore::MAX_ACCESSIBILITY as f64 - transfers).max(0.0)
    };

    let total = time + transfer + distance + reliability + comfort + accessibility;

    RouteScore {
        total: whole(total),
        time: whole(time),
        transfer: whole(transfer),
        distance: whole(distance),
        reliability: whole(reliability),
        comfort: whole(comfort),
        accessibility: whole(accessibility),
        factors: ScoreFactors {
            time: option.total_time(),
            transfers: option.transfers(),
            distance: option.total_distance(),
            walking_time: option.walking_time(),
            route_count: option.legs().len(),
            confidence: option.confidence(),
        },
    }
}

fn whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Order two scores best-first.
///
/// Total first, then time, transfer, reliability, comfort and
/// accessibility, all higher-is-better.
pub fn compare_scores(a: &RouteScore, b: &RouteScore) -> Ordering {
    b.total
        .cmp(&a.total)
        .then(b.time.cmp(&a.time))
        .then(b.transfer.cmp(&a.transfer))
        .then(b.reliability.cmp(&a.reliability))
        .then(b.comfort.cmp(&a.comfort))
        .then(b.accessibility.cmp(&a.accessibility))
}

/// Order two itineraries best-first, scoring them if not yet scored.
///
/// Itineraries with equal scores are ordered by their identity key, so the
/// result is a total order.
pub fn compare_options(a: &RouteOption, b: &RouteOption) -> Ordering {
    let score_a = a.score().copied().unwrap_or_else(|| score(a));
    let score_b = b.score().copied().unwrap_or_else(|| score(b));
    compare_scores(&score_a, &score_b).then_with(|| a.key().cmp(&b.key()))
}

/// Score every itinerary and sort best-first.
pub fn rank_options(options: Vec<RouteOption>) -> Vec<RouteOption> {
    let mut scored: Vec<RouteOption> = options
        .into_iter()
        .map(|option| {
            let s = score(&option);
            option.with_score(s)
        })
        .collect();
    scored.sort_by(compare_options);
    scored
}

/// Remove redundant itineraries.
///
/// A multi-leg itinerary is dropped when a direct one joins the same two
/// stops. Of the rest, the first itinerary for each identity key is kept.
/// Input order is otherwise preserved.
pub fn deduplicate(options: Vec<RouteOption>) -> Vec<RouteOption> {
    if options.len() <= 1 {
        return options;
    }

    let direct_pairs: BTreeSet<(StopId, StopId)> = options
        .iter()
        .filter(|o| o.is_direct())
        .map(|o| (o.origin().id, o.destination().id))
        .collect();

    let mut seen = HashSet::with_capacity(options.len());
    options
        .into_iter()
        .filter(|o| {
            o.is_direct() || !direct_pairs.contains(&(o.origin().id, o.destination().id))
        })
        .filter(|o| seen.insert(o.key()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::{chain, chain_from};
    use super::*;

    #[test]
    fn direct_score() {
        // 3 hops: 12 min, 2.4 km, confidence 1.0
        let s = score(&chain(&[3]));
        assert_eq!(s.time, 22);
        assert_eq!(s.transfer, 25);
        assert_eq!(s.distance, 15);
        assert_eq!(s.reliability, 15);
        assert_eq!(s.comfort, 10);
        assert_eq!(s.accessibility, 5);
        // 22 + 25 + 15.2 + 15 + 10 + 5
        assert_eq!(s.total, 92);
        assert_eq!(s.factors.time, 12);
        assert_eq!(s.factors.route_count, 1);
    }

    #[test]
    fn transfer_score() {
        // 2 + 2 hops: 16 + 5 = 21 min, 3.2 km, walking 2
        // confidence: 1 - 0.15 - 0.2 (first leg 8 min) = 0.65
        let s = score(&chain(&[2, 2]));
        assert_eq!(s.time, 20);
        assert_eq!(s.transfer, 17);
        assert_eq!(s.distance, 14);
        assert_eq!(s.reliability, 10);
        assert_eq!(s.comfort, 9);
        assert_eq!(s.accessibility, 4);
        // 19.75 + 17 + 13.6 + 9.75 + 9 + 4 = 73.1
        assert_eq!(s.total, 73);
    }

    #[test]
    fn long_trips_floor_at_zero() {
        let s = score(&chain(&[40, 40, 40, 40]));
        assert_eq!(s.time, 0);
        assert_eq!(s.transfer, 1);
        assert_eq!(s.distance, 0);
        assert_eq!(s.accessibility, 2);
        assert!(s.total <= RouteScore::MAX_TOTAL);
    }

    #[test]
    fn rank_prefers_direct() {
        let ranked = rank_options(vec![chain(&[2, 2]), chain_from(10, &[3])]);
        assert!(ranked[0].is_direct());
        assert!(ranked.iter().all(|o| o.score().is_some()));
    }

    #[test]
    fn ties_broken_by_key() {
        // Same shape, different route ids
        let a = chain_from(5, &[3]);
        let b = chain_from(1, &[3]);
        let ranked = rank_options(vec![a, b]);
        assert_eq!(ranked[0].route_ids()[0].0, 2);
        assert_eq!(ranked[1].route_ids()[0].0, 6);
    }

    #[test]
    fn deduplicate_drops_subsumed_transfers() {
        // Direct 1 -> 5 and transfer 1 -> 3 -> 5 share endpoints
        let direct = chain_from(10, &[4]);
        let transfer = chain(&[2, 2]);
        let result = deduplicate(vec![transfer, direct]);
        assert_eq!(result.len(), 1);
        assert!(result[0].is_direct());
    }

    #[test]
    fn deduplicate_keeps_first_of_same_key() {
        let result = deduplicate(vec![chain(&[3]), chain(&[3]), chain(&[2])]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(rank_options(vec![]).is_empty());
        assert!(deduplicate(vec![]).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::test_support::chain_from;
    use super::*;
    use proptest::prelude::*;

    fn option_strategy() -> impl Strategy<Value = RouteOption> {
        (0u32..20, prop::collection::vec(1usize..25, 1..5))
            .prop_map(|(base, hops)| chain_from(base * 10, &hops))
    }

    fn options_strategy() -> impl Strategy<Value = Vec<RouteOption>> {
        prop::collection::vec(option_strategy(), 0..15)
    }

    proptest! {
        #[test]
        fn scores_within_caps(option in option_strategy()) {
            let s = score(&option);
            prop_assert!(s.total <= RouteScore::MAX_TOTAL);
            prop_assert!(s.time <= RouteScore::MAX_TIME);
            prop_assert!(s.transfer <= RouteScore::MAX_TRANSFER);
            prop_assert!(s.distance <= RouteScore::MAX_DISTANCE);
            prop_assert!(s.reliability <= RouteScore::MAX_RELIABILITY);
            prop_assert!(s.comfort <= RouteScore::MAX_COMFORT);
            prop_assert!(s.accessibility <= RouteScore::MAX_ACCESSIBILITY);
        }

        #[test]
        fn rank_is_sorted(options in options_strategy()) {
            let ranked = rank_options(options);
            for window in ranked.windows(2) {
                prop_assert_ne!(
                    compare_options(&window[0], &window[1]),
                    Ordering::Greater
                );
            }
        }

        #[test]
        fn rank_is_independent_of_input_order(options in options_strategy()) {
            let mut reversed = options.clone();
            reversed.reverse();
            let a: Vec<String> = rank_options(options).iter().map(|o| o.id().to_string()).collect();
            let b: Vec<String> = rank_options(reversed).iter().map(|o| o.id().to_string()).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn deduplicate_leaves_unique_keys(options in options_strategy()) {
            let original_len = options.len();
            let result = deduplicate(options);
            prop_assert!(result.len() <= original_len);

            let keys: HashSet<_> = result.iter().map(RouteOption::key).collect();
            prop_assert_eq!(keys.len(), result.len());
        }

        #[test]
        fn deduplicate_never_keeps_subsumed(options in options_strategy()) {
            let result = deduplicate(options);
            for multi in result.iter().filter(|o| !o.is_direct()) {
                let covered = result.iter().any(|d| {
                    d.is_direct()
                        && d.origin().id == multi.origin().id
                        && d.destination().id == multi.destination().id
                });
                prop_assert!(!covered);
            }
        }
    }
}
