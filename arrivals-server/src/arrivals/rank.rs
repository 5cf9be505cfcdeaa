//! Arrival ranking for display.
//!
//! Turns the raw matched arrivals into the two lists a station sign shows:
//! the next train per route and direction, and everything within the
//! horizon. Both are ordered by line, then direction.

use std::collections::HashSet;

use super::aggregate::RawArrival;
use super::route::{DirectionGroup, direction_group, route_rank};

/// Ranked arrivals for one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranking {
    /// Nothing matched the station at all.
    NoArrivals,

    /// At least one arrival matched. Both lists may still be empty if every
    /// match was beyond the horizon.
    Ranked {
        /// Soonest arrival per (route, direction), in display order.
        next_per_pair: Vec<RawArrival>,

        /// Every arrival within the horizon, in display order.
        all: Vec<RawArrival>,
    },
}

/// Rank arrivals for display.
///
/// 1. Drop anything more than `horizon_mins` away
/// 2. Sort soonest first
/// 3. Keep the first arrival of each (route, direction) pair
/// 4. Order both lists by route, direction group, then direction label
///
/// All sorts are stable, so equal keys keep their incoming order and the
/// result is a pure function of the input.
pub fn rank(arrivals: Vec<RawArrival>, horizon_mins: u32) -> Ranking {
    if arrivals.is_empty() {
        return Ranking::NoArrivals;
    }

    let mut all: Vec<RawArrival> = arrivals
        .into_iter()
        .filter(|a| a.minutes_until <= horizon_mins)
        .collect();
    all.sort_by_key(|a| a.minutes_until);

    let mut next_per_pair = soonest_per_pair(&all);

    sort_for_display(&mut next_per_pair);
    sort_for_display(&mut all);

    Ranking::Ranked { next_per_pair, all }
}

/// First arrival of each (route, direction) pair, preserving order.
fn soonest_per_pair(sorted: &[RawArrival]) -> Vec<RawArrival> {
    let mut seen = HashSet::new();
    sorted
        .iter()
        .filter(|a| seen.insert(a.pair()))
        .cloned()
        .collect()
}

/// Canonical sign order: line, then inbound before outbound, then label.
fn sort_for_display(arrivals: &mut [RawArrival]) {
    arrivals.sort_by(|a, b| display_key(a).cmp(&display_key(b)));
}

fn display_key(arrival: &RawArrival) -> (usize, DirectionGroup, &str) {
    (
        route_rank(&arrival.route),
        direction_group(&arrival.direction),
        &arrival.direction,
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const ROUTES: &[&str] = &["1", "6", "7", "A", "Q", "SIR", "FS", "GS", "ZZ"];
    const DIRECTIONS: &[&str] = &[
        "Uptown & The Bronx",
        "Downtown & Brooklyn",
        "Northbound",
        "Southbound",
        "Coney Island-Stillwell Av",
        "Flushing-Main St",
        "Jamaica Center",
    ];

    fn arrival_strategy() -> impl Strategy<Value = RawArrival> {
        (
            prop::sample::select(ROUTES),
            prop::sample::select(DIRECTIONS),
            0u32..60,
            0u32..1000,
        )
            .prop_map(|(route, direction, minutes, tag)| RawArrival {
                route: route.to_string(),
                direction: direction.to_string(),
                // Distinct tags make reorderings observable.
                arrival_time: format!("t{tag}"),
                minutes_until: minutes,
            })
    }

    fn arrivals_strategy() -> impl Strategy<Value = Vec<RawArrival>> {
        prop::collection::vec(arrival_strategy(), 0..40)
    }

    fn ranked(arrivals: Vec<RawArrival>, horizon: u32) -> (Vec<RawArrival>, Vec<RawArrival>) {
        match rank(arrivals, horizon) {
            Ranking::Ranked { next_per_pair, all } => (next_per_pair, all),
            Ranking::NoArrivals => (vec![], vec![]),
        }
    }

    proptest! {
        #[test]
        fn ranking_all_is_idempotent(arrivals in arrivals_strategy(), horizon in 0u32..60) {
            let (_, all) = ranked(arrivals, horizon);
            let (_, again) = ranked(all.clone(), horizon);

            prop_assert_eq!(again, all);
        }

        #[test]
        fn all_stays_within_horizon(arrivals in arrivals_strategy(), horizon in 0u32..60) {
            let expected = arrivals.iter().filter(|a| a.minutes_until <= horizon).count();
            let (_, all) = ranked(arrivals, horizon);

            prop_assert_eq!(all.len(), expected);
            for a in &all {
                prop_assert!(a.minutes_until <= horizon);
            }
        }

        #[test]
        fn one_soonest_entry_per_pair(arrivals in arrivals_strategy(), horizon in 0u32..60) {
            let (next, all) = ranked(arrivals, horizon);

            let pairs: HashSet<_> = all.iter().map(RawArrival::pair).collect();
            prop_assert_eq!(next.len(), pairs.len());

            for entry in &next {
                let same_pair: Vec<_> = all.iter().filter(|a| a.pair() == entry.pair()).collect();
                prop_assert!(!same_pair.is_empty());
                for other in same_pair {
                    prop_assert!(entry.minutes_until <= other.minutes_until);
                }
            }
        }

        #[test]
        fn lists_are_in_display_order(arrivals in arrivals_strategy()) {
            let (next, all) = ranked(arrivals, 30);

            for list in [&next, &all] {
                for window in list.windows(2) {
                    prop_assert!(display_key(&window[0]) <= display_key(&window[1]));
                }
            }
        }
    }
}
