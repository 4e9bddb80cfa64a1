//! Property-based generators for whole stat files
//!
//! Games are generated as raw JSON so every property runs through the full
//! parse -> normalize -> index -> query path.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::fmt;

use crate::fixtures;
use crate::models::{ContactType, FielderPosition, PitchType, ResultOfAtBat, SwingType};

/// How far one event got down the pitch -> contact -> fielder chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    NoPitch,
    Pitch,
    Contact,
    Fielded,
}

pub fn depth_strategy() -> impl Strategy<Value = Depth> {
    prop_oneof![
        Just(Depth::NoPitch),
        Just(Depth::Pitch),
        Just(Depth::Contact),
        Just(Depth::Fielded),
    ]
}

fn pick<T: Copy + fmt::Debug + 'static>(values: &'static [T]) -> impl Strategy<Value = T> {
    proptest::sample::select(values)
}

pub fn event_strategy() -> impl Strategy<Value = Value> {
    (
        (1i64..=3, 0i64..=1, 0i64..=3, 0i64..=2, 0i64..=2, 0usize..9),
        (0i64..=10, 0i64..=4, 0i64..=3, any::<[bool; 3]>()),
        (pick(ResultOfAtBat::ALL), pick(PitchType::ALL), pick(SwingType::ALL)),
        (pick(ContactType::ALL), pick(FielderPosition::ALL), depth_strategy()),
        (-1.5f64..1.5, -1.5f64..1.5, 0i64..=10),
    )
        .prop_map(
            |(
                (inning, half, balls, strikes, outs, batter),
                (stamina, rbi, chem, bases),
                (result, pitch_type, swing),
                (contact_type, position, depth),
                (zone_pos, contact_x, frame),
            )| {
                let mut e = fixtures::event(inning, half, balls, strikes, outs, batter as i64);
                e["Pitcher Stamina"] = json!(stamina);
                e["RBI"] = json!(rbi);
                e["Chemistry Links on Base"] = json!(chem);
                e["Result of AB"] = json!(result.as_str());
                for (i, occupied) in bases.iter().enumerate() {
                    if *occupied {
                        e[format!("Runner {}B", i + 1)] = fixtures::runner("Mario", "None");
                    }
                }
                if depth == Depth::NoPitch {
                    return e;
                }
                e["Pitch"] = fixtures::pitch(pitch_type.as_str(), "N/A", swing.as_str(), zone_pos);
                if depth == Depth::Pitch {
                    return e;
                }
                e["Pitch"]["Contact"] = fixtures::contact(contact_type.as_str(), "", json!(frame), contact_x);
                if depth == Depth::Contact {
                    return e;
                }
                let fielder = fixtures::HOME_ROSTER[0];
                e["Pitch"]["Contact"]["First Fielder"] = fixtures::fielder(position.as_str(), fielder);
                e
            },
        )
}

pub fn game_strategy() -> impl Strategy<Value = Value> {
    (
        proptest::collection::vec(event_strategy(), 1..=40),
        prop_oneof![Just(None), Just(Some("0.1.8")), Just(Some("1.9.5"))],
    )
        .prop_map(|(events, version)| fixtures::game(version, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{
        CharacterRole, EventFlag, EventSet, NumericDimension, RangeDirection, SubRecord,
    };
    use crate::models::CategoricalDimension;
    use crate::query::Filter;
    use crate::search::EventSearch;

    fn search(doc: &Value) -> EventSearch {
        EventSearch::from_json_str(&doc.to_string()).expect("generated game normalizes")
    }

    proptest! {
        #[test]
        fn test_universe_is_dense(doc in game_strategy()) {
            let search = search(&doc);
            let n = doc["Events"].as_array().unwrap().len() as u32;
            let everything = search.evaluate(&[]).unwrap();
            prop_assert_eq!(everything.len() as u32, n);
            prop_assert_eq!(everything.iter().copied().collect::<Vec<_>>(), (0..n).collect::<Vec<_>>());
            prop_assert_eq!(search.index().final_event_id(), n - 1);
        }

        #[test]
        fn test_categorical_union_equals_presence(doc in game_strategy()) {
            let search = search(&doc);
            let index = search.index();
            for dim in CategoricalDimension::ALL {
                let union: crate::index::EventSet =
                    index.categorical(dim).unwrap().iter().flatten().copied().collect();
                let expected = match dim {
                    CategoricalDimension::ResultOfAtBat => index.universe(),
                    CategoricalDimension::PitchType
                    | CategoricalDimension::ChargeType
                    | CategoricalDimension::SwingType => index.presence(SubRecord::Pitch),
                    CategoricalDimension::ContactType
                    | CategoricalDimension::InputDirection => index.presence(SubRecord::Contact),
                    CategoricalDimension::FielderPosition => index.presence(SubRecord::FirstFielder),
                };
                prop_assert_eq!(&union, expected);
            }
        }

        #[test]
        fn test_presence_chain(doc in game_strategy()) {
            let search = search(&doc);
            let index = search.index();
            prop_assert!(index.presence(SubRecord::Contact).is_subset(index.presence(SubRecord::Pitch)));
            prop_assert!(index.presence(SubRecord::FirstFielder).is_subset(index.presence(SubRecord::Contact)));
        }

        #[test]
        fn test_filter_order_independent(
            doc in game_strategy(),
            balls in proptest::collection::vec(-3i64..=3, 1..3),
            stamina in -10i64..=10,
        ) {
            let search = search(&doc);
            let filters = vec![
                Filter::counts(NumericDimension::Balls, balls),
                Filter::counts(NumericDimension::PitcherStamina, [stamina]),
                Filter::runners([-1, -2]),
                Filter::flag(EventFlag::StarChance),
            ];
            let mut reversed = filters.clone();
            reversed.reverse();
            prop_assert_eq!(search.evaluate(&filters).unwrap(), search.evaluate(&reversed).unwrap());
        }

        #[test]
        fn test_empty_and_occupied_bases_partition(doc in game_strategy()) {
            let search = search(&doc);
            let empty = search.evaluate(&[Filter::runners([0])]).unwrap();
            let occupied = search.evaluate(&[Filter::runners([-1, -2, -3])]).unwrap();
            prop_assert!(empty.is_disjoint(&occupied));
            prop_assert_eq!(empty.len() + occupied.len(), search.index().universe().len());
        }

        #[test]
        fn test_stamina_at_most_and_balls_at_least(doc in game_strategy(), n in 0i64..=3) {
            let search = search(&doc);
            for id in search.evaluate(&[Filter::counts(NumericDimension::PitcherStamina, [-n])]).unwrap() {
                prop_assert!(i64::from(search.game().event(id).unwrap().pitcher_stamina) <= n);
            }
            for id in search.evaluate(&[Filter::counts(NumericDimension::Balls, [-n])]).unwrap() {
                prop_assert!(i64::from(search.game().balls_of(id).unwrap()) >= n);
            }
        }

        #[test]
        fn test_negative_counts_are_bucket_unions(doc in game_strategy()) {
            let search = search(&doc);
            for dim in NumericDimension::ALL {
                let buckets = search.index().numeric(dim).unwrap();
                let (min, max) = (i64::from(buckets.min()), i64::from(buckets.max()));
                for k in min..=max {
                    let exact = search.evaluate(&[Filter::counts(dim, [k])]).unwrap();
                    prop_assert_eq!(&exact, buckets.bucket(k).unwrap(), "{} {}", dim, k);
                    // -0 is just 0
                    if k == 0 {
                        continue;
                    }
                    let range = match dim.direction() {
                        RangeDirection::AtLeast => k..=max,
                        RangeDirection::AtMost => min..=k,
                    };
                    let union: EventSet =
                        range.flat_map(|b| buckets.bucket(b).unwrap().iter().copied()).collect();
                    let selected = search.evaluate(&[Filter::counts(dim, [-k])]).unwrap();
                    prop_assert_eq!(&selected, &union, "{} -{}", dim, k);
                }
            }
        }

        #[test]
        fn test_unrostered_character_is_empty(doc in game_strategy()) {
            let search = search(&doc);
            let result = search.evaluate(&[Filter::character(CharacterRole::Fielding, "Koopa(G)")]).unwrap();
            prop_assert!(result.is_empty());
        }
    }
}
