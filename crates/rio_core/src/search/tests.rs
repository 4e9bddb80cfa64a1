//! End-to-end tests over the ten-event fixture game

use super::*;
use crate::error::IndexError;
use crate::fixtures;
use crate::index::{CharacterRole, EventFlag, NumericDimension};
use crate::models::CategoricalDimension;
use insta::assert_json_snapshot;

fn sample_search() -> EventSearch {
    EventSearch::from_json_str(&fixtures::ten_event_game_json().to_string()).unwrap()
}

fn set(ids: &[EventId]) -> EventSet {
    ids.iter().copied().collect()
}

#[test]
fn test_home_run_with_two_balls() {
    let search = sample_search();
    let hr = search.game().event(7).unwrap();
    assert_eq!((hr.balls, hr.strikes), (2, 1));

    let result = search
        .evaluate(&[Filter::result("HR"), Filter::counts(NumericDimension::Balls, [2])])
        .unwrap();
    assert_eq!(result, set(&[7]));
}

#[test]
fn test_out_of_domain_fielder_position() {
    let search = sample_search();
    let err = search
        .evaluate(&[Filter::categorical(CategoricalDimension::FielderPosition, "ZZ")])
        .unwrap_err();
    assert!(matches!(err, IndexError::InvalidFilterValue { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_universe_is_identity_for_intersection() {
    let search = sample_search();
    let universe = search.index().universe().clone();
    assert_eq!(search.evaluate(&[]).unwrap(), universe);
    let everything = Filter::runners([0]);
    let anything = Filter::runners([-1, -2, -3]);
    let union: EventSet = search
        .evaluate(&[everything])
        .unwrap()
        .union(&search.evaluate(&[anything]).unwrap())
        .copied()
        .collect();
    assert_eq!(union, universe);
}

#[test]
fn test_stamina_and_ball_asymmetry() {
    let search = sample_search();
    let low_stamina = search
        .evaluate(&[Filter::counts(NumericDimension::PitcherStamina, [-5])])
        .unwrap();
    for id in &low_stamina {
        assert!(search.game().event(*id).unwrap().pitcher_stamina <= 5);
    }
    let deep_counts = search
        .evaluate(&[Filter::counts(NumericDimension::Balls, [-2])])
        .unwrap();
    for id in &deep_counts {
        assert!(search.game().balls_of(*id).unwrap() >= 2);
    }
    assert_eq!(low_stamina, set(&[8, 9]));
    assert_eq!(deep_counts, set(&[3, 7]));
}

#[test]
fn test_runner_on_first_excludes_other_bases() {
    let search = sample_search();
    let result = search.evaluate(&[Filter::runners([1])]).unwrap();
    for id in &result {
        let event = search.game().event(*id).unwrap();
        assert!(event.runner_on(1).is_some());
        assert!(event.runner_on(2).is_none());
        assert!(event.runner_on(3).is_none());
    }
    assert_eq!(result, set(&[2, 4, 7]));
}

#[test]
fn test_absent_character_never_errors() {
    let search = sample_search();
    for role in [CharacterRole::AtBat, CharacterRole::Pitching, CharacterRole::Fielding] {
        let result = search.evaluate(&[Filter::character(role, "Magikoopa(B)")]).unwrap();
        assert!(result.is_empty());
    }
}

#[test]
fn test_combined_query() {
    let search = sample_search();
    let filters = [
        Filter::player(crate::query::PlayerRole::Batting, "awayguy"),
        Filter::categorical(CategoricalDimension::PitchType, "charge"),
        Filter::flag(EventFlag::InStrikezone),
    ];
    assert_eq!(search.evaluate(&filters).unwrap(), set(&[1, 7]));
}

#[test]
fn test_fixture_matches_input_schema() {
    let schema = GameLog::json_schema();
    let compiled = jsonschema::JSONSchema::compile(&schema).expect("schema compiles");
    assert!(compiled.is_valid(&fixtures::ten_event_game_json()));

    let mut broken = fixtures::ten_event_game_json();
    broken["Events"][0]["Balls"] = serde_json::json!("two");
    assert!(!compiled.is_valid(&broken));

    let mut broken = fixtures::ten_event_game_json();
    broken["Character Game Stats"]["Away Roster 0"]["Offensive Stats"]["Hits"] =
        serde_json::json!("two");
    assert!(!compiled.is_valid(&broken));
}

#[test]
fn test_summary_snapshot() {
    let search = sample_search();
    assert_json_snapshot!(search.summary(), @r###"
    {
      "game_id": 1715004,
      "version": "1.9.5",
      "orientation": "current",
      "players": [
        "AwayGuy",
        "HomeGal"
      ],
      "scores": [
        3,
        1
      ],
      "events": 10,
      "final_event_id": 9,
      "warnings": 0,
      "pitched": 10,
      "contacted": 6,
      "fielded": 5
    }
    "###);
}
