//! Small hand-built stat files for collaborator tests

use serde_json::{json, Value};

pub const AWAY_PLAYER: &str = "Roadie";
pub const HOME_PLAYER: &str = "Homebody";

/// Away roster is "A0".."A8", home roster "H0".."H8"
pub fn game(events: Vec<Value>) -> Value {
    let mut stats = serde_json::Map::new();
    for (prefix, team) in [("Away", "A"), ("Home", "H")] {
        for slot in 0..9 {
            stats.insert(
                format!("{} Roster {}", prefix, slot),
                json!({ "CharID": format!("{}{}", team, slot), "Superstar": 0, "Captain": 0 }),
            );
        }
    }
    json!({
        "Version": "1.9.5",
        "Date - Start": "Sat Mar  2 21:04:05 2024",
        "Away Player": AWAY_PLAYER,
        "Home Player": HOME_PLAYER,
        "Away Score": 0,
        "Home Score": 0,
        "Character Game Stats": stats,
        "Events": events,
    })
}

pub fn event(inning: i64, half: i64, outs: i64, balls: i64, strikes: i64, result: &str) -> Value {
    json!({
        "Event Num": 0,
        "Inning": inning,
        "Half Inning": half,
        "Balls": balls,
        "Strikes": strikes,
        "Outs": outs,
        "Star Chance": 0,
        "Pitcher Stamina": 10,
        "Chemistry Links on Base": 0,
        "Pitcher Roster Loc": 0,
        "Batter Roster Loc": 0,
        "RBI": 0,
        "Num Outs During Play": 0,
        "Result of AB": result,
    })
}
