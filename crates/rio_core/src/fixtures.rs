//! Hand-built stat files shared by unit tests.

use serde_json::{json, Value};

use crate::normalize::ReplayGame;

pub const AWAY_ROSTER: [&str; 9] = [
    "Mario", "Luigi", "Peach", "Daisy", "Yoshi", "Birdo", "Wario", "Waluigi", "Toad(Red)",
];
pub const HOME_ROSTER: [&str; 9] = [
    "Bowser", "Bowser Jr", "Donkey Kong", "Diddy", "Boo", "Dixie", "King Boo", "Petey", "Monty",
];

pub const AWAY_PLAYER: &str = "AwayGuy";
pub const HOME_PLAYER: &str = "HomeGal";

/// Slot that pitches for each team in the fixtures
pub const PITCHER_SLOT: i64 = 5;
pub const AWAY_PITCHER_SLOT: i64 = 6;

/// Minimal required event. Team 0 bats in half 0 and faces Dixie; team 1
/// bats in half 1 and faces Wario.
pub fn event(inning: i64, half: i64, balls: i64, strikes: i64, outs: i64, batter: i64) -> Value {
    json!({
        "Event Num": 0,
        "Inning": inning,
        "Half Inning": half,
        "Away Score": 0,
        "Home Score": 0,
        "Balls": balls,
        "Strikes": strikes,
        "Outs": outs,
        "Star Chance": 0,
        "Pitcher Stamina": 10,
        "Chemistry Links on Base": 0,
        "Pitcher Roster Loc": if half == 0 { PITCHER_SLOT } else { AWAY_PITCHER_SLOT },
        "Batter Roster Loc": batter,
        "RBI": 0,
        "Num Outs During Play": 0,
        "Result of AB": "None",
    })
}

pub fn pitch(pitch_type: &str, charge_type: &str, swing: &str, ball_pos: f64) -> Value {
    json!({
        "Pitch Type": pitch_type,
        "Charge Type": charge_type,
        "Star Pitch": 0,
        "Ball Position - Strikezone": ball_pos,
        "In Strikezone": 0,
        "Type of Swing": swing,
    })
}

pub fn contact(contact_type: &str, direction: &str, frame: Value, pos_x: f64) -> Value {
    json!({
        "Type of Contact": contact_type,
        "Input Direction - Stick": direction,
        "Frame of Swing Upon Contact": frame,
        "Star Swing Five-Star": 0,
        "Ball Contact Pos - X": pos_x,
    })
}

pub fn fielder(position: &str, character: &str) -> Value {
    json!({
        "Fielder Roster Location": 0,
        "Fielder Position": position,
        "Fielder Character": character,
        "Fielder Action": "None",
        "Fielder Manual Selected": "No Selected Char",
        "Fielder Bobble": "None",
    })
}

pub fn runner(char_id: &str, steal: &str) -> Value {
    json!({ "Runner Char Id": char_id, "Steal": steal })
}

/// Four at-bats per slot with `slot % 3` hits. The third hit is a homer and
/// the lead-off hitter draws the team's only walk, so each team bats
/// 9-for-36 with 18 total bases.
pub fn offensive_stats(slot: usize) -> Value {
    let hits = slot % 3;
    let homeruns = usize::from(hits == 2);
    json!({
        "At Bats": 4,
        "Hits": hits,
        "Singles": usize::from(hits >= 1),
        "Doubles": 0,
        "Triples": 0,
        "Homeruns": homeruns,
        "Successful Bunts": 0,
        "Sac Flys": 0,
        "Strikeouts": 1,
        "Walks (4 Balls)": usize::from(slot == 0),
        "Walks (Hit)": 0,
        "RBI": 2 * homeruns,
        "Bases Stolen": usize::from(slot == 1),
        "Star Hits": 0,
    })
}

/// Only the fixture pitchers record outs. Wario (away) gives up 1 run over
/// 6 outs, Dixie (home) 3 runs over 7.
pub fn defensive_stats(team: usize, slot: usize) -> Value {
    let pitcher = if team == 0 { AWAY_PITCHER_SLOT } else { PITCHER_SLOT };
    if slot as i64 != pitcher {
        return json!({
            "Was Pitcher": 0,
            "Big Plays": usize::from(slot == 4),
            "Pitches Per Position": [{}],
            "Outs Per Position": [{}],
        });
    }
    let (outs, runs) = if team == 0 { (6, 1) } else { (7, 3) };
    json!({
        "Batters Faced": outs + 3,
        "Runs Allowed": runs,
        "Batters Walked": 1,
        "Batters Hit": 0,
        "Hits Allowed": 2,
        "HRs Allowed": 1,
        "Pitches Thrown": 30,
        "Stamina": 4,
        "Was Pitcher": 1,
        "Strikeouts": 3,
        "Star Pitches Thrown": 1,
        "Big Plays": 0,
        "Outs Pitched": outs,
        "Pitches Per Position": [{ "P": 30 }],
        "Outs Per Position": [{ "P": outs }],
    })
}

/// Wraps events into a full stat file with both rosters keyed for `version`
pub fn game(version: Option<&str>, mut events: Vec<Value>) -> Value {
    for (i, ev) in events.iter_mut().enumerate() {
        ev["Event Num"] = json!(i);
    }
    let mut stats = serde_json::Map::new();
    for (team, roster) in [AWAY_ROSTER, HOME_ROSTER].iter().enumerate() {
        for (slot, name) in roster.iter().enumerate() {
            let key = crate::models::roster_key(
                version.unwrap_or(crate::models::UNVERSIONED),
                team,
                slot,
            );
            stats.insert(
                key,
                json!({
                    "CharID": name,
                    "Superstar": 0,
                    "Captain": if slot == 0 { 1 } else { 0 },
                    "Fielding Hand": "Right",
                    "Batting Hand": "Right",
                    "Team": team.to_string(),
                    "Offensive Stats": offensive_stats(slot),
                    "Defensive Stats": defensive_stats(team, slot),
                }),
            );
        }
    }
    let mut doc = json!({
        "GameID": "1A,2B,3C",
        "Date - Start": "Sun Jun 26 21:13:13 2022",
        "Date - End": "Sun Jun 26 21:40:02 2022",
        "StadiumID": 2,
        "Home Player": HOME_PLAYER,
        "Away Player": AWAY_PLAYER,
        "Home Score": 1,
        "Away Score": 3,
        "Innings Selected": 3,
        "Innings Played": 2,
        "Quitter Team": "",
        "Ranked": 1,
        "Average Ping": 12,
        "Lag Spikes": 0,
        "Character Game Stats": Value::Object(stats),
        "Events": events,
    });
    if let Some(version) = version {
        doc["Version"] = json!(version);
    }
    doc
}

/// Ten events over two innings. Event 7 is the only home run, thrown at a
/// 2-1 count.
pub fn ten_event_events() -> Vec<Value> {
    let mut events = Vec::new();

    // 0: strikeout looking, bases empty
    let mut e = event(1, 0, 0, 0, 0, 0);
    e["Result of AB"] = json!("Strikeout");
    e["Pitch"] = pitch("Curve", "N/A", "None", 0.1);
    e["Pitch"]["In Strikezone"] = json!(1);
    events.push(e);

    // 1: single to left
    let mut e = event(1, 0, 1, 2, 1, 1);
    e["Result of AB"] = json!("Single");
    e["Pitcher Stamina"] = json!(9);
    e["Pitch"] = pitch("Charge", "Slider", "Slap", -0.260153);
    e["Pitch"]["In Strikezone"] = json!(1);
    e["Pitch"]["Contact"] = contact("Nice - Right", "Right", json!("2"), -0.216502);
    e["Pitch"]["Contact"]["First Fielder"] = fielder("LF", "Petey");
    events.push(e);

    // 2: runner stealing, sliding manual catch at short
    let mut e = event(1, 0, 0, 0, 1, 2);
    e["Result of AB"] = json!("Out");
    e["Pitcher Stamina"] = json!(8);
    e["Num Outs During Play"] = json!(1);
    e["Runner 1B"] = runner("Luigi", "Normal");
    e["Pitch"] = pitch("ChangeUp", "N/A", "Charge", 0.0);
    e["Pitch"]["In Strikezone"] = json!(1);
    e["Pitch"]["Contact"] = contact("Sour - Left", "", json!(5), 0.42);
    e["Pitch"]["Contact"]["First Fielder"] = fielder("SS", "Boo");
    e["Pitch"]["Contact"]["First Fielder"]["Fielder Action"] = json!("Sliding");
    e["Pitch"]["Contact"]["First Fielder"]["Fielder Manual Selected"] = json!("Boo");
    events.push(e);

    // 3: full-count walk
    let mut e = event(1, 1, 3, 2, 0, 0);
    e["Result of AB"] = json!("Walk (BB)");
    e["Pitch"] = pitch("Curve", "N/A", "None", 0.755);
    events.push(e);

    // 4: star pitch, wall-jump bobble in center
    let mut e = event(1, 1, 0, 0, 0, 1);
    e["Result of AB"] = json!("Double");
    e["Pitcher Stamina"] = json!(9);
    e["Chemistry Links on Base"] = json!(1);
    e["Runner 1B"] = runner("Bowser", "None");
    e["Pitch"] = pitch("Curve", "Perfect", "Charge", -0.5);
    e["Pitch"]["Star Pitch"] = json!(1);
    e["Pitch"]["Contact"] = contact("Perfect", "Up", json!(3), 0.125);
    e["Pitch"]["Contact"]["First Fielder"] = fielder("CF", "Yoshi");
    e["Pitch"]["Contact"]["First Fielder"]["Fielder Action"] = json!("Walljump");
    e["Pitch"]["Contact"]["First Fielder"]["Fielder Bobble"] = json!("Bobble");
    events.push(e);

    // 5: five-star swing lined out to right, runners on second and third
    let mut e = event(1, 1, 1, 1, 0, 2);
    e["Result of AB"] = json!("Caught line-drive");
    e["Pitcher Stamina"] = json!(8);
    e["Num Outs During Play"] = json!(1);
    e["Runner 2B"] = runner("Bowser Jr", "None");
    e["Runner 3B"] = runner("Bowser", "None");
    e["Pitch"] = pitch("Charge", "Slider", "Star", 0.2);
    e["Pitch"]["Contact"] = contact("Nice - Left", "Left", json!(4), -0.6);
    e["Pitch"]["Contact"]["Star Swing Five-Star"] = json!(1);
    e["Pitch"]["Contact"]["First Fielder"] = fielder("RF", "Waluigi");
    events.push(e);

    // 6: star chance, popped up to the catcher
    let mut e = event(2, 0, 0, 1, 0, 3);
    e["Result of AB"] = json!("Caught");
    e["Star Chance"] = json!(1);
    e["Pitcher Stamina"] = json!(7);
    e["Pitch"] = pitch("Curve", "N/A", "Slap", 0.05);
    e["Pitch"]["Contact"] = contact("Sour - Right", "Down", json!(1), 0.05);
    e["Pitch"]["Contact"]["First Fielder"] = fielder("C", "King Boo");
    events.push(e);

    // 7: two-run home run on a 2-1 count
    let mut e = event(2, 0, 2, 1, 1, 4);
    e["Result of AB"] = json!("HR");
    e["RBI"] = json!(2);
    e["Pitcher Stamina"] = json!(6);
    e["Runner 1B"] = runner("Daisy", "None");
    e["Pitch"] = pitch("Charge", "Slider", "Charge", 0.15);
    e["Pitch"]["In Strikezone"] = json!(1);
    e["Pitch"]["Contact"] = contact("Perfect", "Left", json!("4"), 0.31);
    events.push(e);

    // 8: strikeout
    let mut e = event(2, 0, 0, 0, 1, 5);
    e["Result of AB"] = json!("Strikeout");
    e["Away Score"] = json!(2);
    e["Pitcher Stamina"] = json!(5);
    e["Pitch"] = pitch("Curve", "N/A", "None", -0.9);
    events.push(e);

    // 9: bases loaded strikeout to end it
    let mut e = event(2, 1, 0, 2, 2, 3);
    e["Result of AB"] = json!("Strikeout");
    e["Away Score"] = json!(2);
    e["Pitcher Stamina"] = json!(4);
    e["Runner 1B"] = runner("Bowser", "None");
    e["Runner 2B"] = runner("Bowser Jr", "None");
    e["Runner 3B"] = runner("Donkey Kong", "None");
    e["Pitch"] = pitch("Curve", "N/A", "Slap", 0.33);
    events.push(e);

    events
}

pub fn ten_event_game_json() -> Value {
    game(Some("1.9.5"), ten_event_events())
}

pub fn ten_event_game() -> ReplayGame {
    ReplayGame::from_json_str(&ten_event_game_json().to_string()).expect("fixture normalizes")
}
