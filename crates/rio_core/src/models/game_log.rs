use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::character_stats::{DefensiveStats, OffensiveStats};

/// One decoded stat file as written to disk
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct GameLog {
    #[serde(rename = "GameID", default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<RawNumber>,
    #[serde(rename = "Date - Start", default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<RawNumber>,
    #[serde(rename = "Date - End", default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<RawNumber>,
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "StadiumID", default, skip_serializing_if = "Option::is_none")]
    pub stadium: Option<RawNumber>,
    #[serde(rename = "Home Player")]
    pub home_player: String,
    #[serde(rename = "Away Player")]
    pub away_player: String,
    #[serde(rename = "Home Score")]
    pub home_score: i64,
    #[serde(rename = "Away Score")]
    pub away_score: i64,
    #[serde(rename = "Innings Selected", default, skip_serializing_if = "Option::is_none")]
    pub innings_selected: Option<i64>,
    #[serde(rename = "Innings Played", default, skip_serializing_if = "Option::is_none")]
    pub innings_played: Option<i64>,
    #[serde(rename = "Quitter Team", default, skip_serializing_if = "Option::is_none")]
    pub quitter_team: Option<RawNumber>,
    #[serde(rename = "Ranked", default, skip_serializing_if = "Option::is_none")]
    pub ranked: Option<RawNumber>,
    #[serde(rename = "Average Ping", default, skip_serializing_if = "Option::is_none")]
    pub average_ping: Option<RawNumber>,
    #[serde(rename = "Lag Spikes", default, skip_serializing_if = "Option::is_none")]
    pub lag_spikes: Option<RawNumber>,
    /// Keyed by roster slot name, see `version::roster_key`
    #[serde(rename = "Character Game Stats")]
    pub character_stats: BTreeMap<String, RawRosterEntry>,
    #[serde(rename = "Events")]
    pub events: Vec<RawEvent>,
}

impl GameLog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSON schema of the on-disk document
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(GameLog);
        serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
    }
}

/// Stat files mix numbers, numeric strings and booleans for the same key
/// across versions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum RawNumber {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Integer value; numeric strings may carry thousands separators ("1,722")
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Bool(b) => Some(i64::from(*b)),
            RawNumber::Int(i) => Some(*i),
            RawNumber::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            RawNumber::Float(_) => None,
            RawNumber::Text(s) => s.trim().replace(',', "").parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Float(f) => Some(*f),
            RawNumber::Text(s) => s.trim().replace(',', "").parse().ok(),
            other => other.as_i64().map(|i| i as f64),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            RawNumber::Bool(b) => *b,
            RawNumber::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
            other => other.as_i64().map(|i| i != 0).unwrap_or(false),
        }
    }

    /// Game ids are written as comma-grouped hex ("5E,4A,...")
    pub fn as_hex_id(&self) -> Option<u64> {
        match self {
            RawNumber::Text(s) => u64::from_str_radix(&s.trim().replace(',', ""), 16).ok(),
            RawNumber::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            RawNumber::Bool(b) => b.to_string(),
            RawNumber::Int(i) => i.to_string(),
            RawNumber::Float(f) => f.to_string(),
            RawNumber::Text(s) => s.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RawRosterEntry {
    #[serde(rename = "CharID")]
    pub char_id: String,
    #[serde(rename = "Superstar", default)]
    pub superstar: i64,
    #[serde(rename = "Captain", default)]
    pub captain: i64,
    #[serde(rename = "Fielding Hand", default, skip_serializing_if = "Option::is_none")]
    pub fielding_hand: Option<String>,
    #[serde(rename = "Batting Hand", default, skip_serializing_if = "Option::is_none")]
    pub batting_hand: Option<String>,
    #[serde(rename = "Team", default, skip_serializing_if = "Option::is_none")]
    pub team: Option<RawNumber>,
    #[serde(rename = "Offensive Stats", default, skip_serializing_if = "Option::is_none")]
    pub offensive_stats: Option<OffensiveStats>,
    #[serde(rename = "Defensive Stats", default, skip_serializing_if = "Option::is_none")]
    pub defensive_stats: Option<DefensiveStats>,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RawEvent {
    #[serde(rename = "Event Num")]
    pub event_num: i64,
    #[serde(rename = "Inning")]
    pub inning: i64,
    #[serde(rename = "Half Inning")]
    pub half_inning: i64,
    #[serde(rename = "Away Score", default)]
    pub away_score: i64,
    #[serde(rename = "Home Score", default)]
    pub home_score: i64,
    #[serde(rename = "Balls")]
    pub balls: i64,
    #[serde(rename = "Strikes")]
    pub strikes: i64,
    #[serde(rename = "Outs")]
    pub outs: i64,
    #[serde(rename = "Star Chance")]
    pub star_chance: i64,
    #[serde(rename = "Pitcher Stamina")]
    pub pitcher_stamina: i64,
    #[serde(rename = "Chemistry Links on Base")]
    pub chem_links_on_base: i64,
    #[serde(rename = "Pitcher Roster Loc")]
    pub pitcher_roster_loc: i64,
    #[serde(rename = "Batter Roster Loc")]
    pub batter_roster_loc: i64,
    #[serde(rename = "RBI")]
    pub rbi: i64,
    #[serde(rename = "Num Outs During Play")]
    pub num_outs_during_play: i64,
    #[serde(rename = "Result of AB")]
    pub result_of_at_bat: String,
    #[serde(rename = "Runner 1B", default, skip_serializing_if = "Option::is_none")]
    pub runner_1b: Option<RawRunner>,
    #[serde(rename = "Runner 2B", default, skip_serializing_if = "Option::is_none")]
    pub runner_2b: Option<RawRunner>,
    #[serde(rename = "Runner 3B", default, skip_serializing_if = "Option::is_none")]
    pub runner_3b: Option<RawRunner>,
    #[serde(rename = "Pitch", default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<RawPitch>,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RawRunner {
    #[serde(rename = "Runner Char Id", default, skip_serializing_if = "Option::is_none")]
    pub char_id: Option<String>,
    #[serde(rename = "Steal", default = "no_steal")]
    pub steal: String,
}

fn no_steal() -> String {
    "None".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RawPitch {
    #[serde(rename = "Pitch Type")]
    pub pitch_type: String,
    #[serde(rename = "Charge Type")]
    pub charge_type: String,
    #[serde(rename = "Star Pitch", default)]
    pub star_pitch: i64,
    #[serde(rename = "Ball Position - Strikezone", default, skip_serializing_if = "Option::is_none")]
    pub ball_position_strikezone: Option<f64>,
    #[serde(rename = "In Strikezone", default)]
    pub in_strikezone: i64,
    #[serde(rename = "Type of Swing")]
    pub swing_type: String,
    #[serde(rename = "Contact", default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<RawContact>,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RawContact {
    #[serde(rename = "Type of Contact")]
    pub contact_type: String,
    #[serde(rename = "Input Direction - Stick", default)]
    pub input_direction: String,
    /// Written as a number in some versions and a numeric string in others
    #[serde(rename = "Frame of Swing Upon Contact", default, skip_serializing_if = "Option::is_none")]
    pub frame_of_swing: Option<RawNumber>,
    #[serde(rename = "Star Swing Five-Star", default)]
    pub five_star_swing: i64,
    #[serde(rename = "Ball Contact Pos - X", default, skip_serializing_if = "Option::is_none")]
    pub ball_contact_pos_x: Option<f64>,
    #[serde(rename = "First Fielder", default, skip_serializing_if = "Option::is_none")]
    pub first_fielder: Option<RawFirstFielder>,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RawFirstFielder {
    #[serde(rename = "Fielder Roster Location", default, skip_serializing_if = "Option::is_none")]
    pub roster_location: Option<i64>,
    #[serde(rename = "Fielder Position")]
    pub position: String,
    #[serde(rename = "Fielder Character")]
    pub character: String,
    #[serde(rename = "Fielder Action", default = "none_string")]
    pub action: String,
    #[serde(rename = "Fielder Manual Selected", default = "no_selected_char")]
    pub manual_selected: String,
    #[serde(rename = "Fielder Bobble", default = "none_string")]
    pub bobble: String,
}

fn none_string() -> String {
    "None".to_string()
}

fn no_selected_char() -> String {
    "No Selected Char".to_string()
}
