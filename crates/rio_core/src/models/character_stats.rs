//! Per-character box score blocks ("Offensive Stats" / "Defensive Stats")
//!
//! Both blocks are additive, so a team line is the sum of its nine slots.
//! Rate stats return `None` when their denominator is zero.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;

/// Batting line of one character (or a whole team once summed)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(default)]
pub struct OffensiveStats {
    /// Plate appearances as the game counts them, walks included
    #[serde(rename = "At Bats")]
    pub at_bats: i64,
    #[serde(rename = "Hits")]
    pub hits: i64,
    #[serde(rename = "Singles")]
    pub singles: i64,
    #[serde(rename = "Doubles")]
    pub doubles: i64,
    #[serde(rename = "Triples")]
    pub triples: i64,
    #[serde(rename = "Homeruns")]
    pub homeruns: i64,
    #[serde(rename = "Successful Bunts")]
    pub bunts_landed: i64,
    #[serde(rename = "Sac Flys")]
    pub sac_flys: i64,
    #[serde(rename = "Strikeouts")]
    pub strikeouts: i64,
    #[serde(rename = "Walks (4 Balls)")]
    pub walks_ball_four: i64,
    #[serde(rename = "Walks (Hit)")]
    pub walks_hit_by_pitch: i64,
    #[serde(rename = "RBI")]
    pub rbi: i64,
    #[serde(rename = "Bases Stolen")]
    pub bases_stolen: i64,
    #[serde(rename = "Star Hits")]
    pub star_hits: i64,
}

impl OffensiveStats {
    pub fn walks(&self) -> i64 {
        self.walks_ball_four + self.walks_hit_by_pitch
    }

    pub fn total_bases(&self) -> i64 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.homeruns
    }

    pub fn batting_avg(&self) -> Option<f64> {
        ratio(self.hits, self.at_bats)
    }

    pub fn obp(&self) -> Option<f64> {
        ratio(self.hits + self.walks(), self.at_bats)
    }

    /// Total bases over at-bats that were not walks
    pub fn slg(&self) -> Option<f64> {
        ratio(self.total_bases(), self.at_bats - self.walks())
    }

    pub fn ops(&self) -> Option<f64> {
        Some(self.obp()? + self.slg()?)
    }
}

impl Add for OffensiveStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            at_bats: self.at_bats + rhs.at_bats,
            hits: self.hits + rhs.hits,
            singles: self.singles + rhs.singles,
            doubles: self.doubles + rhs.doubles,
            triples: self.triples + rhs.triples,
            homeruns: self.homeruns + rhs.homeruns,
            bunts_landed: self.bunts_landed + rhs.bunts_landed,
            sac_flys: self.sac_flys + rhs.sac_flys,
            strikeouts: self.strikeouts + rhs.strikeouts,
            walks_ball_four: self.walks_ball_four + rhs.walks_ball_four,
            walks_hit_by_pitch: self.walks_hit_by_pitch + rhs.walks_hit_by_pitch,
            rbi: self.rbi + rhs.rbi,
            bases_stolen: self.bases_stolen + rhs.bases_stolen,
            star_hits: self.star_hits + rhs.star_hits,
        }
    }
}

impl<'a> Sum<&'a OffensiveStats> for OffensiveStats {
    fn sum<I: Iterator<Item = &'a OffensiveStats>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s.clone())
    }
}

/// Pitching and fielding line of one character (or a whole team once summed)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(default)]
pub struct DefensiveStats {
    #[serde(rename = "Batters Faced")]
    pub batters_faced: i64,
    #[serde(rename = "Runs Allowed")]
    pub runs_allowed: i64,
    #[serde(rename = "Batters Walked")]
    pub batters_walked_ball_four: i64,
    #[serde(rename = "Batters Hit")]
    pub batters_hit_by_pitch: i64,
    #[serde(rename = "Hits Allowed")]
    pub hits_allowed: i64,
    #[serde(rename = "HRs Allowed")]
    pub homeruns_allowed: i64,
    #[serde(rename = "Pitches Thrown")]
    pub pitches_thrown: i64,
    #[serde(rename = "Stamina")]
    pub stamina: i64,
    #[serde(rename = "Was Pitcher")]
    pub was_pitcher: i64,
    #[serde(rename = "Strikeouts")]
    pub strikeouts: i64,
    #[serde(rename = "Star Pitches Thrown")]
    pub star_pitches_thrown: i64,
    #[serde(rename = "Big Plays")]
    pub big_plays: i64,
    #[serde(rename = "Outs Pitched")]
    pub outs_pitched: i64,
    /// Single-element list in every known version
    #[serde(rename = "Pitches Per Position")]
    pub pitches_per_position: Vec<BTreeMap<String, i64>>,
    #[serde(rename = "Outs Per Position")]
    pub outs_per_position: Vec<BTreeMap<String, i64>>,
}

impl DefensiveStats {
    pub fn was_pitcher(&self) -> bool {
        self.was_pitcher == 1
    }

    pub fn batters_walked(&self) -> i64 {
        self.batters_walked_ball_four + self.batters_hit_by_pitch
    }

    pub fn innings_pitched(&self) -> f64 {
        self.outs_pitched as f64 / 3.0
    }

    /// Runs allowed per nine innings
    pub fn era(&self) -> Option<f64> {
        if self.outs_pitched == 0 {
            return None;
        }
        Some(9.0 * self.runs_allowed as f64 / self.innings_pitched())
    }

    pub fn pitches_at(&self, position: &str) -> Option<i64> {
        self.pitches_per_position.first()?.get(position).copied()
    }

    pub fn outs_at(&self, position: &str) -> Option<i64> {
        self.outs_per_position.first()?.get(position).copied()
    }
}

impl Add for DefensiveStats {
    type Output = Self;

    /// Position breakdowns are per character and do not carry into a sum
    fn add(self, rhs: Self) -> Self {
        Self {
            batters_faced: self.batters_faced + rhs.batters_faced,
            runs_allowed: self.runs_allowed + rhs.runs_allowed,
            batters_walked_ball_four: self.batters_walked_ball_four + rhs.batters_walked_ball_four,
            batters_hit_by_pitch: self.batters_hit_by_pitch + rhs.batters_hit_by_pitch,
            hits_allowed: self.hits_allowed + rhs.hits_allowed,
            homeruns_allowed: self.homeruns_allowed + rhs.homeruns_allowed,
            pitches_thrown: self.pitches_thrown + rhs.pitches_thrown,
            stamina: self.stamina + rhs.stamina,
            was_pitcher: self.was_pitcher.max(rhs.was_pitcher),
            strikeouts: self.strikeouts + rhs.strikeouts,
            star_pitches_thrown: self.star_pitches_thrown + rhs.star_pitches_thrown,
            big_plays: self.big_plays + rhs.big_plays,
            outs_pitched: self.outs_pitched + rhs.outs_pitched,
            pitches_per_position: Vec::new(),
            outs_per_position: Vec::new(),
        }
    }
}

impl<'a> Sum<&'a DefensiveStats> for DefensiveStats {
    fn sum<I: Iterator<Item = &'a DefensiveStats>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s.clone())
    }
}

fn ratio(numerator: i64, denominator: i64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}
