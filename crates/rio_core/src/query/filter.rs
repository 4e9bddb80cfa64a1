use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::index::{BandedDimension, CharacterRole, EventFlag, NumericDimension};
use crate::models::CategoricalDimension;

/// Which side a human player controlled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Batting,
    Pitching,
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batting" | "batter" => Ok(PlayerRole::Batting),
            "pitching" | "pitcher" => Ok(PlayerRole::Pitching),
            _ => Err(format!("Invalid player role: {}", s)),
        }
    }
}

/// One typed predicate over a game's events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    Flag { flag: EventFlag },
    /// Case-insensitive value (or group alias) of a categorical dimension
    Categorical {
        dimension: CategoricalDimension,
        value: String,
    },
    /// Signed-magnitude list over an integer-bucketed dimension
    Counts {
        dimension: NumericDimension,
        values: Vec<i64>,
    },
    HalfInning { half: i64 },
    /// Up to three of -3..=3, see `runners_on_base`
    RunnersOnBase { bases: Vec<i64> },
    /// Character id already resolved by the caller
    Character { role: CharacterRole, char_id: String },
    Player { role: PlayerRole, name: String },
    MagnitudeAtLeast {
        dimension: BandedDimension,
        threshold: f64,
    },
}

impl Filter {
    pub fn flag(flag: EventFlag) -> Self {
        Filter::Flag { flag }
    }

    pub fn categorical(dimension: CategoricalDimension, value: impl Into<String>) -> Self {
        Filter::Categorical { dimension, value: value.into() }
    }

    pub fn result(value: impl Into<String>) -> Self {
        Self::categorical(CategoricalDimension::ResultOfAtBat, value)
    }

    pub fn counts(dimension: NumericDimension, values: impl Into<Vec<i64>>) -> Self {
        Filter::Counts { dimension, values: values.into() }
    }

    pub fn half_inning(half: i64) -> Self {
        Filter::HalfInning { half }
    }

    pub fn runners(bases: impl Into<Vec<i64>>) -> Self {
        Filter::RunnersOnBase { bases: bases.into() }
    }

    pub fn character(role: CharacterRole, char_id: impl Into<String>) -> Self {
        Filter::Character { role, char_id: char_id.into() }
    }

    pub fn player(role: PlayerRole, name: impl Into<String>) -> Self {
        Filter::Player { role, name: name.into() }
    }

    pub fn magnitude_at_least(dimension: BandedDimension, threshold: f64) -> Self {
        Filter::MagnitudeAtLeast { dimension, threshold }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Flag { flag } => write!(f, "{}", flag),
            Filter::Categorical { dimension, value } => write!(f, "{} = '{}'", dimension, value),
            Filter::Counts { dimension, values } => write!(f, "{} in {:?}", dimension, values),
            Filter::HalfInning { half } => write!(f, "half inning {}", half),
            Filter::RunnersOnBase { bases } => write!(f, "runners {:?}", bases),
            Filter::Character { role, char_id } => write!(f, "{} {}", role, char_id),
            Filter::Player { role, name } => match role {
                PlayerRole::Batting => write!(f, "{} batting", name),
                PlayerRole::Pitching => write!(f, "{} pitching", name),
            },
            Filter::MagnitudeAtLeast { dimension, threshold } => {
                write!(f, "|{}| >= {}", dimension, threshold.abs())
            }
        }
    }
}
