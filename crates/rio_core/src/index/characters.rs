use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::EventSet;
use crate::normalize::{EventId, ReplayGame};

static EMPTY: EventSet = EventSet::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum CharacterRole {
    AtBat,
    Pitching,
    Fielding,
}

impl fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterRole::AtBat => write!(f, "batter"),
            CharacterRole::Pitching => write!(f, "pitcher"),
            CharacterRole::Fielding => write!(f, "fielder"),
        }
    }
}

impl FromStr for CharacterRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batter" | "at_bat" | "atbat" => Ok(CharacterRole::AtBat),
            "pitcher" | "pitching" => Ok(CharacterRole::Pitching),
            "fielder" | "fielding" => Ok(CharacterRole::Fielding),
            _ => Err(format!("Invalid character role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CharacterActivity {
    pub at_bat: EventSet,
    pub pitching: EventSet,
    pub fielding: EventSet,
}

impl CharacterActivity {
    pub fn role(&self, role: CharacterRole) -> &EventSet {
        match role {
            CharacterRole::AtBat => &self.at_bat,
            CharacterRole::Pitching => &self.pitching,
            CharacterRole::Fielding => &self.fielding,
        }
    }

    fn role_mut(&mut self, role: CharacterRole) -> &mut EventSet {
        match role {
            CharacterRole::AtBat => &mut self.at_bat,
            CharacterRole::Pitching => &mut self.pitching,
            CharacterRole::Fielding => &mut self.fielding,
        }
    }
}

/// Per-character event sets.
///
/// Seeded with every rostered character so a character who never batted
/// still has (empty) entries. Ids not on either roster resolve to empty sets.
#[derive(Debug, Clone, Default)]
pub struct CharacterActivityIndex {
    characters: FxHashMap<String, CharacterActivity>,
}

impl CharacterActivityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(game: &ReplayGame) -> Self {
        let mut index = Self::new();
        for slot in game.rosters().iter().flat_map(|r| r.iter()) {
            index.characters.entry(slot.char_id.clone()).or_default();
        }
        index
    }

    /// Records activity for a rostered character; returns false for ids that
    /// were never seeded.
    pub fn record(&mut self, char_id: &str, role: CharacterRole, event_id: EventId) -> bool {
        match self.characters.get_mut(char_id) {
            Some(activity) => {
                activity.role_mut(role).insert(event_id);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, char_id: &str) -> Option<&CharacterActivity> {
        self.characters.get(char_id)
    }

    pub fn events(&self, char_id: &str, role: CharacterRole) -> &EventSet {
        self.characters
            .get(char_id)
            .map(|activity| activity.role(role))
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
