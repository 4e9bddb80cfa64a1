//! Version-keyed lookup tables.
//!
//! Older stat-file versions recorded team 0 as the home team and keyed roster
//! slots by team number. Both conventions are resolved here from the recorded
//! version string and nowhere else.

use serde::Serialize;

/// Version assumed when a document carries no "Version" key
pub const UNVERSIONED: &str = "Pre 0.1.7";

/// Versions where team index 0 denotes the home team
pub const FLIPPED_ORIENTATION_VERSIONS: &[&str] = &["Pre 0.1.7", "0.1.7a", "0.1.8", "0.1.9", "1.9.1"];

/// Versions that key roster slots as "Team {t} Roster {s}"
pub const NUMBERED_ROSTER_KEY_VERSIONS: &[&str] = &[
    "Pre 0.1.7",
    "0.1.7a",
    "0.1.8",
    "0.1.9",
    "1.9.1",
    "1.9.2",
    "1.9.3",
    "1.9.4",
];

/// Which team index denotes the home side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamOrientation {
    /// Team 0 = home, team 1 = away
    Flipped,
    /// Team 0 = away, team 1 = home
    Current,
}

impl TeamOrientation {
    /// Whether `team` (0 or 1) is the home side under this orientation
    pub fn is_home(self, team: usize) -> bool {
        match self {
            TeamOrientation::Flipped => team == 0,
            TeamOrientation::Current => team == 1,
        }
    }
}

pub fn orientation(version: &str) -> TeamOrientation {
    if FLIPPED_ORIENTATION_VERSIONS.contains(&version) {
        TeamOrientation::Flipped
    } else {
        TeamOrientation::Current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKeyScheme {
    Numbered,
    AwayHome,
}

pub fn roster_key_scheme(version: &str) -> RosterKeyScheme {
    if NUMBERED_ROSTER_KEY_VERSIONS.contains(&version) {
        RosterKeyScheme::Numbered
    } else {
        RosterKeyScheme::AwayHome
    }
}

/// "Character Game Stats" key for one roster slot of one team
pub fn roster_key(version: &str, team: usize, slot: usize) -> String {
    match roster_key_scheme(version) {
        RosterKeyScheme::Numbered => format!("Team {} Roster {}", team, slot),
        RosterKeyScheme::AwayHome if team == 0 => format!("Away Roster {}", slot),
        RosterKeyScheme::AwayHome => format!("Home Roster {}", slot),
    }
}
