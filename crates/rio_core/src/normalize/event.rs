use serde::Serialize;

use crate::models::{
    ChargeType, ContactType, DefensiveStats, OffensiveStats, FielderPosition, InputDirection, PitchType, ResultOfAtBat, StealKind,
    SwingType,
};

/// Dense ordinal of an event within one game, starting at 0
pub type EventId = u32;

/// Legacy captures reuse event numbers every 256 events
pub const EVENT_LABEL_WRAP: u32 = 256;

/// Character occupying one lineup position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSlot {
    pub char_id: String,
    pub superstar: bool,
    pub captain: bool,
    pub fielding_hand: Option<String>,
    pub batting_hand: Option<String>,
    /// Absent in logs written without box scores
    pub offense: Option<OffensiveStats>,
    pub defense: Option<DefensiveStats>,
}

/// Nine lineup positions of one team, indexed by roster slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    slots: Vec<RosterSlot>,
}

impl Roster {
    pub const SLOTS: usize = 9;

    pub(crate) fn new(slots: Vec<RosterSlot>) -> Self {
        debug_assert_eq!(slots.len(), Self::SLOTS);
        Self { slots }
    }

    pub fn slot(&self, slot: usize) -> Option<&RosterSlot> {
        self.slots.get(slot)
    }

    pub fn char_id(&self, slot: usize) -> Option<&str> {
        self.slot(slot).map(|s| s.char_id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterSlot> {
        self.slots.iter()
    }

    pub fn captain(&self) -> Option<&RosterSlot> {
        self.slots.iter().find(|s| s.captain)
    }

    pub fn has_superstar(&self) -> bool {
        self.slots.iter().any(|s| s.superstar)
    }

    /// Batting line summed over every slot that carries one
    pub fn offense(&self) -> OffensiveStats {
        self.slots.iter().filter_map(|s| s.offense.as_ref()).sum()
    }

    /// Pitching and fielding line summed over every slot that carries one
    pub fn defense(&self) -> DefensiveStats {
        self.slots.iter().filter_map(|s| s.defense.as_ref()).sum()
    }

    /// Slots that took the mound at some point
    pub fn pitchers(&self) -> impl Iterator<Item = &RosterSlot> {
        self.slots
            .iter()
            .filter(|s| s.defense.as_ref().is_some_and(DefensiveStats::was_pitcher))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Runner {
    pub char_id: Option<String>,
    /// `None` when the recorded steal kind was not recognized
    pub steal: Option<StealKind>,
}

impl Runner {
    pub fn is_stealing(&self) -> bool {
        matches!(self.steal, Some(kind) if kind != StealKind::None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstFielderRecord {
    pub roster_location: Option<u8>,
    pub position: Option<FielderPosition>,
    pub char_id: String,
    pub action: String,
    pub manual_selected: String,
    pub bobble: String,
}

impl FirstFielderRecord {
    pub fn is_bobble(&self) -> bool {
        self.bobble != "None"
    }

    pub fn is_sliding(&self) -> bool {
        self.action == "Sliding"
    }

    pub fn is_wall_jump(&self) -> bool {
        self.action == "Walljump"
    }

    pub fn is_manual_selection(&self) -> bool {
        self.manual_selected != "No Selected Char"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRecord {
    pub contact_type: Option<ContactType>,
    pub input_direction: Option<InputDirection>,
    pub frame_of_swing: Option<u8>,
    pub five_star_swing: bool,
    pub ball_contact_pos_x: Option<f64>,
    pub first_fielder: Option<FirstFielderRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchRecord {
    pub pitch_type: Option<PitchType>,
    pub charge_type: Option<ChargeType>,
    pub star_pitch: bool,
    pub ball_position_strikezone: Option<f64>,
    pub in_strikezone: bool,
    pub swing_type: Option<SwingType>,
    pub contact: Option<ContactRecord>,
}

/// Canonical, version-independent record of one event.
///
/// The pitch -> contact -> first fielder chain is expressed by nesting, so a
/// contact can never exist without its pitch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEvent {
    pub event_id: EventId,
    /// "Event Num" exactly as recorded; may repeat in legacy captures
    pub recorded_num: i64,
    pub wrapped_label: u32,
    pub inning: u8,
    pub half_inning: u8,
    pub away_score: i64,
    pub home_score: i64,
    pub balls: u8,
    pub strikes: u8,
    pub outs: u8,
    pub rbi: u8,
    pub pitcher_stamina: u8,
    pub star_chance: u8,
    pub num_outs_during_play: u8,
    pub chem_links_on_base: u8,
    pub result_of_at_bat: ResultOfAtBat,
    pub batter_roster_loc: u8,
    pub pitcher_roster_loc: u8,
    pub batter_id: String,
    pub pitcher_id: String,
    /// Runners on first, second and third base
    pub runners: [Option<Runner>; 3],
    pub pitch: Option<PitchRecord>,
}

impl NormalizedEvent {
    /// Team index currently at bat
    pub fn batting_team(&self) -> usize {
        usize::from(self.half_inning)
    }

    pub fn fielding_team(&self) -> usize {
        1 - self.batting_team()
    }

    /// Runner on `base` (1..=3)
    pub fn runner_on(&self, base: usize) -> Option<&Runner> {
        base.checked_sub(1)
            .and_then(|i| self.runners.get(i))
            .and_then(Option::as_ref)
    }

    pub fn has_runners(&self) -> bool {
        self.runners.iter().any(Option::is_some)
    }

    pub fn contact(&self) -> Option<&ContactRecord> {
        self.pitch.as_ref().and_then(|p| p.contact.as_ref())
    }

    pub fn first_fielder(&self) -> Option<&FirstFielderRecord> {
        self.contact().and_then(|c| c.first_fielder.as_ref())
    }

    pub fn is_full_count(&self) -> bool {
        self.balls == 3 && self.strikes == 2
    }
}

/// Raw value that could not be matched to its enumeration.
///
/// The event is kept; only the affected dimension treats the value as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationWarning {
    pub event_id: EventId,
    pub field: &'static str,
    pub raw: String,
}
