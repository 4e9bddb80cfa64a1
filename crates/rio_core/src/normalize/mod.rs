//! Event Normalizer
//!
//! Turns one raw [`GameLog`] into a [`ReplayGame`]: game metadata, both
//! rosters and a dense, ordered list of [`NormalizedEvent`]s.
//!
//! Required fields that are missing or out of range fail the whole file with
//! `IndexError::MalformedInput`. Unrecognized categorical strings (other than
//! the at-bat result) are recorded as [`NormalizationWarning`]s and the value
//! is treated as absent for that dimension only.

pub mod event;
pub mod metadata;

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::Path;

use tracing::{debug, warn};

pub use event::{
    ContactRecord, EventId, FirstFielderRecord, NormalizationWarning, NormalizedEvent, PitchRecord,
    Roster, RosterSlot, Runner, EVENT_LABEL_WRAP,
};
pub use metadata::{parse_timestamp, GameMetadata};

use crate::error::{IndexError, Result};
use crate::models::{
    orientation, roster_key, DefensiveStats, DomainValue, GameLog, OffensiveStats, RawContact,
    RawEvent, RawFirstFielder, RawPitch, RawRunner, ResultOfAtBat, TeamOrientation,
};

pub const BALLS_RANGE: RangeInclusive<u8> = 0..=3;
pub const STRIKES_RANGE: RangeInclusive<u8> = 0..=2;
pub const OUTS_RANGE: RangeInclusive<u8> = 0..=2;
pub const RBI_RANGE: RangeInclusive<u8> = 0..=4;
pub const STAMINA_RANGE: RangeInclusive<u8> = 0..=10;
pub const STAR_CHANCE_RANGE: RangeInclusive<u8> = 0..=1;
pub const OUTS_DURING_PLAY_RANGE: RangeInclusive<u8> = 0..=3;
pub const CHEM_LINKS_RANGE: RangeInclusive<u8> = 0..=3;
pub const CONTACT_FRAME_RANGE: RangeInclusive<u8> = 0..=10;
pub const HALF_INNING_RANGE: RangeInclusive<u8> = 0..=1;
const ROSTER_LOC_RANGE: RangeInclusive<u8> = 0..=8;

/// One normalized game. Immutable once built.
#[derive(Debug, Clone)]
pub struct ReplayGame {
    metadata: GameMetadata,
    rosters: [Roster; 2],
    events: Vec<NormalizedEvent>,
    warnings: Vec<NormalizationWarning>,
}

impl ReplayGame {
    pub fn normalize(log: &GameLog) -> Result<Self> {
        let metadata = GameMetadata::from_log(log);
        let rosters = [
            read_roster(log, &metadata.version, 0)?,
            read_roster(log, &metadata.version, 1)?,
        ];

        if log.events.is_empty() {
            return Err(IndexError::malformed("Events", "game has no events"));
        }
        if log.events.len() > EventId::MAX as usize {
            return Err(IndexError::malformed("Events", "too many events"));
        }

        let mut normalizer = EventNormalizer { rosters: &rosters, warnings: Vec::new() };
        let events = log
            .events
            .iter()
            .enumerate()
            .map(|(i, raw)| normalizer.event(i as EventId, raw))
            .collect::<Result<Vec<_>>>()?;
        let warnings = normalizer.warnings;

        if !warnings.is_empty() {
            warn!(
                game_id = ?metadata.game_id,
                count = warnings.len(),
                "unrecognized values treated as absent"
            );
        }
        debug!(
            game_id = ?metadata.game_id,
            version = %metadata.version,
            events = events.len(),
            "normalized game"
        );

        Ok(Self { metadata, rosters, events, warnings })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::normalize(&GameLog::from_json_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }

    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    pub fn warnings(&self) -> &[NormalizationWarning] {
        &self.warnings
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Orientation is looked up from the version on every call
    pub fn orientation(&self) -> TeamOrientation {
        orientation(&self.metadata.version)
    }

    /// Name of the player controlling team `team` (0 or 1)
    pub fn player(&self, team: usize) -> &str {
        if self.orientation().is_home(team) {
            &self.metadata.home_player
        } else {
            &self.metadata.away_player
        }
    }

    /// Final score of team `team` (0 or 1), same orientation as [`Self::player`]
    pub fn score(&self, team: usize) -> i64 {
        if self.orientation().is_home(team) {
            self.metadata.home_score
        } else {
            self.metadata.away_score
        }
    }

    pub fn roster(&self, team: usize) -> Option<&Roster> {
        self.rosters.get(team)
    }

    pub fn rosters(&self) -> &[Roster; 2] {
        &self.rosters
    }

    pub fn captain(&self, team: usize) -> Option<&str> {
        self.roster(team)
            .and_then(Roster::captain)
            .map(|slot| slot.char_id.as_str())
    }

    pub fn offensive_stats(&self, team: usize, slot: usize) -> Option<&OffensiveStats> {
        self.roster(team)?.slot(slot)?.offense.as_ref()
    }

    pub fn defensive_stats(&self, team: usize, slot: usize) -> Option<&DefensiveStats> {
        self.roster(team)?.slot(slot)?.defense.as_ref()
    }

    /// Batting line of a whole team; zeroed when the log has no box scores
    pub fn team_offense(&self, team: usize) -> Option<OffensiveStats> {
        self.roster(team).map(Roster::offense)
    }

    pub fn team_defense(&self, team: usize) -> Option<DefensiveStats> {
        self.roster(team).map(Roster::defense)
    }

    pub fn was_pitcher(&self, team: usize, slot: usize) -> bool {
        self.defensive_stats(team, slot)
            .is_some_and(DefensiveStats::was_pitcher)
    }

    pub fn is_superstar_game(&self) -> bool {
        self.rosters.iter().any(Roster::has_superstar)
    }

    pub fn was_quit(&self) -> bool {
        self.metadata.was_quit()
    }

    pub fn is_mercy(&self) -> bool {
        self.metadata.is_mercy()
    }

    pub fn event(&self, id: EventId) -> Option<&NormalizedEvent> {
        self.events.get(id as usize)
    }

    pub fn final_event_id(&self) -> EventId {
        (self.events.len() - 1) as EventId
    }

    pub fn final_event(&self) -> &NormalizedEvent {
        &self.events[self.events.len() - 1]
    }

    /// Every event id in the game
    pub fn universe(&self) -> BTreeSet<EventId> {
        (0..self.events.len() as EventId).collect()
    }

    /// Highest inning the index must carry a bucket for
    pub fn max_inning(&self) -> u8 {
        let recorded = self.events.iter().map(|e| e.inning).max().unwrap_or(1);
        let played = self
            .metadata
            .innings_played
            .and_then(|i| u8::try_from(i).ok())
            .unwrap_or(1);
        recorded.max(played).max(1)
    }

    pub fn inning_of(&self, id: EventId) -> Option<u8> {
        self.event(id).map(|e| e.inning)
    }

    pub fn half_inning_of(&self, id: EventId) -> Option<u8> {
        self.event(id).map(|e| e.half_inning)
    }

    pub fn outs_of(&self, id: EventId) -> Option<u8> {
        self.event(id).map(|e| e.outs)
    }

    pub fn balls_of(&self, id: EventId) -> Option<u8> {
        self.event(id).map(|e| e.balls)
    }

    pub fn strikes_of(&self, id: EventId) -> Option<u8> {
        self.event(id).map(|e| e.strikes)
    }

    pub fn rbi_of(&self, id: EventId) -> Option<u8> {
        self.event(id).map(|e| e.rbi)
    }

    pub fn batter_of(&self, id: EventId) -> Option<&str> {
        self.event(id).map(|e| e.batter_id.as_str())
    }

    pub fn pitcher_of(&self, id: EventId) -> Option<&str> {
        self.event(id).map(|e| e.pitcher_id.as_str())
    }

    /// Score of team `team` at the start of event `id`. Event scores are
    /// always recorded away/home.
    pub fn score_of(&self, id: EventId, team: usize) -> Option<i64> {
        self.event(id)
            .map(|e| if team == 0 { e.away_score } else { e.home_score })
    }
}

fn read_roster(log: &GameLog, version: &str, team: usize) -> Result<Roster> {
    let slots = (0..Roster::SLOTS)
        .map(|slot| {
            let key = roster_key(version, team, slot);
            let entry = log
                .character_stats
                .get(&key)
                .ok_or_else(|| IndexError::malformed(key.clone(), "roster slot missing"))?;
            Ok(RosterSlot {
                char_id: entry.char_id.clone(),
                superstar: entry.superstar == 1,
                captain: entry.captain == 1,
                fielding_hand: entry.fielding_hand.clone(),
                batting_hand: entry.batting_hand.clone(),
                offense: entry.offensive_stats.clone(),
                defense: entry.defensive_stats.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Roster::new(slots))
}

fn bounded(event_id: EventId, field: &str, value: i64, range: RangeInclusive<u8>) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| range.contains(v))
        .ok_or_else(|| {
            IndexError::malformed(
                format!("Events[{}].{}", event_id, field),
                format!("{} outside {}..={}", value, range.start(), range.end()),
            )
        })
}

struct EventNormalizer<'a> {
    rosters: &'a [Roster; 2],
    warnings: Vec<NormalizationWarning>,
}

impl EventNormalizer<'_> {
    fn lookup<T: DomainValue>(&mut self, event_id: EventId, field: &'static str, raw: &str) -> Option<T> {
        let value = T::parse(raw);
        if value.is_none() {
            self.warnings.push(NormalizationWarning { event_id, field, raw: raw.to_string() });
        }
        value
    }

    fn event(&mut self, event_id: EventId, raw: &RawEvent) -> Result<NormalizedEvent> {
        let inning = u8::try_from(raw.inning)
            .ok()
            .filter(|i| *i >= 1)
            .ok_or_else(|| {
                IndexError::malformed(format!("Events[{}].Inning", event_id), raw.inning.to_string())
            })?;
        let half_inning = bounded(event_id, "Half Inning", raw.half_inning, HALF_INNING_RANGE)?;
        let batter_roster_loc = bounded(event_id, "Batter Roster Loc", raw.batter_roster_loc, ROSTER_LOC_RANGE)?;
        let pitcher_roster_loc = bounded(event_id, "Pitcher Roster Loc", raw.pitcher_roster_loc, ROSTER_LOC_RANGE)?;

        let result_of_at_bat = ResultOfAtBat::parse(&raw.result_of_at_bat).ok_or_else(|| {
            IndexError::malformed(
                format!("Events[{}].Result of AB", event_id),
                format!("unknown result '{}'", raw.result_of_at_bat),
            )
        })?;

        let batting = usize::from(half_inning);
        let batter_id = self.roster_char(event_id, batting, batter_roster_loc)?;
        let pitcher_id = self.roster_char(event_id, 1 - batting, pitcher_roster_loc)?;

        let runners = [
            raw.runner_1b.as_ref().map(|r| self.runner(event_id, r)),
            raw.runner_2b.as_ref().map(|r| self.runner(event_id, r)),
            raw.runner_3b.as_ref().map(|r| self.runner(event_id, r)),
        ];
        let pitch = raw.pitch.as_ref().map(|p| self.pitch(event_id, p));

        Ok(NormalizedEvent {
            event_id,
            recorded_num: raw.event_num,
            wrapped_label: event_id % EVENT_LABEL_WRAP,
            inning,
            half_inning,
            away_score: raw.away_score,
            home_score: raw.home_score,
            balls: bounded(event_id, "Balls", raw.balls, BALLS_RANGE)?,
            strikes: bounded(event_id, "Strikes", raw.strikes, STRIKES_RANGE)?,
            outs: bounded(event_id, "Outs", raw.outs, OUTS_RANGE)?,
            rbi: bounded(event_id, "RBI", raw.rbi, RBI_RANGE)?,
            pitcher_stamina: bounded(event_id, "Pitcher Stamina", raw.pitcher_stamina, STAMINA_RANGE)?,
            star_chance: bounded(event_id, "Star Chance", raw.star_chance, STAR_CHANCE_RANGE)?,
            num_outs_during_play: bounded(
                event_id,
                "Num Outs During Play",
                raw.num_outs_during_play,
                OUTS_DURING_PLAY_RANGE,
            )?,
            chem_links_on_base: bounded(
                event_id,
                "Chemistry Links on Base",
                raw.chem_links_on_base,
                CHEM_LINKS_RANGE,
            )?,
            result_of_at_bat,
            batter_roster_loc,
            pitcher_roster_loc,
            batter_id,
            pitcher_id,
            runners,
            pitch,
        })
    }

    fn roster_char(&self, event_id: EventId, team: usize, slot: u8) -> Result<String> {
        self.rosters[team]
            .char_id(usize::from(slot))
            .map(str::to_string)
            .ok_or_else(|| {
                IndexError::malformed(
                    format!("Events[{}]", event_id),
                    format!("empty roster slot {} of team {}", slot, team),
                )
            })
    }

    fn runner(&mut self, event_id: EventId, raw: &RawRunner) -> Runner {
        Runner {
            char_id: raw.char_id.clone(),
            steal: self.lookup(event_id, "Steal", &raw.steal),
        }
    }

    fn pitch(&mut self, event_id: EventId, raw: &RawPitch) -> PitchRecord {
        let contact = raw.contact.as_ref().map(|c| self.contact(event_id, c));
        PitchRecord {
            pitch_type: self.lookup(event_id, "Pitch Type", &raw.pitch_type),
            charge_type: self.lookup(event_id, "Charge Type", &raw.charge_type),
            star_pitch: raw.star_pitch == 1,
            ball_position_strikezone: raw.ball_position_strikezone,
            in_strikezone: raw.in_strikezone == 1,
            swing_type: self.lookup(event_id, "Type of Swing", &raw.swing_type),
            contact,
        }
    }

    fn contact(&mut self, event_id: EventId, raw: &RawContact) -> ContactRecord {
        let frame_of_swing = raw.frame_of_swing.as_ref().and_then(|frame| {
            let parsed = frame
                .as_i64()
                .and_then(|f| u8::try_from(f).ok())
                .filter(|f| CONTACT_FRAME_RANGE.contains(f));
            if parsed.is_none() {
                self.warnings.push(NormalizationWarning {
                    event_id,
                    field: "Frame of Swing Upon Contact",
                    raw: frame.as_text(),
                });
            }
            parsed
        });
        let first_fielder = raw.first_fielder.as_ref().map(|f| self.first_fielder(event_id, f));

        ContactRecord {
            contact_type: self.lookup(event_id, "Type of Contact", &raw.contact_type),
            input_direction: self.lookup(event_id, "Input Direction - Stick", &raw.input_direction),
            frame_of_swing,
            five_star_swing: raw.five_star_swing == 1,
            ball_contact_pos_x: raw.ball_contact_pos_x,
            first_fielder,
        }
    }

    fn first_fielder(&mut self, event_id: EventId, raw: &RawFirstFielder) -> FirstFielderRecord {
        FirstFielderRecord {
            roster_location: raw
                .roster_location
                .and_then(|loc| u8::try_from(loc).ok())
                .filter(|loc| ROSTER_LOC_RANGE.contains(loc)),
            position: self.lookup(event_id, "Fielder Position", &raw.position),
            char_id: raw.character.clone(),
            action: raw.action.clone(),
            manual_selected: raw.manual_selected.clone(),
            bobble: raw.bobble.clone(),
        }
    }
}
