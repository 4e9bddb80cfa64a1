//! Index Builder
//!
//! One linear pass over a [`ReplayGame`] produces an immutable [`EventIndex`]:
//!
//! - categorical buckets, one per enumerated value (always present)
//! - integer buckets over each numeric dimension's full domain
//! - boolean-derived sets (steal, bobble, walk-off, ...)
//! - two banded float indices rounded to hundredths
//! - runner-on-base sets and the per-character activity index
//!
//! Events without a pitch, contact or first fielder are skipped for every
//! dimension read from the missing record.

pub mod buckets;
pub mod characters;

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

pub use buckets::{round_half_even_hundredths, BandedIndex, BucketIndex, RangeDirection};
pub use characters::{CharacterActivity, CharacterActivityIndex, CharacterRole};

use crate::error::{IndexError, Result};
use crate::models::{CategoricalDimension, DomainValue, IndexedValue};
use crate::normalize::{self, EventId, NormalizedEvent, ReplayGame};

/// Ordered set of event ids; iteration is ascending
pub type EventSet = BTreeSet<EventId>;

/// Integer-bucketed dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum NumericDimension {
    Balls,
    Strikes,
    Inning,
    HalfInning,
    Rbi,
    Outs,
    ChemLinksOnBase,
    PitcherStamina,
    OutsDuringPlay,
    ContactFrame,
}

impl NumericDimension {
    pub const ALL: [NumericDimension; 10] = [
        NumericDimension::Balls,
        NumericDimension::Strikes,
        NumericDimension::Inning,
        NumericDimension::HalfInning,
        NumericDimension::Rbi,
        NumericDimension::Outs,
        NumericDimension::ChemLinksOnBase,
        NumericDimension::PitcherStamina,
        NumericDimension::OutsDuringPlay,
        NumericDimension::ContactFrame,
    ];

    /// Pitcher stamina counts down, so `-n` means "at most n" there and
    /// "at least n" everywhere else.
    pub fn direction(&self) -> RangeDirection {
        match self {
            NumericDimension::PitcherStamina => RangeDirection::AtMost,
            _ => RangeDirection::AtLeast,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericDimension::Balls => "balls",
            NumericDimension::Strikes => "strikes",
            NumericDimension::Inning => "inning",
            NumericDimension::HalfInning => "half inning",
            NumericDimension::Rbi => "rbi",
            NumericDimension::Outs => "outs",
            NumericDimension::ChemLinksOnBase => "chemistry links on base",
            NumericDimension::PitcherStamina => "pitcher stamina",
            NumericDimension::OutsDuringPlay => "outs during play",
            NumericDimension::ContactFrame => "contact frame",
        }
    }
}

impl fmt::Display for NumericDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Precomputed boolean sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum EventFlag {
    Steal,
    StarPitch,
    Bobble,
    SlidingCatch,
    WallJump,
    FiveStarSwing,
    ManualFielderSelection,
    StarChance,
    InStrikezone,
    FullCountPitch,
    Walkoff,
}

impl EventFlag {
    pub const ALL: [EventFlag; 11] = [
        EventFlag::Steal,
        EventFlag::StarPitch,
        EventFlag::Bobble,
        EventFlag::SlidingCatch,
        EventFlag::WallJump,
        EventFlag::FiveStarSwing,
        EventFlag::ManualFielderSelection,
        EventFlag::StarChance,
        EventFlag::InStrikezone,
        EventFlag::FullCountPitch,
        EventFlag::Walkoff,
    ];
}

impl fmt::Display for EventFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventFlag::Steal => "steal",
            EventFlag::StarPitch => "star pitch",
            EventFlag::Bobble => "bobble",
            EventFlag::SlidingCatch => "sliding catch",
            EventFlag::WallJump => "wall jump",
            EventFlag::FiveStarSwing => "five-star swing",
            EventFlag::ManualFielderSelection => "manual fielder selection",
            EventFlag::StarChance => "star chance",
            EventFlag::InStrikezone => "in strikezone",
            EventFlag::FullCountPitch => "full count pitch",
            EventFlag::Walkoff => "walk-off",
        };
        f.write_str(name)
    }
}

/// Float dimensions indexed by rounded value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandedDimension {
    BallPositionStrikezone,
    ContactPositionX,
}

impl fmt::Display for BandedDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandedDimension::BallPositionStrikezone => write!(f, "ball position - strikezone"),
            BandedDimension::ContactPositionX => write!(f, "ball contact position - x"),
        }
    }
}

/// Which nested record an event carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubRecord {
    Pitch,
    Contact,
    FirstFielder,
}

/// Immutable per-game index
#[derive(Debug, Clone)]
pub struct EventIndex {
    universe: EventSet,
    final_event_id: EventId,
    categorical: FxHashMap<CategoricalDimension, Vec<EventSet>>,
    numeric: FxHashMap<NumericDimension, BucketIndex>,
    flags: FxHashMap<EventFlag, EventSet>,
    banded: FxHashMap<BandedDimension, BandedIndex>,
    /// Index 0 holds events with bases empty, 1..=3 events with a runner there
    runners_on_base: [EventSet; 4],
    pitched: EventSet,
    contacted: EventSet,
    fielded: EventSet,
    characters: CharacterActivityIndex,
}

impl EventIndex {
    pub fn build(game: &ReplayGame) -> Self {
        let mut index = Self::empty(game);
        for event in game.events() {
            index.add(event);
        }

        let last = game.final_event();
        if last.rbi != 0 {
            index.flag_mut(EventFlag::Walkoff).insert(last.event_id);
        }

        debug!(
            events = index.universe.len(),
            characters = index.characters.len(),
            pitched = index.pitched.len(),
            contacted = index.contacted.len(),
            fielded = index.fielded.len(),
            "built event index"
        );
        index
    }

    fn empty(game: &ReplayGame) -> Self {
        let categorical = CategoricalDimension::ALL
            .iter()
            .map(|dim| (*dim, vec![EventSet::new(); dim.domain_size()]))
            .collect();

        let numeric = NumericDimension::ALL
            .iter()
            .map(|dim| {
                let domain = match dim {
                    NumericDimension::Balls => normalize::BALLS_RANGE,
                    NumericDimension::Strikes => normalize::STRIKES_RANGE,
                    NumericDimension::Inning => 1..=game.max_inning(),
                    NumericDimension::HalfInning => normalize::HALF_INNING_RANGE,
                    NumericDimension::Rbi => normalize::RBI_RANGE,
                    NumericDimension::Outs => normalize::OUTS_RANGE,
                    NumericDimension::ChemLinksOnBase => normalize::CHEM_LINKS_RANGE,
                    NumericDimension::PitcherStamina => normalize::STAMINA_RANGE,
                    NumericDimension::OutsDuringPlay => normalize::OUTS_DURING_PLAY_RANGE,
                    NumericDimension::ContactFrame => normalize::CONTACT_FRAME_RANGE,
                };
                (*dim, BucketIndex::new(domain))
            })
            .collect();

        let flags = EventFlag::ALL.iter().map(|f| (*f, EventSet::new())).collect();

        let banded = [BandedDimension::BallPositionStrikezone, BandedDimension::ContactPositionX]
            .iter()
            .map(|dim| (*dim, BandedIndex::new()))
            .collect();

        Self {
            universe: game.universe(),
            final_event_id: game.final_event_id(),
            categorical,
            numeric,
            flags,
            banded,
            runners_on_base: Default::default(),
            pitched: EventSet::new(),
            contacted: EventSet::new(),
            fielded: EventSet::new(),
            characters: CharacterActivityIndex::seeded(game),
        }
    }

    fn add(&mut self, event: &NormalizedEvent) {
        let id = event.event_id;

        self.categorize(Some(event.result_of_at_bat), id);

        self.bucket(NumericDimension::Balls, event.balls, id);
        self.bucket(NumericDimension::Strikes, event.strikes, id);
        self.bucket(NumericDimension::Inning, event.inning, id);
        self.bucket(NumericDimension::HalfInning, event.half_inning, id);
        self.bucket(NumericDimension::Rbi, event.rbi, id);
        self.bucket(NumericDimension::Outs, event.outs, id);
        self.bucket(NumericDimension::ChemLinksOnBase, event.chem_links_on_base, id);
        self.bucket(NumericDimension::PitcherStamina, event.pitcher_stamina, id);
        self.bucket(NumericDimension::OutsDuringPlay, event.num_outs_during_play, id);

        if event.star_chance == 1 {
            self.flag_mut(EventFlag::StarChance).insert(id);
        }

        if event.has_runners() {
            for base in 1..=3 {
                if event.runner_on(base).is_some() {
                    self.runners_on_base[base].insert(id);
                }
            }
        } else {
            self.runners_on_base[0].insert(id);
        }
        if event.runners.iter().flatten().any(|r| r.is_stealing()) {
            self.flag_mut(EventFlag::Steal).insert(id);
        }

        self.characters.record(&event.batter_id, CharacterRole::AtBat, id);
        self.characters.record(&event.pitcher_id, CharacterRole::Pitching, id);

        let Some(pitch) = &event.pitch else {
            return;
        };
        self.pitched.insert(id);
        self.categorize(pitch.pitch_type, id);
        self.categorize(pitch.charge_type, id);
        self.categorize(pitch.swing_type, id);
        if pitch.star_pitch {
            self.flag_mut(EventFlag::StarPitch).insert(id);
        }
        if pitch.in_strikezone {
            self.flag_mut(EventFlag::InStrikezone).insert(id);
        }
        if event.is_full_count() {
            self.flag_mut(EventFlag::FullCountPitch).insert(id);
        }
        if let Some(pos) = pitch.ball_position_strikezone {
            self.band(BandedDimension::BallPositionStrikezone, pos, id);
        }

        let Some(contact) = &pitch.contact else {
            return;
        };
        self.contacted.insert(id);
        self.categorize(contact.contact_type, id);
        self.categorize(contact.input_direction, id);
        if let Some(frame) = contact.frame_of_swing {
            self.bucket(NumericDimension::ContactFrame, frame, id);
        }
        if contact.five_star_swing {
            self.flag_mut(EventFlag::FiveStarSwing).insert(id);
        }
        if let Some(x) = contact.ball_contact_pos_x {
            self.band(BandedDimension::ContactPositionX, x, id);
        }

        let Some(fielder) = &contact.first_fielder else {
            return;
        };
        self.fielded.insert(id);
        self.categorize(fielder.position, id);
        if fielder.is_bobble() {
            self.flag_mut(EventFlag::Bobble).insert(id);
        }
        if fielder.is_sliding() {
            self.flag_mut(EventFlag::SlidingCatch).insert(id);
        }
        if fielder.is_wall_jump() {
            self.flag_mut(EventFlag::WallJump).insert(id);
        }
        if fielder.is_manual_selection() {
            self.flag_mut(EventFlag::ManualFielderSelection).insert(id);
        }
        if !self.characters.record(&fielder.char_id, CharacterRole::Fielding, id) {
            warn!(event_id = id, fielder = %fielder.char_id, "first fielder is not on either roster");
        }
    }

    fn categorize<T: IndexedValue>(&mut self, value: Option<T>, id: EventId) {
        if let Some(value) = value {
            if let Some(bucket) = self
                .categorical
                .get_mut(&T::KEY)
                .and_then(|buckets| buckets.get_mut(value.ordinal()))
            {
                bucket.insert(id);
            }
        }
    }

    fn bucket(&mut self, dim: NumericDimension, value: u8, id: EventId) {
        if let Some(index) = self.numeric.get_mut(&dim) {
            index.insert(value, id);
        }
    }

    fn band(&mut self, dim: BandedDimension, value: f64, id: EventId) {
        if let Some(index) = self.banded.get_mut(&dim) {
            index.insert(value, id);
        }
    }

    fn flag_mut(&mut self, flag: EventFlag) -> &mut EventSet {
        self.flags.entry(flag).or_default()
    }

    pub fn universe(&self) -> &EventSet {
        &self.universe
    }

    pub fn final_event_id(&self) -> EventId {
        self.final_event_id
    }

    /// Buckets of a categorical dimension in domain order
    pub fn categorical(&self, dim: CategoricalDimension) -> Result<&[EventSet]> {
        self.categorical
            .get(&dim)
            .map(Vec::as_slice)
            .ok_or_else(|| IndexError::InternalConsistency(format!("no index for {}", dim)))
    }

    /// Bucket of one categorical value
    pub fn value<T: IndexedValue>(&self, value: T) -> Result<&EventSet> {
        self.categorical(T::KEY)?.get(value.ordinal()).ok_or_else(|| {
            IndexError::InternalConsistency(format!("no bucket for {} '{}'", T::DIMENSION, value))
        })
    }

    pub fn numeric(&self, dim: NumericDimension) -> Result<&BucketIndex> {
        self.numeric
            .get(&dim)
            .ok_or_else(|| IndexError::InternalConsistency(format!("no index for {}", dim)))
    }

    pub fn flag(&self, flag: EventFlag) -> Result<&EventSet> {
        self.flags
            .get(&flag)
            .ok_or_else(|| IndexError::InternalConsistency(format!("no set for {}", flag)))
    }

    pub fn banded(&self, dim: BandedDimension) -> Result<&BandedIndex> {
        self.banded
            .get(&dim)
            .ok_or_else(|| IndexError::InternalConsistency(format!("no index for {}", dim)))
    }

    /// Base 0 = bases empty
    pub fn runners_on_base(&self, base: usize) -> Option<&EventSet> {
        self.runners_on_base.get(base)
    }

    pub fn presence(&self, record: SubRecord) -> &EventSet {
        match record {
            SubRecord::Pitch => &self.pitched,
            SubRecord::Contact => &self.contacted,
            SubRecord::FirstFielder => &self.fielded,
        }
    }

    pub fn characters(&self) -> &CharacterActivityIndex {
        &self.characters
    }

    #[cfg(test)]
    pub(crate) fn drop_dimension(&mut self, dim: CategoricalDimension) {
        self.categorical.remove(&dim);
    }
}
