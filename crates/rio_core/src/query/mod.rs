//! Query Evaluator
//!
//! Every [`Filter`] resolves independently to a candidate set against the
//! same immutable index; the result is the universe intersected with every
//! candidate set. Filter order and duplicates never change the result.
//!
//! Out-of-domain values and contradictory runner combinations fail the whole
//! query. Characters and players who did not take part in the game resolve
//! to empty sets instead.

pub mod filter;

use std::borrow::Cow;

use tracing::debug;

pub use filter::{Filter, PlayerRole};

use crate::error::{IndexError, Result};
use crate::index::{EventIndex, EventSet, NumericDimension};
use crate::models::CategoricalDimension;
use crate::normalize::ReplayGame;

const MAX_RUNNER_ITEMS: usize = 3;
const BASES: [usize; 3] = [1, 2, 3];

pub struct QueryEvaluator<'a> {
    game: &'a ReplayGame,
    index: &'a EventIndex,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(game: &'a ReplayGame, index: &'a EventIndex) -> Self {
        Self { game, index }
    }

    /// Events matching every filter, ascending by event id
    pub fn evaluate(&self, filters: &[Filter]) -> Result<EventSet> {
        let mut result = self.index.universe().clone();
        for filter in filters {
            let candidates = self.resolve(filter)?;
            result.retain(|id| candidates.contains(id));
        }
        debug!(filters = filters.len(), matched = result.len(), "evaluated query");
        Ok(result)
    }

    /// Candidate set of a single filter
    pub fn resolve(&self, filter: &Filter) -> Result<Cow<'a, EventSet>> {
        match filter {
            Filter::Flag { flag } => self.index.flag(*flag).map(Cow::Borrowed),
            Filter::Categorical { dimension, value } => {
                self.categorical(*dimension, value).map(Cow::Owned)
            }
            Filter::Counts { dimension, values } => {
                if *dimension == NumericDimension::HalfInning {
                    if let Some(bad) = values.iter().find(|v| v.unsigned_abs() > 1) {
                        return Err(half_inning_error(*bad));
                    }
                }
                let buckets = self.index.numeric(*dimension)?;
                Ok(Cow::Owned(buckets.select(values, dimension.direction())))
            }
            Filter::HalfInning { half } => self.half_inning(*half).map(Cow::Borrowed),
            Filter::RunnersOnBase { bases } => self.runners_on_base(bases).map(Cow::Owned),
            Filter::Character { role, char_id } => {
                Ok(Cow::Borrowed(self.index.characters().events(char_id, *role)))
            }
            Filter::Player { role, name } => self.player(*role, name),
            Filter::MagnitudeAtLeast { dimension, threshold } => {
                if threshold.is_nan() {
                    return Err(IndexError::invalid_value(
                        dimension.to_string(),
                        threshold.to_string(),
                        "any number",
                    ));
                }
                let bands = self.index.banded(*dimension)?;
                Ok(Cow::Owned(bands.at_least_magnitude(*threshold)))
            }
        }
    }

    fn categorical(&self, dimension: CategoricalDimension, value: &str) -> Result<EventSet> {
        let ordinals = dimension.resolve(value).ok_or_else(|| {
            IndexError::invalid_value(dimension.name(), value, dimension.accepted())
        })?;
        let buckets = self.index.categorical(dimension)?;
        let mut result = EventSet::new();
        for ordinal in ordinals {
            let bucket = buckets.get(ordinal).ok_or_else(|| {
                IndexError::InternalConsistency(format!("{} has no bucket {}", dimension, ordinal))
            })?;
            result.extend(bucket.iter().copied());
        }
        Ok(result)
    }

    fn half_inning(&self, half: i64) -> Result<&'a EventSet> {
        if !(0..=1).contains(&half) {
            return Err(half_inning_error(half));
        }
        self.index
            .numeric(NumericDimension::HalfInning)?
            .bucket(half)
            .ok_or_else(|| IndexError::InternalConsistency(format!("no half inning {}", half)))
    }

    /// Positive bases must be occupied, negative bases may be, and bases never
    /// mentioned must be empty. Optional bases only contribute when no base
    /// was required. `[0]` alone selects events with the bases empty.
    fn runners_on_base(&self, bases: &[i64]) -> Result<EventSet> {
        if bases.len() > MAX_RUNNER_ITEMS || bases.iter().any(|b| b.unsigned_abs() > 3) {
            return Err(IndexError::invalid_value(
                "runners on base",
                format!("{:?}", bases),
                "up to three of -3..=3",
            ));
        }
        if bases == [0] {
            return Ok(self.runner_set(0)?.clone());
        }

        let mut excluded = BASES.to_vec();
        let mut required = Vec::new();
        let mut optional = Vec::new();
        for &base in bases {
            let magnitude = base.unsigned_abs() as usize;
            excluded.retain(|b| *b != magnitude);
            if base > 0 {
                required.push(magnitude);
            } else {
                optional.push(magnitude);
            }
        }

        if !required.is_empty() && optional.contains(&0) {
            return Err(IndexError::InvalidFilterCombination(format!(
                "0 (bases empty) cannot be combined with required bases in {:?}",
                bases
            )));
        }

        let mut result = if required.is_empty() {
            EventSet::new()
        } else {
            let mut occupied = self.index.universe().clone();
            for base in &required {
                let with_runner = self.runner_set(*base)?;
                occupied.retain(|id| with_runner.contains(id));
            }
            occupied
        };

        if result.is_empty() {
            for base in &optional {
                result.extend(self.runner_set(*base)?.iter().copied());
            }
        }

        for base in &excluded {
            let with_runner = self.runner_set(*base)?;
            result.retain(|id| !with_runner.contains(id));
        }
        Ok(result)
    }

    fn runner_set(&self, base: usize) -> Result<&'a EventSet> {
        self.index
            .runners_on_base(base)
            .ok_or_else(|| IndexError::InternalConsistency(format!("no runner set for base {}", base)))
    }

    /// A player bats in the half inning matching their team index and pitches
    /// in the other.
    fn player(&self, role: PlayerRole, name: &str) -> Result<Cow<'a, EventSet>> {
        let name = name.to_lowercase();
        let team = (0..2).find(|team| self.game.player(*team).to_lowercase() == name);
        let Some(team) = team else {
            return Ok(Cow::Owned(EventSet::new()));
        };
        let half = match role {
            PlayerRole::Batting => team,
            PlayerRole::Pitching => 1 - team,
        };
        self.half_inning(half as i64).map(Cow::Borrowed)
    }
}

/// Half inning is a two-valued dimension however it is filtered
fn half_inning_error(half: i64) -> IndexError {
    IndexError::invalid_value(NumericDimension::HalfInning.name(), half.to_string(), "0, 1")
}
