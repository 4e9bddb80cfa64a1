//! Replay event search
//!
//! [`EventSearch`] owns one normalized game together with its index and is the
//! usual entry point for callers:
//!
//! ```rust,no_run
//! use rio_core::index::NumericDimension;
//! use rio_core::query::Filter;
//! use rio_core::search::EventSearch;
//!
//! let search = EventSearch::load("decoded.game.json")?;
//! let matches = search.evaluate(&[
//!     Filter::result("HR"),
//!     Filter::counts(NumericDimension::Balls, [2]),
//! ])?;
//! for id in matches {
//!     println!("{}", id);
//! }
//! # Ok::<(), rio_core::IndexError>(())
//! ```

#[cfg(test)]
pub mod proptest_gen;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::index::{EventIndex, EventSet, SubRecord};
use crate::models::{GameLog, TeamOrientation};
use crate::normalize::{EventId, ReplayGame};
use crate::query::{Filter, QueryEvaluator};

/// A normalized game and its index, built once and never mutated
#[derive(Debug, Clone)]
pub struct EventSearch {
    game: ReplayGame,
    index: EventIndex,
}

impl EventSearch {
    pub fn new(game: ReplayGame) -> Self {
        let index = EventIndex::build(&game);
        Self { game, index }
    }

    pub fn from_log(log: &GameLog) -> Result<Self> {
        Ok(Self::new(ReplayGame::normalize(log)?))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(ReplayGame::from_json_str(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ReplayGame::load(path)?))
    }

    pub fn game(&self) -> &ReplayGame {
        &self.game
    }

    pub fn index(&self) -> &EventIndex {
        &self.index
    }

    pub fn evaluator(&self) -> QueryEvaluator<'_> {
        QueryEvaluator::new(&self.game, &self.index)
    }

    pub fn evaluate(&self, filters: &[Filter]) -> Result<EventSet> {
        self.evaluator().evaluate(filters)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            game_id: self.game.metadata().game_id,
            version: self.game.version().to_string(),
            orientation: self.game.orientation(),
            players: [self.game.player(0).to_string(), self.game.player(1).to_string()],
            scores: [self.game.score(0), self.game.score(1)],
            events: self.index.universe().len(),
            final_event_id: self.index.final_event_id(),
            warnings: self.game.warnings().len(),
            pitched: self.index.presence(SubRecord::Pitch).len(),
            contacted: self.index.presence(SubRecord::Contact).len(),
            fielded: self.index.presence(SubRecord::FirstFielder).len(),
        }
    }
}

/// Shape of one indexed game, indexed by team number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub game_id: Option<u64>,
    pub version: String,
    pub orientation: TeamOrientation,
    pub players: [String; 2],
    pub scores: [i64; 2],
    pub events: usize,
    pub final_event_id: EventId,
    pub warnings: usize,
    pub pitched: usize,
    pub contacted: usize,
    pub fielded: usize,
}
