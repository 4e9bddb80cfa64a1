//! Match projection - one printable block per matched event

use rio_core::query::Filter;
use rio_core::{EventId, ReplayGame};

/// Game-level facts printed above every match from one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameHeader {
    pub players: [String; 2],
    pub start: String,
}

impl GameHeader {
    pub fn of(game: &ReplayGame) -> Self {
        Self {
            players: [game.player(0).to_string(), game.player(1).to_string()],
            start: game.metadata().start_raw.clone().unwrap_or_default(),
        }
    }
}

/// The situation of one matched event, copied out of its game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedEvent {
    pub event_id: EventId,
    pub inning: u8,
    pub half_inning: u8,
    pub outs: u8,
    pub balls: u8,
    pub strikes: u8,
}

impl MatchedEvent {
    /// `None` for an id outside the game
    pub fn of(game: &ReplayGame, id: EventId) -> Option<Self> {
        let event = game.event(id)?;
        Some(Self {
            event_id: id,
            inning: event.inning,
            half_inning: event.half_inning,
            outs: event.outs,
            balls: event.balls,
            strikes: event.strikes,
        })
    }

    /// Three-line description:
    ///
    /// ```text
    /// {player 0} at {player 1} {start}
    /// {Top|Bot} {inning}   {outs} Out(s)   {balls}-{strikes}
    /// {summary}
    /// ```
    pub fn describe(&self, header: &GameHeader, summary: &str) -> String {
        let half = if self.half_inning == 0 { "Top" } else { "Bot" };
        format!(
            "{} at {} {}\n{} {}   {} Out(s)   {}-{}\n{}",
            header.players[0],
            header.players[1],
            header.start,
            half,
            self.inning,
            self.outs,
            self.balls,
            self.strikes,
            summary
        )
    }
}

/// [`MatchedEvent::describe`] straight from a loaded game
pub fn describe_match(game: &ReplayGame, id: EventId, summary: &str) -> Option<String> {
    let matched = MatchedEvent::of(game, id)?;
    Some(matched.describe(&GameHeader::of(game), summary))
}

/// Human summary of the active filters, e.g. `[result = 'HR', batter Mario]`
pub fn summarize_filters(filters: &[Filter]) -> String {
    let parts: Vec<String> = filters.iter().map(Filter::to_string).collect();
    format!("[{}]", parts.join(", "))
}
