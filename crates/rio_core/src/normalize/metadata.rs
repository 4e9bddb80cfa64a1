use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::{GameLog, RawNumber, UNVERSIONED};

/// Game-level facts carried over from the stat file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameMetadata {
    pub game_id: Option<u64>,
    /// Start time exactly as recorded, for display
    pub start_raw: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub end_raw: Option<String>,
    pub ended_at: Option<DateTime<Utc>>,
    pub version: String,
    pub stadium: Option<i64>,
    pub ranked: bool,
    pub innings_selected: Option<i64>,
    pub innings_played: Option<i64>,
    /// Empty when nobody quit
    pub quitter_team: String,
    pub average_ping: Option<i64>,
    pub lag_spikes: Option<i64>,
    pub home_player: String,
    pub away_player: String,
    pub home_score: i64,
    pub away_score: i64,
}

impl GameMetadata {
    pub fn from_log(log: &GameLog) -> Self {
        let start_raw = log.date_start.as_ref().map(RawNumber::as_text);
        let end_raw = log.date_end.as_ref().map(RawNumber::as_text);
        Self {
            game_id: log.game_id.as_ref().and_then(RawNumber::as_hex_id),
            started_at: log.date_start.as_ref().and_then(parse_timestamp),
            start_raw,
            ended_at: log.date_end.as_ref().and_then(parse_timestamp),
            end_raw,
            version: log.version.clone().unwrap_or_else(|| UNVERSIONED.to_string()),
            stadium: log.stadium.as_ref().and_then(RawNumber::as_i64),
            ranked: log.ranked.as_ref().and_then(RawNumber::as_i64) == Some(1),
            innings_selected: log.innings_selected,
            innings_played: log.innings_played,
            quitter_team: log
                .quitter_team
                .as_ref()
                .map(RawNumber::as_text)
                .unwrap_or_default(),
            average_ping: log.average_ping.as_ref().and_then(RawNumber::as_i64),
            lag_spikes: log.lag_spikes.as_ref().and_then(RawNumber::as_i64),
            home_player: log.home_player.clone(),
            away_player: log.away_player.clone(),
            home_score: log.home_score,
            away_score: log.away_score,
        }
    }

    pub fn was_quit(&self) -> bool {
        !self.quitter_team.is_empty()
    }

    /// Ended before the selected number of innings without anyone quitting
    pub fn is_mercy(&self) -> bool {
        match (self.innings_selected, self.innings_played) {
            (Some(selected), Some(played)) => selected - played >= 1 && !self.was_quit(),
            _ => false,
        }
    }
}

/// Unix seconds, ctime-style ("Sun Jun 26 21:13:13 2022") or RFC 3339
pub fn parse_timestamp(raw: &RawNumber) -> Option<DateTime<Utc>> {
    match raw {
        RawNumber::Int(secs) => Utc.timestamp_opt(*secs, 0).single(),
        RawNumber::Text(text) => {
            let text = text.trim();
            if let Ok(secs) = text.parse::<i64>() {
                return Utc.timestamp_opt(secs, 0).single();
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%a %b %e %H:%M:%S %Y") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}
