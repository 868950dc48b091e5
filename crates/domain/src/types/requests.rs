//! Validated write payloads handed to the storage layer.
//!
//! Services build these after structural validation, so field contents are
//! already trimmed and enum-typed by the time storage sees them.

use chrono::{DateTime, Utc};

use super::entities::{GameStatus, Position};

/// A validated team create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
}

/// A validated player create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub team_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
}

/// A validated game create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub season: String,
    pub date: DateTime<Utc>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub status: GameStatus,
}

/// A stat-line upsert keyed on (player_id, game_id).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewStatLine {
    pub player_id: i64,
    pub game_id: i64,
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
    pub fouls: i64,
    pub turnovers: i64,
    pub minutes_played: f64,
}
