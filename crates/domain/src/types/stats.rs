//! Derived aggregated statistics. Computed on each request, never persisted.

use serde::{Deserialize, Serialize};

/// A player's totals and per-game averages, over one season or a career.
///
/// An empty matching set yields all zeros, never nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregatedStats {
    pub games_played: i64,
    pub total_points: i64,
    pub total_rebounds: i64,
    pub total_assists: i64,
    pub total_steals: i64,
    pub total_blocks: i64,
    pub avg_points: f64,
    pub avg_rebounds: f64,
    pub avg_assists: f64,
}

/// A team's win/loss record and scoring differentials over finished games,
/// for one season or a career. Averages are rounded to 2 decimal places.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamAggregatedStats {
    pub wins: i64,
    pub losses: i64,
    pub total_points_scored: i64,
    pub total_points_allowed: i64,
    pub avg_points_scored: f64,
    pub avg_points_allowed: f64,
}
