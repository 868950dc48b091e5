//! Stat line endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use courtside_domain::NewStatLine;
use serde::Deserialize;

use super::{invalid_body, parse_id};
use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct UpsertStatRequest {
    player_id: i64,
    game_id: i64,
    points: i64,
    rebounds: i64,
    assists: i64,
    steals: i64,
    blocks: i64,
    fouls: i64,
    turnovers: i64,
    minutes_played: f64,
}

pub(crate) async fn upsert(
    State(state): State<AppState>,
    body: Result<Json<UpsertStatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| invalid_body(&rejection))?;
    let line = state
        .stats
        .upsert_stat_line(NewStatLine {
            player_id: req.player_id,
            game_id: req.game_id,
            points: req.points,
            rebounds: req.rebounds,
            assists: req.assists,
            steals: req.steals,
            blocks: req.blocks,
            fouls: req.fouls,
            turnovers: req.turnovers,
            minutes_played: req.minutes_played,
        })
        .await?;
    Ok(Json(line))
}

pub(crate) async fn list_by_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("game_id", &game_id)?;
    let lines = state.stats.list_stats_by_game(id).await?;
    Ok(Json(lines))
}
