//! Game endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{invalid_body, parse_id, PageQuery};
use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CreateGameRequest {
    season: String,
    date: Option<DateTime<Utc>>,
    home_team_id: i64,
    away_team_id: i64,
    status: String,
}

pub(crate) async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| invalid_body(&rejection))?;
    let game = state
        .games
        .create_game(&req.season, req.date, req.home_team_id, req.away_team_id, &req.status)
        .await?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub(crate) async fn get_by_id(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("game_id", &game_id)?;
    let game = state.games.get_game(id).await?;
    Ok(Json(game))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.games.list_games(query.page()).await?;
    Ok(Json(result))
}
