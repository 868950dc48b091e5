//! Player endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::{invalid_body, parse_id, AggregateQuery, PageQuery};
use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CreatePlayerRequest {
    team_id: i64,
    first_name: String,
    last_name: String,
    position: String,
}

pub(crate) async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| invalid_body(&rejection))?;
    let player = state
        .players
        .create_player(req.team_id, &req.first_name, &req.last_name, &req.position)
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub(crate) async fn get_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("player_id", &player_id)?;
    let player = state.players.get_player(id).await?;
    Ok(Json(player))
}

pub(crate) async fn list_by_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("team_id", &team_id)?;
    let result = state.players.list_players_by_team(id, query.page()).await?;
    Ok(Json(result))
}

pub(crate) async fn aggregates(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<AggregateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("player_id", &player_id)?;
    let season = query.season()?;
    let stats = state.players.aggregated_stats(id, season).await?;
    Ok(Json(stats))
}
