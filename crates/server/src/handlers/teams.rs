//! Team endpoints.

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
pub(crate) struct CreateTeamRequest {
    name: String,
}

pub(crate) async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| invalid_body(&rejection))?;
    let team = state.teams.create_team(&req.name).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub(crate) async fn get_by_id(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("team_id", &team_id)?;
    let team = state.teams.get_team(id).await?;
    Ok(Json(team))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.teams.list_teams(query.page()).await?;
    Ok(Json(result))
}

pub(crate) async fn aggregates(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(query): Query<AggregateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("team_id", &team_id)?;
    let season = query.season()?;
    let stats = state.teams.aggregated_stats(id, season).await?;
    Ok(Json(stats))
}
