//! Player use cases.

use std::sync::Arc;
use std::time::Instant;

use courtside_domain::{
    CourtsideError, NewPlayer, Page, PageResult, Player, PlayerAggregatedStats, Position, Result,
    ValidationError,
};
use tracing::{debug, error, info};

use crate::storage_ports::{PlayerRepository, TxManager};
use crate::validation::{is_valid_season, normalize_page};

pub struct PlayerService<TM> {
    players: Arc<dyn PlayerRepository>,
    tx: Arc<TM>,
}

impl<TM: TxManager> PlayerService<TM> {
    pub fn new(players: Arc<dyn PlayerRepository>, tx: Arc<TM>) -> Self {
        Self { players, tx }
    }

    /// Create a player on an existing team.
    ///
    /// Structural violations are collected first and fail the call before
    /// any storage access; the team existence probe then runs inside the
    /// same transaction as the write.
    pub async fn create_player(
        &self,
        team_id: i64,
        first_name: &str,
        last_name: &str,
        position: &str,
    ) -> Result<Player> {
        let started = Instant::now();
        let first_name = first_name.trim().to_owned();
        let last_name = last_name.trim().to_owned();

        let mut verr = ValidationError::new();
        if team_id <= 0 {
            verr.push("team_id", "must be > 0");
        }
        if first_name.is_empty() {
            verr.push("first_name", "must not be empty");
        } else if first_name.chars().count() > 50 {
            verr.push("first_name", "length must be at most 50");
        }
        if last_name.is_empty() {
            verr.push("last_name", "must not be empty");
        } else if last_name.chars().count() > 50 {
            verr.push("last_name", "length must be at most 50");
        }
        let position = Position::parse(position);
        if position.is_none() {
            verr.push("position", "must be one of PG|SG|SF|PF|C");
        }
        if let Err(err) = verr.into_result() {
            debug!(error = %err, team_id, "player validation failed (structure)");
            return Err(err);
        }
        let position = position
            .ok_or_else(|| CourtsideError::Internal("position missing after validation".into()))?;

        let new_player = NewPlayer { team_id, first_name, last_name, position };
        let player = self
            .tx
            .within_tx(move |session| {
                let mut verr = ValidationError::new();
                if !session.team_exists(new_player.team_id)? {
                    verr.push("team_id", "team does not exist");
                }
                verr.into_result()?;
                session.create_player(new_player)
            })
            .await
            .map_err(|err| {
                error!(error = %err, team_id, "create player failed");
                err
            })?;
        info!(
            took_ms = started.elapsed().as_millis() as u64,
            player_id = player.id,
            "player created"
        );
        Ok(player)
    }

    pub async fn get_player(&self, id: i64) -> Result<Player> {
        let mut verr = ValidationError::new();
        if id <= 0 {
            verr.push("id", "must be > 0");
        }
        verr.into_result()?;
        self.players.get_by_id(id).await
    }

    pub async fn list_players_by_team(
        &self,
        team_id: i64,
        page: Page,
    ) -> Result<PageResult<Player>> {
        let mut verr = ValidationError::new();
        if team_id <= 0 {
            verr.push("team_id", "must be > 0");
        }
        verr.into_result()?;

        let page = normalize_page(page);
        self.players.list_by_team(team_id, page).await.map_err(|err| {
            error!(error = %err, team_id, limit = page.limit, offset = page.offset, "list players failed");
            err
        })
    }

    /// Totals and per-game averages for one player, optionally restricted
    /// to a season. A missing season means career.
    pub async fn aggregated_stats(
        &self,
        player_id: i64,
        season: Option<&str>,
    ) -> Result<PlayerAggregatedStats> {
        let mut verr = ValidationError::new();
        if player_id <= 0 {
            verr.push("id", "must be > 0");
        }
        if let Some(season) = season {
            if !is_valid_season(season) {
                verr.push("season", "must be in YYYY-YY format");
            }
        }
        verr.into_result()?;

        let season = season.map(|s| s.trim().to_owned());
        self.players.aggregated_stats(player_id, season).await.map_err(|err| {
            error!(error = %err, player_id, "failed to get player aggregated stats");
            err
        })
    }
}
