//! Game use cases.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use courtside_domain::{
    CourtsideError, Game, GameStatus, NewGame, Page, PageResult, Result, ValidationError,
};
use tracing::{debug, error, info};

use crate::storage_ports::{GameRepository, TxManager};
use crate::validation::{is_valid_season, normalize_page};

pub struct GameService<TM> {
    games: Arc<dyn GameRepository>,
    tx: Arc<TM>,
}

impl<TM: TxManager> GameService<TM> {
    pub fn new(games: Arc<dyn GameRepository>, tx: Arc<TM>) -> Self {
        Self { games, tx }
    }

    /// Create a game between two distinct, existing teams.
    pub async fn create_game(
        &self,
        season: &str,
        date: Option<DateTime<Utc>>,
        home_team_id: i64,
        away_team_id: i64,
        status: &str,
    ) -> Result<Game> {
        let started = Instant::now();
        let season = season.trim().to_owned();

        let mut verr = ValidationError::new();
        if home_team_id <= 0 {
            verr.push("home_team_id", "must be > 0");
        }
        if away_team_id <= 0 {
            verr.push("away_team_id", "must be > 0");
        }
        if home_team_id > 0 && away_team_id > 0 && home_team_id == away_team_id {
            verr.push("teams", "home and away must differ");
        }
        if date.is_none() {
            verr.push("date", "must be set");
        }
        if season.is_empty() || !is_valid_season(&season) {
            verr.push("season", "invalid format, expected YYYY-YY");
        }
        let status = GameStatus::parse(status);
        if status.is_none() {
            verr.push("status", "must be one of scheduled|in_progress|finished");
        }
        // Early exit if basic structure is invalid; the database is never touched.
        if let Err(err) = verr.into_result() {
            debug!(error = %err, "game validation failed (structure)");
            return Err(err);
        }
        let (date, status) = date.zip(status).ok_or_else(|| {
            CourtsideError::Internal("date or status missing after validation".into())
        })?;

        let new_game = NewGame { season, date, home_team_id, away_team_id, status };
        let game = self
            .tx
            .within_tx(move |session| {
                let mut verr = ValidationError::new();
                if !session.team_exists(new_game.home_team_id)? {
                    verr.push("home_team_id", "team does not exist");
                }
                if !session.team_exists(new_game.away_team_id)? {
                    verr.push("away_team_id", "team does not exist");
                }
                verr.into_result()?;
                session.create_game(new_game)
            })
            .await
            .map_err(|err| {
                error!(error = %err, home_team_id, away_team_id, "create game failed");
                err
            })?;
        info!(
            took_ms = started.elapsed().as_millis() as u64,
            game_id = game.id,
            "game created"
        );
        Ok(game)
    }

    pub async fn get_game(&self, id: i64) -> Result<Game> {
        let mut verr = ValidationError::new();
        if id <= 0 {
            verr.push("id", "must be > 0");
        }
        verr.into_result()?;
        self.games.get_by_id(id).await
    }

    pub async fn list_games(&self, page: Page) -> Result<PageResult<Game>> {
        let page = normalize_page(page);
        self.games.list(page).await.map_err(|err| {
            error!(error = %err, limit = page.limit, offset = page.offset, "list games failed");
            err
        })
    }
}
