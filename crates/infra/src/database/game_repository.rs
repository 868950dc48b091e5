//! SQLite-backed game repository.

use std::sync::Arc;

use async_trait::async_trait;
use courtside_core::GameRepository;
use courtside_domain::{Game, GameStatus, NewGame, Page, PageResult, Result};
use rusqlite::{params, Connection, Row};
use tokio::task;

use super::manager::DbManager;
use super::{parse_text_column, timestamp_from_epoch};
use crate::errors::{map_join_error, map_sqlite_error};

/// Async game repository over the shared SQLite pool.
pub struct SqliteGameRepository {
    db: Arc<DbManager>,
}

impl SqliteGameRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameRepository for SqliteGameRepository {
    async fn get_by_id(&self, id: i64) -> Result<Game> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Game> {
            let conn = db.get_connection()?;
            get_game(&conn, id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, page: Page) -> Result<PageResult<Game>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<PageResult<Game>> {
            let conn = db.get_connection()?;
            list_games(&conn, page).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<bool> {
            let conn = db.get_connection()?;
            game_exists(&conn, id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_GAME_SQL: &str =
    "INSERT INTO games (season, date, home_team_id, away_team_id, status)
     VALUES (?1, ?2, ?3, ?4, ?5)
     RETURNING id, season, date, home_team_id, away_team_id, status, created_at, updated_at";

const GET_GAME_SQL: &str =
    "SELECT id, season, date, home_team_id, away_team_id, status, created_at, updated_at
     FROM games WHERE id = ?1";

const LIST_GAMES_SQL: &str =
    "SELECT id, season, date, home_team_id, away_team_id, status, created_at, updated_at,
            COUNT(*) OVER() AS total
     FROM games
     ORDER BY id
     LIMIT ?1 OFFSET ?2";

const GAME_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM games WHERE id = ?1)";

pub(crate) fn insert_game(conn: &Connection, game: &NewGame) -> rusqlite::Result<Game> {
    conn.query_row(
        INSERT_GAME_SQL,
        params![
            game.season,
            game.date.timestamp(),
            game.home_team_id,
            game.away_team_id,
            game.status.as_str()
        ],
        map_game_row,
    )
}

pub(crate) fn get_game(conn: &Connection, id: i64) -> rusqlite::Result<Game> {
    conn.query_row(GET_GAME_SQL, params![id], map_game_row)
}

pub(crate) fn game_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row(GAME_EXISTS_SQL, params![id], |row| row.get(0))
}

pub(crate) fn list_games(conn: &Connection, page: Page) -> rusqlite::Result<PageResult<Game>> {
    let mut stmt = conn.prepare(LIST_GAMES_SQL)?;
    let mut rows = stmt.query(params![page.limit, page.offset])?;

    let mut result = PageResult::default();
    while let Some(row) = rows.next()? {
        result.items.push(map_game_row(row)?);
        result.total = row.get("total")?;
    }
    Ok(result)
}

fn map_game_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    let status: String = row.get(5)?;
    Ok(Game {
        id: row.get(0)?,
        season: row.get(1)?,
        date: timestamp_from_epoch(2, row.get(2)?)?,
        home_team_id: row.get(3)?,
        away_team_id: row.get(4)?,
        status: parse_text_column(5, &status, GameStatus::parse)?,
        created_at: timestamp_from_epoch(6, row.get(6)?)?,
        updated_at: timestamp_from_epoch(7, row.get(7)?)?,
    })
}
