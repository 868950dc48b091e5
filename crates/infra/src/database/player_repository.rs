//! SQLite-backed player repository, including player aggregation.

use std::sync::Arc;

use async_trait::async_trait;
use courtside_core::PlayerRepository;
use courtside_domain::{
    NewPlayer, Page, PageResult, Player, PlayerAggregatedStats, Position, Result,
};
use rusqlite::{params, Connection, Row};
use tokio::task;

use super::manager::DbManager;
use super::{parse_text_column, timestamp_from_epoch};
use crate::errors::{map_join_error, map_sqlite_error};

/// Async player repository over the shared SQLite pool.
pub struct SqlitePlayerRepository {
    db: Arc<DbManager>,
}

impl SqlitePlayerRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn get_by_id(&self, id: i64) -> Result<Player> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Player> {
            let conn = db.get_connection()?;
            get_player(&conn, id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_by_team(&self, team_id: i64, page: Page) -> Result<PageResult<Player>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<PageResult<Player>> {
            let conn = db.get_connection()?;
            list_players_by_team(&conn, team_id, page).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<bool> {
            let conn = db.get_connection()?;
            player_exists(&conn, id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn aggregated_stats(
        &self,
        player_id: i64,
        season: Option<String>,
    ) -> Result<PlayerAggregatedStats> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<PlayerAggregatedStats> {
            let conn = db.get_connection()?;
            player_aggregated_stats(&conn, player_id, season.as_deref()).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_PLAYER_SQL: &str =
    "INSERT INTO players (team_id, first_name, last_name, position)
     VALUES (?1, ?2, ?3, ?4)
     RETURNING id, team_id, first_name, last_name, position, created_at, updated_at";

const GET_PLAYER_SQL: &str =
    "SELECT id, team_id, first_name, last_name, position, created_at, updated_at
     FROM players WHERE id = ?1";

const LIST_PLAYERS_SQL: &str =
    "SELECT id, team_id, first_name, last_name, position, created_at, updated_at,
            COUNT(*) OVER() AS total
     FROM players WHERE team_id = ?1
     ORDER BY id
     LIMIT ?2 OFFSET ?3";

const PLAYER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM players WHERE id = ?1)";

/// Totals and averages over the player's stat lines, joined to games so an
/// optional season restricts the set. COALESCE keeps the empty set at zero.
const PLAYER_AGGREGATED_STATS_SQL: &str = "
    SELECT
        COALESCE(COUNT(ps.id), 0) AS games_played,
        COALESCE(SUM(ps.points), 0) AS total_points,
        COALESCE(SUM(ps.rebounds), 0) AS total_rebounds,
        COALESCE(SUM(ps.assists), 0) AS total_assists,
        COALESCE(SUM(ps.steals), 0) AS total_steals,
        COALESCE(SUM(ps.blocks), 0) AS total_blocks,
        COALESCE(AVG(ps.points), 0) AS avg_points,
        COALESCE(AVG(ps.rebounds), 0) AS avg_rebounds,
        COALESCE(AVG(ps.assists), 0) AS avg_assists
    FROM player_stats ps
    INNER JOIN games g ON ps.game_id = g.id
    WHERE ps.player_id = ?1 AND (?2 IS NULL OR g.season = ?2)";

pub(crate) fn insert_player(conn: &Connection, player: &NewPlayer) -> rusqlite::Result<Player> {
    conn.query_row(
        INSERT_PLAYER_SQL,
        params![player.team_id, player.first_name, player.last_name, player.position.as_str()],
        map_player_row,
    )
}

pub(crate) fn get_player(conn: &Connection, id: i64) -> rusqlite::Result<Player> {
    conn.query_row(GET_PLAYER_SQL, params![id], map_player_row)
}

pub(crate) fn player_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row(PLAYER_EXISTS_SQL, params![id], |row| row.get(0))
}

pub(crate) fn list_players_by_team(
    conn: &Connection,
    team_id: i64,
    page: Page,
) -> rusqlite::Result<PageResult<Player>> {
    let mut stmt = conn.prepare(LIST_PLAYERS_SQL)?;
    let mut rows = stmt.query(params![team_id, page.limit, page.offset])?;

    let mut result = PageResult::default();
    while let Some(row) = rows.next()? {
        result.items.push(map_player_row(row)?);
        result.total = row.get("total")?;
    }
    Ok(result)
}

pub(crate) fn player_aggregated_stats(
    conn: &Connection,
    player_id: i64,
    season: Option<&str>,
) -> rusqlite::Result<PlayerAggregatedStats> {
    conn.query_row(PLAYER_AGGREGATED_STATS_SQL, params![player_id, season], |row| {
        Ok(PlayerAggregatedStats {
            games_played: row.get(0)?,
            total_points: row.get(1)?,
            total_rebounds: row.get(2)?,
            total_assists: row.get(3)?,
            total_steals: row.get(4)?,
            total_blocks: row.get(5)?,
            avg_points: row.get(6)?,
            avg_rebounds: row.get(7)?,
            avg_assists: row.get(8)?,
        })
    })
}

fn map_player_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    let position: String = row.get(4)?;
    Ok(Player {
        id: row.get(0)?,
        team_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        position: parse_text_column(4, &position, Position::parse)?,
        created_at: timestamp_from_epoch(5, row.get(5)?)?,
        updated_at: timestamp_from_epoch(6, row.get(6)?)?,
    })
}
