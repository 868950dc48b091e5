//! SQLite-backed team repository.
//!
//! Also home to the team aggregation query, the most involved piece of SQL
//! in the service: per-game team scores are derived from stat lines, each
//! finished game is resolved into a winner and a loser, and the queried
//! team's record is folded from those results.

use std::sync::Arc;

use async_trait::async_trait;
use courtside_core::TeamRepository;
use courtside_domain::{
    NewTeam, Page, PageResult, Result, Team, TeamAggregatedStats,
};
use rusqlite::{params, Connection, Row};
use tokio::task;

use super::manager::DbManager;
use super::timestamp_from_epoch;
use crate::errors::{map_join_error, map_sqlite_error};

/// Async team repository over the shared SQLite pool.
pub struct SqliteTeamRepository {
    db: Arc<DbManager>,
}

impl SqliteTeamRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn get_by_id(&self, id: i64) -> Result<Team> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Team> {
            let conn = db.get_connection()?;
            get_team(&conn, id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, page: Page) -> Result<PageResult<Team>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<PageResult<Team>> {
            let conn = db.get_connection()?;
            list_teams(&conn, page).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<bool> {
            let conn = db.get_connection()?;
            team_exists(&conn, id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn aggregated_stats(
        &self,
        team_id: i64,
        season: Option<String>,
    ) -> Result<TeamAggregatedStats> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<TeamAggregatedStats> {
            let conn = db.get_connection()?;
            team_aggregated_stats(&conn, team_id, season.as_deref()).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_TEAM_SQL: &str = "INSERT INTO teams (name) VALUES (?1)
     RETURNING id, name, created_at, updated_at";

const GET_TEAM_SQL: &str = "SELECT id, name, created_at, updated_at FROM teams WHERE id = ?1";

const LIST_TEAMS_SQL: &str =
    "SELECT id, name, created_at, updated_at, COUNT(*) OVER() AS total
     FROM teams
     ORDER BY id
     LIMIT ?1 OFFSET ?2";

const TEAM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1)";

/// Aggregation over finished games:
/// 1. `game_team_scores` sums each team's stat-line points per game.
/// 2. `game_results` resolves winner and loser per game; a team with no
///    contributing stat lines scores 0 rather than being excluded. The
///    comparison is deliberately asymmetric: equal scores count as an away
///    win and a home loss.
/// 3. The outer aggregate folds wins, losses and points for the queried
///    team across the games it played, averages rounded to 2 decimals.
const TEAM_AGGREGATED_STATS_SQL: &str = "
    WITH game_team_scores AS (
        SELECT
            g.id AS game_id,
            p.team_id AS team_id,
            SUM(ps.points) AS points
        FROM player_stats ps
        JOIN games g ON ps.game_id = g.id
        JOIN players p ON ps.player_id = p.id
        WHERE g.status = 'finished'
        GROUP BY g.id, p.team_id
    ),
    game_results AS (
        SELECT
            g.id AS game_id,
            g.home_team_id,
            g.away_team_id,
            COALESCE(hts.points, 0) AS home_points,
            COALESCE(ats.points, 0) AS away_points,
            CASE
                WHEN COALESCE(hts.points, 0) > COALESCE(ats.points, 0) THEN g.home_team_id
                ELSE g.away_team_id
            END AS winner_id,
            CASE
                WHEN COALESCE(hts.points, 0) < COALESCE(ats.points, 0) THEN g.home_team_id
                ELSE g.away_team_id
            END AS loser_id
        FROM games g
        LEFT JOIN game_team_scores hts ON g.id = hts.game_id AND g.home_team_id = hts.team_id
        LEFT JOIN game_team_scores ats ON g.id = ats.game_id AND g.away_team_id = ats.team_id
        WHERE g.status = 'finished' AND (?2 IS NULL OR g.season = ?2)
    )
    SELECT
        COALESCE(SUM(CASE WHEN winner_id = ?1 THEN 1 ELSE 0 END), 0) AS wins,
        COALESCE(SUM(CASE WHEN loser_id = ?1 THEN 1 ELSE 0 END), 0) AS losses,
        COALESCE(SUM(CASE WHEN home_team_id = ?1 THEN home_points ELSE away_points END), 0) AS total_points_scored,
        COALESCE(SUM(CASE WHEN home_team_id = ?1 THEN away_points ELSE home_points END), 0) AS total_points_allowed,
        COALESCE(ROUND(AVG(CASE WHEN home_team_id = ?1 THEN home_points ELSE away_points END), 2), 0) AS avg_points_scored,
        COALESCE(ROUND(AVG(CASE WHEN home_team_id = ?1 THEN away_points ELSE home_points END), 2), 0) AS avg_points_allowed
    FROM game_results
    WHERE home_team_id = ?1 OR away_team_id = ?1";

pub(crate) fn insert_team(conn: &Connection, team: &NewTeam) -> rusqlite::Result<Team> {
    conn.query_row(INSERT_TEAM_SQL, params![team.name], map_team_row)
}

pub(crate) fn get_team(conn: &Connection, id: i64) -> rusqlite::Result<Team> {
    conn.query_row(GET_TEAM_SQL, params![id], map_team_row)
}

pub(crate) fn team_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row(TEAM_EXISTS_SQL, params![id], |row| row.get(0))
}

pub(crate) fn list_teams(conn: &Connection, page: Page) -> rusqlite::Result<PageResult<Team>> {
    let mut stmt = conn.prepare(LIST_TEAMS_SQL)?;
    let mut rows = stmt.query(params![page.limit, page.offset])?;

    let mut result = PageResult::default();
    while let Some(row) = rows.next()? {
        result.items.push(map_team_row(row)?);
        result.total = row.get("total")?;
    }
    Ok(result)
}

pub(crate) fn team_aggregated_stats(
    conn: &Connection,
    team_id: i64,
    season: Option<&str>,
) -> rusqlite::Result<TeamAggregatedStats> {
    conn.query_row(TEAM_AGGREGATED_STATS_SQL, params![team_id, season], |row| {
        Ok(TeamAggregatedStats {
            wins: row.get(0)?,
            losses: row.get(1)?,
            total_points_scored: row.get(2)?,
            total_points_allowed: row.get(3)?,
            avg_points_scored: row.get(4)?,
            avg_points_allowed: row.get(5)?,
        })
    })
}

fn map_team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: timestamp_from_epoch(2, row.get(2)?)?,
        updated_at: timestamp_from_epoch(3, row.get(3)?)?,
    })
}
