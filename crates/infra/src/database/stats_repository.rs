//! SQLite-backed stat line repository.

use std::sync::Arc;

use async_trait::async_trait;
use courtside_core::StatsRepository;
use courtside_domain::{NewStatLine, PlayerStatLine, Result};
use rusqlite::{params, Connection, Row};
use tokio::task;

use super::manager::DbManager;
use super::timestamp_from_epoch;
use crate::errors::{map_join_error, map_sqlite_error};

/// Async stat line repository over the shared SQLite pool.
pub struct SqliteStatsRepository {
    db: Arc<DbManager>,
}

impl SqliteStatsRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn list_by_game(&self, game_id: i64) -> Result<Vec<PlayerStatLine>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Vec<PlayerStatLine>> {
            let conn = db.get_connection()?;
            list_stats_by_game(&conn, game_id).map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// The key is (player_id, game_id); a conflicting insert updates the stored
/// row in place, so concurrent upserts converge on a single line.
const UPSERT_STAT_LINE_SQL: &str = "INSERT INTO player_stats (
        player_id, game_id, points, rebounds, assists, steals, blocks, fouls, turnovers, minutes_played
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT (player_id, game_id)
    DO UPDATE SET
        points = excluded.points,
        rebounds = excluded.rebounds,
        assists = excluded.assists,
        steals = excluded.steals,
        blocks = excluded.blocks,
        fouls = excluded.fouls,
        turnovers = excluded.turnovers,
        minutes_played = excluded.minutes_played,
        updated_at = strftime('%s','now')
    RETURNING id, player_id, game_id, points, rebounds, assists, steals, blocks, fouls, turnovers,
              minutes_played, created_at, updated_at";

const LIST_STATS_BY_GAME_SQL: &str =
    "SELECT id, player_id, game_id, points, rebounds, assists, steals, blocks, fouls, turnovers,
            minutes_played, created_at, updated_at
     FROM player_stats WHERE game_id = ?1 ORDER BY id";

pub(crate) fn upsert_stat_line(
    conn: &Connection,
    line: &NewStatLine,
) -> rusqlite::Result<PlayerStatLine> {
    conn.query_row(
        UPSERT_STAT_LINE_SQL,
        params![
            line.player_id,
            line.game_id,
            line.points,
            line.rebounds,
            line.assists,
            line.steals,
            line.blocks,
            line.fouls,
            line.turnovers,
            line.minutes_played
        ],
        map_stat_line_row,
    )
}

pub(crate) fn list_stats_by_game(
    conn: &Connection,
    game_id: i64,
) -> rusqlite::Result<Vec<PlayerStatLine>> {
    let mut stmt = conn.prepare(LIST_STATS_BY_GAME_SQL)?;
    let rows = stmt.query_map(params![game_id], map_stat_line_row)?;
    rows.collect()
}

fn map_stat_line_row(row: &Row<'_>) -> rusqlite::Result<PlayerStatLine> {
    Ok(PlayerStatLine {
        id: row.get(0)?,
        player_id: row.get(1)?,
        game_id: row.get(2)?,
        points: row.get(3)?,
        rebounds: row.get(4)?,
        assists: row.get(5)?,
        steals: row.get(6)?,
        blocks: row.get(7)?,
        fouls: row.get(8)?,
        turnovers: row.get(9)?,
        minutes_played: row.get(10)?,
        created_at: timestamp_from_epoch(11, row.get(11)?)?,
        updated_at: timestamp_from_epoch(12, row.get(12)?)?,
    })
}

#[cfg(test)]
mod tests {
    use courtside_domain::CourtsideError;
    use tempfile::TempDir;

    use super::*;
    use crate::database::testing::{finished_game, seed_game, seed_player, seed_team, setup_manager};

    fn setup() -> (SqliteStatsRepository, Arc<DbManager>, TempDir) {
        let (manager, temp_dir) = setup_manager();
        let repo = SqliteStatsRepository::new(manager.clone());
        (repo, manager, temp_dir)
    }

    fn seed_pair(manager: &Arc<DbManager>) -> (i64, i64) {
        let conn = manager.get_connection().expect("connection");
        let team_id = seed_team(&conn, "Home");
        let rival_id = seed_team(&conn, "Away");
        let player_id = seed_player(&conn, team_id);
        let game_id = seed_game(&conn, &finished_game("2023-24", team_id, rival_id));
        (player_id, game_id)
    }

    fn line(player_id: i64, game_id: i64, points: i64) -> NewStatLine {
        NewStatLine {
            player_id,
            game_id,
            points,
            rebounds: 4,
            assists: 6,
            steals: 1,
            blocks: 0,
            fouls: 2,
            turnovers: 3,
            minutes_played: 36.5,
        }
    }

    // A second upsert for the same (player, game) pair updates in place;
    // listing the game still returns a single line.
    #[tokio::test(flavor = "multi_thread")]
    async fn upsert_is_keyed_on_player_and_game() {
        let (repo, manager, _temp_dir) = setup();
        let (player_id, game_id) = seed_pair(&manager);

        let conn = manager.get_connection().expect("connection");
        let first = upsert_stat_line(&conn, &line(player_id, game_id, 10)).expect("first upsert");
        assert_eq!(first.points, 10);

        let second = upsert_stat_line(&conn, &line(player_id, game_id, 22)).expect("second upsert");
        assert_eq!(second.points, 22);
        assert_eq!(second.id, first.id);

        let lines = repo.list_by_game(game_id).await.expect("list");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].points, 22);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn list_empty_game_is_ok() {
        let (repo, manager, _temp_dir) = setup();
        let (_player_id, game_id) = seed_pair(&manager);

        let lines = repo.list_by_game(game_id).await.expect("list");
        assert!(lines.is_empty());
    }

    #[test]
    fn upsert_with_unknown_references_is_conflict() {
        let (_repo, manager, _temp_dir) = setup();
        let conn = manager.get_connection().expect("connection");
        let err = upsert_stat_line(&conn, &line(123_456, 654_321, 1))
            .map_err(crate::errors::map_sqlite_error)
            .expect_err("fk violation");
        assert!(matches!(err, CourtsideError::Conflict));
    }

    #[test]
    fn round_trips_fractional_minutes() {
        let (_repo, manager, _temp_dir) = setup();
        let (player_id, game_id) = seed_pair(&manager);
        let conn = manager.get_connection().expect("connection");
        let stored = upsert_stat_line(&conn, &line(player_id, game_id, 10)).expect("upsert");
        assert!((stored.minutes_played - 36.5).abs() < 1e-9);
    }
}
