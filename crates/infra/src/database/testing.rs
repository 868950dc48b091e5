//! Seed helpers shared by the storage tests.

use std::sync::Arc;

use rusqlite::{params, Connection};
use tempfile::TempDir;

use super::manager::DbManager;

pub(crate) fn setup_manager() -> (Arc<DbManager>, TempDir) {
    let temp_dir = TempDir::new().expect("tempdir created");
    let db_path = temp_dir.path().join("courtside.db");

    let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
    manager.run_migrations().expect("migrations run");
    (manager, temp_dir)
}

pub(crate) fn seed_team(conn: &Connection, name: &str) -> i64 {
    conn.query_row("INSERT INTO teams (name) VALUES (?1) RETURNING id", params![name], |row| {
        row.get(0)
    })
    .expect("team seeded")
}

pub(crate) fn seed_player(conn: &Connection, team_id: i64) -> i64 {
    conn.query_row(
        "INSERT INTO players (team_id, first_name, last_name, position)
         VALUES (?1, 'Test', 'Player', 'SF') RETURNING id",
        params![team_id],
        |row| row.get(0),
    )
    .expect("player seeded")
}

pub(crate) struct GameSeed {
    pub season: String,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub status: String,
}

pub(crate) fn finished_game(season: &str, home_team_id: i64, away_team_id: i64) -> GameSeed {
    GameSeed { season: season.into(), home_team_id, away_team_id, status: "finished".into() }
}

pub(crate) fn seed_game(conn: &Connection, game: &GameSeed) -> i64 {
    conn.query_row(
        "INSERT INTO games (season, date, home_team_id, away_team_id, status)
         VALUES (?1, 1700000000, ?2, ?3, ?4) RETURNING id",
        params![game.season, game.home_team_id, game.away_team_id, game.status],
        |row| row.get(0),
    )
    .expect("game seeded")
}

pub(crate) fn seed_stat_line(conn: &Connection, player_id: i64, game_id: i64, points: i64) -> i64 {
    conn.query_row(
        "INSERT INTO player_stats (player_id, game_id, points, minutes_played)
         VALUES (?1, ?2, ?3, 30.0) RETURNING id",
        params![player_id, game_id, points],
        |row| row.get(0),
    )
    .expect("stat line seeded")
}
