//! Transaction manager implementing the unit-of-work contract.
//!
//! Each invocation is one-shot: begin, run the unit of work against an
//! explicit session token, then commit on Ok or roll back on Err. The
//! rusqlite transaction guard rolls back on drop, so an early return or a
//! panic inside the unit of work can never leave the transaction open.

use std::sync::Arc;

use async_trait::async_trait;
use courtside_core::{TxManager, TxSession};
use courtside_domain::{
    Game, NewGame, NewPlayer, NewStatLine, NewTeam, Player, PlayerStatLine, Result, Team,
};
use rusqlite::Transaction;
use tokio::task;
use tracing::warn;

use super::manager::DbManager;
use super::{game_repository, player_repository, stats_repository, team_repository};
use crate::errors::{map_join_error, map_sqlite_error};

/// SQLite transaction manager over the shared pool.
pub struct SqliteTxManager {
    db: Arc<DbManager>,
}

impl SqliteTxManager {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TxManager for SqliteTxManager {
    async fn within_tx<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn TxSession) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<T> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sqlite_error)?;

            let outcome = {
                let mut session = SqliteTxSession { tx: &tx };
                work(&mut session)
            };

            match outcome {
                Ok(value) => {
                    if let Err(commit_err) = tx.commit() {
                        // The commit consumed the guard; make sure nothing
                        // stays open on this connection before reporting.
                        if let Err(rollback_err) = conn.execute_batch("ROLLBACK") {
                            warn!(error = %rollback_err, "rollback after failed commit also failed");
                        }
                        return Err(map_sqlite_error(commit_err));
                    }
                    Ok(value)
                }
                Err(err) => {
                    // Unit-of-work errors pass through unreclassified;
                    // dropping the guard rolls the transaction back.
                    drop(tx);
                    Err(err)
                }
            }
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Session bound to one open transaction. All storage calls here execute on
/// the same connection and commit or roll back together.
struct SqliteTxSession<'conn> {
    tx: &'conn Transaction<'conn>,
}

impl TxSession for SqliteTxSession<'_> {
    fn team_exists(&mut self, id: i64) -> Result<bool> {
        team_repository::team_exists(self.tx, id).map_err(map_sqlite_error)
    }

    fn player_exists(&mut self, id: i64) -> Result<bool> {
        player_repository::player_exists(self.tx, id).map_err(map_sqlite_error)
    }

    fn game_exists(&mut self, id: i64) -> Result<bool> {
        game_repository::game_exists(self.tx, id).map_err(map_sqlite_error)
    }

    fn create_team(&mut self, team: NewTeam) -> Result<Team> {
        team_repository::insert_team(self.tx, &team).map_err(map_sqlite_error)
    }

    fn create_player(&mut self, player: NewPlayer) -> Result<Player> {
        player_repository::insert_player(self.tx, &player).map_err(map_sqlite_error)
    }

    fn create_game(&mut self, game: NewGame) -> Result<Game> {
        game_repository::insert_game(self.tx, &game).map_err(map_sqlite_error)
    }

    fn upsert_stat_line(&mut self, line: NewStatLine) -> Result<PlayerStatLine> {
        stats_repository::upsert_stat_line(self.tx, &line).map_err(map_sqlite_error)
    }
}
