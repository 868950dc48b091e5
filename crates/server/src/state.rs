//! Shared application state: the use-case services wired to SQLite.

use std::sync::Arc;

use courtside_core::{
    GameService, Pinger, PlayerService, StatsService, TeamService,
};
use courtside_infra::{
    DbManager, SqliteGameRepository, SqlitePinger, SqlitePlayerRepository, SqliteStatsRepository,
    SqliteTeamRepository, SqliteTxManager,
};

#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<TeamService<SqliteTxManager>>,
    pub players: Arc<PlayerService<SqliteTxManager>>,
    pub games: Arc<GameService<SqliteTxManager>>,
    pub stats: Arc<StatsService<SqliteTxManager>>,
    pub pinger: Arc<dyn Pinger>,
}

impl AppState {
    /// Wire every service to the shared database manager.
    pub fn from_manager(db: Arc<DbManager>) -> Self {
        let tx = Arc::new(SqliteTxManager::new(Arc::clone(&db)));
        Self {
            teams: Arc::new(TeamService::new(
                Arc::new(SqliteTeamRepository::new(Arc::clone(&db))),
                Arc::clone(&tx),
            )),
            players: Arc::new(PlayerService::new(
                Arc::new(SqlitePlayerRepository::new(Arc::clone(&db))),
                Arc::clone(&tx),
            )),
            games: Arc::new(GameService::new(
                Arc::new(SqliteGameRepository::new(Arc::clone(&db))),
                Arc::clone(&tx),
            )),
            stats: Arc::new(StatsService::new(
                Arc::new(SqliteStatsRepository::new(Arc::clone(&db))),
                Arc::clone(&tx),
            )),
            pinger: Arc::new(SqlitePinger::new(db)),
        }
    }
}
