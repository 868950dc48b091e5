//! Port interfaces for the storage engine.
//!
//! These traits define the boundaries between core business logic and the
//! storage implementation. Reads go through the async repositories; all
//! writes go through the transaction coordinator so their existence checks
//! and the write itself commit or roll back together.

use async_trait::async_trait;
use courtside_domain::{
    Game, NewGame, NewPlayer, NewStatLine, NewTeam, Page, PageResult, Player,
    PlayerAggregatedStats, PlayerStatLine, Result, Team, TeamAggregatedStats,
};

/// Persistence operations for teams. Implementations surface domain error
/// kinds (not found / already exists / conflict), never driver errors.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Team>;

    async fn list(&self, page: Page) -> Result<PageResult<Team>>;

    /// Lightweight existence probe used by the validation pipeline.
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Win/loss record and scoring differentials over finished games.
    /// `None` season means career stats across all seasons.
    async fn aggregated_stats(
        &self,
        team_id: i64,
        season: Option<String>,
    ) -> Result<TeamAggregatedStats>;
}

/// Persistence operations for players.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Player>;

    async fn list_by_team(&self, team_id: i64, page: Page) -> Result<PageResult<Player>>;

    async fn exists(&self, id: i64) -> Result<bool>;

    /// Totals and per-game averages. `None` season means career stats.
    async fn aggregated_stats(
        &self,
        player_id: i64,
        season: Option<String>,
    ) -> Result<PlayerAggregatedStats>;
}

/// Persistence operations for games.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Game>;

    async fn list(&self, page: Page) -> Result<PageResult<Game>>;

    async fn exists(&self, id: i64) -> Result<bool>;
}

/// Read operations for per-game stat lines.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn list_by_game(&self, game_id: i64) -> Result<Vec<PlayerStatLine>>;
}

/// Minimal readiness probe, decoupled from storage implementation details.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self) -> Result<()>;
}

/// Executor bound to one open transaction.
///
/// A unit of work receives this token explicitly; every call on it
/// participates in the same transaction and becomes visible atomically on
/// commit. Probes run here so a reference checked during validation cannot
/// be deleted out from under the subsequent write.
pub trait TxSession {
    fn team_exists(&mut self, id: i64) -> Result<bool>;
    fn player_exists(&mut self, id: i64) -> Result<bool>;
    fn game_exists(&mut self, id: i64) -> Result<bool>;

    fn create_team(&mut self, team: NewTeam) -> Result<Team>;
    fn create_player(&mut self, player: NewPlayer) -> Result<Player>;
    fn create_game(&mut self, game: NewGame) -> Result<Game>;

    /// Insert-or-update keyed on (player_id, game_id).
    fn upsert_stat_line(&mut self, line: NewStatLine) -> Result<PlayerStatLine>;
}

/// Transactional execution of a unit of work.
///
/// Commit happens iff the unit of work returns Ok; any Err rolls back.
/// Implementations must not reclassify the error a unit of work returns.
#[async_trait]
pub trait TxManager: Send + Sync {
    async fn within_tx<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn TxSession) -> Result<T> + Send + 'static;
}
