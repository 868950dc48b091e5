//! In-memory fakes for service tests.
//!
//! The fakes commit unconditionally and record what they were asked to do;
//! rollback behavior is covered by the storage-layer transaction tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use courtside_domain::{
    CourtsideError, Game, NewGame, NewPlayer, NewStatLine, NewTeam, Page, PageResult, Player,
    PlayerAggregatedStats, PlayerStatLine, Result, Team, TeamAggregatedStats,
};

use crate::storage_ports::{
    GameRepository, PlayerRepository, StatsRepository, TeamRepository, TxManager, TxSession,
};

#[derive(Default)]
struct RecordedCalls {
    last_page: Option<Page>,
    last_team_stats_season: Option<Option<String>>,
    last_player_stats_season: Option<Option<String>>,
    last_stats_game_id: Option<i64>,
}

/// Read-side fake implementing every repository port.
#[derive(Default)]
pub(crate) struct FakeRepos {
    calls: Mutex<RecordedCalls>,
}

impl FakeRepos {
    pub(crate) fn last_page(&self) -> Option<Page> {
        self.calls.lock().expect("calls lock").last_page
    }

    pub(crate) fn last_team_stats_season(&self) -> Option<String> {
        self.calls.lock().expect("calls lock").last_team_stats_season.clone().flatten()
    }

    pub(crate) fn last_player_stats_season(&self) -> Option<String> {
        self.calls.lock().expect("calls lock").last_player_stats_season.clone().flatten()
    }

    pub(crate) fn last_stats_game_id(&self) -> Option<i64> {
        self.calls.lock().expect("calls lock").last_stats_game_id
    }
}

#[async_trait]
impl TeamRepository for FakeRepos {
    async fn get_by_id(&self, _id: i64) -> Result<Team> {
        Err(CourtsideError::NotFound)
    }

    async fn list(&self, page: Page) -> Result<PageResult<Team>> {
        self.calls.lock().expect("calls lock").last_page = Some(page);
        Ok(PageResult::default())
    }

    async fn exists(&self, _id: i64) -> Result<bool> {
        Ok(false)
    }

    async fn aggregated_stats(
        &self,
        _team_id: i64,
        season: Option<String>,
    ) -> Result<TeamAggregatedStats> {
        self.calls.lock().expect("calls lock").last_team_stats_season = Some(season);
        Ok(TeamAggregatedStats::default())
    }
}

#[async_trait]
impl PlayerRepository for FakeRepos {
    async fn get_by_id(&self, _id: i64) -> Result<Player> {
        Err(CourtsideError::NotFound)
    }

    async fn list_by_team(&self, _team_id: i64, page: Page) -> Result<PageResult<Player>> {
        self.calls.lock().expect("calls lock").last_page = Some(page);
        Ok(PageResult::default())
    }

    async fn exists(&self, _id: i64) -> Result<bool> {
        Ok(false)
    }

    async fn aggregated_stats(
        &self,
        _player_id: i64,
        season: Option<String>,
    ) -> Result<PlayerAggregatedStats> {
        self.calls.lock().expect("calls lock").last_player_stats_season = Some(season);
        Ok(PlayerAggregatedStats::default())
    }
}

#[async_trait]
impl GameRepository for FakeRepos {
    async fn get_by_id(&self, _id: i64) -> Result<Game> {
        Err(CourtsideError::NotFound)
    }

    async fn list(&self, page: Page) -> Result<PageResult<Game>> {
        self.calls.lock().expect("calls lock").last_page = Some(page);
        Ok(PageResult::default())
    }

    async fn exists(&self, _id: i64) -> Result<bool> {
        Ok(false)
    }
}

#[async_trait]
impl StatsRepository for FakeRepos {
    async fn list_by_game(&self, game_id: i64) -> Result<Vec<PlayerStatLine>> {
        self.calls.lock().expect("calls lock").last_stats_game_id = Some(game_id);
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct FakeState {
    teams: HashSet<i64>,
    players: HashSet<i64>,
    games: HashSet<i64>,
    team_names: HashSet<String>,
    created_teams: Vec<String>,
    next_id: i64,
    invoked: bool,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Write-side fake: a transaction manager over an in-memory state.
#[derive(Default)]
pub(crate) struct FakeTx {
    state: Mutex<FakeState>,
}

impl FakeTx {
    pub(crate) fn seed_team(&self, id: i64) {
        self.state.lock().expect("state lock").teams.insert(id);
    }

    pub(crate) fn seed_player(&self, id: i64) {
        self.state.lock().expect("state lock").players.insert(id);
    }

    pub(crate) fn seed_game(&self, id: i64) {
        self.state.lock().expect("state lock").games.insert(id);
    }

    pub(crate) fn seed_team_name(&self, name: &str) {
        self.state.lock().expect("state lock").team_names.insert(name.to_owned());
    }

    pub(crate) fn created_teams(&self) -> Vec<String> {
        self.state.lock().expect("state lock").created_teams.clone()
    }

    pub(crate) fn was_invoked(&self) -> bool {
        self.state.lock().expect("state lock").invoked
    }
}

struct FakeSession<'a> {
    state: &'a mut FakeState,
}

impl TxSession for FakeSession<'_> {
    fn team_exists(&mut self, id: i64) -> Result<bool> {
        Ok(self.state.teams.contains(&id))
    }

    fn player_exists(&mut self, id: i64) -> Result<bool> {
        Ok(self.state.players.contains(&id))
    }

    fn game_exists(&mut self, id: i64) -> Result<bool> {
        Ok(self.state.games.contains(&id))
    }

    fn create_team(&mut self, team: NewTeam) -> Result<Team> {
        if !self.state.team_names.insert(team.name.clone()) {
            return Err(CourtsideError::AlreadyExists);
        }
        let id = self.state.next_id();
        self.state.teams.insert(id);
        self.state.created_teams.push(team.name.clone());
        let now = Utc::now();
        Ok(Team { id, name: team.name, created_at: now, updated_at: now })
    }

    fn create_player(&mut self, player: NewPlayer) -> Result<Player> {
        if !self.state.teams.contains(&player.team_id) {
            return Err(CourtsideError::Conflict);
        }
        let id = self.state.next_id();
        self.state.players.insert(id);
        let now = Utc::now();
        Ok(Player {
            id,
            team_id: player.team_id,
            first_name: player.first_name,
            last_name: player.last_name,
            position: player.position,
            created_at: now,
            updated_at: now,
        })
    }

    fn create_game(&mut self, game: NewGame) -> Result<Game> {
        let id = self.state.next_id();
        self.state.games.insert(id);
        let now = Utc::now();
        Ok(Game {
            id,
            season: game.season,
            date: game.date,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            status: game.status,
            created_at: now,
            updated_at: now,
        })
    }

    fn upsert_stat_line(&mut self, line: NewStatLine) -> Result<PlayerStatLine> {
        let id = self.state.next_id();
        let now = Utc::now();
        Ok(PlayerStatLine {
            id,
            player_id: line.player_id,
            game_id: line.game_id,
            points: line.points,
            rebounds: line.rebounds,
            assists: line.assists,
            steals: line.steals,
            blocks: line.blocks,
            fouls: line.fouls,
            turnovers: line.turnovers,
            minutes_played: line.minutes_played,
            created_at: now,
            updated_at: now,
        })
    }
}

#[async_trait]
impl TxManager for FakeTx {
    async fn within_tx<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn TxSession) -> Result<T> + Send + 'static,
    {
        let mut state = self.state.lock().expect("state lock");
        state.invoked = true;
        let mut session = FakeSession { state: &mut state };
        work(&mut session)
    }
}
