//! Team use cases: validation + orchestration, no transport or SQL details.

use std::sync::Arc;
use std::time::Instant;

use courtside_domain::{
    NewTeam, Page, PageResult, Result, Team, TeamAggregatedStats, ValidationError,
};
use tracing::{debug, error, info};

use crate::storage_ports::{TeamRepository, TxManager};
use crate::validation::{is_valid_season, normalize_page};

pub struct TeamService<TM> {
    teams: Arc<dyn TeamRepository>,
    tx: Arc<TM>,
}

impl<TM: TxManager> TeamService<TM> {
    pub fn new(teams: Arc<dyn TeamRepository>, tx: Arc<TM>) -> Self {
        Self { teams, tx }
    }

    /// Create a team. The name is trimmed and must be 2-50 characters;
    /// uniqueness is enforced by the store and surfaces as `AlreadyExists`.
    pub async fn create_team(&self, name: &str) -> Result<Team> {
        let started = Instant::now();
        let name = name.trim().to_owned();

        let mut verr = ValidationError::new();
        if name.is_empty() {
            verr.push("name", "must not be empty");
        } else {
            let len = name.chars().count();
            if !(2..=50).contains(&len) {
                verr.push("name", "length must be between 2 and 50");
            }
        }
        if let Err(err) = verr.into_result() {
            debug!(error = %err, "team validation failed");
            return Err(err);
        }

        let team = self
            .tx
            .within_tx(move |session| session.create_team(NewTeam { name }))
            .await
            .map_err(|err| {
                error!(error = %err, "create team failed");
                err
            })?;
        info!(
            took_ms = started.elapsed().as_millis() as u64,
            team_id = team.id,
            "team created"
        );
        Ok(team)
    }

    pub async fn get_team(&self, id: i64) -> Result<Team> {
        let mut verr = ValidationError::new();
        if id <= 0 {
            verr.push("id", "must be > 0");
        }
        verr.into_result()?;
        self.teams.get_by_id(id).await
    }

    pub async fn list_teams(&self, page: Page) -> Result<PageResult<Team>> {
        let page = normalize_page(page);
        self.teams.list(page).await.map_err(|err| {
            error!(error = %err, limit = page.limit, offset = page.offset, "list teams failed");
            err
        })
    }

    /// Aggregated win/loss record and scoring differentials for one team,
    /// optionally restricted to a season. A missing season means career.
    pub async fn aggregated_stats(
        &self,
        team_id: i64,
        season: Option<&str>,
    ) -> Result<TeamAggregatedStats> {
        let mut verr = ValidationError::new();
        if team_id <= 0 {
            verr.push("id", "must be > 0");
        }
        if let Some(season) = season {
            if !is_valid_season(season) {
                verr.push("season", "must be in YYYY-YY format");
            }
        }
        verr.into_result()?;

        let season = season.map(|s| s.trim().to_owned());
        self.teams.aggregated_stats(team_id, season).await.map_err(|err| {
            error!(error = %err, team_id, "failed to get team aggregated stats");
            err
        })
    }
}
