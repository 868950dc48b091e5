//! Stat line use cases.

use std::sync::Arc;
use std::time::Instant;

use courtside_domain::{NewStatLine, PlayerStatLine, Result, ValidationError};
use tracing::{debug, error, info};

use crate::storage_ports::{StatsRepository, TxManager};

const MAX_FOULS: i64 = 6;
const MAX_MINUTES: f64 = 48.0;

pub struct StatsService<TM> {
    stats: Arc<dyn StatsRepository>,
    tx: Arc<TM>,
}

impl<TM: TxManager> StatsService<TM> {
    pub fn new(stats: Arc<dyn StatsRepository>, tx: Arc<TM>) -> Self {
        Self { stats, tx }
    }

    /// Record or replace a player's stat line for one game, keyed on
    /// (player_id, game_id). A second call for the same pair updates the
    /// stored line in place.
    pub async fn upsert_stat_line(&self, line: NewStatLine) -> Result<PlayerStatLine> {
        let started = Instant::now();

        let mut verr = ValidationError::new();
        if line.player_id <= 0 {
            verr.push("player_id", "must be > 0");
        }
        if line.game_id <= 0 {
            verr.push("game_id", "must be > 0");
        }
        // Negative counting stats are never meaningful here.
        for (field, value) in [
            ("points", line.points),
            ("rebounds", line.rebounds),
            ("assists", line.assists),
            ("steals", line.steals),
            ("blocks", line.blocks),
            ("turnovers", line.turnovers),
        ] {
            if value < 0 {
                verr.push(field, "must be >= 0");
            }
        }
        if !(0..=MAX_FOULS).contains(&line.fouls) {
            verr.push("fouls", "must be between 0 and 6");
        }
        if line.minutes_played < 0.0 || line.minutes_played > MAX_MINUTES {
            verr.push("minutes_played", "must be between 0 and 48");
        }
        if let Err(err) = verr.into_result() {
            debug!(
                error = %err,
                player_id = line.player_id,
                game_id = line.game_id,
                "stat line validation failed (structure)"
            );
            return Err(err);
        }

        // Existence checks yield field errors instead of pushing FK
        // violations upward; they run in the same transaction as the write.
        let stored = self
            .tx
            .within_tx(move |session| {
                let mut verr = ValidationError::new();
                if !session.player_exists(line.player_id)? {
                    verr.push("player_id", "player does not exist");
                }
                if !session.game_exists(line.game_id)? {
                    verr.push("game_id", "game does not exist");
                }
                verr.into_result()?;
                session.upsert_stat_line(line)
            })
            .await
            .map_err(|err| {
                error!(
                    error = %err,
                    player_id = line.player_id,
                    game_id = line.game_id,
                    "upsert stat line failed"
                );
                err
            })?;
        info!(
            took_ms = started.elapsed().as_millis() as u64,
            stat_id = stored.id,
            "stat line upserted"
        );
        Ok(stored)
    }

    pub async fn list_stats_by_game(&self, game_id: i64) -> Result<Vec<PlayerStatLine>> {
        let mut verr = ValidationError::new();
        if game_id <= 0 {
            verr.push("game_id", "must be > 0");
        }
        verr.into_result()?;

        self.stats.list_by_game(game_id).await.map_err(|err| {
            error!(error = %err, game_id, "list stats by game failed");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use courtside_domain::CourtsideError;

    use super::*;
    use crate::testing::{FakeRepos, FakeTx};

    fn service() -> (StatsService<FakeTx>, Arc<FakeTx>, Arc<FakeRepos>) {
        let repos = Arc::new(FakeRepos::default());
        let tx = Arc::new(FakeTx::default());
        (StatsService::new(repos.clone(), tx.clone()), tx, repos)
    }

    fn line(player_id: i64, game_id: i64) -> NewStatLine {
        NewStatLine {
            player_id,
            game_id,
            points: 0,
            rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            fouls: 0,
            turnovers: 0,
            minutes_played: 0.0,
        }
    }

    fn field_names(err: &CourtsideError) -> Vec<String> {
        err.field_errors().iter().map(|f| f.field.clone()).collect()
    }

    #[tokio::test]
    async fn upsert_rejects_non_positive_ids() {
        let (svc, _, _) = service();
        let err = svc.upsert_stat_line(line(0, 0)).await.expect_err("bad ids");
        assert_eq!(field_names(&err), vec!["player_id", "game_id"]);
    }

    #[tokio::test]
    async fn upsert_rejects_negative_counters() {
        let (svc, _, _) = service();
        let mut input = line(2, 3);
        input.points = -1;
        input.turnovers = -4;
        let err = svc.upsert_stat_line(input).await.expect_err("negative");
        assert_eq!(field_names(&err), vec!["points", "turnovers"]);
    }

    #[tokio::test]
    async fn upsert_enforces_foul_and_minute_bounds() {
        let (svc, _, _) = service();
        let mut input = line(2, 3);
        input.fouls = 7;
        input.minutes_played = 48.5;
        let err = svc.upsert_stat_line(input).await.expect_err("out of bounds");
        assert_eq!(field_names(&err), vec!["fouls", "minutes_played"]);
    }

    #[tokio::test]
    async fn upsert_accepts_boundary_values() {
        let (svc, tx, _) = service();
        tx.seed_player(2);
        tx.seed_game(3);
        let mut input = line(2, 3);
        input.fouls = 6;
        input.minutes_played = 48.0;
        svc.upsert_stat_line(input).await.expect("boundary values are valid");
    }

    #[tokio::test]
    async fn upsert_reports_missing_references_together() {
        let (svc, _, _) = service();
        let err = svc.upsert_stat_line(line(9, 99)).await.expect_err("missing refs");
        assert_eq!(field_names(&err), vec!["player_id", "game_id"]);
        let messages: Vec<&str> =
            err.field_errors().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["player does not exist", "game does not exist"]);
    }

    #[tokio::test]
    async fn upsert_succeeds_for_existing_references() {
        let (svc, tx, _) = service();
        tx.seed_player(2);
        tx.seed_game(3);
        let mut input = line(2, 3);
        input.points = 10;
        let stored = svc.upsert_stat_line(input).await.expect("upsert succeeds");
        assert_eq!(stored.points, 10);
        assert!(stored.id > 0);
    }

    #[tokio::test]
    async fn list_stats_requires_valid_game_id() {
        let (svc, _, _) = service();
        let err = svc.list_stats_by_game(0).await.expect_err("invalid");
        assert_eq!(field_names(&err), vec!["game_id"]);
    }

    #[tokio::test]
    async fn list_stats_passes_through() {
        let (svc, _, repos) = service();
        let lines = svc.list_stats_by_game(3).await.expect("list succeeds");
        assert!(lines.is_empty());
        assert_eq!(repos.last_stats_game_id(), Some(3));
    }
}
