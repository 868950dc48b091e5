//! SQLite storage engine.
//!
//! Repository implementations run their blocking rusqlite work on the
//! `spawn_blocking` pool; queries are shared as free functions over
//! `&Connection` so the transaction session reuses them verbatim.

mod game_repository;
mod manager;
mod player_repository;
mod pool;
mod stats_repository;
mod team_repository;
mod tx_manager;

#[cfg(test)]
pub(crate) mod testing;

use chrono::{DateTime, Utc};

pub use manager::{DbManager, SqlitePinger};
pub use game_repository::SqliteGameRepository;
pub use player_repository::SqlitePlayerRepository;
pub use stats_repository::SqliteStatsRepository;
pub use team_repository::SqliteTeamRepository;
pub use tx_manager::SqliteTxManager;

/// Convert an epoch-seconds column into a UTC timestamp, reporting the
/// column index on failure the way rusqlite row mappers expect.
pub(crate) fn timestamp_from_epoch(col: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            col,
            rusqlite::types::Type::Integer,
            format!("timestamp {secs} out of range").into(),
        )
    })
}

/// Map a stored text value through a parser, reporting the column index on
/// failure. Used for the position and status columns.
pub(crate) fn parse_text_column<T>(
    col: usize,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    parse(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            col,
            rusqlite::types::Type::Text,
            format!("unrecognized value {raw:?}").into(),
        )
    })
}
