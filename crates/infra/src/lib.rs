//! # Courtside Infra
//!
//! Infrastructure layer - storage engine, configuration and telemetry.
//!
//! This crate contains:
//! - The SQLite connection pool and schema management
//! - Repository implementations of the `courtside-core` storage ports
//! - The transaction manager backing the unit-of-work contract
//! - Configuration loading (environment first, TOML file fallback)
//! - Tracing subscriber initialization

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;

pub use database::{
    DbManager, SqliteGameRepository, SqlitePinger, SqlitePlayerRepository,
    SqliteStatsRepository, SqliteTeamRepository, SqliteTxManager,
};
