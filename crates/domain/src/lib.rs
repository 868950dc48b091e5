//! # Courtside Domain
//!
//! Shared domain layer - entities, derived statistics, errors and config.
//!
//! This crate contains:
//! - Domain entities (teams, players, games, stat lines)
//! - Derived aggregated-statistics types
//! - The domain error taxonomy and field-level validation errors
//! - Configuration structs consumed by the infrastructure layer
//!
//! ## Architecture Principles
//! - No database, HTTP, or runtime code
//! - Pure data shapes; behavior lives in `courtside-core`

pub mod config;
pub mod errors;
pub mod types;
pub mod validation;

pub use config::{Config, DatabaseConfig, LogConfig, LogFormat, ServerConfig};
pub use errors::{CourtsideError, Result};
pub use types::{
    Game, GameStatus, NewGame, NewPlayer, NewStatLine, NewTeam, Page, PageResult, Player,
    PlayerAggregatedStats, PlayerStatLine, Position, Team, TeamAggregatedStats,
};
pub use validation::{FieldError, ValidationError};
