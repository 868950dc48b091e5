//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for Courtside.
///
/// The first four variants form the contract with callers: handlers map
/// them to transport status codes and must be able to tell them apart.
/// Storage-layer detail is classified into this taxonomy once, at the
/// repository boundary, and propagated unchanged above it.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CourtsideError {
    /// One or more fields failed structural or existence validation.
    /// Carries the full list of field errors, never just the first.
    #[error("invalid input: {0}")]
    InvalidInput(ValidationError),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("conflict")]
    Conflict,

    #[error("database error: {0}")]
    Database(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CourtsideError {
    /// Field errors carried by an `InvalidInput`, empty for other kinds.
    pub fn field_errors(&self) -> &[crate::validation::FieldError] {
        match self {
            Self::InvalidInput(v) => &v.errors,
            _ => &[],
        }
    }
}

/// Result type alias for Courtside operations
pub type Result<T> = std::result::Result<T, CourtsideError>;
