//! Conversions from storage-driver errors into domain errors.
//!
//! Classification happens exactly once, here; layers above the repositories
//! only ever see the domain taxonomy.

use courtside_domain::CourtsideError;
use rusqlite::ffi;
use tokio::task::JoinError;

/// Translate a rusqlite error into the domain taxonomy. Constraint codes
/// are mapped to the kinds callers handle explicitly; everything else
/// surfaces as an opaque database error.
pub(crate) fn map_sqlite_error(err: rusqlite::Error) -> CourtsideError {
    match &err {
        rusqlite::Error::QueryReturnedNoRows => CourtsideError::NotFound,
        rusqlite::Error::SqliteFailure(code, message) => match code.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                CourtsideError::AlreadyExists
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => CourtsideError::Conflict,
            _ => CourtsideError::Database(format!(
                "sqlite failure {:?} (code {}): {}",
                code.code,
                code.extended_code,
                message.clone().unwrap_or_default()
            )),
        },
        _ => CourtsideError::Database(err.to_string()),
    }
}

pub(crate) fn map_pool_error(err: r2d2::Error) -> CourtsideError {
    CourtsideError::Database(format!("connection pool error: {err}"))
}

pub(crate) fn map_join_error(err: JoinError) -> CourtsideError {
    if err.is_cancelled() {
        CourtsideError::Internal("blocking storage task cancelled".into())
    } else {
        CourtsideError::Internal(format!("blocking storage task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};

    use super::*;

    fn constraint_failure(extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            FfiError { code: ErrorCode::ConstraintViolation, extended_code },
            Some("constraint failed".into()),
        )
    }

    #[test]
    fn unique_violation_maps_to_already_exists() {
        let mapped = map_sqlite_error(constraint_failure(ffi::SQLITE_CONSTRAINT_UNIQUE));
        assert!(matches!(mapped, CourtsideError::AlreadyExists));
    }

    #[test]
    fn foreign_key_violation_maps_to_conflict() {
        let mapped = map_sqlite_error(constraint_failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY));
        assert!(matches!(mapped, CourtsideError::Conflict));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped = map_sqlite_error(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(mapped, CourtsideError::NotFound));
    }

    #[test]
    fn other_failures_map_to_database_error() {
        let err = rusqlite::Error::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );
        match map_sqlite_error(err) {
            CourtsideError::Database(msg) => assert!(msg.contains("locked")),
            other => panic!("expected database error, got {other:?}"),
        }
    }
}
