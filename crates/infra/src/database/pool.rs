//! SQLite connection pool helpers.

use std::path::Path;
use std::time::Duration;

use courtside_domain::Result;
use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::map_pool_error;

pub(crate) type SqlitePool = r2d2::Pool<SqliteConnectionManager>;
pub(crate) type SqliteConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Build a pool whose connections enforce foreign keys and use WAL mode
/// with a busy timeout, so concurrent writers queue instead of failing.
pub(crate) fn create_pool(path: &Path, max_size: u32) -> Result<SqlitePool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;",
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)
    });
    r2d2::Pool::builder().max_size(max_size.max(1)).build(manager).map_err(map_pool_error)
}
