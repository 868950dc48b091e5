//! Limit/offset pagination types for listing operations.

use serde::{Deserialize, Serialize};

/// A limit/offset window. Kept intentionally small; filtering belongs to
/// higher layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

/// A page of items plus the total count matching the query, so clients can
/// compute pagination without an extra round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0 }
    }
}
