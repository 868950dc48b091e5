//! Shared validation helpers used by the use-case services.

use courtside_domain::Page;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const DEFAULT_PAGE_LIMIT: i64 = 50;
pub(crate) const MAX_PAGE_LIMIT: i64 = 100;

static SEASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("season regex should compile"));

/// Check that a season label conforms to the `YYYY-YY` format after trim.
pub fn is_valid_season(season: &str) -> bool {
    SEASON_RE.is_match(season.trim())
}

/// Clamp a requested page into the supported window.
pub(crate) fn normalize_page(page: Page) -> Page {
    let mut limit = page.limit;
    let mut offset = page.offset;
    if limit <= 0 {
        limit = DEFAULT_PAGE_LIMIT;
    } else if limit > MAX_PAGE_LIMIT {
        limit = MAX_PAGE_LIMIT;
    }
    if offset < 0 {
        offset = 0;
    }
    Page { limit, offset }
}
