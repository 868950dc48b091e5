//! HTTP handlers: parse, delegate, map. No business rules live here.

pub mod docs;
pub mod games;
pub mod health;
pub mod players;
pub mod stats;
pub mod teams;

use axum::extract::rejection::JsonRejection;
use courtside_domain::Page;
use serde::Deserialize;

use crate::response::{field_error, ApiError};

/// Parse a path id, surfacing failures as a field error the way every
/// other invalid input is reported.
pub(crate) fn parse_id(field: &'static str, raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| field_error(field, "must be a valid integer"))
}

pub(crate) fn invalid_body(rejection: &JsonRejection) -> ApiError {
    field_error("body", &format!("must be a valid JSON document: {rejection}"))
}

/// Common limit/offset query parameters; defaults are resolved by the
/// service layer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PageQuery {
    pub limit: i64,
    pub offset: i64,
}

impl PageQuery {
    pub(crate) fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Season/career selector shared by the aggregate endpoints. The two
/// parameters are mutually exclusive; an empty value counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AggregateQuery {
    pub season: Option<String>,
    pub career: Option<String>,
}

impl AggregateQuery {
    pub(crate) fn season(&self) -> Result<Option<&str>, ApiError> {
        let season = self.season.as_deref().filter(|s| !s.is_empty());
        let career = self.career.as_deref().filter(|s| !s.is_empty());
        if season.is_some() && career.is_some() {
            return Err(field_error(
                "query",
                "'season' and 'career' parameters are mutually exclusive",
            ));
        }
        Ok(season)
    }
}
