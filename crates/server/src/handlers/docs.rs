//! Minimal machine-readable route catalog.

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub(crate) async fn index() -> impl IntoResponse {
    Json(json!({
        "service": "courtside",
        "endpoints": [
            { "method": "POST", "path": "/api/teams" },
            { "method": "GET", "path": "/api/teams" },
            { "method": "GET", "path": "/api/teams/{team_id}" },
            { "method": "GET", "path": "/api/teams/{team_id}/players" },
            { "method": "GET", "path": "/api/teams/{team_id}/aggregates", "query": "season=YYYY-YY | career=true" },
            { "method": "POST", "path": "/api/players" },
            { "method": "GET", "path": "/api/players/{player_id}" },
            { "method": "GET", "path": "/api/players/{player_id}/aggregates", "query": "season=YYYY-YY | career=true" },
            { "method": "POST", "path": "/api/games" },
            { "method": "GET", "path": "/api/games" },
            { "method": "GET", "path": "/api/games/{game_id}" },
            { "method": "GET", "path": "/api/games/{game_id}/stats" },
            { "method": "POST", "path": "/api/stats" },
            { "method": "GET", "path": "/healthz" },
            { "method": "GET", "path": "/readyz" }
        ]
    }))
}
