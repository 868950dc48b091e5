//! Route table.

use axum::routing::get;
use axum::Router;

use crate::handlers::{docs, games, health, players, stats, teams};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::liveness))
        .route("/readyz", get(health::readiness))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(docs::index))
        .route("/teams", axum::routing::post(teams::create).get(teams::list))
        .route("/teams/{team_id}", get(teams::get_by_id))
        .route("/teams/{team_id}/players", get(players::list_by_team))
        .route("/teams/{team_id}/aggregates", get(teams::aggregates))
        // Compatibility alias supporting the alternative path shape.
        .route("/teams/{team_id}/stats/aggregate", get(teams::aggregates))
        .route("/players", axum::routing::post(players::create))
        .route("/players/{player_id}", get(players::get_by_id))
        .route("/players/{player_id}/aggregates", get(players::aggregates))
        .route("/players/{player_id}/stats/aggregate", get(players::aggregates))
        .route("/games", axum::routing::post(games::create).get(games::list))
        .route("/games/{game_id}", get(games::get_by_id))
        .route("/games/{game_id}/stats", get(stats::list_by_game))
        .route("/stats", axum::routing::post(stats::upsert))
}
